use crate::channel_completion_signaling::ReportSender;
use crate::tokio_runtime::TokioRuntime;
use crate::work_channel::{work_channel, ChannelWorkReceiver, ChannelWorkSender};
use word_count_core::map_worker::MapWorker;
use word_count_core::mapper::MapAssignment;

/// A worker holds at most one assignment at a time
const WORK_BUFFER: usize = 1;

pub type Mapper = MapWorker<
    ChannelWorkSender<MapAssignment, ReportSender>,
    TokioRuntime,
    ChannelWorkReceiver<MapAssignment, ReportSender>,
    ReportSender,
>;

/// Spawns a mapper task on the current tokio runtime
pub fn spawn_mapper(id: usize) -> Mapper {
    let (work_sender, work_rx) = work_channel(WORK_BUFFER);
    Mapper::new(id, work_sender, work_rx)
}
