// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod channel_completion_signaling;
pub mod mapper;
pub mod shutdown;
pub mod tokio_runtime;
pub mod work_channel;

use channel_completion_signaling::ChannelCompletionSignaling;
use mapper::{spawn_mapper, Mapper};
use shutdown::CancelOnToken;
use tokio_util::sync::CancellationToken;
use word_count_core::coordinator::Coordinator;

/// Coordinator running tokio-task mappers connected by mpsc channels
pub type ChannelCoordinator =
    Coordinator<Mapper, ChannelCompletionSignaling, fn(usize) -> Mapper, CancelOnToken>;

pub fn channel_coordinator(cancel_token: CancellationToken) -> ChannelCoordinator {
    Coordinator::new(spawn_mapper as fn(usize) -> Mapper, cancel_token.into())
}
