use tokio_util::sync::CancellationToken;
use word_count_core::shutdown_signal::ShutdownSignal;

/// Interrupts a batch once the shared token is cancelled (Ctrl+C in the CLI)
#[derive(Clone, Default)]
pub struct CancelOnToken {
    token: CancellationToken,
}

impl From<CancellationToken> for CancelOnToken {
    fn from(token: CancellationToken) -> Self {
        Self { token }
    }
}

impl ShutdownSignal for CancelOnToken {
    fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
