use futures::future::AbortHandle;

use super::RequestConfig;

/// Handle that aborts the call its config was attached to.
///
/// Cancelling after the call settled does nothing.
#[derive(Clone, Debug)]
pub struct CancelSource {
    handle: AbortHandle,
}

impl CancelSource {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_aborted()
    }
}

/// Attaches a fresh cancellation signal to `config` and returns its source.
/// A signal already present on the config is replaced.
pub fn add_cancel_token(config: &mut RequestConfig) -> CancelSource {
    let (handle, registration) = AbortHandle::new_pair();
    config.cancel = Some(registration);
    CancelSource { handle }
}
