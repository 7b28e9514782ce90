//! Navigator for headless clients.

use std::sync::atomic::{AtomicBool, Ordering};
use talentdesk_core::navigation::{LOGIN_PATH, Navigator};

/// Records forced navigation instead of driving a view layer.
///
/// A front end polls [`take_login_request`](Self::take_login_request) to
/// learn that the session was terminated and the login view is due.
#[derive(Debug, Default)]
pub struct TracingNavigator {
    login_requested: AtomicBool,
}

impl TracingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login_requested(&self) -> bool {
        self.login_requested.load(Ordering::SeqCst)
    }

    /// Returns and resets the pending login request.
    pub fn take_login_request(&self) -> bool {
        self.login_requested.swap(false, Ordering::SeqCst)
    }
}

impl Navigator for TracingNavigator {
    fn navigate_to_login(&self) {
        tracing::warn!(target_path = LOGIN_PATH, "Session ended, navigating to login");
        self.login_requested.store(true, Ordering::SeqCst);
    }
}
