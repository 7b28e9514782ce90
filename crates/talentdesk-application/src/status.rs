//! Loading and error bookkeeping shared by every store.

use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use talentdesk_core::Result;

/// A busy indicator lowered by [`LoadingGuard`] on every exit path.
#[derive(Debug, Default)]
pub struct LoadingFlag(AtomicBool);

impl LoadingFlag {
    pub fn get(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn raise(&self) -> LoadingGuard<'_> {
        self.0.store(true, Ordering::SeqCst);
        LoadingGuard { flag: self }
    }
}

pub struct LoadingGuard<'a> {
    flag: &'a LoadingFlag,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.0.store(false, Ordering::SeqCst);
    }
}

/// `loading` plus the message of the last failure.
#[derive(Debug, Default)]
pub struct StoreStatus {
    loading: LoadingFlag,
    error: Mutex<Option<String>>,
}

impl StoreStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// Message of the last failed operation, until the next one starts.
    pub fn error(&self) -> Option<String> {
        self.error.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn clear_error(&self) {
        *self.error.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    fn record_error(&self, message: String) {
        *self.error.lock().unwrap_or_else(|e| e.into_inner()) = Some(message);
    }

    /// Runs `operation` under the store's own `loading` flag.
    pub async fn track<T, F>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.track_with(&self.loading, operation).await
    }

    /// Runs `operation` under `flag`.
    ///
    /// Clears the previous error first; records the failure message before
    /// re-raising it.
    pub async fn track_with<T, F>(&self, flag: &LoadingFlag, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let _guard = flag.raise();
        self.clear_error();

        let result = operation.await;
        if let Err(e) = &result {
            self.record_error(e.user_message());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talentdesk_core::DeskError;

    #[tokio::test]
    async fn test_loading_is_lowered_on_failure() {
        let status = StoreStatus::new();

        let result: Result<()> = status
            .track(async {
                assert!(status.is_loading());
                Err(DeskError::server(500, "Database error occurred"))
            })
            .await;

        assert!(result.is_err());
        assert!(!status.is_loading());
        assert_eq!(status.error().as_deref(), Some("Database error occurred"));
    }

    #[tokio::test]
    async fn test_next_operation_clears_error() {
        let status = StoreStatus::new();
        let _ = status
            .track(async { Err::<(), _>(DeskError::transport("Network Error")) })
            .await;
        assert!(status.error().is_some());

        let value = status.track(async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
        assert_eq!(status.error(), None);
    }

    #[tokio::test]
    async fn test_separate_flag_leaves_store_loading_untouched() {
        let status = StoreStatus::new();
        let generating = LoadingFlag::default();

        status
            .track_with(&generating, async {
                assert!(generating.get());
                assert!(!status.is_loading());
                Ok(())
            })
            .await
            .unwrap();
        assert!(!generating.get());
    }
}
