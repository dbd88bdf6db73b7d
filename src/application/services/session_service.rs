//! Session-expiry notice shown once after a session has timed out.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::entities::{NoticeBanner, TOKEN_EXPIRATION_KEY};
use crate::infrastructure::storage::{ExpiryStore, StoreError};

/// Reads the persisted session expiry at startup and reveals the notice
/// banner when the previous session has timed out.
pub struct SessionNoticeService<S: ExpiryStore> {
    store: Arc<S>,
}

impl<S: ExpiryStore> SessionNoticeService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Runs the one-shot expiry check.
    ///
    /// When the stored timestamp is in the past, the banner is revealed and
    /// the stored value removed, so the notice fires at most once per
    /// expiry event. An unparseable value is ignored and left in place.
    ///
    /// Returns whether the notice was shown.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read or the expired
    /// key cannot be removed.
    pub fn init(&self, banner: &mut NoticeBanner) -> Result<bool, StoreError> {
        let Some(raw) = self.store.get(TOKEN_EXPIRATION_KEY)? else {
            return Ok(false);
        };

        if raw.is_empty() {
            return Ok(false);
        }

        let Ok(expires_at) = raw.parse::<i64>() else {
            warn!(value = %raw, "ignoring unparseable session expiry");
            return Ok(false);
        };

        if Utc::now().timestamp_millis() > expires_at {
            debug!(expires_at, "previous session expired, showing notice");
            banner.visible = true;
            self.store.remove(TOKEN_EXPIRATION_KEY)?;
            return Ok(true);
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MockExpiryStore;
    use mockall::predicate::eq;

    #[test]
    fn expired_timestamp_shows_notice_and_clears_key() {
        let mut store = MockExpiryStore::new();
        store
            .expect_get()
            .with(eq(TOKEN_EXPIRATION_KEY))
            .times(1)
            .returning(|_| Ok(Some("1".to_string())));
        store
            .expect_remove()
            .with(eq(TOKEN_EXPIRATION_KEY))
            .times(1)
            .returning(|_| Ok(()));

        let service = SessionNoticeService::new(Arc::new(store));
        let mut banner = NoticeBanner::hidden();

        assert!(service.init(&mut banner).unwrap());
        assert!(banner.visible);
    }

    #[test]
    fn future_timestamp_leaves_banner_hidden() {
        let mut store = MockExpiryStore::new();
        let far_future = (Utc::now().timestamp_millis() + 3_600_000).to_string();
        store
            .expect_get()
            .returning(move |_| Ok(Some(far_future.clone())));
        store.expect_remove().times(0);

        let service = SessionNoticeService::new(Arc::new(store));
        let mut banner = NoticeBanner::hidden();

        assert!(!service.init(&mut banner).unwrap());
        assert!(!banner.visible);
    }

    #[test]
    fn missing_or_empty_value_is_a_noop() {
        for stored in [None, Some(String::new())] {
            let mut store = MockExpiryStore::new();
            store.expect_get().returning(move |_| Ok(stored.clone()));
            store.expect_remove().times(0);

            let service = SessionNoticeService::new(Arc::new(store));
            let mut banner = NoticeBanner::hidden();

            assert!(!service.init(&mut banner).unwrap());
            assert!(!banner.visible);
        }
    }

    #[test]
    fn unparseable_value_is_left_in_place() {
        let mut store = MockExpiryStore::new();
        store
            .expect_get()
            .returning(|_| Ok(Some("not-a-number".to_string())));
        store.expect_remove().times(0);

        let service = SessionNoticeService::new(Arc::new(store));
        let mut banner = NoticeBanner::hidden();

        assert!(!service.init(&mut banner).unwrap());
        assert!(!banner.visible);
    }
}
