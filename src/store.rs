//! Observable session store
//!
//! One shared [`AuthSnapshot`], broadcast to every subscriber on change.
//! Only the manager writes to it.

use futures::Stream;
use tokio::sync::watch;

use crate::types::{AccessToken, AuthSnapshot, User};

/// Broadcasts the manager's session state
#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<AuthSnapshot>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Store starting logged out
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthSnapshot::default());
        Self { tx }
    }

    /// Clone of the current snapshot
    #[must_use]
    pub fn state(&self) -> AuthSnapshot {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.tx.subscribe()
    }

    /// Stream yielding the current snapshot, then each subsequent change
    ///
    /// Intermediate values may be skipped if the consumer is slower than the
    /// writer; the latest snapshot is always delivered.
    pub fn changes(&self) -> impl Stream<Item = AuthSnapshot> + Send + 'static {
        let mut rx = self.subscribe();
        async_stream::stream! {
            let current = rx.borrow_and_update().clone();
            yield current;
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                yield next;
            }
        }
    }

    pub(crate) fn set_logging_in(&self, value: bool) {
        self.tx.send_if_modified(|s| {
            let changed = s.is_logging_in != value;
            s.is_logging_in = value;
            changed
        });
    }

    pub(crate) fn set_logging_out(&self, value: bool) {
        self.tx.send_if_modified(|s| {
            let changed = s.is_logging_out != value;
            s.is_logging_out = value;
            changed
        });
    }

    /// Publish user and token in a single update
    pub(crate) fn establish(&self, user: User, token: AccessToken) {
        self.tx.send_modify(|s| {
            s.user = Some(user);
            s.token = Some(token);
        });
    }

    /// Drop user and token in a single update
    pub(crate) fn clear_session(&self) {
        self.tx.send_if_modified(|s| {
            let changed = s.user.is_some() || s.token.is_some();
            s.user = None;
            s.token = None;
            changed
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    fn user() -> User {
        User {
            id: 7,
            display_name: "seven".to_string(),
            email: "seven@example.com".to_string(),
            profile_image_url: String::new(),
        }
    }

    #[test]
    fn test_establish_and_clear() {
        let store = SessionStore::new();
        store.establish(user(), AccessToken::new("T"));
        let state = store.state();
        assert!(state.is_authenticated());
        assert_eq!(state.token.as_ref().map(AccessToken::secret), Some("T"));

        store.clear_session();
        assert_eq!(store.state(), AuthSnapshot::default());
    }

    #[tokio::test]
    async fn test_subscriber_sees_flag_change() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.set_logging_in(true);
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_logging_in);
    }

    #[test]
    fn test_redundant_flag_write_does_not_notify() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();
        rx.mark_unchanged();

        store.set_logging_out(false);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_changes_stream_starts_with_current() {
        let store = SessionStore::new();
        store.establish(user(), AccessToken::new("T"));

        let mut changes = Box::pin(store.changes());
        let first = changes.next().await.unwrap();
        assert_eq!(first.user.map(|u| u.id), Some(7));

        store.clear_session();
        let second = changes.next().await.unwrap();
        assert!(second.user.is_none());
    }
}
