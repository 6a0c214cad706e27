//! Scoped guards for transient flags and sign-out cleanup.
//!
//! Each guard publishes its "in progress" flag on creation and undoes it in
//! `Drop`, so the flag is cleared on success, on error and when the
//! operation's future is dropped mid-await.

use crate::callbacks::ApiClient;
use crate::store::SessionStore;

/// Header carrying the bearer token
pub(crate) const AUTHORIZATION_HEADER: &str = "Authorization";

/// Holds `is_logging_in` for its lifetime
pub(crate) struct LoggingInGuard<'a> {
    store: &'a SessionStore,
}

impl<'a> LoggingInGuard<'a> {
    pub(crate) fn acquire(store: &'a SessionStore) -> Self {
        store.set_logging_in(true);
        Self { store }
    }
}

impl Drop for LoggingInGuard<'_> {
    fn drop(&mut self) {
        self.store.set_logging_in(false);
    }
}

/// Restores the previous bearer header on drop unless the session was committed
pub(crate) struct BearerHeaderGuard<'a> {
    api: &'a dyn ApiClient,
    previous: Option<String>,
    committed: bool,
}

impl<'a> BearerHeaderGuard<'a> {
    /// Snapshot the current header before it is overwritten
    pub(crate) fn new(api: &'a dyn ApiClient) -> Self {
        Self {
            api,
            previous: api.header(AUTHORIZATION_HEADER),
            committed: false,
        }
    }

    pub(crate) fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for BearerHeaderGuard<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        tracing::debug!("Rolling back bearer header after failed sign-in");
        match self.previous.take() {
            Some(previous) => {
                if let Err(e) = self.api.set_header(AUTHORIZATION_HEADER, &previous) {
                    tracing::warn!(error = %e, "Could not restore previous bearer header");
                    self.api.remove_header(AUTHORIZATION_HEADER);
                }
            }
            None => self.api.remove_header(AUTHORIZATION_HEADER),
        }
    }
}

/// Holds `is_logging_out`; on drop clears the session, the bearer header and
/// the flag, in that order
pub(crate) struct SignOutCleanup<'a> {
    store: &'a SessionStore,
    api: &'a dyn ApiClient,
}

impl<'a> SignOutCleanup<'a> {
    pub(crate) fn acquire(store: &'a SessionStore, api: &'a dyn ApiClient) -> Self {
        store.set_logging_out(true);
        Self { store, api }
    }
}

impl Drop for SignOutCleanup<'_> {
    fn drop(&mut self) {
        self.store.clear_session();
        self.api.remove_header(AUTHORIZATION_HEADER);
        self.store.set_logging_out(false);
        tracing::debug!("Local session cleared");
    }
}
