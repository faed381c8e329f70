//! In-memory session provider for hosts and tests.

use std::sync::{RwLock, RwLockWriteGuard};

use crate::provider::{SessionProvider, SessionSnapshot};
use crate::settings::SiteSettings;
use crate::user::UserSession;

/// `RwLock`-backed session store.
///
/// - No IO / no async
/// - Writers publish whole records; readers clone one consistent snapshot
#[derive(Debug, Default)]
pub struct MemorySessionProvider {
    inner: RwLock<SessionSnapshot>,
}

impl MemorySessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: SiteSettings) -> Self {
        Self {
            inner: RwLock::new(SessionSnapshot {
                user: None,
                settings,
            }),
        }
    }

    /// Publish a signed-in user (e.g. after a login completes).
    pub fn set_user(&self, user: UserSession) {
        self.write().user = Some(user);
    }

    /// Drop the current user (logout / token invalidation).
    pub fn clear_user(&self) {
        self.write().user = None;
    }

    pub fn set_settings(&self, settings: SiteSettings) {
        self.write().settings = settings;
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionSnapshot> {
        // A poisoned lock still holds coherent session data; keep serving it.
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionProvider for MemorySessionProvider {
    fn snapshot(&self) -> SessionSnapshot {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
