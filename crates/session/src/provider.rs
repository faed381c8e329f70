use serde::{Deserialize, Serialize};

use crate::settings::SiteSettings;
use crate::user::UserSession;

/// One consistent read of the process-wide session state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub user: Option<UserSession>,
    pub settings: SiteSettings,
}

/// Injectable source of session state.
///
/// `snapshot` must return an owned, internally consistent view so that all
/// predicates within one guard evaluation observe the same state, even when
/// the host mutates the store from another thread mid-evaluation.
pub trait SessionProvider: Send + Sync {
    fn snapshot(&self) -> SessionSnapshot;
}

impl<P> SessionProvider for std::sync::Arc<P>
where
    P: SessionProvider + ?Sized,
{
    fn snapshot(&self) -> SessionSnapshot {
        (**self).snapshot()
    }
}
