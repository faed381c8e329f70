//! `routegate-session` — derived login state over an injectable session store.
//!
//! This crate is intentionally decoupled from how session data is fetched:
//! the host publishes into a [`SessionProvider`] and guards read owned,
//! internally consistent snapshots from it.

pub mod memory;
pub mod provider;
pub mod settings;
pub mod state;
pub mod user;

pub use memory::MemorySessionProvider;
pub use provider::{SessionProvider, SessionSnapshot};
pub use settings::SiteSettings;
pub use state::{LoginState, derive_login_state};
pub use user::{AccountStatus, MailStatus, UserId, UserRole, UserSession};
