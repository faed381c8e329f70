use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::provider::SessionSnapshot;
use crate::user::{AccountStatus, MailStatus, UserRole};

/// Derived authentication/authorization flags for the current user.
///
/// Recomputed from a snapshot on every guard evaluation and never cached, so
/// a login that completed a moment ago is visible to the very next evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginState {
    pub is_logged: bool,
    pub is_activated: bool,
    pub is_forbidden: bool,
    pub is_admin: bool,
    pub is_moderator: bool,
}

/// Derive the login state from a session snapshot.
///
/// An absent, tokenless or expired session yields all-false flags ("not
/// logged in, not activated, not forbidden"); this never errors.
pub fn derive_login_state(snapshot: &SessionSnapshot) -> LoginState {
    let Some(user) = &snapshot.user else {
        return LoginState::default();
    };

    let expired = user.expires_at.is_some_and(|at| at <= Utc::now());
    if user.access_token.is_empty() || expired {
        return LoginState::default();
    }

    LoginState {
        is_logged: true,
        is_activated: user.mail_status == MailStatus::Activated,
        is_forbidden: user.status == AccountStatus::Suspended,
        is_admin: user.role == UserRole::Admin,
        is_moderator: user.role == UserRole::Moderator,
    }
}
