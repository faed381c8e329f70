use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a signed-in user.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Email verification status of the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MailStatus {
    /// Address verified; the account is activated.
    Activated,
    /// Verification mail sent, not yet confirmed.
    #[default]
    ToBeVerified,
}

/// Moderation status of the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    #[default]
    Normal,
    /// Banned by a moderator; such accounts may only browse the suspension page.
    Suspended,
}

/// Site-wide role of the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    User,
    Admin,
    Moderator,
}

/// A signed-in user's session record as published by the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub id: UserId,
    pub username: String,

    /// Opaque API token; an empty token means the session is not usable.
    pub access_token: String,

    pub mail_status: MailStatus,
    pub status: AccountStatus,
    pub role: UserRole,

    pub logged_in_at: DateTime<Utc>,

    /// Token expiry; `None` means the host manages expiry itself.
    pub expires_at: Option<DateTime<Utc>>,
}

impl UserSession {
    pub fn new(username: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            access_token: access_token.into(),
            mail_status: MailStatus::default(),
            status: AccountStatus::default(),
            role: UserRole::default(),
            logged_in_at: Utc::now(),
            expires_at: None,
        }
    }

    pub fn activated(mut self) -> Self {
        self.mail_status = MailStatus::Activated;
        self
    }

    pub fn suspended(mut self) -> Self {
        self.status = AccountStatus::Suspended;
        self
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    pub fn expiring_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = Some(at);
        self
    }
}
