use serde::{Deserialize, Serialize};

/// Site-level login/registration settings published by the host.
///
/// Defaults are permissive: a freshly started app behaves like a public site
/// until the real settings arrive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    /// When set, only signed-in users may browse non-anonymous pages.
    pub login_required: bool,

    /// Whether the sign-up page accepts new accounts.
    pub allow_new_registrations: bool,

    /// External registration agent; when set, sign-up happens there.
    pub registration_agent_url: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            login_required: false,
            allow_new_registrations: true,
            registration_agent_url: None,
        }
    }
}
