use std::sync::Arc;

use serde_json::Value;

use routegate_core::{GuardContext, GuardError, GuardFn, GuardResult, equal_href};
use routegate_session::{LoginState, SessionProvider, SessionSnapshot, derive_login_state};

use crate::routes;

/// The guard function library, bound to a session provider.
///
/// Every guard reads exactly one fresh snapshot per evaluation — composites
/// included — so a single evaluation sees a consistent view of session state
/// even if the host mutates the store from another thread. Guards perform no
/// IO and never mutate the store.
#[derive(Clone)]
pub struct Guards {
    provider: Arc<dyn SessionProvider>,
}

impl Guards {
    pub fn new(provider: Arc<dyn SessionProvider>) -> Self {
        Self { provider }
    }

    fn snapshot(&self) -> SessionSnapshot {
        self.provider.snapshot()
    }

    /// Current derived login state (never cached).
    pub fn login_state(&self) -> LoginState {
        derive_login_state(&self.snapshot())
    }

    /// Package a guard method as a [`GuardFn`] for a route table.
    ///
    /// ```
    /// # use std::sync::Arc;
    /// # use routegate_guards::Guards;
    /// # use routegate_session::MemorySessionProvider;
    /// let guards = Guards::new(Arc::new(MemorySessionProvider::new()));
    /// let on_enter = guards.bind(Guards::activated);
    /// ```
    pub fn bind(&self, guard: fn(&Guards, &GuardContext) -> GuardResult) -> GuardFn {
        let guards = self.clone();
        Arc::new(move |ctx| guard(&guards, ctx))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Simple guards
    // ─────────────────────────────────────────────────────────────────────

    /// Signed-in users only; everyone else goes to the sign-in form.
    pub fn logged(&self, _ctx: &GuardContext) -> GuardResult {
        Self::logged_with(&self.login_state())
    }

    fn logged_with(state: &LoginState) -> GuardResult {
        if state.is_logged {
            GuardResult::allow()
        } else {
            GuardResult::redirect(routes::LOGIN)
        }
    }

    /// Signed-in users only; everyone else goes home.
    pub fn logged_redirect_home(&self, _ctx: &GuardContext) -> GuardResult {
        if self.login_state().is_logged {
            GuardResult::allow()
        } else {
            GuardResult::redirect(routes::HOME)
        }
    }

    /// Anonymous visitors only (sign-in / sign-up pages); signed-in users go home.
    pub fn not_logged(&self, _ctx: &GuardContext) -> GuardResult {
        if self.login_state().is_logged {
            GuardResult::redirect(routes::HOME)
        } else {
            GuardResult::allow()
        }
    }

    /// Activation-pending users only (activation notice pages); activated
    /// accounts go home.
    pub fn not_activated(&self, _ctx: &GuardContext) -> GuardResult {
        if self.login_state().is_activated {
            GuardResult::redirect(routes::HOME)
        } else {
            GuardResult::allow()
        }
    }

    /// Signed-in *and* activated users; an unverified account is sent to the
    /// activation notice. Delegates the signed-in check to the same sub-check
    /// as [`Guards::logged`] and propagates its result unchanged. Both checks
    /// run against one derived state.
    pub fn activated(&self, _ctx: &GuardContext) -> GuardResult {
        let state = self.login_state();
        let logged = Self::logged_with(&state);
        if !logged.is_allow() {
            return logged;
        }
        if state.is_activated {
            GuardResult::allow()
        } else {
            GuardResult::redirect(routes::INACTIVE)
        }
    }

    /// Banned users only (the suspension page itself); everyone else goes home.
    pub fn forbidden(&self, _ctx: &GuardContext) -> GuardResult {
        if self.login_state().is_forbidden {
            GuardResult::allow()
        } else {
            GuardResult::redirect(routes::HOME)
        }
    }

    /// Everyone except banned users; banned accounts are sent to the
    /// suspension page.
    pub fn not_forbidden(&self, _ctx: &GuardContext) -> GuardResult {
        if self.login_state().is_forbidden {
            GuardResult::redirect(routes::SUSPENDED)
        } else {
            GuardResult::allow()
        }
    }

    /// Administrators only; denies with a hard 403 (no navigation).
    pub fn admin(&self, _ctx: &GuardContext) -> GuardResult {
        if self.login_state().is_admin {
            GuardResult::allow()
        } else {
            GuardResult::error(GuardError::new("403"))
        }
    }

    /// Administrators or moderators; denies with a hard 403 (no navigation).
    pub fn is_admin_or_moderator(&self, _ctx: &GuardContext) -> GuardResult {
        let state = self.login_state();
        if state.is_admin || state.is_moderator {
            GuardResult::allow()
        } else {
            GuardResult::error(GuardError::new("403"))
        }
    }

    /// Loader-gated editing: the loader marks the content editable, or the
    /// denial error code mirrors what the loader reported.
    ///
    /// Malformed loader data is this guard's problem to absorb; it degrades
    /// to a plain 403.
    pub fn is_editable(&self, ctx: &GuardContext) -> GuardResult {
        match &ctx.loader_data {
            Value::Object(data) if data.get("editable").and_then(Value::as_bool) == Some(true) => {
                GuardResult::allow()
            }
            Value::Object(data) => {
                let code = match data.get("code") {
                    Some(Value::String(code)) => code.clone(),
                    Some(Value::Number(code)) => code.to_string(),
                    _ => "403".to_string(),
                };
                GuardResult::error(GuardError::new(code))
            }
            _ => GuardResult::error(GuardError::new("403")),
        }
    }

    /// Sign-up page availability: closed registration sends visitors home.
    pub fn allow_new_registration(&self, _ctx: &GuardContext) -> GuardResult {
        if self.snapshot().settings.allow_new_registrations {
            GuardResult::allow()
        } else {
            GuardResult::redirect(routes::HOME)
        }
    }

    /// Delegated sign-up: when an external registration agent is configured
    /// and we are not already on it, hand registration over to the agent.
    pub fn sign_up_agent(&self, ctx: &GuardContext) -> GuardResult {
        let Some(agent_url) = self.snapshot().settings.registration_agent_url else {
            return GuardResult::allow();
        };
        let here = ctx.path.as_deref().unwrap_or_default();
        if equal_href(here, &agent_url) {
            GuardResult::allow()
        } else {
            GuardResult::redirect(agent_url)
        }
    }

    /// Private-site check: passes when login is not required or the current
    /// path is on the anonymous ignore-list; otherwise sends the visitor to
    /// the sign-in form.
    pub fn should_login_required(&self, ctx: &GuardContext) -> GuardResult {
        Self::should_login_required_with(&self.snapshot(), ctx)
    }

    fn should_login_required_with(snapshot: &SessionSnapshot, ctx: &GuardContext) -> GuardResult {
        if !snapshot.settings.login_required {
            return GuardResult::allow();
        }
        let here = ctx.path.as_deref().unwrap_or_default();
        if routes::is_anonymous_path(here) {
            return GuardResult::allow();
        }
        GuardResult::redirect(routes::LOGIN)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Composite guards
    // ─────────────────────────────────────────────────────────────────────

    /// Ordinary page access.
    ///
    /// Signed-in and activated users pass; a signed-in but unverified user is
    /// sent to the activation notice; anonymous visitors fall through to
    /// [`Guards::should_login_required`], whose result is propagated
    /// unchanged. No merging of sub-check failures; all sub-checks run
    /// against one snapshot.
    pub fn try_normal_logged(&self, ctx: &GuardContext) -> GuardResult {
        let snapshot = self.snapshot();
        let state = derive_login_state(&snapshot);
        if state.is_logged && state.is_activated {
            return GuardResult::allow();
        }
        if state.is_logged {
            return GuardResult::redirect(routes::INACTIVE);
        }
        Self::should_login_required_with(&snapshot, ctx)
    }

    /// Like [`Guards::activated`] but for surfaces that must not navigate
    /// away: denies with a hard 403 instead of redirecting.
    pub fn try_logged_and_activated(&self, _ctx: &GuardContext) -> GuardResult {
        let state = self.login_state();
        if state.is_logged && state.is_activated {
            GuardResult::allow()
        } else {
            GuardResult::error(GuardError::new("403"))
        }
    }
}
