use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::context::GuardContext;
use crate::error_code::is_hard_error_code;

/// Error payload carried by a denying guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardError {
    /// HTTP-like status code (`"403"`, `"404"`, `"500"`, ...).
    pub code: String,

    /// Optional human-readable detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl GuardError {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            msg: None,
        }
    }

    pub fn with_msg(code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            msg: Some(msg.into()),
        }
    }

    /// Whether this error belongs to the hard-error class (403/404/50x).
    pub fn is_hard(&self) -> bool {
        is_hard_error_code(&self.code)
    }
}

/// Tagged outcome of a guard evaluation.
///
/// # Invariants
/// - A denying guard sets at most one of `redirect` / `error`; the
///   constructors keep them mutually exclusive.
/// - `Deny` with neither field means "deny silently": render nothing,
///   navigate nowhere. Used for transient not-yet-determined states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuardResult {
    Allow,
    Deny {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        redirect: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<GuardError>,
    },
}

impl GuardResult {
    pub fn allow() -> Self {
        GuardResult::Allow
    }

    /// Deny and send the user elsewhere.
    pub fn redirect(target: impl Into<String>) -> Self {
        GuardResult::Deny {
            redirect: Some(target.into()),
            error: None,
        }
    }

    /// Deny with an error payload (no navigation).
    pub fn error(error: GuardError) -> Self {
        GuardResult::Deny {
            redirect: None,
            error: Some(error),
        }
    }

    /// Deny with neither redirect nor error (render nothing).
    pub fn silent() -> Self {
        GuardResult::Deny {
            redirect: None,
            error: None,
        }
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, GuardResult::Allow)
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GuardResult::Deny {
                redirect: Some(target),
                ..
            } => Some(target),
            _ => None,
        }
    }

    pub fn denial_error(&self) -> Option<&GuardError> {
        match self {
            GuardResult::Deny {
                error: Some(error), ..
            } => Some(error),
            _ => None,
        }
    }

    /// The denial error when it classifies as a hard error page.
    pub fn hard_error(&self) -> Option<&GuardError> {
        self.denial_error().filter(|e| e.is_hard())
    }
}

/// The guard contract: a pure predicate from context to outcome.
///
/// Same context + same session snapshot ⇒ same result. Guards never block
/// and never mutate session state.
pub type GuardFn = Arc<dyn Fn(&GuardContext) -> GuardResult + Send + Sync>;
