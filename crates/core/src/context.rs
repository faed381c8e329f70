use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input to a single guard evaluation.
///
/// Supplied fresh on every evaluation and read-only to guards. `path` carries
/// the current location so guards that need to compare against it stay pure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuardContext {
    /// Loader-supplied page data (untyped; each guard picks out what it needs).
    #[serde(default)]
    pub loader_data: Value,

    /// Current location (full href or app-relative path).
    pub path: Option<String>,

    /// Logical page name the route was registered under.
    pub page: Option<String>,
}

impl GuardContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn loader_data(mut self, loader_data: Value) -> Self {
        self.loader_data = loader_data;
        self
    }
}
