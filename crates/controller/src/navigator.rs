use routegate_core::equal_href;

/// Options for a navigation request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl NavigateOptions {
    /// Replace-the-entry semantics, as guard redirects use (pushing would let
    /// the back button bounce between the denied page and its redirect).
    pub fn replace() -> Self {
        Self { replace: true }
    }
}

/// Abstraction over the host's history/navigation mechanism.
///
/// The controller mutates application location through this boundary only.
/// Targets may be app-relative paths or absolute external URLs.
pub trait Navigator: Send + Sync {
    /// Perform the navigation.
    fn navigate(&self, target: &str, options: NavigateOptions);

    /// The full current location.
    fn current_href(&self) -> String;

    /// Whether `target` already points at the current location.
    ///
    /// The default comparison is fragment-insensitive and query-order
    /// insensitive; hosts with additional aliasing can override it.
    fn equal_to_current_href(&self, target: &str) -> bool {
        equal_href(&self.current_href(), target)
    }
}

impl<N> Navigator for std::sync::Arc<N>
where
    N: Navigator + ?Sized,
{
    fn navigate(&self, target: &str, options: NavigateOptions) {
        (**self).navigate(target, options);
    }

    fn current_href(&self) -> String {
        (**self).current_href()
    }

    fn equal_to_current_href(&self, target: &str) -> bool {
        (**self).equal_to_current_href(target)
    }
}
