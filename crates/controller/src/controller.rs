use serde_json::Value;
use tracing::{debug, warn};

use routegate_core::{GuardContext, GuardError, GuardFn, GuardResult};

use crate::navigator::{NavigateOptions, Navigator};

/// Effective decision for the current location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Decision {
    /// Render the children. Also the initial state: the first paint is never
    /// blanked while waiting for an evaluation.
    #[default]
    Allowed,
    /// A redirect was issued; render nothing at this location.
    DeniedRedirect,
    /// Hard error; the error surface shows instead.
    DeniedError,
    /// Denied with neither redirect nor error; render nothing.
    DeniedSilent,
}

/// What the host should put on screen after an evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderPlan {
    /// Render the route's children.
    pub children: bool,
    /// Render the error surface with this code, independently of `children`.
    pub error_code: Option<String>,
}

/// Route guard controller.
///
/// Re-runs the bound guard once per distinct location value and interprets
/// the result: render, redirect (replacing the history entry) or error
/// surface.
///
/// # Invariants
/// - A hard error (403/404/50x) short-circuits redirect handling: the error
///   surface shows and `navigate` is not called.
/// - A deny-with-redirect whose target already equals the current location is
///   rendered, not re-issued (redirect-loop suppression): the guard was
///   sending us to the page we are on.
/// - Evaluation is synchronous and terminal for its location; a new location
///   simply supersedes the stored decision.
pub struct RouteGuard<N: Navigator> {
    guard: Option<GuardFn>,
    navigator: N,
    path: Option<String>,
    page: Option<String>,
    /// Re-evaluation key: the full location string of the last evaluation.
    last_key: Option<String>,
    decision: Decision,
    last_result: GuardResult,
    error: Option<GuardError>,
}

impl<N: Navigator> RouteGuard<N> {
    pub fn new(navigator: N) -> Self {
        Self {
            guard: None,
            navigator,
            path: None,
            page: None,
            last_key: None,
            decision: Decision::Allowed,
            last_result: GuardResult::allow(),
            error: None,
        }
    }

    pub fn with_guard(mut self, guard: GuardFn) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Fix the `path` handed to the guard context (defaults to the evaluated
    /// location).
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Evaluate the guard for `href` with this navigation's loader data.
    ///
    /// `href` must be the navigator's current location; identical consecutive
    /// values collapse into a single evaluation, so unrelated re-renders do
    /// not re-invoke the guard.
    pub fn evaluate(&mut self, href: &str, loader_data: &Value) {
        if self.last_key.as_deref() == Some(href) {
            return;
        }
        self.last_key = Some(href.to_string());

        let Some(guard) = &self.guard else {
            // No guard bound: stay allowed.
            self.decision = Decision::Allowed;
            return;
        };

        let ctx = GuardContext {
            loader_data: loader_data.clone(),
            path: Some(self.path.clone().unwrap_or_else(|| href.to_string())),
            page: self.page.clone(),
        };
        let result = (**guard)(&ctx);

        if let Some(error) = result.hard_error() {
            debug!(code = %error.code, href, "guard denied with hard error");
            self.error = Some(error.clone());
            self.decision = Decision::DeniedError;
            self.last_result = result;
            return;
        }
        self.error = None;

        self.decision = match result.redirect_target() {
            Some(target) if self.navigator.equal_to_current_href(target) => {
                // Denying render here would blank the very page the redirect
                // was trying to reach.
                debug!(redirect = target, href, "redirect target is the current location; rendering");
                Decision::Allowed
            }
            Some(target) => {
                debug!(redirect = target, href, "guard denied; redirecting");
                self.navigator.navigate(target, NavigateOptions::replace());
                Decision::DeniedRedirect
            }
            None if result.is_allow() => Decision::Allowed,
            None => {
                // Nothing to render, nowhere to go. Tolerable while session
                // data is still loading; a smell if it persists.
                match result.denial_error() {
                    Some(error) => {
                        warn!(code = %error.code, href, "guard denied with unclassified error code")
                    }
                    None => warn!(href, "guard denied without redirect or error"),
                }
                Decision::DeniedSilent
            }
        };
        self.last_result = result;
    }

    /// Evaluate at the navigator's current location.
    pub fn evaluate_here(&mut self, loader_data: &Value) {
        let href = self.navigator.current_href();
        self.evaluate(&href, loader_data);
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    /// Whether the route's children should render right now.
    pub fn should_render_children(&self) -> bool {
        self.decision == Decision::Allowed
    }

    /// The hard error code to surface, if any.
    pub fn error_code(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.code.as_str())
    }

    /// The raw result of the last evaluation.
    pub fn last_result(&self) -> &GuardResult {
        &self.last_result
    }

    /// Snapshot of the render decision for the host's view layer.
    pub fn render_plan(&self) -> RenderPlan {
        RenderPlan {
            children: self.should_render_children(),
            error_code: self.error.as_ref().map(|e| e.code.clone()),
        }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use routegate_guards::{Guards, routes};
    use routegate_session::{MemorySessionProvider, UserSession};

    use crate::memory::MemoryNavigator;

    fn guard_fn(f: impl Fn(&GuardContext) -> GuardResult + Send + Sync + 'static) -> GuardFn {
        Arc::new(f)
    }

    fn controller(
        href: &str,
        guard: GuardFn,
    ) -> (RouteGuard<Arc<MemoryNavigator>>, Arc<MemoryNavigator>) {
        let nav = Arc::new(MemoryNavigator::new(href));
        let rg = RouteGuard::new(nav.clone()).with_guard(guard);
        (rg, nav)
    }

    #[test]
    fn initial_decision_is_allowed() {
        let nav = Arc::new(MemoryNavigator::new("/"));
        let rg: RouteGuard<Arc<MemoryNavigator>> = RouteGuard::new(nav);
        assert!(rg.should_render_children());
        assert_eq!(rg.error_code(), None);
    }

    #[test]
    fn no_guard_bound_stays_allowed() {
        let nav = Arc::new(MemoryNavigator::new("/questions/1"));
        let mut rg = RouteGuard::new(nav.clone());
        rg.evaluate_here(&Value::Null);
        assert!(rg.should_render_children());
        assert!(nav.log().is_empty());
    }

    #[test]
    fn redirect_normal_case() {
        let (mut rg, nav) = controller(
            "https://site.example/a",
            guard_fn(|_| GuardResult::redirect("/b")),
        );
        rg.evaluate_here(&Value::Null);

        let log = nav.log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].target, "/b");
        assert!(log[0].options.replace);
        assert_eq!(rg.decision(), Decision::DeniedRedirect);
        assert!(!rg.should_render_children());
    }

    #[test]
    fn loop_suppression() {
        let (mut rg, nav) = controller(
            "https://site.example/users/login",
            guard_fn(|_| GuardResult::redirect(routes::LOGIN)),
        );
        rg.evaluate_here(&Value::Null);

        assert!(nav.log().is_empty());
        assert_eq!(rg.decision(), Decision::Allowed);
        assert!(rg.should_render_children());
    }

    #[test]
    fn loop_suppression_is_normalization_robust() {
        let (mut rg, nav) = controller(
            "https://site.example/users/login?b=2&a=1#frag",
            guard_fn(|_| GuardResult::redirect("/users/login?a=1&b=2")),
        );
        rg.evaluate_here(&Value::Null);

        assert!(nav.log().is_empty());
        assert!(rg.should_render_children());
    }

    #[test]
    fn hard_error_shows_the_error_surface() {
        let (mut rg, nav) = controller(
            "https://site.example/admin",
            guard_fn(|_| GuardResult::error(GuardError::new("403"))),
        );
        rg.evaluate_here(&Value::Null);

        assert!(nav.log().is_empty());
        assert_eq!(rg.decision(), Decision::DeniedError);
        assert_eq!(
            rg.render_plan(),
            RenderPlan {
                children: false,
                error_code: Some("403".to_string()),
            }
        );
    }

    #[test]
    fn error_classification_short_circuits_redirect() {
        // A malformed result carrying both fields: the hard error wins and
        // no navigation happens.
        let (mut rg, nav) = controller(
            "https://site.example/a",
            guard_fn(|_| GuardResult::Deny {
                redirect: Some("/b".to_string()),
                error: Some(GuardError::new("404")),
            }),
        );
        rg.evaluate_here(&Value::Null);

        assert!(nav.log().is_empty());
        assert_eq!(rg.decision(), Decision::DeniedError);
        assert_eq!(rg.error_code(), Some("404"));
        assert!(!rg.should_render_children());
    }

    #[test]
    fn non_hard_error_is_not_surfaced() {
        let (mut rg, nav) = controller(
            "https://site.example/a",
            guard_fn(|_| GuardResult::error(GuardError::new("401"))),
        );
        rg.evaluate_here(&Value::Null);

        assert!(nav.log().is_empty());
        assert_eq!(rg.error_code(), None);
        assert_eq!(rg.decision(), Decision::DeniedSilent);
        assert!(!rg.should_render_children());

        // The guard's output is preserved verbatim even though nothing is
        // surfaced: the code was present, just not a hard one.
        assert_eq!(
            rg.last_result().denial_error().map(|e| e.code.as_str()),
            Some("401")
        );
    }

    #[test]
    fn silent_denial_renders_nothing() {
        let (mut rg, nav) = controller(
            "https://site.example/a",
            guard_fn(|_| GuardResult::silent()),
        );
        rg.evaluate_here(&Value::Null);

        assert!(nav.log().is_empty());
        assert_eq!(rg.decision(), Decision::DeniedSilent);
        assert_eq!(rg.error_code(), None);
    }

    #[test]
    fn unchanged_location_collapses_into_one_evaluation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();
        let (mut rg, nav) = controller(
            "https://site.example/a",
            guard_fn(move |_| {
                counted.fetch_add(1, Ordering::SeqCst);
                GuardResult::redirect("/b")
            }),
        );

        rg.evaluate("https://site.example/a", &Value::Null);
        rg.evaluate("https://site.example/a", &Value::Null);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(nav.log().len(), 1);
    }

    #[test]
    fn error_is_cleared_once_the_guard_allows_again() {
        let (mut rg, nav) = controller(
            "https://site.example/admin",
            guard_fn(|ctx| {
                if ctx.path.as_deref() == Some("https://site.example/admin") {
                    GuardResult::error(GuardError::new("403"))
                } else {
                    GuardResult::allow()
                }
            }),
        );

        rg.evaluate_here(&Value::Null);
        assert_eq!(rg.error_code(), Some("403"));

        nav.jump("https://site.example/questions/1");
        rg.evaluate_here(&Value::Null);
        assert_eq!(rg.error_code(), None);
        assert!(rg.should_render_children());
    }

    #[test]
    fn path_prop_overrides_the_location_in_the_context() {
        let seen = Arc::new(std::sync::Mutex::new(None::<String>));
        let sink = seen.clone();
        let nav = Arc::new(MemoryNavigator::new("https://site.example/q/1"));
        let mut rg = RouteGuard::new(nav)
            .with_guard(guard_fn(move |ctx| {
                *sink.lock().unwrap() = ctx.path.clone();
                GuardResult::allow()
            }))
            .with_path("/q/:id")
            .with_page("question");

        rg.evaluate_here(&Value::Null);
        assert_eq!(seen.lock().unwrap().as_deref(), Some("/q/:id"));
    }

    #[test]
    fn loader_data_reaches_the_guard() {
        let (mut rg, _nav) = controller(
            "https://site.example/edit/1",
            guard_fn(|ctx| {
                if ctx.loader_data["editable"] == json!(true) {
                    GuardResult::allow()
                } else {
                    GuardResult::error(GuardError::new("403"))
                }
            }),
        );
        rg.evaluate_here(&json!({ "editable": true }));
        assert!(rg.should_render_children());
    }

    #[test]
    fn activation_round_trip_suppresses_the_second_redirect() {
        // Signed-in but unverified user hits a route guarded by `activated`.
        let provider = Arc::new(MemorySessionProvider::new());
        provider.set_user(UserSession::new("alice", "tok"));
        let guards = Guards::new(provider);

        let nav = Arc::new(MemoryNavigator::new("https://site.example/questions/ask"));
        let mut rg = RouteGuard::new(nav.clone()).with_guard(guards.bind(Guards::activated));

        rg.evaluate_here(&Value::Null);
        assert_eq!(rg.decision(), Decision::DeniedRedirect);
        assert_eq!(nav.log().len(), 1);
        assert_eq!(nav.log()[0].target, routes::INACTIVE);

        // The navigation landed on the activation notice; the guard still
        // denies with the same target, which now equals the location.
        rg.evaluate_here(&Value::Null);
        assert_eq!(rg.decision(), Decision::Allowed);
        assert!(rg.should_render_children());
        assert_eq!(nav.log().len(), 1);
    }
}
