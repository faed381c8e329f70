//! In-memory navigator for hosts and tests.

use std::sync::{Mutex, MutexGuard};

use routegate_core::href_origin;

use crate::navigator::{NavigateOptions, Navigator};

/// One recorded navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRecord {
    pub target: String,
    pub options: NavigateOptions,
}

/// Mutex-backed navigator that applies targets to an in-memory href.
///
/// Relative targets resolve against the current origin; absolute targets
/// replace the href wholesale. Every request is recorded for inspection.
#[derive(Debug)]
pub struct MemoryNavigator {
    current: Mutex<String>,
    log: Mutex<Vec<NavigationRecord>>,
}

impl MemoryNavigator {
    pub fn new(initial_href: impl Into<String>) -> Self {
        Self {
            current: Mutex::new(initial_href.into()),
            log: Mutex::new(Vec::new()),
        }
    }

    /// Point the navigator somewhere without recording a navigation
    /// (simulates the user browsing on their own).
    pub fn jump(&self, href: impl Into<String>) {
        *lock(&self.current) = href.into();
    }

    /// Navigation requests seen so far, oldest first.
    pub fn log(&self) -> Vec<NavigationRecord> {
        lock(&self.log).clone()
    }

    fn resolve(&self, target: &str) -> String {
        if href_origin(target).is_some() {
            return target.to_string();
        }
        match href_origin(&lock(&self.current)) {
            Some(origin) => format!("{origin}{target}"),
            None => target.to_string(),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Poisoning cannot leave either field half-written; keep serving.
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl Navigator for MemoryNavigator {
    fn navigate(&self, target: &str, options: NavigateOptions) {
        let resolved = self.resolve(target);
        lock(&self.log).push(NavigationRecord {
            target: target.to_string(),
            options,
        });
        *lock(&self.current) = resolved;
    }

    fn current_href(&self) -> String {
        lock(&self.current).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_targets_resolve_against_the_current_origin() {
        let nav = MemoryNavigator::new("https://site.example/questions/1");
        nav.navigate("/users/login", NavigateOptions::replace());
        assert_eq!(nav.current_href(), "https://site.example/users/login");
    }

    #[test]
    fn absolute_targets_replace_the_href() {
        let nav = MemoryNavigator::new("https://site.example/users/register");
        nav.navigate("https://agent.example/signup", NavigateOptions::replace());
        assert_eq!(nav.current_href(), "https://agent.example/signup");
    }

    #[test]
    fn jump_does_not_show_up_in_the_log() {
        let nav = MemoryNavigator::new("/");
        nav.jump("/questions/1");
        assert!(nav.log().is_empty());
        assert_eq!(nav.current_href(), "/questions/1");
    }

    #[test]
    fn equality_uses_normalized_comparison() {
        let nav = MemoryNavigator::new("https://site.example/users/login?b=2&a=1#frag");
        assert!(nav.equal_to_current_href("/users/login?a=1&b=2"));
        assert!(!nav.equal_to_current_href("/users/login"));
    }
}
