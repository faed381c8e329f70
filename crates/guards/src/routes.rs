//! Route aliases and the anonymous-path ignore list.

use routegate_core::href_path;

/// Landing page.
pub const HOME: &str = "/";
/// Sign-in form.
pub const LOGIN: &str = "/users/login";
/// Sign-up form.
pub const REGISTER: &str = "/users/register";
/// Sign-in form with the "activate your account" notice.
pub const INACTIVE: &str = "/users/login?status=inactive";
/// Page shown to banned users.
pub const SUSPENDED: &str = "/users/suspended";

/// Paths browsable without an account even when `login_required` is on.
///
/// Matching is by path only; query strings and fragments do not matter.
pub const ANONYMOUS_PATHS: &[&str] = &[
    LOGIN,
    REGISTER,
    "/users/account-recovery",
    "/users/password-reset",
    "/users/account-activation",
    "/users/account-activation/success",
    "/users/account-activation/failed",
    "/users/change-email",
    "/users/confirm-new-email",
    SUSPENDED,
    "/tos",
    "/privacy",
    "/403",
    "/404",
    "/50x",
];

/// Whether `path` is on the anonymous ignore-list.
pub fn is_anonymous_path(path: &str) -> bool {
    let path = href_path(path);
    ANONYMOUS_PATHS.iter().any(|entry| href_path(entry) == path)
}
