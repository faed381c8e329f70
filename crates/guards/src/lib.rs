//! `routegate-guards` — the route guard function library.
//!
//! Each guard is a pure predicate from [`routegate_core::GuardContext`] to
//! [`routegate_core::GuardResult`]: no IO, no panics, no session mutation.
//! Composite guards are plain function composition that short-circuits on the
//! first failing sub-check and propagates its result unchanged.

pub mod routes;
pub mod set;

pub use set::Guards;
