//! `routegate-core` — guard-protocol primitives.
//!
//! This crate contains the **pure domain** of route authorization (no session
//! store, no navigation concerns): the guard contract, its tagged outcome,
//! hard-error-code classification and location normalization.

pub mod context;
pub mod error_code;
pub mod href;
pub mod result;

pub use context::GuardContext;
pub use error_code::is_hard_error_code;
pub use href::{equal_href, href_origin, href_path, normalize_href};
pub use result::{GuardError, GuardFn, GuardResult};
