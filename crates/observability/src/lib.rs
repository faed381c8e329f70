//! Tracing/logging setup shared by routegate hosts.
//!
//! Guard evaluation itself stays quiet: expected redirect denials are
//! `debug!`-level, only silent denials warn. Hosts decide how loud to be via
//! `RUST_LOG` or the filter passed here.

pub mod tracing;

pub use tracing::{init, init_dev, init_with_filter};
