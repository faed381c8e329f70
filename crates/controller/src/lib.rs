//! `routegate-controller` — the reactive route guard controller.
//!
//! Binds a guard function to a route, re-evaluates it once per distinct
//! location and turns the outcome into render / redirect / error surface.
//! Location is only ever mutated through the [`Navigator`] adapter.

pub mod controller;
pub mod location;
pub mod memory;
pub mod navigator;

pub use controller::{Decision, RenderPlan, RouteGuard};
pub use location::{
    LocationBus, LocationBusError, LocationChange, RouteGuardDriver, Subscription,
};
pub use memory::{MemoryNavigator, NavigationRecord};
pub use navigator::{NavigateOptions, Navigator};
