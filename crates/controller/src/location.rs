//! Location-change pub/sub and the synchronous controller driver.
//!
//! The controller does not hook into any framework lifecycle; it subscribes
//! to a [`LocationBus`] and re-evaluates once per notification. Dropping the
//! driver drops the subscription (the bus prunes dead subscribers on its next
//! publish).

use std::sync::{Mutex, mpsc};
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::controller::RouteGuard;
use crate::navigator::Navigator;

/// One location-change notification.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationChange {
    /// The full new location. Must match what the navigation adapter reports
    /// as current when the notification is applied.
    pub href: String,

    /// Loader data resolved for this navigation.
    pub loader_data: Value,
}

impl LocationChange {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            loader_data: Value::Null,
        }
    }

    pub fn with_loader_data(mut self, loader_data: Value) -> Self {
        self.loader_data = loader_data;
        self
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocationBusError {
    /// Publish failed due to internal lock poisoning.
    #[error("location bus lock poisoned")]
    Poisoned,
}

/// A subscription to location changes.
///
/// Designed for single-threaded consumption: one subscription, one consumer.
#[derive(Debug)]
pub struct Subscription {
    receiver: mpsc::Receiver<LocationChange>,
}

impl Subscription {
    /// Block until the next notification.
    pub fn recv(&self) -> Result<LocationChange, mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Receive a pending notification without blocking.
    pub fn try_recv(&self) -> Result<LocationChange, mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a notification.
    pub fn recv_timeout(
        &self,
        timeout: Duration,
    ) -> Result<LocationChange, mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// In-memory broadcast bus for location changes.
///
/// - No IO / no async
/// - Best-effort fan-out; dead subscribers are dropped while publishing
/// - Notifications arrive in publish order per subscriber
#[derive(Debug, Default)]
pub struct LocationBus {
    subscribers: Mutex<Vec<mpsc::Sender<LocationChange>>>,
}

impl LocationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, change: LocationChange) -> Result<(), LocationBusError> {
        let mut subs = self
            .subscribers
            .lock()
            .map_err(|_| LocationBusError::Poisoned)?;
        subs.retain(|tx| tx.send(change.clone()).is_ok());
        Ok(())
    }

    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel();

        // If the lock is poisoned we still return a subscription; it just
        // never receives notifications.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription { receiver: rx }
    }
}

/// Drives a [`RouteGuard`] from a location subscription.
///
/// Notifications are applied synchronously in publish order: the evaluation
/// for one change completes before the next is looked at, so evaluations for
/// the same route never overlap.
pub struct RouteGuardDriver<N: Navigator> {
    controller: RouteGuard<N>,
    subscription: Subscription,
}

impl<N: Navigator> RouteGuardDriver<N> {
    pub fn new(controller: RouteGuard<N>, subscription: Subscription) -> Self {
        Self {
            controller,
            subscription,
        }
    }

    /// Apply all pending notifications; returns how many were processed.
    pub fn pump(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(change) = self.subscription.try_recv() {
            self.apply(&change);
            processed += 1;
        }
        processed
    }

    /// Block up to `timeout` for one notification and apply it.
    pub fn pump_one(&mut self, timeout: Duration) -> bool {
        match self.subscription.recv_timeout(timeout) {
            Ok(change) => {
                self.apply(&change);
                true
            }
            Err(_) => false,
        }
    }

    fn apply(&mut self, change: &LocationChange) {
        debug!(href = %change.href, "location changed");
        self.controller.evaluate(&change.href, &change.loader_data);
    }

    pub fn controller(&self) -> &RouteGuard<N> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut RouteGuard<N> {
        &mut self.controller
    }
}
