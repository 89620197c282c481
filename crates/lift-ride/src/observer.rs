//! Ride observer trait for notifications and progress reporting.

use lift_core::{EntityId, RideId};
use lift_model::Elevator;

use crate::ride::RideOutcome;

/// Callbacks invoked by the scheduler at key points of a ride.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  `on_notify` is how user-facing texts
/// (timeout notice, ...) leave the core — the embedding decides whether that
/// becomes a chat message, a toast, or nothing.
///
/// # Example — chat bridge
///
/// ```rust,ignore
/// struct ChatBridge;
///
/// impl RideObserver for ChatBridge {
///     fn on_notify(&mut self, entity: EntityId, message: &str) {
///         chat::send(entity, message);
///     }
/// }
/// ```
pub trait RideObserver {
    /// A ride committed and entered `RUNNING`.
    fn on_ride_start(&mut self, _ride: RideId, _elevator: &Elevator) {}

    /// A passenger crossed the destination threshold and now waits, frozen,
    /// for the ride to conclude.
    fn on_passenger_arrived(&mut self, _ride: RideId, _entity: EntityId) {}

    /// An occupant left the shaft and was released from tracking.
    fn on_occupant_released(&mut self, _ride: RideId, _entity: EntityId) {}

    /// The deadline passed; `stragglers` were force-teleported to the
    /// destination.
    fn on_timeout(&mut self, _ride: RideId, _stragglers: &[EntityId]) {}

    /// A user-facing text for `entity`.
    fn on_notify(&mut self, _entity: EntityId, _message: &str) {}

    /// Teardown completed: blocks restored, occupants released.
    fn on_ride_end(&mut self, _ride: RideId, _outcome: RideOutcome) {}
}

/// A [`RideObserver`] that does nothing.
pub struct NoopObserver;

impl RideObserver for NoopObserver {}
