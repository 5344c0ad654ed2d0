//! Metrics definitions for the room service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `room_` prefix
//! - `_total` suffix for counters
//!
//! # Cardinality
//!
//! Labels are bounded to prevent cardinality explosion:
//! - `room`: one value per room in the process
//! - `kind`: 3 values (join, broadcast, direct)
//! - `reason`: 5 values (bounded by `RoomError::reason`)
//!
//! No exporter is installed by this crate. Without a recorder every call is a
//! no-op.

use metrics::{counter, gauge};

/// Set the number of registered participants in a room.
///
/// Metric: `room_participants_registered`
/// Labels: `room`
pub fn set_participants_registered(room: &str, count: usize) {
    // usize to f64 conversion is safe for realistic participant counts
    #[allow(clippy::cast_precision_loss)]
    gauge!("room_participants_registered", "room" => room.to_string()).set(count as f64);
}

/// Record an accepted transcript record.
///
/// Metric: `room_messages_total`
/// Labels: `kind` (join, broadcast, direct)
pub fn record_message(kind: &'static str) {
    counter!("room_messages_total", "kind" => kind).increment(1);
}

/// Record a rejected operation.
///
/// Metric: `room_rejections_total`
/// Labels: `reason`
pub fn record_rejection(reason: &'static str) {
    counter!("room_rejections_total", "reason" => reason).increment(1);
}

/// Set the room actor's mailbox depth.
///
/// Metric: `room_actor_mailbox_depth`
/// Labels: `room`
///
/// High values indicate the actor is falling behind its callers.
pub fn set_actor_mailbox_depth(room: &str, depth: usize) {
    #[allow(clippy::cast_precision_loss)]
    gauge!("room_actor_mailbox_depth", "room" => room.to_string()).set(depth as f64);
}
