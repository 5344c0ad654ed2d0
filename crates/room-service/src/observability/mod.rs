//! Observability module for the room service.
//!
//! Logging uses `tracing` with `room` and `room.actor` targets and explicit
//! fields. Message text is never logged; only names, sequence numbers and
//! counts are.
//!
//! # Metrics
//!
//! | Metric | Type | Labels | Purpose |
//! |--------|------|--------|---------|
//! | `room_participants_registered` | Gauge | `room` | Registered participants |
//! | `room_messages_total` | Counter | `kind` | Accepted transcript records |
//! | `room_rejections_total` | Counter | `reason` | Rejected operations |
//! | `room_actor_mailbox_depth` | Gauge | `room` | Backpressure indicator |

pub mod metrics;

pub use metrics::{
    record_message, record_rejection, set_actor_mailbox_depth, set_participants_registered,
};
