//! Actor wrapper for sharing a room between tasks.
//!
//! ```text
//! RoomActorHandle (cloneable, held by Members and the driver)
//!   └── mpsc mailbox ──▶ RoomActor (single owner of Room)
//!                          ├── registry
//!                          └── transcript
//! ```
//!
//! One request is processed at a time, so accepted operations form a total
//! order without locks.

mod messages;
mod room;

pub use messages::{RoomMessage, RoomState};
pub use room::{RoomActor, RoomActorHandle};
