//! # Room Test Utilities
//!
//! Shared test doubles and fixtures for the room service.
//!
//! ## Modules
//!
//! - `recording` - `RecordingParticipant`, a participant that stores every delivery
//! - `sink` - `MemorySink`, a notification sink that stores every line
//! - `fixtures` - Pre-configured participants and rosters
//!
//! ## Usage
//!
//! ```rust,ignore
//! use room_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() {
//!     let (alice, alice_inbox) = RecordingParticipant::new("Alice");
//!     let id = room.register(Box::new(alice)).unwrap();
//!
//!     // ... send messages ...
//!
//!     alice_inbox.assert_received_once("Bob", "hello");
//! }
//! ```

pub mod fixtures;
pub mod recording;
pub mod sink;

pub use fixtures::{TestParticipant, TestRoster};
pub use recording::{Delivery, Inbox, RecordingParticipant};
pub use sink::MemorySink;
