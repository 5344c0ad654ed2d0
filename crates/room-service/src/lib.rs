//! Room Service Library
//!
//! An in-memory chat room built on the mediator pattern: a [`Room`]
//! coordinates message delivery between registered participants and keeps an
//! ordered transcript of every accepted operation.
//!
//! # Architecture
//!
//! ```text
//! Member (caller-side handle: id + room handle)
//!   └── RoomActorHandle ──mpsc──▶ RoomActor
//!                                  └── Room
//!                                      ├── participants (registration order)
//!                                      │   └── Box<dyn Participant>::receive
//!                                      └── transcript (append-only)
//! ```
//!
//! # Key Design Decisions
//!
//! - **Names are identities**: display names are unique per room; the room
//!   mints a [`ParticipantId`] on registration and callers only hold that id
//! - **Reject, never ignore**: duplicate registration and unknown
//!   senders/recipients are surfaced as [`RoomError`] values and leave the
//!   transcript untouched
//! - **Injectable output**: rendered lines go to a [`NotificationSink`]
//!
//! # Modules
//!
//! - [`actors`] - Single-owner actor wrapper serializing room access
//! - [`config`] - Service configuration from environment
//! - [`errors`] - Error types with error codes
//! - [`observability`] - Metrics definitions
//! - [`participant`] - Participant capability and caller-side handles
//! - [`room`] - The dispatcher
//! - [`sink`] - Output sinks
//! - [`transcript`] - Transcript records and snapshots

pub mod actors;
pub mod config;
pub mod errors;
pub mod observability;
pub mod participant;
pub mod room;
pub mod sink;
pub mod transcript;

pub use actors::{RoomActor, RoomActorHandle};
pub use errors::RoomError;
pub use participant::{ConsoleParticipant, Member, Participant, ParticipantId};
pub use room::Room;
pub use sink::{NotificationSink, StdoutSink, TracingSink};
pub use transcript::{RecordKind, Transcript, TranscriptRecord};
