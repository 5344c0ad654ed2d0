//! Message types for the room actor.
//!
//! Requests travel over `tokio::sync::mpsc`; replies use `tokio::sync::oneshot`
//! for request-reply semantics.

use crate::errors::RoomError;
use crate::participant::{Participant, ParticipantId};
use crate::transcript::{Transcript, TranscriptRecord};

use std::fmt;
use tokio::sync::oneshot;

/// Messages sent to `RoomActor`.
pub enum RoomMessage {
    /// Register a participant.
    Register {
        participant: Box<dyn Participant>,
        respond_to: oneshot::Sender<Result<ParticipantId, RoomError>>,
    },

    /// Broadcast to everyone but the sender.
    Broadcast {
        message: String,
        sender: ParticipantId,
        respond_to: oneshot::Sender<Result<TranscriptRecord, RoomError>>,
    },

    /// Deliver to a single recipient.
    SendDirect {
        message: String,
        sender: ParticipantId,
        recipient: ParticipantId,
        respond_to: oneshot::Sender<Result<TranscriptRecord, RoomError>>,
    },

    /// Snapshot the transcript.
    GetTranscript {
        respond_to: oneshot::Sender<Transcript>,
    },

    /// Get current room state (for debugging/health).
    GetState {
        respond_to: oneshot::Sender<RoomState>,
    },
}

// `Box<dyn Participant>` is not `Debug`; print the variant and the names only.
impl fmt::Debug for RoomMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomMessage::Register { participant, .. } => f
                .debug_struct("Register")
                .field("participant", &participant.name())
                .finish_non_exhaustive(),
            RoomMessage::Broadcast { sender, .. } => f
                .debug_struct("Broadcast")
                .field("sender", sender)
                .finish_non_exhaustive(),
            RoomMessage::SendDirect {
                sender, recipient, ..
            } => f
                .debug_struct("SendDirect")
                .field("sender", sender)
                .field("recipient", recipient)
                .finish_non_exhaustive(),
            RoomMessage::GetTranscript { .. } => f.write_str("GetTranscript"),
            RoomMessage::GetState { .. } => f.write_str("GetState"),
        }
    }
}

impl RoomMessage {
    /// Bounded label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            RoomMessage::Register { .. } => "register",
            RoomMessage::Broadcast { .. } => "broadcast",
            RoomMessage::SendDirect { .. } => "send_direct",
            RoomMessage::GetTranscript { .. } => "get_transcript",
            RoomMessage::GetState { .. } => "get_state",
        }
    }
}

/// Room state snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomState {
    pub room_name: String,
    /// Registered names in registration order.
    pub participants: Vec<String>,
    pub transcript_len: usize,
    pub allow_self_direct: bool,
    /// Requests waiting in the mailbox when the state was taken.
    pub mailbox_depth: usize,
    pub messages_processed: u64,
}
