//! Room error types.
//!
//! Every variant except `Internal` is a precondition violation on one of the
//! room's public operations. None are retryable: they indicate caller misuse,
//! not a transient failure. A rejected operation never appends a transcript
//! record.

use thiserror::Error;

/// Room error type.
///
/// Maps to signaling-style error codes:
/// - `SelfDirectDisallowed`: `FORBIDDEN` (3)
/// - `UnknownSender`, `UnknownRecipient`: `NOT_FOUND` (4)
/// - `DuplicateParticipant`: `CONFLICT` (5)
/// - `Internal`: `INTERNAL_ERROR` (6)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// A participant with this display name is already registered.
    #[error("Duplicate participant: {0}")]
    DuplicateParticipant(String),

    /// The sender is not registered with this room.
    #[error("Unknown sender")]
    UnknownSender,

    /// The recipient is not registered with this room.
    #[error("Unknown recipient")]
    UnknownRecipient,

    /// The room does not allow a participant to direct-message itself.
    #[error("Direct messages to self are disabled")]
    SelfDirectDisallowed,

    /// Actor mailbox or reply channel failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RoomError {
    /// Returns the signaling error code for this error.
    #[must_use]
    pub fn error_code(&self) -> i32 {
        match self {
            RoomError::SelfDirectDisallowed => 3, // FORBIDDEN
            RoomError::UnknownSender | RoomError::UnknownRecipient => 4, // NOT_FOUND
            RoomError::DuplicateParticipant(_) => 5, // CONFLICT
            RoomError::Internal(_) => 6,          // INTERNAL_ERROR
        }
    }

    /// Bounded label for the `reason` metric dimension.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            RoomError::DuplicateParticipant(_) => "duplicate_participant",
            RoomError::UnknownSender => "unknown_sender",
            RoomError::UnknownRecipient => "unknown_recipient",
            RoomError::SelfDirectDisallowed => "self_direct_disallowed",
            RoomError::Internal(_) => "internal",
        }
    }

    /// Whether retrying the same call could succeed.
    ///
    /// Precondition violations are never retryable. Internal errors mean the
    /// room actor has stopped, so a retry against the same handle fails too.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Returns a caller-safe error message (no internal details).
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            RoomError::DuplicateParticipant(_) => "Participant already in room".to_string(),
            RoomError::UnknownSender => "Sender is not in the room".to_string(),
            RoomError::UnknownRecipient => "Recipient is not in the room".to_string(),
            RoomError::SelfDirectDisallowed => {
                "Cannot send a direct message to yourself".to_string()
            }
            RoomError::Internal(_) => "An internal error occurred".to_string(),
        }
    }
}
