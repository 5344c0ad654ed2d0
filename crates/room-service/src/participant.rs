//! Participants and the handles used to speak for them.
//!
//! A participant is anything that can receive a message. The room owns the
//! registered participants; callers keep a [`Member`], which only carries the
//! [`ParticipantId`] minted at registration plus a handle to the room actor.

use crate::actors::RoomActorHandle;
use crate::errors::RoomError;
use crate::sink::NotificationSink;
use crate::transcript::TranscriptRecord;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Room-scoped participant identifier, minted on registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
    /// Mint a fresh identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The receive capability every participant variant implements.
pub trait Participant: Send {
    /// Display name, unique within a room and fixed for the participant's lifetime.
    fn name(&self) -> &str;

    /// Called once per delivered message.
    fn receive(&mut self, message: &str, sender: &str);
}

/// Reference participant: renders each delivery as a line on a sink.
pub struct ConsoleParticipant {
    name: String,
    sink: Arc<dyn NotificationSink>,
}

impl ConsoleParticipant {
    #[must_use]
    pub fn new(name: impl Into<String>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            name: name.into(),
            sink,
        }
    }
}

impl fmt::Debug for ConsoleParticipant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleParticipant")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Participant for ConsoleParticipant {
    fn name(&self) -> &str {
        &self.name
    }

    fn receive(&mut self, message: &str, sender: &str) {
        self.sink
            .notify(&format!("[{}] received from {sender}: {message}", self.name));
    }
}

/// Caller-side handle for a registered participant.
///
/// `send_broadcast` and `send_direct` forward to the room with this member as
/// the sender; the member holds no other state.
#[derive(Clone)]
pub struct Member {
    id: ParticipantId,
    name: String,
    room: RoomActorHandle,
}

impl Member {
    /// Register `participant` with the room and return its handle.
    pub async fn join(
        room: &RoomActorHandle,
        participant: Box<dyn Participant>,
    ) -> Result<Self, RoomError> {
        let name = participant.name().to_string();
        let id = room.register(participant).await?;
        Ok(Self {
            id,
            name,
            room: room.clone(),
        })
    }

    #[must_use]
    pub fn id(&self) -> ParticipantId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Send `message` to every other participant in the room.
    pub async fn send_broadcast(
        &self,
        message: impl Into<String>,
    ) -> Result<TranscriptRecord, RoomError> {
        self.room.broadcast(message.into(), self.id).await
    }

    /// Send `message` to `to` only.
    pub async fn send_direct(
        &self,
        message: impl Into<String>,
        to: &Member,
    ) -> Result<TranscriptRecord, RoomError> {
        self.room.send_direct(message.into(), self.id, to.id).await
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("room", &self.room.room_name())
            .finish()
    }
}
