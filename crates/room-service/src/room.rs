//! `Room` - the dispatcher that owns the participant registry and transcript.
//!
//! All operations are synchronous and take `&mut self`, so the room has a
//! single writer by construction. Wrap it in a [`RoomActor`] to share it
//! between tasks.
//!
//! Every accepted operation appends exactly one transcript record before any
//! delivery happens. Rejected operations append nothing and deliver nothing.
//!
//! [`RoomActor`]: crate::actors::RoomActor

use crate::config::Config;
use crate::errors::RoomError;
use crate::observability::metrics;
use crate::participant::{Participant, ParticipantId};
use crate::sink::NotificationSink;
use crate::transcript::{RecordKind, Transcript, TranscriptRecord};

use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// A registered participant.
struct Registered {
    id: ParticipantId,
    /// Name captured at registration.
    name: String,
    participant: Box<dyn Participant>,
}

/// The room (mediator).
pub struct Room {
    name: String,
    allow_self_direct: bool,
    /// Registration order.
    participants: Vec<Registered>,
    transcript: Vec<TranscriptRecord>,
    sink: Arc<dyn NotificationSink>,
}

impl Room {
    /// Create an empty room. Self-direct messages are allowed.
    #[must_use]
    pub fn new(name: impl Into<String>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            name: name.into(),
            allow_self_direct: true,
            participants: Vec::new(),
            transcript: Vec::new(),
            sink,
        }
    }

    /// Create an empty room using the configured name and policy.
    #[must_use]
    pub fn from_config(config: &Config, sink: Arc<dyn NotificationSink>) -> Self {
        Self::new(config.room_name.clone(), sink).with_self_direct(config.allow_self_direct)
    }

    /// Set whether a participant may direct-message itself.
    #[must_use]
    pub fn with_self_direct(mut self, allowed: bool) -> Self {
        self.allow_self_direct = allowed;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn allows_self_direct(&self) -> bool {
        self.allow_self_direct
    }

    /// Number of registered participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Registered names in registration order.
    #[must_use]
    pub fn participants(&self) -> Vec<String> {
        self.participants.iter().map(|p| p.name.clone()).collect()
    }

    #[must_use]
    pub fn is_registered(&self, id: ParticipantId) -> bool {
        self.participants.iter().any(|p| p.id == id)
    }

    /// Register a participant and append a join record.
    ///
    /// Names are unique within a room; registering a name twice fails with
    /// [`RoomError::DuplicateParticipant`] so a broadcast can never be
    /// delivered to the same participant twice.
    pub fn register(
        &mut self,
        participant: Box<dyn Participant>,
    ) -> Result<ParticipantId, RoomError> {
        let name = participant.name().to_string();

        if self.participants.iter().any(|p| p.name == name) {
            return Err(self.reject(RoomError::DuplicateParticipant(name)));
        }

        let id = ParticipantId::new();
        self.participants.push(Registered {
            id,
            name: name.clone(),
            participant,
        });
        self.append(RecordKind::Join, name.clone(), None, String::new());
        self.sink.notify(&format!("{name} joined the room."));

        metrics::set_participants_registered(&self.name, self.participants.len());

        info!(
            target: "room",
            room = %self.name,
            participant = %name,
            total_participants = self.participants.len(),
            "Participant joined"
        );

        Ok(id)
    }

    /// Deliver `message` from `sender` to every other registered participant,
    /// in registration order.
    pub fn broadcast(
        &mut self,
        message: &str,
        sender: ParticipantId,
    ) -> Result<TranscriptRecord, RoomError> {
        let Some(sender_name) = self.name_of(sender) else {
            return Err(self.reject(RoomError::UnknownSender));
        };

        let record = self.append(
            RecordKind::Broadcast,
            sender_name.clone(),
            None,
            message.to_string(),
        );

        let mut delivered = 0usize;
        for target in self.participants.iter_mut().filter(|p| p.id != sender) {
            target.participant.receive(message, &sender_name);
            delivered += 1;
        }

        debug!(
            target: "room",
            room = %self.name,
            seq = record.seq,
            sender = %sender_name,
            delivered,
            "Broadcast delivered"
        );

        Ok(record)
    }

    /// Deliver `message` from `sender` to `recipient` only.
    ///
    /// The sender is checked before the recipient.
    pub fn send_direct(
        &mut self,
        message: &str,
        sender: ParticipantId,
        recipient: ParticipantId,
    ) -> Result<TranscriptRecord, RoomError> {
        let Some(sender_name) = self.name_of(sender) else {
            return Err(self.reject(RoomError::UnknownSender));
        };
        let Some(recipient_name) = self.name_of(recipient) else {
            return Err(self.reject(RoomError::UnknownRecipient));
        };
        if sender == recipient && !self.allow_self_direct {
            return Err(self.reject(RoomError::SelfDirectDisallowed));
        }

        let record = self.append(
            RecordKind::Direct,
            sender_name.clone(),
            Some(recipient_name.clone()),
            message.to_string(),
        );

        if let Some(target) = self.participants.iter_mut().find(|p| p.id == recipient) {
            target.participant.receive(message, &sender_name);
        }

        debug!(
            target: "room",
            room = %self.name,
            seq = record.seq,
            sender = %sender_name,
            recipient = %recipient_name,
            "Direct message delivered"
        );

        Ok(record)
    }

    /// Owned snapshot of the transcript.
    #[must_use]
    pub fn transcript(&self) -> Transcript {
        Transcript::from_records(self.transcript.clone())
    }

    /// Number of transcript records.
    #[must_use]
    pub fn transcript_len(&self) -> usize {
        self.transcript.len()
    }

    fn name_of(&self, id: ParticipantId) -> Option<String> {
        self.participants
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
    }

    fn append(
        &mut self,
        kind: RecordKind,
        sender: String,
        recipient: Option<String>,
        text: String,
    ) -> TranscriptRecord {
        let record = TranscriptRecord {
            seq: self.transcript.len() as u64 + 1,
            kind,
            sender,
            recipient,
            text,
            accepted_at: Utc::now(),
        };
        self.transcript.push(record.clone());
        metrics::record_message(kind.as_str());
        record
    }

    fn reject(&self, err: RoomError) -> RoomError {
        debug!(
            target: "room",
            room = %self.name,
            reason = err.reason(),
            "Operation rejected"
        );
        metrics::record_rejection(err.reason());
        err
    }
}

impl fmt::Debug for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Room")
            .field("name", &self.name)
            .field("allow_self_direct", &self.allow_self_direct)
            .field("participants", &self.participants())
            .field("transcript_len", &self.transcript.len())
            .finish_non_exhaustive()
    }
}
