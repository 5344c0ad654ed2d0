//! Pre-configured participants and rosters.

use crate::recording::{Inbox, RecordingParticipant};
use room_service::{Participant, ParticipantId, Room, RoomError};
use uuid::Uuid;

/// Test participant fixture: a name plus the inbox of its recording double.
#[derive(Debug, Clone)]
pub struct TestParticipant {
    pub name: String,
    pub inbox: Inbox,
}

impl TestParticipant {
    /// Build a recording participant named `name`.
    pub fn new(name: impl Into<String>) -> (Self, Box<dyn Participant>) {
        let name = name.into();
        let (participant, inbox) = RecordingParticipant::boxed(name.clone());
        (Self { name, inbox }, participant)
    }

    /// Build a recording participant with a random name.
    pub fn random() -> (Self, Box<dyn Participant>) {
        Self::new(format!("participant-{}", Uuid::new_v4()))
    }
}

/// Participants registered directly with a synchronous [`Room`], in order.
#[derive(Debug, Default)]
pub struct TestRoster {
    members: Vec<(ParticipantId, TestParticipant)>,
}

impl TestRoster {
    /// Register one recording participant per name, in the given order.
    pub fn register(room: &mut Room, names: &[&str]) -> Result<Self, RoomError> {
        let mut members = Vec::with_capacity(names.len());
        for name in names {
            let (fixture, participant) = TestParticipant::new(*name);
            let id = room.register(participant)?;
            members.push((id, fixture));
        }
        Ok(Self { members })
    }

    /// The Alice/Bob/Carol roster used by the startup scenario.
    pub fn alice_bob_carol(room: &mut Room) -> Result<Self, RoomError> {
        Self::register(room, &["Alice", "Bob", "Carol"])
    }

    /// Id of the participant named `name`. Panics if absent.
    pub fn id(&self, name: &str) -> ParticipantId {
        self.find(name).0
    }

    /// Inbox of the participant named `name`. Panics if absent.
    pub fn inbox(&self, name: &str) -> &Inbox {
        &self.find(name).1.inbox
    }

    pub fn ids(&self) -> Vec<ParticipantId> {
        self.members.iter().map(|(id, _)| *id).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn find(&self, name: &str) -> &(ParticipantId, TestParticipant) {
        self.members
            .iter()
            .find(|(_, p)| p.name == name)
            .unwrap_or_else(|| panic!("no participant named {name} in roster"))
    }
}
