//! Participant double that records deliveries for assertions.

use room_service::Participant;
use std::sync::{Arc, Mutex};

/// One delivered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub sender: String,
    pub message: String,
}

impl Delivery {
    pub fn new(sender: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            message: message.into(),
        }
    }
}

/// Shared view of a `RecordingParticipant`'s deliveries.
///
/// Stays valid after the participant has been boxed and handed to a room.
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    deliveries: Arc<Mutex<Vec<Delivery>>>,
}

impl Inbox {
    /// All deliveries so far, in arrival order.
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of deliveries matching `sender` and `message`.
    pub fn count(&self, sender: &str, message: &str) -> usize {
        self.deliveries
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.sender == sender && d.message == message)
            .count()
    }

    /// Panics unless exactly one matching delivery arrived.
    pub fn assert_received_once(&self, sender: &str, message: &str) {
        let count = self.count(sender, message);
        assert_eq!(
            count,
            1,
            "expected exactly one delivery of {message:?} from {sender}, got {count}; inbox: {:?}",
            self.deliveries()
        );
    }

    /// Panics if anything arrived.
    pub fn assert_empty(&self) {
        assert!(
            self.is_empty(),
            "expected no deliveries, got {:?}",
            self.deliveries()
        );
    }

    fn push(&self, delivery: Delivery) {
        self.deliveries.lock().unwrap().push(delivery);
    }
}

/// Participant that records every delivery into an [`Inbox`].
#[derive(Debug)]
pub struct RecordingParticipant {
    name: String,
    inbox: Inbox,
}

impl RecordingParticipant {
    /// Create a participant and the inbox that observes it.
    pub fn new(name: impl Into<String>) -> (Self, Inbox) {
        let inbox = Inbox::default();
        let participant = Self {
            name: name.into(),
            inbox: inbox.clone(),
        };
        (participant, inbox)
    }

    /// Same as [`RecordingParticipant::new`], already boxed for registration.
    pub fn boxed(name: impl Into<String>) -> (Box<dyn Participant>, Inbox) {
        let (participant, inbox) = Self::new(name);
        (Box::new(participant), inbox)
    }
}

impl Participant for RecordingParticipant {
    fn name(&self) -> &str {
        &self.name
    }

    fn receive(&mut self, message: &str, sender: &str) {
        self.inbox.push(Delivery::new(sender, message));
    }
}
