//! `RoomActor` - single owner of a [`Room`].
//!
//! Each `RoomActor`:
//! - Owns the room's registry and transcript
//! - Processes one request at a time from its mailbox, which totally orders
//!   register, broadcast and direct sends
//! - Stops on cancellation or when every handle is dropped
//!
//! Requests still queued when the actor stops are dropped; their callers get
//! [`RoomError::Internal`].

use crate::errors::RoomError;
use crate::observability::metrics;
use crate::participant::{Participant, ParticipantId};
use crate::room::Room;
use crate::transcript::{Transcript, TranscriptRecord};

use super::messages::{RoomMessage, RoomState};

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// Handle to a `RoomActor`.
#[derive(Clone, Debug)]
pub struct RoomActorHandle {
    sender: mpsc::Sender<RoomMessage>,
    cancel_token: CancellationToken,
    room_name: Arc<str>,
}

impl RoomActorHandle {
    /// Get the room name.
    #[must_use]
    pub fn room_name(&self) -> &str {
        &self.room_name
    }

    /// Register a participant; returns the id minted for it.
    pub async fn register(
        &self,
        participant: Box<dyn Participant>,
    ) -> Result<ParticipantId, RoomError> {
        let (tx, rx) = oneshot::channel();
        self.send(RoomMessage::Register {
            participant,
            respond_to: tx,
        })
        .await?;

        rx.await
            .map_err(|e| RoomError::Internal(format!("response receive failed: {e}")))?
    }

    /// Broadcast `message` from `sender` to every other participant.
    pub async fn broadcast(
        &self,
        message: String,
        sender: ParticipantId,
    ) -> Result<TranscriptRecord, RoomError> {
        let (tx, rx) = oneshot::channel();
        self.send(RoomMessage::Broadcast {
            message,
            sender,
            respond_to: tx,
        })
        .await?;

        rx.await
            .map_err(|e| RoomError::Internal(format!("response receive failed: {e}")))?
    }

    /// Send `message` from `sender` to `recipient` only.
    pub async fn send_direct(
        &self,
        message: String,
        sender: ParticipantId,
        recipient: ParticipantId,
    ) -> Result<TranscriptRecord, RoomError> {
        let (tx, rx) = oneshot::channel();
        self.send(RoomMessage::SendDirect {
            message,
            sender,
            recipient,
            respond_to: tx,
        })
        .await?;

        rx.await
            .map_err(|e| RoomError::Internal(format!("response receive failed: {e}")))?
    }

    /// Snapshot the transcript.
    pub async fn transcript(&self) -> Result<Transcript, RoomError> {
        let (tx, rx) = oneshot::channel();
        self.send(RoomMessage::GetTranscript { respond_to: tx })
            .await?;

        rx.await
            .map_err(|e| RoomError::Internal(format!("response receive failed: {e}")))
    }

    /// Get current room state.
    pub async fn get_state(&self) -> Result<RoomState, RoomError> {
        let (tx, rx) = oneshot::channel();
        self.send(RoomMessage::GetState { respond_to: tx }).await?;

        rx.await
            .map_err(|e| RoomError::Internal(format!("response receive failed: {e}")))
    }

    /// Cancel the room actor.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    /// Check if the actor is cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    async fn send(&self, message: RoomMessage) -> Result<(), RoomError> {
        self.sender
            .send(message)
            .await
            .map_err(|e| RoomError::Internal(format!("channel send failed: {e}")))
    }
}

/// The `RoomActor` implementation.
pub struct RoomActor {
    room: Room,
    receiver: mpsc::Receiver<RoomMessage>,
    cancel_token: CancellationToken,
    messages_processed: u64,
}

impl RoomActor {
    /// Spawn a new room actor.
    ///
    /// Returns a handle and the task join handle. A `mailbox_capacity` of zero
    /// is raised to one.
    pub fn spawn(
        room: Room,
        mailbox_capacity: usize,
        cancel_token: CancellationToken,
    ) -> (RoomActorHandle, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(mailbox_capacity.max(1));
        let room_name: Arc<str> = Arc::from(room.name());

        let actor = Self {
            room,
            receiver,
            cancel_token: cancel_token.clone(),
            messages_processed: 0,
        };

        let task_handle = tokio::spawn(actor.run());

        let handle = RoomActorHandle {
            sender,
            cancel_token,
            room_name,
        };

        (handle, task_handle)
    }

    /// Run the actor message loop.
    #[instrument(skip_all, name = "room.actor", fields(room = %self.room.name()))]
    async fn run(mut self) {
        info!(
            target: "room.actor",
            room = %self.room.name(),
            "RoomActor started"
        );

        loop {
            tokio::select! {
                () = self.cancel_token.cancelled() => {
                    info!(
                        target: "room.actor",
                        room = %self.room.name(),
                        "RoomActor received cancellation signal"
                    );
                    break;
                }

                msg = self.receiver.recv() => {
                    match msg {
                        Some(message) => {
                            self.handle_message(message);
                            self.messages_processed += 1;
                            metrics::set_actor_mailbox_depth(self.room.name(), self.receiver.len());
                        }
                        None => {
                            info!(
                                target: "room.actor",
                                room = %self.room.name(),
                                "RoomActor channel closed, exiting"
                            );
                            break;
                        }
                    }
                }
            }
        }

        info!(
            target: "room.actor",
            room = %self.room.name(),
            participants = self.room.len(),
            transcript_len = self.room.transcript_len(),
            messages_processed = self.messages_processed,
            "RoomActor stopped"
        );
    }

    /// Handle a single message.
    ///
    /// Reply send failures mean the caller stopped waiting; the operation
    /// has already been applied and stays applied.
    fn handle_message(&mut self, message: RoomMessage) {
        debug!(
            target: "room.actor",
            room = %self.room.name(),
            message_type = message.kind(),
            "Handling request"
        );

        match message {
            RoomMessage::Register {
                participant,
                respond_to,
            } => {
                let _ = respond_to.send(self.room.register(participant));
            }

            RoomMessage::Broadcast {
                message,
                sender,
                respond_to,
            } => {
                let _ = respond_to.send(self.room.broadcast(&message, sender));
            }

            RoomMessage::SendDirect {
                message,
                sender,
                recipient,
                respond_to,
            } => {
                let _ = respond_to.send(self.room.send_direct(&message, sender, recipient));
            }

            RoomMessage::GetTranscript { respond_to } => {
                let _ = respond_to.send(self.room.transcript());
            }

            RoomMessage::GetState { respond_to } => {
                let _ = respond_to.send(self.get_state());
            }
        }
    }

    fn get_state(&self) -> RoomState {
        RoomState {
            room_name: self.room.name().to_string(),
            participants: self.room.participants(),
            transcript_len: self.room.transcript_len(),
            allow_self_direct: self.room.allows_self_direct(),
            mailbox_depth: self.receiver.len(),
            messages_processed: self.messages_processed,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::sink::TracingSink;
    use crate::transcript::RecordKind;
    use std::sync::Mutex;
    use std::time::Duration;

    struct Probe {
        name: String,
        received: Arc<Mutex<Vec<String>>>,
    }

    impl Participant for Probe {
        fn name(&self) -> &str {
            &self.name
        }

        fn receive(&mut self, message: &str, _sender: &str) {
            self.received.lock().unwrap().push(message.to_string());
        }
    }

    fn probe(name: &str) -> (Box<dyn Participant>, Arc<Mutex<Vec<String>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let participant = Probe {
            name: name.to_string(),
            received: Arc::clone(&received),
        };
        (Box::new(participant), received)
    }

    fn spawn_room(name: &str) -> (RoomActorHandle, JoinHandle<()>) {
        let room = Room::new(name, Arc::new(TracingSink));
        RoomActor::spawn(room, 16, CancellationToken::new())
    }

    #[tokio::test]
    async fn test_room_actor_register_and_broadcast() {
        let (handle, _task) = spawn_room("actor-broadcast");
        let (alice, alice_rx) = probe("Alice");
        let (bob, bob_rx) = probe("Bob");

        let alice_id = handle.register(alice).await.unwrap();
        handle.register(bob).await.unwrap();

        let record = handle
            .broadcast("hello".to_string(), alice_id)
            .await
            .unwrap();

        assert_eq!(record.seq, 3);
        assert_eq!(record.kind, RecordKind::Broadcast);
        assert!(alice_rx.lock().unwrap().is_empty());
        assert_eq!(*bob_rx.lock().unwrap(), vec!["hello".to_string()]);

        handle.cancel();
    }

    #[tokio::test]
    async fn test_room_actor_propagates_rejections() {
        let (handle, _task) = spawn_room("actor-reject");
        let alice_id = handle.register(probe("Alice").0).await.unwrap();

        let duplicate = handle.register(probe("Alice").0).await;
        let unknown = handle
            .send_direct("x".to_string(), alice_id, ParticipantId::new())
            .await;

        assert_eq!(
            duplicate,
            Err(RoomError::DuplicateParticipant("Alice".to_string()))
        );
        assert_eq!(unknown, Err(RoomError::UnknownRecipient));
        assert_eq!(handle.transcript().await.unwrap().len(), 1);

        handle.cancel();
    }

    #[tokio::test]
    async fn test_room_actor_state() {
        let (handle, _task) = spawn_room("actor-state");
        handle.register(probe("Alice").0).await.unwrap();
        handle.register(probe("Bob").0).await.unwrap();

        let state = handle.get_state().await.unwrap();

        assert_eq!(state.room_name, "actor-state");
        assert_eq!(state.participants, vec!["Alice", "Bob"]);
        assert_eq!(state.transcript_len, 2);
        assert!(state.allow_self_direct);
        assert_eq!(state.messages_processed, 2);

        handle.cancel();
    }

    #[tokio::test]
    async fn test_concurrent_senders_are_totally_ordered() {
        let (handle, _task) = spawn_room("actor-concurrent");
        let mut ids = Vec::new();
        for name in ["A", "B", "C", "D"] {
            ids.push(handle.register(probe(name).0).await.unwrap());
        }

        let mut tasks = Vec::new();
        for (i, id) in ids.iter().copied().enumerate() {
            let handle = handle.clone();
            tasks.push(tokio::spawn(async move {
                for n in 0..25 {
                    handle.broadcast(format!("{i}-{n}"), id).await.unwrap();
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let transcript = handle.transcript().await.unwrap();
        assert_eq!(transcript.len(), 4 + 4 * 25);
        let seqs: Vec<u64> = transcript.iter().map(|r| r.seq).collect();
        assert_eq!(seqs, (1..=104).collect::<Vec<u64>>());

        // Each handle's requests keep their send order and appear exactly once.
        for (i, name) in ["A", "B", "C", "D"].iter().enumerate() {
            let texts: Vec<&str> = transcript
                .iter()
                .filter(|r| r.kind == RecordKind::Broadcast && r.sender == *name)
                .map(|r| r.text.as_str())
                .collect();
            let expected: Vec<String> = (0..25).map(|n| format!("{i}-{n}")).collect();
            assert_eq!(texts, expected, "{name} broadcasts out of order");
        }
        assert_eq!(transcript.get(3).map(|r| r.kind), Some(RecordKind::Broadcast));

        handle.cancel();
    }

    #[test]
    fn test_actor_reports_mailbox_depth() {
        use ::metrics::with_local_recorder;
        use metrics_util::debugging::{DebugValue, DebuggingRecorder};

        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        with_local_recorder(&recorder, || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async {
                let (handle, task) = spawn_room("actor-depth");
                handle.register(probe("Alice").0).await.unwrap();
                handle.cancel();
                task.await.unwrap();
            });
        });

        let snapshot = snapshotter.snapshot().into_vec();
        let depth = snapshot.iter().find(|(key, _, _, _)| {
            let key = key.key();
            key.name() == "room_actor_mailbox_depth"
                && key
                    .labels()
                    .any(|l| l.key() == "room" && l.value() == "actor-depth")
        });
        assert!(matches!(
            depth,
            Some((_, _, _, DebugValue::Gauge(value))) if value.into_inner() == 0.0
        ));
    }

    #[tokio::test]
    async fn test_requests_after_cancel_fail_internal() {
        let (handle, task) = spawn_room("actor-cancel");

        handle.cancel();
        assert!(handle.is_cancelled());
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("actor should stop after cancel")
            .unwrap();

        let result = handle.register(probe("Alice").0).await;
        assert!(matches!(result, Err(RoomError::Internal(_))));
    }
}
