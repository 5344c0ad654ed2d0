//! Transcript records and snapshots.
//!
//! The transcript is an append-only log. Records are created when an
//! operation is accepted and never change afterwards. [`Transcript`] is an
//! owned copy, so iterating it never observes later appends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of accepted operation a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// A participant joined the room.
    Join,
    /// A message to every other participant.
    Broadcast,
    /// A message to exactly one participant.
    Direct,
}

impl RecordKind {
    /// Returns the kind as a string for metric labels.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Join => "join",
            RecordKind::Broadcast => "broadcast",
            RecordKind::Direct => "direct",
        }
    }
}

/// One accepted operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    /// 1-based append position.
    pub seq: u64,
    pub kind: RecordKind,
    /// Sender name (the joining participant for `Join`).
    pub sender: String,
    /// Recipient name, set only for `Direct`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    /// Message text. Empty for `Join`.
    pub text: String,
    pub accepted_at: DateTime<Utc>,
}

impl fmt::Display for TranscriptRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, &self.recipient) {
            (RecordKind::Join, _) => write!(f, "SYSTEM: {} joined the room.", self.sender),
            (RecordKind::Broadcast, _) => write!(f, "{} -> ALL: {}", self.sender, self.text),
            (RecordKind::Direct, Some(recipient)) => {
                write!(f, "{} -> {}: {}", self.sender, recipient, self.text)
            }
            (RecordKind::Direct, None) => write!(f, "{} -> ?: {}", self.sender, self.text),
        }
    }
}

/// Read-only snapshot of a room's transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    records: Vec<TranscriptRecord>,
}

impl Transcript {
    pub(crate) fn from_records(records: Vec<TranscriptRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TranscriptRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TranscriptRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn records(&self) -> &[TranscriptRecord] {
        &self.records
    }

    /// Render as a header line followed by one line per record.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::from("--- Transcript ---\n");
        for record in &self.records {
            out.push_str(&record.to_string());
            out.push('\n');
        }
        out
    }

    /// Render as a pretty-printed JSON array of records.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.records)
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a TranscriptRecord;
    type IntoIter = std::slice::Iter<'a, TranscriptRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
