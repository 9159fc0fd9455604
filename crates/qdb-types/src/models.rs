use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A contact from the users table. Identity is `external_id` (the ICQ number).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub external_id: i64,
    pub display_name: String,
}

impl Participant {
    pub fn new(external_id: i64, display_name: impl Into<String>) -> Self {
        Self {
            external_id,
            display_name: display_name.into(),
        }
    }
}

/// List label in the form `name (id)`.
impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.external_id)
    }
}

/// Who sent a message, relative to the account that exported the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
    Me,
    Other,
}

impl SenderRole {
    /// `fromUser` is NULL for messages the local account sent.
    pub fn from_sender_present(present: bool) -> Self {
        if present { Self::Other } else { Self::Me }
    }
}

/// A decoded message ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMessage {
    pub text: String,
    pub sender_role: SenderRole,
    pub sender_name: String,
    pub timestamp: NaiveDateTime,
}

/// One participant's message history, oldest first.
///
/// `resolved` is false when the participant had no conversation key; the
/// message list is empty in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub participant: Participant,
    pub resolved: bool,
    pub messages: Vec<NormalizedMessage>,
}

impl Conversation {
    pub fn unresolved(participant: Participant) -> Self {
        Self {
            participant,
            resolved: false,
            messages: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}
