// Message types — the records a conversation is made of

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// User identifier as seen by the front-end.
pub type UserId = u32;

/// Message identifier. Allocated by the store, strictly increasing.
pub type MessageId = u32;

/// Wall-clock format stamped on every message.
pub const TIMESTAMP_FORMAT: &str = "%H:%M";

/// A chat message.
///
/// Ordering inside a conversation is decided by `id` alone. `timestamp` is
/// display text only and never used to sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub text: String,
    /// Local time of creation, `HH:MM`
    pub timestamp: String,
    pub read: bool,
}

impl Message {
    pub fn new(
        id: MessageId,
        sender_id: UserId,
        receiver_id: UserId,
        text: String,
        at: NaiveTime,
    ) -> Self {
        Self {
            id,
            sender_id,
            receiver_id,
            text,
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            read: false,
        }
    }

    pub fn conversation_key(&self) -> ConversationKey {
        ConversationKey::new(self.sender_id, self.receiver_id)
    }
}

/// Directed pair of participants a message sequence is filed under.
///
/// `(1, 2)` and `(2, 1)` are different keys: a conversation lives in two
/// sequences that are merged when read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConversationKey {
    pub sender_id: UserId,
    pub receiver_id: UserId,
}

impl ConversationKey {
    pub fn new(sender_id: UserId, receiver_id: UserId) -> Self {
        Self {
            sender_id,
            receiver_id,
        }
    }

    /// The key for replies in the same conversation
    pub fn reversed(self) -> Self {
        Self::new(self.receiver_id, self.sender_id)
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.sender_id, self.receiver_id)
    }
}
