// Snapshot — the full store state as one JSON document

use crate::message::{Message, MessageId};
use crate::store::User;
use crate::ChatStoreError;
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: u8 = 1;

/// Backend key the snapshot is filed under
pub const SNAPSHOT_KEY: &[u8] = b"chatstore_snapshot";

/// Maximum accepted snapshot size: 16 MB
pub const MAX_SNAPSHOT_SIZE: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub version: u8,
    pub users: Vec<User>,
    /// All messages, by id ascending
    pub messages: Vec<Message>,
    pub next_message_id: MessageId,
}

impl StoreSnapshot {
    pub fn new(users: Vec<User>, messages: Vec<Message>, next_message_id: MessageId) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            users,
            messages,
            next_message_id,
        }
    }

    /// First id safe to hand out after restoring this snapshot
    pub fn resume_id(&self) -> MessageId {
        let after_max = self
            .messages
            .iter()
            .map(|m| m.id.saturating_add(1))
            .max()
            .unwrap_or(1);
        self.next_message_id.max(after_max)
    }

    /// Reject id state that would make the store hand out a duplicate id.
    ///
    /// `MessageId::MAX` is never allocated, and the counter starts at 1.
    pub fn validate(&self) -> Result<(), ChatStoreError> {
        if self.next_message_id == 0 {
            tracing::warn!("Snapshot next message id is 0");
            return Err(ChatStoreError::InvalidMessageId(0));
        }
        if let Some(m) = self
            .messages
            .iter()
            .find(|m| m.id == 0 || m.id == MessageId::MAX)
        {
            tracing::warn!("Snapshot holds message with id {}", m.id);
            return Err(ChatStoreError::InvalidMessageId(m.id));
        }
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>, ChatStoreError> {
        let bytes = serde_json::to_vec(self).map_err(|_| ChatStoreError::Serialization)?;
        if bytes.len() > MAX_SNAPSHOT_SIZE {
            tracing::warn!(
                "Snapshot too large: {} bytes (max {})",
                bytes.len(),
                MAX_SNAPSHOT_SIZE
            );
            return Err(ChatStoreError::StorageError);
        }
        Ok(bytes)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ChatStoreError> {
        if bytes.len() > MAX_SNAPSHOT_SIZE {
            return Err(ChatStoreError::StorageError);
        }
        let snapshot: StoreSnapshot =
            serde_json::from_slice(bytes).map_err(|_| ChatStoreError::Serialization)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(ChatStoreError::UnsupportedSnapshot(snapshot.version));
        }
        snapshot.validate()?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn msg(id: MessageId) -> Message {
        Message::new(
            id,
            1,
            2,
            "x".to_string(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_resume_id_never_reuses() {
        let snap = StoreSnapshot::new(vec![], vec![msg(1), msg(9)], 4);
        assert_eq!(snap.resume_id(), 10);

        let snap = StoreSnapshot::new(vec![], vec![msg(1)], 20);
        assert_eq!(snap.resume_id(), 20);

        let snap = StoreSnapshot::new(vec![], vec![], 0);
        assert_eq!(snap.resume_id(), 1);
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let mut snap = StoreSnapshot::new(vec![User::new(1, "A", "a")], vec![], 1);
        snap.version = 99;
        let bytes = serde_json::to_vec(&snap).unwrap();

        assert!(matches!(
            StoreSnapshot::decode(&bytes),
            Err(ChatStoreError::UnsupportedSnapshot(99))
        ));
    }

    #[test]
    fn test_decode_rejects_exhausted_ids() {
        let snap = StoreSnapshot::new(vec![], vec![msg(MessageId::MAX)], 5);
        let bytes = serde_json::to_vec(&snap).unwrap();
        assert_eq!(
            StoreSnapshot::decode(&bytes),
            Err(ChatStoreError::InvalidMessageId(MessageId::MAX))
        );

        let snap = StoreSnapshot::new(vec![], vec![msg(3)], 0);
        let bytes = serde_json::to_vec(&snap).unwrap();
        assert_eq!(
            StoreSnapshot::decode(&bytes),
            Err(ChatStoreError::InvalidMessageId(0))
        );

        let snap = StoreSnapshot::new(vec![], vec![msg(0)], 2);
        assert!(snap.validate().is_err());
    }

    #[test]
    fn test_highest_valid_id_resumes_at_max() {
        // The last allocatable id leaves the counter at MAX, which is never handed out
        let snap = StoreSnapshot::new(vec![], vec![msg(MessageId::MAX - 1)], 1);
        assert!(snap.validate().is_ok());
        assert_eq!(snap.resume_id(), MessageId::MAX);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            StoreSnapshot::decode(b"not json"),
            Err(ChatStoreError::Serialization)
        ));
    }

    #[test]
    fn test_decode_rejects_oversized() {
        let big = vec![b' '; MAX_SNAPSHOT_SIZE + 1];
        assert!(StoreSnapshot::decode(&big).is_err());
    }

    #[test]
    fn test_encode_decode() {
        let snap = StoreSnapshot::new(vec![User::new(1, "A", "a")], vec![msg(1)], 2);
        let restored = StoreSnapshot::decode(&snap.encode().unwrap()).unwrap();
        assert_eq!(restored, snap);
    }
}
