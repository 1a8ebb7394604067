// ChatStore Core — users, conversations and messages held in memory
//
// Everything the front-end sees crosses the boundary as JSON text. Lookups
// that find nothing answer with `[]` or `{}` instead of an error.

pub mod clock;
pub mod config;
pub mod message;
pub mod seed;
pub mod store;

use std::sync::Arc;
use thiserror::Error;

pub use clock::{Clock, FixedClock, LocalClock};
pub use config::StoreConfig;
pub use message::{ConversationKey, Message, MessageId, UserId};
pub use store::{MemoryStorage, StorageBackend, StoreSnapshot, User};

use store::snapshot::SNAPSHOT_KEY;
use store::{ConversationStore, UserDirectory};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Failures of the snapshot hook and the JSON codec.
/// Queries and mutations on the store itself never fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatStoreError {
    #[error("Storage error")]
    StorageError,
    #[error("Serialization error")]
    Serialization,
    #[error("Unsupported snapshot version {0}")]
    UnsupportedSnapshot(u8),
    #[error("Message id {0} out of range")]
    InvalidMessageId(MessageId),
}

/// Returned by `add_message` when the id space is used up. Real ids start at 1.
pub const NO_MESSAGE_ID: MessageId = 0;

// ============================================================================
// DATA TYPES
// ============================================================================

/// Counters for status output
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub users: usize,
    /// Directed conversation keys holding messages
    pub conversations: usize,
    pub messages: usize,
    pub next_message_id: MessageId,
}

// ============================================================================
// CHAT STORE
// ============================================================================

pub struct ChatStore {
    config: StoreConfig,
    users: UserDirectory,
    conversations: ConversationStore,
    /// Next id to hand out. Never decreases.
    next_message_id: MessageId,
    initialized: bool,
    clock: Arc<dyn Clock>,
    /// Snapshot target for `save_data`/`load_data`
    backend: Option<Arc<dyn StorageBackend>>,
}

impl Default for ChatStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatStore {
    /// Empty store with the default configuration. Call `initialize` to seed it.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            users: UserDirectory::new(),
            conversations: ConversationStore::new(),
            next_message_id: 1,
            initialized: false,
            clock: Arc::new(LocalClock),
            backend: None,
        }
    }

    /// Replace the time source used to stamp new messages
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Attach the backend `save_data`/`load_data` use
    pub fn with_backend(mut self, backend: Arc<dyn StorageBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    // ------------------------------------------------------------------------
    // LIFECYCLE
    // ------------------------------------------------------------------------

    /// Seed the configured demo profiles and conversations.
    ///
    /// Runs once per store. Later calls leave the data untouched and return
    /// `false`.
    pub fn initialize(&mut self) -> bool {
        if self.initialized {
            tracing::debug!("ChatStore already initialized, skipping seed");
            return false;
        }

        if self.config.seed_users {
            for user in seed::demo_users() {
                self.users.upsert(user);
            }
        }

        if self.config.seed_messages {
            for (sender, receiver, text) in seed::demo_messages() {
                self.add_message(sender, receiver, text);
            }
        }

        self.initialized = true;
        tracing::info!(
            "ChatStore initialized ({} users, {} messages)",
            self.users.count(),
            self.conversations.message_count()
        );
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // ------------------------------------------------------------------------
    // USERS
    // ------------------------------------------------------------------------

    /// Insert or replace a profile
    pub fn add_user(&mut self, user: User) {
        let id = user.id;
        match self.users.upsert(user) {
            Some(previous) => tracing::debug!("Replaced user {} ({})", id, previous.name),
            None => tracing::debug!("Added user {}", id),
        }
    }

    /// All users, ascending by id
    pub fn get_contacts(&self) -> Vec<User> {
        self.users.list()
    }

    pub fn get_user_info(&self, user_id: UserId) -> Option<User> {
        self.users.get(user_id).cloned()
    }

    // ------------------------------------------------------------------------
    // MESSAGES
    // ------------------------------------------------------------------------

    /// Post a message and return its id.
    ///
    /// Sender and receiver are not checked against the user directory.
    /// Once every id has been handed out the message is dropped and
    /// `NO_MESSAGE_ID` is returned.
    pub fn add_message(
        &mut self,
        sender_id: UserId,
        receiver_id: UserId,
        text: impl Into<String>,
    ) -> MessageId {
        let id = self.next_message_id;
        let Some(next) = id.checked_add(1) else {
            tracing::error!(
                "Message ids exhausted, message {}->{} dropped",
                sender_id,
                receiver_id
            );
            return NO_MESSAGE_ID;
        };
        self.next_message_id = next;

        let message = Message::new(
            id,
            sender_id,
            receiver_id,
            text.into(),
            self.clock.local_time(),
        );
        tracing::debug!("Message {} filed under {}", id, message.conversation_key());
        self.conversations.append(message);
        id
    }

    /// Both directions of the conversation between two users, oldest first.
    /// Argument order does not matter.
    pub fn get_messages(&self, user_a: UserId, user_b: UserId) -> Vec<Message> {
        self.conversations.between(user_a, user_b)
    }

    /// Remove the conversation between two users. No-op when there is none.
    pub fn clear_chat(&mut self, user_a: UserId, user_b: UserId) {
        let removed = self.conversations.remove_pair(user_a, user_b);
        tracing::debug!(
            "Cleared chat {}<->{} ({} messages)",
            user_a,
            user_b,
            removed
        );
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            users: self.users.count(),
            conversations: self.conversations.thread_count(),
            messages: self.conversations.message_count(),
            next_message_id: self.next_message_id,
        }
    }

    // ------------------------------------------------------------------------
    // JSON VIEWS
    // ------------------------------------------------------------------------

    /// `get_messages` as a JSON array
    pub fn messages_json(&self, user_a: UserId, user_b: UserId) -> String {
        message::encode_messages(&self.get_messages(user_a, user_b))
            .unwrap_or_else(|_| message::EMPTY_ARRAY.to_string())
    }

    /// `get_contacts` as a JSON array
    pub fn contacts_json(&self) -> String {
        message::encode_users(&self.get_contacts())
            .unwrap_or_else(|_| message::EMPTY_ARRAY.to_string())
    }

    /// `get_user_info` as a JSON object, `{}` when the user is unknown
    pub fn user_info_json(&self, user_id: UserId) -> String {
        message::encode_user(self.users.get(user_id))
            .unwrap_or_else(|_| message::EMPTY_OBJECT.to_string())
    }

    // ------------------------------------------------------------------------
    // SNAPSHOT HOOK
    // ------------------------------------------------------------------------

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot::new(
            self.users.list(),
            self.conversations.all(),
            self.next_message_id,
        )
    }

    /// Replace the whole store state with `snapshot`.
    /// A snapshot with out-of-range ids is refused and the store is left as is.
    pub fn restore(&mut self, snapshot: StoreSnapshot) -> Result<(), ChatStoreError> {
        snapshot.validate()?;
        let next_id = snapshot.resume_id().max(self.next_message_id);

        self.users.clear();
        for user in snapshot.users {
            self.users.upsert(user);
        }
        self.conversations.clear();
        for message in snapshot.messages {
            self.conversations.append(message);
        }
        self.next_message_id = next_id;
        self.initialized = true;
        Ok(())
    }

    /// Write a snapshot to the attached backend. Without one this only logs.
    pub fn save_data(&self) -> Result<(), ChatStoreError> {
        let Some(backend) = &self.backend else {
            tracing::info!("No storage backend attached, save skipped");
            return Ok(());
        };

        let bytes = self.snapshot().encode()?;
        backend.put(SNAPSHOT_KEY, &bytes).map_err(|e| {
            tracing::error!("Snapshot write failed: {}", e);
            ChatStoreError::StorageError
        })?;
        backend.flush().map_err(|e| {
            tracing::error!("Snapshot flush failed: {}", e);
            ChatStoreError::StorageError
        })?;

        tracing::info!("Data saved ({} bytes)", bytes.len());
        Ok(())
    }

    /// Restore the last snapshot from the attached backend.
    /// Without a backend or a saved snapshot this only logs.
    pub fn load_data(&mut self) -> Result<(), ChatStoreError> {
        let Some(backend) = &self.backend else {
            tracing::info!("No storage backend attached, load skipped");
            return Ok(());
        };

        let bytes = backend.get(SNAPSHOT_KEY).map_err(|e| {
            tracing::error!("Snapshot read failed: {}", e);
            ChatStoreError::StorageError
        })?;
        let Some(bytes) = bytes else {
            tracing::info!("No saved snapshot, load skipped");
            return Ok(());
        };

        let snapshot = StoreSnapshot::decode(&bytes)?;
        self.restore(snapshot)?;
        tracing::info!(
            "Data loaded ({} users, {} messages)",
            self.users.count(),
            self.conversations.message_count()
        );
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
