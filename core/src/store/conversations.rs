// Conversation storage — message sequences filed under directed keys
//
// A send from 1 to 2 and the reply from 2 to 1 land in different sequences.
// Reading a conversation merges both and re-sorts by message id.

use crate::message::{ConversationKey, Message, MessageId, UserId};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    threads: HashMap<ConversationKey, Vec<Message>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the sequence of the message's directed key
    pub fn append(&mut self, message: Message) {
        self.threads
            .entry(message.conversation_key())
            .or_default()
            .push(message);
    }

    /// Both directions of the conversation between `a` and `b`, by id ascending.
    /// The result is identical for `(a, b)` and `(b, a)`.
    pub fn between(&self, a: UserId, b: UserId) -> Vec<Message> {
        let forward = ConversationKey::new(a, b);
        let mut merged: Vec<Message> = Vec::new();

        for key in Self::keys_for(forward) {
            if let Some(thread) = self.threads.get(&key) {
                merged.extend(thread.iter().cloned());
            }
        }

        merged.sort_by_key(|m| m.id);
        merged
    }

    /// Drop both directed sequences. Returns how many messages were removed.
    pub fn remove_pair(&mut self, a: UserId, b: UserId) -> usize {
        Self::keys_for(ConversationKey::new(a, b))
            .filter_map(|key| self.threads.remove(&key))
            .map(|thread| thread.len())
            .sum()
    }

    /// Number of directed keys holding at least one message
    pub fn thread_count(&self) -> usize {
        self.threads.values().filter(|t| !t.is_empty()).count()
    }

    pub fn message_count(&self) -> usize {
        self.threads.values().map(Vec::len).sum()
    }

    /// Every stored message, by id ascending
    pub fn all(&self) -> Vec<Message> {
        let mut all: Vec<Message> = self.threads.values().flatten().cloned().collect();
        all.sort_by_key(|m| m.id);
        all
    }

    pub fn max_id(&self) -> Option<MessageId> {
        self.threads.values().flatten().map(|m| m.id).max()
    }

    pub fn clear(&mut self) {
        self.threads.clear();
    }

    // A self-conversation has a single key; yield it once so it is not doubled.
    fn keys_for(forward: ConversationKey) -> impl Iterator<Item = ConversationKey> {
        let reverse = forward.reversed();
        std::iter::once(forward).chain((reverse != forward).then_some(reverse))
    }
}
