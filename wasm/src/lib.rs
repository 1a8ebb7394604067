// chatstore-wasm — WebAssembly bindings for the browser front-end
//
// Every query returns a freshly owned JSON string; nothing is shared with JS
// between calls.

use chatstore_core::{ChatStore, MemoryStorage, MessageId, UserId};
use std::sync::Arc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            console_error_panic_hook::set_once();
            tracing_wasm::set_as_global_default();
        });
    }
}

/// One chat store per page. Snapshots from `saveData` stay in page memory.
#[wasm_bindgen]
pub struct Messenger {
    store: ChatStore,
}

#[wasm_bindgen]
impl Messenger {
    #[wasm_bindgen(constructor)]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        init_logging();
        Self {
            store: ChatStore::new().with_backend(Arc::new(MemoryStorage::new())),
        }
    }

    /// Seed demo users and conversations. Only the first call has an effect.
    pub fn init(&mut self) {
        if self.store.initialize() {
            tracing::info!("Messenger initialized");
        }
    }

    /// Id of the stored message, 0 when message ids are exhausted
    #[wasm_bindgen(js_name = addMessage)]
    pub fn add_message(
        &mut self,
        sender_id: UserId,
        receiver_id: UserId,
        text: String,
    ) -> MessageId {
        self.store.add_message(sender_id, receiver_id, text)
    }

    /// JSON array of the conversation, oldest first
    #[wasm_bindgen(js_name = getMessages)]
    pub fn get_messages(&self, user_a: UserId, user_b: UserId) -> String {
        self.store.messages_json(user_a, user_b)
    }

    /// JSON array of all users, ascending by id
    #[wasm_bindgen(js_name = getContacts)]
    pub fn get_contacts(&self) -> String {
        self.store.contacts_json()
    }

    /// JSON object for the user, `{}` when unknown
    #[wasm_bindgen(js_name = getUserInfo)]
    pub fn get_user_info(&self, user_id: UserId) -> String {
        self.store.user_info_json(user_id)
    }

    #[wasm_bindgen(js_name = clearChat)]
    pub fn clear_chat(&mut self, user_a: UserId, user_b: UserId) {
        self.store.clear_chat(user_a, user_b);
    }

    #[wasm_bindgen(js_name = saveData)]
    pub fn save_data(&self) {
        if let Err(e) = self.store.save_data() {
            tracing::warn!("saveData failed: {}", e);
        }
    }

    #[wasm_bindgen(js_name = loadData)]
    pub fn load_data(&mut self) {
        if let Err(e) = self.store.load_data() {
            tracing::warn!("loadData failed: {}", e);
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn parse(json: &str) -> serde_json::Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_boundary_sentinels() {
        let messenger = Messenger::new();
        assert_eq!(messenger.get_contacts(), "[]");
        assert_eq!(messenger.get_user_info(1), "{}");
        assert_eq!(messenger.get_messages(1, 2), "[]");
    }

    #[test]
    fn test_init_then_chat() {
        let mut messenger = Messenger::new();
        messenger.init();
        messenger.init();

        assert_eq!(parse(&messenger.get_contacts()).as_array().unwrap().len(), 4);
        assert_eq!(parse(&messenger.get_user_info(2))["name"], "Мария");

        let id = messenger.add_message(2, 1, "ping".to_string());
        assert_eq!(id, 8);

        let chat = parse(&messenger.get_messages(1, 2));
        let chat = chat.as_array().unwrap();
        assert_eq!(chat.len(), 4);
        assert_eq!(chat[3]["text"], "ping");
        assert_eq!(chat[3]["senderId"], 2);
    }

    #[test]
    fn test_save_clear_load() {
        let mut messenger = Messenger::new();
        messenger.init();
        messenger.save_data();

        messenger.clear_chat(1, 3);
        assert_eq!(messenger.get_messages(3, 1), "[]");

        messenger.load_data();
        assert_eq!(parse(&messenger.get_messages(3, 1)).as_array().unwrap().len(), 2);
    }
}
