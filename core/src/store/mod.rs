// Store module — in-memory collections and the snapshot hook

pub mod backend;
pub mod conversations;
pub mod snapshot;
pub mod users;

pub use backend::{MemoryStorage, StorageBackend};
pub use conversations::ConversationStore;
pub use snapshot::StoreSnapshot;
pub use users::{User, UserDirectory};
