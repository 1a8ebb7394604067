// Message module — record types and JSON rendering

pub mod codec;
pub mod types;

pub use codec::{encode, encode_messages, encode_pretty, encode_user, encode_users};
pub use codec::{EMPTY_ARRAY, EMPTY_OBJECT};
pub use types::{ConversationKey, Message, MessageId, UserId, TIMESTAMP_FORMAT};
