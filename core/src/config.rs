// Store configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Create the built-in profiles on `initialize`
    pub seed_users: bool,

    /// Post the built-in demo conversations on `initialize`
    pub seed_messages: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_users: true,
            seed_messages: true,
        }
    }
}

impl StoreConfig {
    /// Start with nothing; profiles and messages come from the caller
    pub fn empty() -> Self {
        Self {
            seed_users: false,
            seed_messages: false,
        }
    }
}
