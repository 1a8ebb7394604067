// User directory — profiles keyed by id

use crate::message::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Presence text given to profiles created without one
pub const DEFAULT_STATUS: &str = "В сети";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Short string, usually a single emoji
    pub avatar: String,
    /// Free-text presence line
    pub status: String,
    pub online: bool,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: avatar.into(),
            status: DEFAULT_STATUS.to_string(),
            online: true,
        }
    }
}

/// Users ordered by id. Iteration order is the contact-list order.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: BTreeMap<UserId, User>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a profile, replacing any profile with the same id.
    /// Returns the replaced profile.
    pub fn upsert(&mut self, user: User) -> Option<User> {
        self.users.insert(user.id, user)
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// All profiles, ascending by id
    pub fn list(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.users.len()
    }

    pub fn clear(&mut self) {
        self.users.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_online() {
        let user = User::new(1, "Алексей", "👨‍💻");
        assert!(user.online);
        assert_eq!(user.status, DEFAULT_STATUS);
    }

    #[test]
    fn test_list_is_sorted_by_id() {
        let mut dir = UserDirectory::new();
        dir.upsert(User::new(4, "Анна", "👩‍🔬"));
        dir.upsert(User::new(1, "Алексей", "👨‍💻"));
        dir.upsert(User::new(3, "Дмитрий", "👨‍🔧"));

        let ids: Vec<UserId> = dir.list().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_upsert_replaces() {
        let mut dir = UserDirectory::new();
        assert!(dir.upsert(User::new(2, "Мария", "👩‍💻")).is_none());
        let old = dir.upsert(User::new(2, "Маша", "👩‍💻")).unwrap();

        assert_eq!(old.name, "Мария");
        assert_eq!(dir.get(2).unwrap().name, "Маша");
        assert_eq!(dir.count(), 1);
    }

    #[test]
    fn test_get_missing() {
        let dir = UserDirectory::new();
        assert!(dir.get(99).is_none());
    }
}
