use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Author id → resolved display name.
///
/// Owned by exactly one [`super::SlackThreadSource`]. Entries are only added, never
/// invalidated; the lock is never held across an await point.
#[derive(Debug, Default)]
pub struct IdentityCache {
    names: RwLock<HashMap<String, String>>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, author_id: &str) -> Option<String> {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(author_id)
            .cloned()
    }

    pub fn insert(&self, author_id: &str, display_name: &str) {
        self.names
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(author_id.to_string())
            .or_insert_with(|| display_name.to_string());
    }

    pub fn len(&self) -> usize {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
