//! Identity Cache
//!
//! Flat index from identity key to the most recently seen domain item. Rows are
//! only inserted or overwritten, never removed; keys are unique per logical
//! node so a stale row is harmless.

use crate::item::TestItem;
use crate::types::ItemId;
use parking_lot::RwLock;
use std::collections::HashMap;

/// ItemId -> TestItem, last write wins
#[derive(Default)]
pub struct IdentityCache {
    items: RwLock<HashMap<ItemId, TestItem>>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `item` under `id`, returning the item it superseded
    pub fn insert(&self, id: ItemId, item: TestItem) -> Option<TestItem> {
        self.items.write().insert(id, item)
    }

    pub fn get(&self, id: &ItemId) -> Option<TestItem> {
        self.items.read().get(id).cloned()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}
