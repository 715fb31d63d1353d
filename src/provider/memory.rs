//! In-memory provider backed by an explicitly registered hierarchy.

use crate::error::ProviderError;
use crate::item::TestItem;
use crate::provider::TestItemProvider;
use crate::types::ItemId;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct Hierarchy {
    /// `None` until roots are registered
    roots: Option<Vec<TestItem>>,
    /// Missing entry means the children are unavailable
    children: HashMap<ItemId, Vec<TestItem>>,
    parents: HashMap<ItemId, TestItem>,
    failing: HashSet<ItemId>,
}

/// Provider serving a hierarchy registered through [`set_roots`](Self::set_roots)
/// and [`set_children`](Self::set_children).
///
/// Parent links follow registration: every item listed under a parent reports
/// that parent, items registered as roots report none.
#[derive(Default)]
pub struct MemoryProvider {
    hierarchy: RwLock<Hierarchy>,
    children_calls: AtomicUsize,
    parent_calls: AtomicUsize,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the top-level items
    pub fn set_roots(&self, roots: Vec<TestItem>) {
        let mut hierarchy = self.hierarchy.write();
        for root in &roots {
            hierarchy.parents.remove(&root.id());
        }
        hierarchy.roots = Some(roots);
    }

    /// Forget the top-level items; they report as unavailable again
    pub fn clear_roots(&self) {
        self.hierarchy.write().roots = None;
    }

    /// Replace the children of `parent`
    pub fn set_children(&self, parent: &TestItem, children: Vec<TestItem>) {
        let mut hierarchy = self.hierarchy.write();
        for child in &children {
            hierarchy.parents.insert(child.id(), parent.clone());
        }
        hierarchy.children.insert(parent.id(), children);
    }

    /// Forget the children of `parent`; they report as unavailable again
    pub fn clear_children(&self, parent: &TestItem) {
        self.hierarchy.write().children.remove(&parent.id());
    }

    /// Make every provider call about `item` fail
    pub fn fail_on(&self, item: &TestItem) {
        self.hierarchy.write().failing.insert(item.id());
    }

    pub fn children_calls(&self) -> usize {
        self.children_calls.load(Ordering::SeqCst)
    }

    pub fn parent_calls(&self) -> usize {
        self.parent_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self, id: &ItemId) -> Result<(), ProviderError> {
        if self.hierarchy.read().failing.contains(id) {
            return Err(ProviderError::Backend(format!("lookup failed for {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl TestItemProvider for MemoryProvider {
    async fn get_children(
        &self,
        item: Option<&TestItem>,
    ) -> Result<Option<Vec<TestItem>>, ProviderError> {
        self.children_calls.fetch_add(1, Ordering::SeqCst);
        let Some(item) = item else {
            return Ok(self.hierarchy.read().roots.clone());
        };
        let id = item.id();
        self.check_failure(&id)?;
        Ok(self.hierarchy.read().children.get(&id).cloned())
    }

    async fn get_parent(&self, item: &TestItem) -> Result<Option<TestItem>, ProviderError> {
        self.parent_calls.fetch_add(1, Ordering::SeqCst);
        let id = item.id();
        self.check_failure(&id)?;
        Ok(self.hierarchy.read().parents.get(&id).cloned())
    }
}
