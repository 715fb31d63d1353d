//! In-memory host tree
//!
//! A complete, headless implementation of the host contract. Nodes are shared
//! handles, so node identity can be observed with [`MemoryNode::ptr_eq`].
//! Once the controller is disposed or dropped, every collection of its tree
//! refuses further mutation with [`HostError::Disposed`].

use crate::error::HostError;
use crate::host::{NodeCollection, ResultInvalidation, TestController, TestNode};
use crate::types::{ItemId, SourceRange, Tag};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use url::Url;

#[derive(Debug, Default)]
struct NodeState {
    can_resolve_children: bool,
    range: Option<SourceRange>,
    error: Option<String>,
    tags: Vec<Tag>,
    busy: bool,
}

#[derive(Debug)]
struct NodeInner {
    id: ItemId,
    label: String,
    uri: Option<Url>,
    state: RwLock<NodeState>,
    children: MemoryCollection,
}

/// Display node of the in-memory host
#[derive(Debug, Clone)]
pub struct MemoryNode {
    inner: Arc<NodeInner>,
}

impl MemoryNode {
    fn new(id: ItemId, label: &str, uri: Option<&Url>, disposed: &Arc<AtomicBool>) -> Self {
        Self {
            inner: Arc::new(NodeInner {
                id,
                label: label.to_string(),
                uri: uri.cloned(),
                state: RwLock::new(NodeState::default()),
                children: MemoryCollection::new(disposed.clone()),
            }),
        }
    }

    /// Whether both handles address the same node
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    pub fn uri(&self) -> Option<&Url> {
        self.inner.uri.as_ref()
    }

    pub fn can_resolve_children(&self) -> bool {
        self.inner.state.read().can_resolve_children
    }

    pub fn range(&self) -> Option<SourceRange> {
        self.inner.state.read().range
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.read().error.clone()
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.inner.state.read().tags.clone()
    }

    pub fn busy(&self) -> bool {
        self.inner.state.read().busy
    }
}

impl TestNode for MemoryNode {
    type Children = MemoryCollection;

    fn id(&self) -> &ItemId {
        &self.inner.id
    }

    fn label(&self) -> String {
        self.inner.label.clone()
    }

    fn children(&self) -> MemoryCollection {
        self.inner.children.clone()
    }

    fn set_can_resolve_children(&self, value: bool) {
        self.inner.state.write().can_resolve_children = value;
    }

    fn set_range(&self, range: Option<SourceRange>) {
        self.inner.state.write().range = range;
    }

    fn set_error(&self, error: Option<String>) {
        self.inner.state.write().error = error;
    }

    fn set_tags(&self, tags: Vec<Tag>) {
        self.inner.state.write().tags = tags;
    }

    fn set_busy(&self, busy: bool) {
        self.inner.state.write().busy = busy;
    }
}

/// Ordered child collection; clones share membership
#[derive(Debug, Clone, Default)]
pub struct MemoryCollection {
    nodes: Arc<RwLock<Vec<MemoryNode>>>,
    /// Shared by every collection of one controller's tree
    disposed: Arc<AtomicBool>,
}

impl MemoryCollection {
    fn new(disposed: Arc<AtomicBool>) -> Self {
        Self {
            nodes: Arc::default(),
            disposed,
        }
    }

    fn check_alive(&self) -> Result<(), HostError> {
        if self.disposed.load(Ordering::SeqCst) {
            return Err(HostError::Disposed);
        }
        Ok(())
    }

    /// Ids of the members in order
    pub fn ids(&self) -> Vec<ItemId> {
        self.nodes.read().iter().map(|n| n.id().clone()).collect()
    }
}

#[async_trait]
impl NodeCollection<MemoryNode> for MemoryCollection {
    fn get(&self, id: &ItemId) -> Option<MemoryNode> {
        self.nodes.read().iter().find(|n| n.id() == id).cloned()
    }

    fn nodes(&self) -> Vec<MemoryNode> {
        self.nodes.read().clone()
    }

    fn len(&self) -> usize {
        self.nodes.read().len()
    }

    async fn add(&self, node: MemoryNode) -> Result<(), HostError> {
        self.check_alive()?;
        let mut nodes = self.nodes.write();
        match nodes.iter().position(|n| n.id() == node.id()) {
            Some(index) => nodes[index] = node,
            None => nodes.push(node),
        }
        Ok(())
    }

    async fn replace(&self, nodes: Vec<MemoryNode>) -> Result<(), HostError> {
        self.check_alive()?;
        let mut members: Vec<MemoryNode> = Vec::with_capacity(nodes.len());
        for node in nodes {
            match members.iter().position(|n| n.id() == node.id()) {
                Some(index) => members[index] = node,
                None => members.push(node),
            }
        }
        *self.nodes.write() = members;
        Ok(())
    }
}

/// Invalidation request recorded by [`MemoryController`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invalidation {
    All,
    Nodes(Vec<ItemId>),
}

#[derive(Default)]
struct InvalidationLog {
    entries: RwLock<Vec<Invalidation>>,
}

impl ResultInvalidation<MemoryNode> for InvalidationLog {
    fn invalidate_all(&self) {
        self.entries.write().push(Invalidation::All);
    }

    fn invalidate(&self, nodes: &[MemoryNode]) {
        let ids = nodes.iter().map(|n| n.id().clone()).collect();
        self.entries.write().push(Invalidation::Nodes(ids));
    }
}

/// In-memory host tree
pub struct MemoryController {
    items: MemoryCollection,
    invalidation: Option<InvalidationLog>,
    disposed: Arc<AtomicBool>,
}

impl MemoryController {
    pub fn new() -> Self {
        Self::with_invalidation(Some(InvalidationLog::default()))
    }

    /// Host without result invalidation support
    pub fn without_result_invalidation() -> Self {
        Self::with_invalidation(None)
    }

    fn with_invalidation(invalidation: Option<InvalidationLog>) -> Self {
        let disposed = Arc::new(AtomicBool::new(false));
        Self {
            items: MemoryCollection::new(disposed.clone()),
            invalidation,
            disposed,
        }
    }

    /// Tear the tree down; later `add` and `replace` calls fail
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Invalidation requests received so far
    pub fn invalidations(&self) -> Vec<Invalidation> {
        self.invalidation
            .as_ref()
            .map(|log| log.entries.read().clone())
            .unwrap_or_default()
    }

    /// Follow a path of ids from the root collection
    pub fn find(&self, path: &[ItemId]) -> Option<MemoryNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.items.get(first)?;
        for id in rest {
            node = node.children().get(id)?;
        }
        Some(node)
    }
}

impl Default for MemoryController {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MemoryController {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl TestController for MemoryController {
    type Node = MemoryNode;

    fn create_test_item(&self, id: ItemId, label: &str, uri: Option<&Url>) -> MemoryNode {
        MemoryNode::new(id, label, uri, &self.disposed)
    }

    fn items(&self) -> MemoryCollection {
        self.items.clone()
    }

    fn result_invalidation(&self) -> Option<&dyn ResultInvalidation<MemoryNode>> {
        self.invalidation
            .as_ref()
            .map(|log| log as &dyn ResultInvalidation<MemoryNode>)
    }
}
