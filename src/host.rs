//! Host tree contract
//!
//! The host owns the rendered tree and the lifetime of every display node. The
//! engine reads and writes only what these traits expose: a handful of mutable
//! fields per node and membership of child collections.

pub mod memory;

use crate::error::HostError;
use crate::types::{ItemId, SourceRange, Tag};
use async_trait::async_trait;
use url::Url;

pub use memory::{Invalidation, MemoryCollection, MemoryController, MemoryNode};

/// Handle to a display node
///
/// Handles are cheap to clone and all clones address the same node.
pub trait TestNode: Clone + Send + Sync + 'static {
    type Children: NodeCollection<Self>;

    /// Identity key, fixed at creation
    fn id(&self) -> &ItemId;
    fn label(&self) -> String;
    fn children(&self) -> Self::Children;

    fn set_can_resolve_children(&self, value: bool);
    fn set_range(&self, range: Option<SourceRange>);
    fn set_error(&self, error: Option<String>);
    fn set_tags(&self, tags: Vec<Tag>);
    fn set_busy(&self, busy: bool);
}

/// Ordered child collection of a display node, or the root collection
#[async_trait]
pub trait NodeCollection<N>: Clone + Send + Sync + 'static {
    fn get(&self, id: &ItemId) -> Option<N>;

    /// Members in display order
    fn nodes(&self) -> Vec<N>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert `node`, replacing a member with the same id
    async fn add(&self, node: N) -> Result<(), HostError>;

    /// Make `nodes` the exact membership of the collection
    async fn replace(&self, nodes: Vec<N>) -> Result<(), HostError>;
}

/// Result invalidation primitives; missing on older hosts
pub trait ResultInvalidation<N>: Send + Sync {
    /// Mark every reported result as stale
    fn invalidate_all(&self);

    /// Mark results of `nodes` (and their descendants) as stale
    fn invalidate(&self, nodes: &[N]);
}

/// The host tree
pub trait TestController: Send + Sync + 'static {
    type Node: TestNode;

    /// Create a detached display node; it joins the tree through `add` or `replace`
    fn create_test_item(&self, id: ItemId, label: &str, uri: Option<&Url>) -> Self::Node;

    /// Root collection
    fn items(&self) -> <Self::Node as TestNode>::Children;

    fn result_invalidation(&self) -> Option<&dyn ResultInvalidation<Self::Node>> {
        None
    }
}

/// Child collection type of a controller's nodes
pub type Children<C> = <<C as TestController>::Node as TestNode>::Children;
