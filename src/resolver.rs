//! Test Item Resolver
//!
//! Keeps the host tree a lazily materialized projection of the provider's
//! hierarchy. Display nodes are addressed by the same identity key as domain
//! items, so repeated resolves reuse existing nodes and the host keeps its UI
//! state (selection, expansion) across refreshes.
//!
//! The only state owned here is the identity cache. Parent/child relationships
//! are always asked of the provider.

use crate::cache::IdentityCache;
use crate::error::SyncError;
use crate::host::{Children, NodeCollection, TestController, TestNode};
use crate::item::TestItem;
use crate::provider::TestItemProvider;
use crate::types::{ItemId, Tag};
use crate::views::render_tree;
use futures::future::{try_join_all, BoxFuture, FutureExt};
use std::sync::Arc;
use tracing::{debug, trace};

/// Sets the busy flag of a node for as long as it lives
struct BusyGuard<'a, N: TestNode>(&'a N);

impl<'a, N: TestNode> BusyGuard<'a, N> {
    fn new(node: &'a N) -> Self {
        node.set_busy(true);
        BusyGuard(node)
    }
}

impl<N: TestNode> Drop for BusyGuard<'_, N> {
    fn drop(&mut self) {
        self.0.set_busy(false);
    }
}

/// Adapter between a [`TestItemProvider`] and a host [`TestController`]
///
/// One resolver per synchronization session; dropping it drops the identity
/// cache with it.
pub struct TestItemResolver<C: TestController, P: TestItemProvider> {
    ctrl: Arc<C>,
    provider: Arc<P>,
    items: IdentityCache,
    debug_tree: bool,
}

impl<C: TestController, P: TestItemProvider> TestItemResolver<C, P> {
    pub fn new(ctrl: Arc<C>, provider: Arc<P>) -> Self {
        Self {
            ctrl,
            provider,
            items: IdentityCache::new(),
            debug_tree: false,
        }
    }

    /// Dump the display tree after every resolve
    pub fn with_debug_tree(mut self, enabled: bool) -> Self {
        self.debug_tree = enabled;
        self
    }

    pub fn controller(&self) -> &Arc<C> {
        &self.ctrl
    }

    /// Domain item last recorded for a display node id
    pub fn item(&self, id: &ItemId) -> Option<TestItem> {
        self.items.get(id)
    }

    /// Root display nodes
    pub fn roots(&self) -> Vec<C::Node> {
        self.ctrl.items().nodes()
    }

    /// Materialize the children of `node`, or the root nodes when `node` is `None`
    ///
    /// Nodes unknown to the identity cache are ignored, and so are children the
    /// provider reports as unavailable. Otherwise the child collection is
    /// replaced by exactly the provider's current children.
    pub fn resolve<'a>(&'a self, node: Option<&'a C::Node>) -> BoxFuture<'a, Result<(), SyncError>> {
        async move {
            let _busy = node.map(BusyGuard::new);
            let result = self.resolve_children(node).await;
            if self.debug_tree {
                let label = match node {
                    Some(node) => format!("Resolving {}", node.id()),
                    None => "Resolving (root)".to_string(),
                };
                debug!("{}\n{}", label, render_tree(&self.roots()));
            }
            result
        }
        .boxed()
    }

    async fn resolve_children(&self, node: Option<&C::Node>) -> Result<(), SyncError> {
        let item = match node {
            Some(node) => match self.items.get(node.id()) {
                Some(item) => Some(item),
                None => {
                    debug!(id = %node.id(), "Ignoring resolve of unknown test item");
                    return Ok(());
                }
            },
            None => None,
        };

        let container = match node {
            Some(node) => node.children(),
            None => self.ctrl.items(),
        };
        let Some(children) = self.provider.get_children(item.as_ref()).await? else {
            debug!(
                id = node.map(|n| n.id().as_str()).unwrap_or("(root)"),
                "Children not available yet"
            );
            return Ok(());
        };

        let nodes = try_join_all(
            children
                .iter()
                .map(|child| self.get_or_create(child, &container, false)),
        )
        .await?;
        container.replace(nodes).await?;
        Ok(())
    }

    /// Apply a change notification from the provider
    ///
    /// `None` means the scope of the change is unknown: the tree is cleared and
    /// rebuilt from the root. Otherwise each item is materialized along with its
    /// ancestors, then all of them are resolved concurrently.
    ///
    /// Ancestor chains are materialized one item at a time: a missing ancestor
    /// shared by two items must be added once, or the later add evicts the
    /// earlier node along with the children attached to it.
    pub async fn did_change_test_item(&self, items: Option<&[TestItem]>) -> Result<(), SyncError> {
        let Some(items) = items else {
            self.ctrl.items().replace(Vec::new()).await?;
            return self.resolve(None).await;
        };

        let mut nodes = Vec::with_capacity(items.len());
        for item in items {
            nodes.push(self.get_or_create_all(item).await?);
        }
        try_join_all(nodes.iter().map(|node| self.resolve(Some(node)))).await?;
        Ok(())
    }

    /// Mark reported results stale for `items`, or for the whole tree
    ///
    /// Items without a materialized node are skipped. Does nothing when the
    /// host cannot invalidate results.
    pub async fn invalidate_test_results(
        &self,
        items: Option<&[TestItem]>,
    ) -> Result<(), SyncError> {
        let Some(invalidation) = self.ctrl.result_invalidation() else {
            return Ok(());
        };
        let Some(items) = items else {
            invalidation.invalidate_all();
            return Ok(());
        };

        let nodes: Vec<C::Node> = try_join_all(items.iter().map(|item| self.get(item)))
            .await?
            .into_iter()
            .flatten()
            .collect();
        invalidation.invalidate(&nodes);
        Ok(())
    }

    /// Mark results of a single display node stale, if the host supports it
    pub fn invalidate_node(&self, node: &C::Node) {
        if let Some(invalidation) = self.ctrl.result_invalidation() {
            invalidation.invalidate(std::slice::from_ref(node));
        }
    }

    /// Display node currently representing `item`, if it has been materialized
    ///
    /// Walks up through the provider and back down the tree by id; there is no
    /// reverse index to keep in sync.
    pub fn get<'a>(&'a self, item: &'a TestItem) -> BoxFuture<'a, Result<Option<C::Node>, SyncError>> {
        async move {
            let id = item.id();
            match self.provider.get_parent(item).await? {
                None => Ok(self.ctrl.items().get(&id)),
                Some(parent) => Ok(self
                    .get(&parent)
                    .await?
                    .and_then(|node| node.children().get(&id))),
            }
        }
        .boxed()
    }

    /// Display node for `item`, creating it and any missing ancestor first
    ///
    /// Inserted nodes are added, not reconciled: resolve the returned node to
    /// fold it into the provider's view.
    pub fn get_or_create_all<'a>(
        &'a self,
        item: &'a TestItem,
    ) -> BoxFuture<'a, Result<C::Node, SyncError>> {
        async move {
            let children = match self.provider.get_parent(item).await? {
                None => self.ctrl.items(),
                Some(parent) => self.get_or_create_all(&parent).await?.children(),
            };
            self.get_or_create(item, &children, true).await
        }
        .boxed()
    }

    async fn get_or_create(
        &self,
        item: &TestItem,
        children: &Children<C>,
        add: bool,
    ) -> Result<C::Node, SyncError> {
        let id = item.id();
        self.items.insert(id.clone(), item.clone());

        let node = match children.get(&id) {
            Some(existing) => existing,
            None => {
                trace!(id = %id, "Creating test item");
                self.ctrl.create_test_item(id, &item.label, item.uri.as_ref())
            }
        };
        node.set_can_resolve_children(item.has_children);
        node.set_range(item.range);
        node.set_error(item.error.clone());

        if !item.is_root() {
            node.set_tags(vec![Tag::can_debug()]);
        }

        if add {
            children.add(node.clone()).await?;
        }

        // Subtests are needed to target runs, so test cases are expanded eagerly
        if item.is_test_case() {
            self.resolve(Some(&node)).await?;
        }

        Ok(node)
    }
}
