//! Provider and host wrappers that yield to the runtime before every async
//! call, so concurrent engine operations actually interleave.

use std::sync::Arc;

use async_trait::async_trait;
use testsync::host::{MemoryCollection, MemoryController, MemoryNode};
use testsync::provider::MemoryProvider;
use testsync::types::{SourceRange, Tag};
use testsync::{
    HostError, ItemId, NodeCollection, ProviderError, TestController, TestItem, TestItemProvider,
    TestNode,
};
use url::Url;

pub struct SuspendingProvider(pub Arc<MemoryProvider>);

#[async_trait]
impl TestItemProvider for SuspendingProvider {
    async fn get_children(
        &self,
        item: Option<&TestItem>,
    ) -> Result<Option<Vec<TestItem>>, ProviderError> {
        tokio::task::yield_now().await;
        self.0.get_children(item).await
    }

    async fn get_parent(&self, item: &TestItem) -> Result<Option<TestItem>, ProviderError> {
        tokio::task::yield_now().await;
        self.0.get_parent(item).await
    }
}

#[derive(Debug, Clone)]
pub struct SuspendingNode(pub MemoryNode);

impl TestNode for SuspendingNode {
    type Children = SuspendingCollection;

    fn id(&self) -> &ItemId {
        self.0.id()
    }

    fn label(&self) -> String {
        self.0.label()
    }

    fn children(&self) -> SuspendingCollection {
        SuspendingCollection(self.0.children())
    }

    fn set_can_resolve_children(&self, value: bool) {
        self.0.set_can_resolve_children(value);
    }

    fn set_range(&self, range: Option<SourceRange>) {
        self.0.set_range(range);
    }

    fn set_error(&self, error: Option<String>) {
        self.0.set_error(error);
    }

    fn set_tags(&self, tags: Vec<Tag>) {
        self.0.set_tags(tags);
    }

    fn set_busy(&self, busy: bool) {
        self.0.set_busy(busy);
    }
}

#[derive(Debug, Clone)]
pub struct SuspendingCollection(pub MemoryCollection);

#[async_trait]
impl NodeCollection<SuspendingNode> for SuspendingCollection {
    fn get(&self, id: &ItemId) -> Option<SuspendingNode> {
        self.0.get(id).map(SuspendingNode)
    }

    fn nodes(&self) -> Vec<SuspendingNode> {
        self.0.nodes().into_iter().map(SuspendingNode).collect()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    async fn add(&self, node: SuspendingNode) -> Result<(), HostError> {
        tokio::task::yield_now().await;
        self.0.add(node.0).await
    }

    async fn replace(&self, nodes: Vec<SuspendingNode>) -> Result<(), HostError> {
        tokio::task::yield_now().await;
        self.0
            .replace(nodes.into_iter().map(|n| n.0).collect())
            .await
    }
}

#[derive(Default)]
pub struct SuspendingController(pub MemoryController);

impl TestController for SuspendingController {
    type Node = SuspendingNode;

    fn create_test_item(&self, id: ItemId, label: &str, uri: Option<&Url>) -> SuspendingNode {
        SuspendingNode(self.0.create_test_item(id, label, uri))
    }

    fn items(&self) -> SuspendingCollection {
        SuspendingCollection(self.0.items())
    }
}
