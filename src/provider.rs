//! Test item provider contract
//!
//! The provider owns the discovered hierarchy. The engine only asks it for the
//! children of an item and for the parent of an item.

pub mod memory;

use crate::error::ProviderError;
use crate::item::TestItem;
use async_trait::async_trait;

pub use memory::MemoryProvider;

/// Lazily computes the test hierarchy
#[async_trait]
pub trait TestItemProvider: Send + Sync {
    /// Children of `item`, or the top-level items when `item` is `None`.
    ///
    /// `Ok(None)` means the children are not known yet. It is not the same as
    /// `Ok(Some(vec![]))`, which means there are none.
    async fn get_children(
        &self,
        item: Option<&TestItem>,
    ) -> Result<Option<Vec<TestItem>>, ProviderError>;

    /// Parent of `item`, or `None` for a top-level item.
    async fn get_parent(&self, item: &TestItem) -> Result<Option<TestItem>, ProviderError>;
}
