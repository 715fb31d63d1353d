//! Domain items: entities of the logical test hierarchy
//!
//! Items are plain data. Parent/child relationships live in the provider and
//! are recomputed on demand, never stored on the item.

use crate::types::{ItemId, ItemKind, ItemVariant, SourceRange};
use serde::{Deserialize, Serialize};
use url::Url;

/// A node of the discovered test hierarchy
///
/// (uri, kind, name) is the identity of the item. Two instances with the same
/// tuple describe the same logical node; the later one carries the current
/// display fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestItem {
    #[serde(default)]
    pub uri: Option<Url>,
    pub kind: ItemKind,
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub range: Option<SourceRange>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TestItem {
    /// Create an item labelled with its name
    pub fn new(kind: ItemKind, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            uri: None,
            kind,
            label: name.clone(),
            name,
            has_children: false,
            range: None,
            error: None,
        }
    }

    pub fn with_uri(mut self, uri: Url) -> Self {
        self.uri = Some(uri);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_children(mut self, has_children: bool) -> Self {
        self.has_children = has_children;
        self
    }

    pub fn with_range(mut self, range: SourceRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Identity key of this item
    pub fn id(&self) -> ItemId {
        ItemId::new(self.uri.as_ref(), self.kind, &self.name)
    }

    pub fn variant(&self) -> ItemVariant {
        self.kind.variant()
    }

    pub fn is_root(&self) -> bool {
        self.variant() == ItemVariant::Root
    }

    pub fn is_test_case(&self) -> bool {
        self.variant() == ItemVariant::TestCase
    }
}
