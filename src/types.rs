//! Core types shared by the domain items, the host tree and the engine.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use url::Url;

/// ItemId: identity key of a logical test entity
///
/// Derived from (uri, kind, name). The same string addresses the display node
/// in the host tree and the domain item in the identity cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Derive the identity key for (uri, kind, name)
    ///
    /// Layout is `<uri>?kind=<kind>&name=<name>` with the pairs form-urlencoded.
    /// The encoded pairs never contain a raw `?`, so the last `?` always separates
    /// the location from the pairs and distinct tuples give distinct keys.
    pub fn new(uri: Option<&Url>, kind: ItemKind, name: &str) -> Self {
        let pairs = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("kind", kind.as_str())
            .append_pair("name", name)
            .finish();
        let location = uri.map(Url::as_str).unwrap_or_default();
        ItemId(format!("{}?{}", location, pairs))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Kind of a test entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Workspace,
    Module,
    Package,
    File,
    Test,
    Benchmark,
    Fuzz,
    Example,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Workspace => "workspace",
            ItemKind::Module => "module",
            ItemKind::Package => "package",
            ItemKind::File => "file",
            ItemKind::Test => "test",
            ItemKind::Benchmark => "benchmark",
            ItemKind::Fuzz => "fuzz",
            ItemKind::Example => "example",
        }
    }

    pub fn variant(self) -> ItemVariant {
        match self {
            ItemKind::Workspace => ItemVariant::Root,
            ItemKind::Module | ItemKind::Package | ItemKind::File => ItemVariant::Container,
            ItemKind::Test | ItemKind::Benchmark | ItemKind::Fuzz | ItemKind::Example => {
                ItemVariant::TestCase
            }
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural role of a domain item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemVariant {
    /// Synthetic aggregation point, never runnable on its own
    Root,
    /// Module, package or file
    Container,
    /// Test function and its dynamic subtests
    TestCase,
}

/// Zero-based position in a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

/// Source location span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: Position,
    pub end: Position,
}

impl SourceRange {
    pub fn new(start_line: u32, start_character: u32, end_line: u32, end_character: u32) -> Self {
        Self {
            start: Position {
                line: start_line,
                character: start_character,
            },
            end: Position {
                line: end_line,
                character: end_character,
            },
        }
    }
}

/// Capability tag attached to a display node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
}

impl Tag {
    /// Tag id marking a node that can be run or debugged in isolation
    pub const CAN_DEBUG: &'static str = "canDebug";

    pub fn can_debug() -> Self {
        Tag {
            id: Self::CAN_DEBUG.to_string(),
        }
    }
}
