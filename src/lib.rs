//! Testsync: Test Tree Synchronization
//!
//! Keeps a host-rendered test tree consistent with a test hierarchy that a
//! backend discovers lazily and incrementally. Display nodes keep their
//! identity across partial resolves, so the host never loses selection or
//! expansion state while the tree converges.

pub mod cache;
pub mod config;
pub mod error;
pub mod host;
pub mod item;
pub mod logging;
pub mod provider;
pub mod resolver;
pub mod session;
pub mod types;
pub mod views;

pub use error::{HostError, ProviderError, SyncError};
pub use host::{NodeCollection, ResultInvalidation, TestController, TestNode};
pub use item::TestItem;
pub use provider::TestItemProvider;
pub use resolver::TestItemResolver;
pub use session::TestExplorer;
pub use types::{ItemId, ItemKind, ItemVariant, SourceRange, Tag};
