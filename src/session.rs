//! Test explorer session lifecycle
//!
//! Binds a provider to a host tree while the feature is enabled. Each setup
//! builds a fresh [`TestItemResolver`], so the identity cache never outlives
//! the host tree it indexes. Handlers report failures through `tracing` and
//! never return them: they are meant to be called straight from host events.

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::host::TestController;
use crate::item::TestItem;
use crate::provider::TestItemProvider;
use crate::resolver::TestItemResolver;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info};

/// Outcome of applying a configuration change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigTransition {
    Enabled,
    Disabled,
    Unchanged,
}

/// Run `fut`, logging and swallowing its error
pub async fn do_safe<T, F>(operation: &str, fut: F) -> Option<T>
where
    F: Future<Output = Result<T, SyncError>>,
{
    match fut.await {
        Ok(value) => Some(value),
        Err(e) => {
            error!(operation, error = %e, "Error {}", operation);
            None
        }
    }
}

/// Owner of one provider and, while enabled, one synchronization session
pub struct TestExplorer<C: TestController, P: TestItemProvider> {
    provider: Arc<P>,
    config: RwLock<SyncConfig>,
    resolver: RwLock<Option<Arc<TestItemResolver<C, P>>>>,
}

impl<C: TestController, P: TestItemProvider> TestExplorer<C, P> {
    pub fn new(provider: Arc<P>, config: SyncConfig) -> Self {
        Self {
            provider,
            config: RwLock::new(config),
            resolver: RwLock::new(None),
        }
    }

    pub fn enabled(&self) -> bool {
        self.resolver.read().is_some()
    }

    /// Current session, if enabled
    pub fn resolver(&self) -> Option<Arc<TestItemResolver<C, P>>> {
        self.resolver.read().clone()
    }

    /// Start a session on `controller`, replacing any previous one
    pub fn setup(&self, controller: C) -> Arc<TestItemResolver<C, P>> {
        let debug_tree = self.config.read().debug_tree;
        let resolver = Arc::new(
            TestItemResolver::new(Arc::new(controller), self.provider.clone())
                .with_debug_tree(debug_tree),
        );
        *self.resolver.write() = Some(resolver.clone());
        info!("Test explorer session started");
        resolver
    }

    /// End the current session; the host tree and identity cache are dropped
    pub fn dispose(&self) {
        if self.resolver.write().take().is_some() {
            info!("Test explorer session ended");
        }
    }

    /// Enable or disable the session to match `config`
    ///
    /// `create_controller` is only called when a new session starts.
    pub fn apply_config<F>(&self, config: SyncConfig, create_controller: F) -> ConfigTransition
    where
        F: FnOnce() -> C,
    {
        let enable = config.enable;
        *self.config.write() = config;
        match (enable, self.enabled()) {
            (true, false) => {
                self.setup(create_controller());
                ConfigTransition::Enabled
            }
            (false, true) => {
                self.dispose();
                ConfigTransition::Disabled
            }
            _ => ConfigTransition::Unchanged,
        }
    }

    /// Host asked for the children of `node`, or of the root
    pub async fn resolve_handler(&self, node: Option<&C::Node>) {
        let Some(resolver) = self.resolver() else {
            return;
        };
        do_safe("resolve test", resolver.resolve(node)).await;
    }

    /// Host asked to refresh the whole tree
    pub async fn refresh_handler(&self) {
        let Some(resolver) = self.resolver() else {
            return;
        };
        do_safe("refresh tests", resolver.resolve(None)).await;
    }

    /// Provider reported changed items, or an unknown change when `None`
    pub async fn did_change(&self, items: Option<&[TestItem]>) {
        let Some(resolver) = self.resolver() else {
            return;
        };
        do_safe("update test items", resolver.did_change_test_item(items)).await;
    }

    /// Provider reported stale results
    pub async fn invalidate(&self, items: Option<&[TestItem]>) {
        let Some(resolver) = self.resolver() else {
            return;
        };
        do_safe(
            "invalidate test results",
            resolver.invalidate_test_results(items),
        )
        .await;
    }

    /// Re-resolve `node`, optionally marking its results stale
    pub async fn reload(&self, node: &C::Node, invalidate: bool) {
        let Some(resolver) = self.resolver() else {
            return;
        };
        do_safe("reload test item", resolver.resolve(Some(node))).await;
        if invalidate {
            resolver.invalidate_node(node);
        }
    }
}
