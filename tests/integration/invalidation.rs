use testsync::host::{Invalidation, MemoryController};
use testsync::{ItemKind, TestItem};

use crate::support::{uri, Fixture};

#[tokio::test]
async fn invalidate_everything() {
    let fx = Fixture::new();
    fx.resolver.invalidate_test_results(None).await.unwrap();
    assert_eq!(fx.ctrl().invalidations(), vec![Invalidation::All]);
}

#[tokio::test]
async fn invalidate_skips_unmaterialized_items() {
    let fx = Fixture::new();
    fx.resolver
        .did_change_test_item(Some(&[fx.test.clone()]))
        .await
        .unwrap();
    let stranger = TestItem::new(ItemKind::Test, "TestElsewhere").with_uri(uri("pkgZ/z_test.go"));

    fx.resolver
        .invalidate_test_results(Some(&[fx.test.clone(), stranger, fx.other_pkg.clone()]))
        .await
        .unwrap();

    assert_eq!(
        fx.ctrl().invalidations(),
        vec![Invalidation::Nodes(vec![fx.test.id()])]
    );
}

#[tokio::test]
async fn invalidate_on_older_host_is_noop() {
    let fx = Fixture::with_controller(MemoryController::without_result_invalidation());
    fx.resolver.resolve(None).await.unwrap();
    let calls = fx.provider.parent_calls();

    fx.resolver.invalidate_test_results(None).await.unwrap();
    fx.resolver
        .invalidate_test_results(Some(&[fx.pkg.clone()]))
        .await
        .unwrap();

    assert!(fx.ctrl().invalidations().is_empty());
    assert_eq!(fx.provider.parent_calls(), calls);
    assert_eq!(fx.tree().len(), 2);
}
