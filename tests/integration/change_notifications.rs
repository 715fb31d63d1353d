use testsync::host::MemoryNode;
use testsync::{ItemKind, NodeCollection, TestController, TestItem, TestNode};

use crate::support::{uri, Fixture};

#[tokio::test]
async fn change_materializes_missing_ancestors() {
    let fx = Fixture::new();

    fx.resolver
        .did_change_test_item(Some(&[fx.test.clone()]))
        .await
        .unwrap();

    assert_eq!(
        fx.tree(),
        vec![
            (0, fx.pkg.id()),
            (1, fx.file.id()),
            (2, fx.test.id()),
            (3, fx.subtest.id()),
        ]
    );
}

#[tokio::test]
async fn change_reuses_materialized_ancestors() {
    let fx = Fixture::new();
    fx.resolver.resolve(None).await.unwrap();
    let pkg_node = fx.node(&[&fx.pkg]).unwrap();

    fx.resolver
        .did_change_test_item(Some(&[fx.file.clone()]))
        .await
        .unwrap();

    let after = fx.node(&[&fx.pkg]).unwrap();
    assert!(MemoryNode::ptr_eq(&pkg_node, &after));
    assert_eq!(fx.ctrl().items().len(), 2);
    let file_node = fx.node(&[&fx.pkg, &fx.file]).unwrap();
    assert_eq!(file_node.children().ids(), vec![fx.test.id()]);
}

#[tokio::test]
async fn change_refreshes_only_affected_subtree() {
    let fx = Fixture::new();
    fx.resolver
        .did_change_test_item(Some(&[fx.file.clone()]))
        .await
        .unwrap();

    let test_bar = TestItem::new(ItemKind::Test, "TestBar").with_uri(uri("pkgA/a_test.go"));
    fx.provider.set_children(&fx.file, vec![test_bar.clone()]);
    fx.resolver
        .did_change_test_item(Some(&[fx.file.clone()]))
        .await
        .unwrap();

    assert_eq!(
        fx.tree(),
        vec![(0, fx.pkg.id()), (1, fx.file.id()), (2, test_bar.id())]
    );
}

#[tokio::test]
async fn change_batch_with_shared_ancestor() {
    let fx = Fixture::new();

    fx.resolver
        .did_change_test_item(Some(&[fx.test.clone(), fx.file.clone()]))
        .await
        .unwrap();

    assert_eq!(fx.ctrl().items().ids(), vec![fx.pkg.id()]);
    assert_eq!(
        fx.tree(),
        vec![
            (0, fx.pkg.id()),
            (1, fx.file.id()),
            (2, fx.test.id()),
            (3, fx.subtest.id()),
        ]
    );
}

#[tokio::test]
async fn unscoped_change_rebuilds_from_root() {
    let fx = Fixture::new();
    fx.resolver.resolve(None).await.unwrap();
    let old_other = fx.node(&[&fx.other_pkg]).unwrap();

    fx.provider.set_roots(vec![fx.other_pkg.clone()]);
    fx.resolver.did_change_test_item(None).await.unwrap();

    assert_eq!(fx.ctrl().items().ids(), vec![fx.other_pkg.id()]);
    let new_other = fx.node(&[&fx.other_pkg]).unwrap();
    assert!(!MemoryNode::ptr_eq(&old_other, &new_other));
    assert!(new_other.children().is_empty());
}

#[tokio::test]
async fn unscoped_change_with_unavailable_roots_leaves_tree_empty() {
    let fx = Fixture::new();
    fx.resolver.resolve(None).await.unwrap();
    assert_eq!(fx.ctrl().items().len(), 2);

    fx.provider.clear_roots();
    fx.resolver.did_change_test_item(None).await.unwrap();

    assert!(fx.ctrl().items().is_empty());
}

#[tokio::test]
async fn change_propagates_provider_failure() {
    let fx = Fixture::new();
    fx.provider.fail_on(&fx.file);

    let result = fx
        .resolver
        .did_change_test_item(Some(&[fx.test.clone()]))
        .await;

    assert!(matches!(result, Err(testsync::SyncError::Provider(_))));
    assert!(fx.resolver.get(&fx.pkg).await.unwrap().is_none());
}
