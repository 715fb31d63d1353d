use testsync::host::MemoryNode;
use testsync::views::render_tree;
use testsync::{ItemKind, TestController, TestItem, TestNode};

use crate::support::{uri, Fixture};

#[tokio::test]
async fn resolve_expands_test_cases_without_explicit_request() {
    let fx = Fixture::new();

    fx.resolver.resolve(None).await.unwrap();
    let pkg_node = fx.node(&[&fx.pkg]).unwrap();
    fx.resolver.resolve(Some(&pkg_node)).await.unwrap();
    let file_node = fx.node(&[&fx.pkg, &fx.file]).unwrap();
    fx.resolver.resolve(Some(&file_node)).await.unwrap();

    assert_eq!(
        fx.tree(),
        vec![
            (0, fx.pkg.id()),
            (1, fx.file.id()),
            (2, fx.test.id()),
            (3, fx.subtest.id()),
            (0, fx.other_pkg.id()),
        ]
    );
    assert_eq!(
        render_tree(&fx.resolver.roots()),
        "pkgA\n  a_test.go\n    TestFoo\n      sub\npkgB"
    );
}

#[tokio::test]
async fn resolve_twice_reuses_nodes() {
    let fx = Fixture::new();

    fx.resolver.resolve(None).await.unwrap();
    let before = fx.resolver.roots();
    fx.resolver.resolve(None).await.unwrap();
    let after = fx.resolver.roots();

    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(after.iter()) {
        assert!(MemoryNode::ptr_eq(a, b));
    }
}

#[tokio::test]
async fn resolve_replaces_stale_children() {
    let fx = Fixture::new();
    fx.resolver.resolve(None).await.unwrap();
    let kept = fx.node(&[&fx.other_pkg]).unwrap();

    let pkg_c = TestItem::new(ItemKind::Package, "example.com/pkgC")
        .with_uri(uri("pkgC"))
        .with_children(true);
    fx.provider
        .set_roots(vec![fx.other_pkg.clone(), pkg_c.clone()]);
    fx.resolver.resolve(None).await.unwrap();

    assert_eq!(fx.ctrl().items().ids(), vec![fx.other_pkg.id(), pkg_c.id()]);
    let reused = fx.node(&[&fx.other_pkg]).unwrap();
    assert!(MemoryNode::ptr_eq(&kept, &reused));
}

#[tokio::test]
async fn resolve_refreshes_fields_of_existing_node() {
    let fx = Fixture::new();
    fx.resolver.resolve(None).await.unwrap();
    let pkg_node = fx.node(&[&fx.pkg]).unwrap();
    fx.resolver.resolve(Some(&pkg_node)).await.unwrap();
    let file_node = fx.node(&[&fx.pkg, &fx.file]).unwrap();
    assert!(file_node.error().is_none());

    let broken = fx.file.clone().with_error("expected 'package', found 'EOF'");
    fx.provider.set_children(&fx.pkg, vec![broken.clone()]);
    fx.resolver.resolve(Some(&pkg_node)).await.unwrap();

    let refreshed = fx.node(&[&fx.pkg, &fx.file]).unwrap();
    assert!(MemoryNode::ptr_eq(&file_node, &refreshed));
    assert_eq!(
        refreshed.error().as_deref(),
        Some("expected 'package', found 'EOF'")
    );
    assert_eq!(fx.resolver.item(&fx.file.id()), Some(broken));
}

#[tokio::test]
async fn resolved_nodes_carry_display_state() {
    let fx = Fixture::new();
    fx.resolver.resolve(None).await.unwrap();
    let pkg_node = fx.node(&[&fx.pkg]).unwrap();

    assert!(pkg_node.can_resolve_children());
    assert_eq!(pkg_node.uri(), Some(&uri("pkgA")));
    assert_eq!(pkg_node.label(), "pkgA");
    assert_eq!(pkg_node.tags().len(), 1);
    assert!(!pkg_node.busy());
}
