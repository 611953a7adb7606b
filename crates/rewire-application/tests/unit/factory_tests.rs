//! Proxy Factory Tests

use crate::support::{TestA, TestB, TestBean, test_bean};
use indexmap::IndexMap;
use rewire_application::{BasicProxyFactory, PresentedValue, ProxyFactory, ProxyKind};
use rewire_domain::{
    BeanType, DeclaredType, DependencyShape, Error, Identifier, ResolvedTarget,
};
use std::sync::Arc;

fn identifier() -> Identifier {
    Identifier::for_field("app::Consumer", "deps").unwrap()
}

#[test]
fn test_kind_follows_declared_shape() {
    let cases = [
        (DeclaredType::single::<dyn TestBean>(), ProxyKind::Single),
        (DeclaredType::list::<dyn TestBean>(), ProxyKind::List),
        (DeclaredType::set::<dyn TestBean>(), ProxyKind::Set),
        (DeclaredType::collection::<dyn TestBean>(), ProxyKind::Collection),
        (DeclaredType::map::<dyn TestBean>(), ProxyKind::Map),
    ];

    for (declared, kind) in cases {
        assert_eq!(BasicProxyFactory::kind_for(&declared).unwrap(), kind, "{declared}");
    }
}

#[test]
fn test_specialized_collection_is_unsupported() {
    let declared = DeclaredType::new(
        DependencyShape::SpecializedCollection("deque".to_string()),
        BeanType::of::<dyn TestBean>(),
    );

    let err = BasicProxyFactory::new()
        .proxy(&declared, identifier(), ResolvedTarget::Empty)
        .unwrap_err();

    assert!(matches!(err, Error::UnsupportedShape { .. }), "{err:?}");
}

#[test]
fn test_array_is_unsupported() {
    let err = BasicProxyFactory::kind_for(&DeclaredType::array::<dyn TestBean>()).unwrap_err();

    assert!(matches!(err, Error::UnsupportedShape { .. }));
}

#[test]
fn test_sequence_is_keyed_by_display_string() {
    let target = ResolvedTarget::Sequence(vec![
        test_bean("b-instance", Arc::new(TestB)),
        test_bean("a-instance", Arc::new(TestA)),
    ]);

    let proxy = BasicProxyFactory::new()
        .proxy(&DeclaredType::list::<dyn TestBean>(), identifier(), target)
        .unwrap();

    assert_eq!(proxy.current_names().to_vec(), vec!["b-instance", "a-instance"]);
    assert_eq!(proxy.kind(), ProxyKind::List);
    assert_eq!(proxy.identifier(), &identifier());
}

#[test]
fn test_duplicate_display_strings_collapse() {
    let target = ResolvedTarget::Sequence(vec![
        test_bean("same", Arc::new(TestA)),
        test_bean("same", Arc::new(TestB)),
    ]);

    let proxy = BasicProxyFactory::new()
        .proxy(&DeclaredType::collection::<dyn TestBean>(), identifier(), target)
        .unwrap();

    assert_eq!(proxy.presented().len(), 1);
}

#[test]
fn test_named_target_is_copied_for_map() {
    let mut named = IndexMap::new();
    named.insert("testB".to_string(), test_bean("b", Arc::new(TestB)));
    named.insert("testA".to_string(), test_bean("a", Arc::new(TestA)));

    let proxy = BasicProxyFactory::new()
        .proxy(
            &DeclaredType::map::<dyn TestBean>(),
            identifier(),
            ResolvedTarget::Named(named),
        )
        .unwrap();

    match proxy.presented() {
        PresentedValue::Map(beans) => {
            assert_eq!(beans.keys().collect::<Vec<_>>(), vec!["testB", "testA"]);
        }
        other => panic!("Expected map view, got {other:?}"),
    }
}

#[test]
fn test_single_keeps_only_first_entry() {
    let target = ResolvedTarget::Sequence(vec![
        test_bean("first", Arc::new(TestA)),
        test_bean("second", Arc::new(TestB)),
    ]);

    let proxy = BasicProxyFactory::new()
        .proxy(&DeclaredType::single::<dyn TestBean>(), identifier(), target)
        .unwrap();

    assert_eq!(proxy.current_names().to_vec(), vec!["first"]);
    assert_eq!(proxy.get::<dyn TestBean>().unwrap().label(), "A");
}

#[test]
fn test_empty_target_gives_empty_proxy() {
    let proxy = BasicProxyFactory::new()
        .proxy(&DeclaredType::set::<dyn TestBean>(), identifier(), ResolvedTarget::Empty)
        .unwrap();

    assert!(proxy.presented().is_empty());
    assert!(proxy.get::<dyn TestBean>().is_none());
}
