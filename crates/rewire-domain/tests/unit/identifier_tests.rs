//! Identifier Tests

use rewire_domain::{Error, Identifier, InjectionKind, InjectionMember};
use std::collections::HashSet;

#[test]
fn test_field_path() {
    let id = Identifier::for_field("fr.mby.ServiceTest", "greeters").unwrap();
    assert_eq!(id.to_path_string(), "fr/mby/ServiceTest/__field__/greeters");
    assert_eq!(id.kind(), InjectionKind::Field);
}

#[test]
fn test_method_parameter_path() {
    let id = Identifier::for_method_parameter("app::service::Greeting", "configure", "impls")
        .unwrap();
    assert_eq!(id.path(), "app/service/Greeting/configure()/impls");
    assert_eq!(id.kind(), InjectionKind::MethodParameter);
    assert_eq!(
        id.member(),
        &InjectionMember::method_parameter("configure", "impls")
    );
}

#[test]
fn test_path_round_trip() {
    let field = Identifier::for_field("app::Owner", "deps").unwrap();
    let param = Identifier::for_method_parameter("app::Owner", "set", "deps").unwrap();

    let field_back = Identifier::from_path_string(field.path()).unwrap();
    let param_back: Identifier = param.path().parse().unwrap();

    assert_eq!(field, field_back);
    assert_eq!(param, param_back);
    assert_eq!(field_back.owner(), "app::Owner");
    assert_eq!(param_back.kind(), InjectionKind::MethodParameter);
}

#[test]
fn test_equality_is_path_based() {
    let dotted = Identifier::for_field("app.Owner", "deps").unwrap();
    let rusty = Identifier::for_field("app::Owner", "deps").unwrap();
    assert_eq!(dotted, rusty);

    let mut set = HashSet::new();
    set.insert(dotted);
    assert!(set.contains(&rusty));
}

#[test]
fn test_field_and_method_never_collide() {
    let field = Identifier::for_field("app::Owner", "deps").unwrap();
    let param = Identifier::for_method_parameter("app::Owner", "deps", "deps").unwrap();
    assert_ne!(field, param);
}

#[test]
fn test_empty_parts_are_rejected() {
    assert!(matches!(
        Identifier::for_field("", "deps"),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        Identifier::for_field("app::Owner", " "),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        Identifier::for_method_parameter("app::Owner", "", "p"),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        Identifier::for_method_parameter("app::Owner", "m", ""),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        Identifier::for_field("app..Owner", "deps"),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        Identifier::for_field("app::Owner", "a/b"),
        Err(Error::InvalidArgument { .. })
    ));
}

#[test]
fn test_parse_without_marker_fails() {
    for path in [
        "app/Owner/deps",
        "app/Owner",
        "app/Owner/()/deps",
        "app//Owner/__field__/deps",
        "app.Owner.__field__.deps",
    ] {
        let result = Identifier::from_path_string(path);
        assert!(
            matches!(result, Err(Error::Parse { .. })),
            "expected parse error for {path}, got {result:?}"
        );
    }
}

#[test]
fn test_display_is_path() {
    let id = Identifier::for_field("app::Owner", "deps").unwrap();
    assert_eq!(id.to_string(), "app/Owner/__field__/deps");
}
