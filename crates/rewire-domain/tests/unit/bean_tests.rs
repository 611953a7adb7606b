//! Bean Tests

use rewire_domain::{Bean, BeanType};
use std::sync::Arc;

trait Greeter: Send + Sync {
    fn greet(&self) -> &'static str;
}

struct English;

impl Greeter for English {
    fn greet(&self) -> &'static str {
        "hello"
    }
}

#[test]
fn test_trait_object_bean() {
    let bean = Bean::shared::<dyn Greeter>("english", Arc::new(English));
    assert_eq!(bean.bean_type(), BeanType::of::<dyn Greeter>());
    assert_eq!(bean.get::<dyn Greeter>().unwrap().greet(), "hello");
    assert!(bean.get::<English>().is_none());
}

#[test]
fn test_owned_bean() {
    let bean = Bean::new("answer", 42u64);
    assert_eq!(*bean.get::<u64>().unwrap(), 42);
    assert_eq!(bean.display(), "answer");
    assert_eq!(bean.to_string(), "answer");
}

#[test]
fn test_ptr_eq_follows_clones() {
    let bean = Bean::new("answer", 42u64);
    let clone = bean.clone();
    let other = Bean::new("answer", 42u64);
    assert!(bean.ptr_eq(&clone));
    assert!(!bean.ptr_eq(&other));
}
