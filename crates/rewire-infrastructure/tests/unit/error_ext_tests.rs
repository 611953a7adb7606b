//! Error Extension Tests

use rewire_domain::error::{Error, Result};
use rewire_infrastructure::error_ext::ErrorContext;
use std::io;

#[test]
fn test_io_context_keeps_source() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

    let result: Result<()> = Err(io_error).io_context("failed to read file");

    match result {
        Err(Error::Io { message, source }) => {
            assert!(message.contains("failed to read file"));
            assert!(message.contains("file not found"));
            assert!(source.is_some());
        }
        other => panic!("Expected Io error, got {other:?}"),
    }
}

#[test]
fn test_config_context() {
    let parse_error = "abc".parse::<u32>().unwrap_err();

    let result: Result<u32> = Err(parse_error).config_context("bad port");

    assert!(matches!(
        result,
        Err(Error::Configuration { ref message, source: Some(_) }) if message.starts_with("bad port")
    ));
}

#[test]
fn test_persistence_context() {
    let json_error = serde_json::from_str::<u32>("not json").unwrap_err();

    let result: Result<u32> = Err(json_error).persistence_context("corrupt store");

    assert!(matches!(result, Err(Error::Persistence { .. })));
}

#[test]
fn test_with_context_is_lazy() {
    let ok: std::result::Result<u8, io::Error> = Ok(1);
    let value = ok
        .with_context(|| -> String { panic!("context must not be built on success") })
        .unwrap();
    assert_eq!(value, 1);

    let err: std::result::Result<u8, io::Error> = Err(io::Error::other("boom"));
    let result = err.with_context(|| format!("step {}", 3));
    assert!(matches!(result, Err(Error::Internal { ref message }) if message == "step 3: boom"));
}
