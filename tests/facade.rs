//! The facade as an embedder sees it: one dependency, `Result`-shaped reads.

use miette::Diagnostic;
use pretty_assertions::assert_eq;
use tether::{
    Error, ErrorCategory, ErrorRecord, Stack, State, Type, UniqueHandle, Variant, Variant3,
    checked_get, checked_push, ensure_namespace_table,
};

static CONFIG: ErrorCategory = ErrorCategory::new("config");

#[derive(Debug, PartialEq, Variant)]
#[variant(crate = tether::tether_core)]
enum Port {
    #[variant(empty)]
    Unset,
    Number(i64),
    Service(String),
}

// =============================================================================
// Reads
// =============================================================================

#[test]
fn test_mismatch_is_a_diagnostic() {
    let mut state = State::new();
    state.push_bytes(b"seven");
    let err = checked_get::<i64, _>(&mut state, -1).unwrap_err();

    assert_eq!(err.code().map(|code| code.to_string()), Some("tether::mismatch".to_string()));
    assert!(err.help().is_some());
    let mismatch = err.mismatch().expect("mismatch");
    assert_eq!(mismatch.actual, Type::String);
}

#[test]
fn test_sum_type_through_facade() {
    let mut state = State::new();
    checked_push(&mut state, 1.25f64).unwrap();
    let value: Variant3<bool, f64, i64> = checked_get(&mut state, -1).unwrap();
    assert_eq!(value, Variant3::B(1.25));
}

#[test]
fn test_derived_enum_through_facade() {
    let mut state = State::new();
    checked_push(&mut state, Port::Number(8080)).unwrap();
    checked_push(&mut state, Port::Unset).unwrap();
    // Strings accept numbers and `Service` is declared last.
    assert_eq!(checked_get::<Port, _>(&mut state, 1).unwrap(), Port::Service("8080".to_string()));
    assert_eq!(checked_get::<Port, _>(&mut state, 2).unwrap(), Port::Unset);
}

// =============================================================================
// Results and namespaces
// =============================================================================

#[test]
fn test_result_publishes_into_namespace() {
    let mut state = State::new();
    let globals = state.globals();
    let config = ensure_namespace_table(&mut state, &globals, "app.config");

    let loaded: Result<i64, ErrorRecord> = Ok(30);
    let failed: Result<i64, ErrorRecord> =
        Err(ErrorRecord::new(2, &CONFIG, "missing key", "config.toml", 4));
    checked_push(&mut state, loaded).unwrap();
    state.set_field(&config, "timeout");
    checked_push(&mut state, failed).unwrap();
    state.set_field(&config, "retries");

    assert_eq!(state.get_field(&config, "timeout"), Type::Number);
    assert_eq!(state.get_field(&config, "retries"), Type::Table);
    let record: ErrorRecord = checked_get(&mut state, -1).unwrap();
    assert_eq!(record.to_string(), "config error 2: missing key (config.toml:4)");
}

#[test]
fn test_stack_overflow_error() {
    let options = tether::StateOptions::default().override_with(tether::StateOptionsOverride {
        stack_limit: Some(0),
        ..Default::default()
    });
    let mut state = State::with_options(options);
    let err = checked_push(&mut state, true).unwrap_err();
    assert!(matches!(err, Error::StackOverflow { requested: 1 }));
    assert_eq!(err.to_string(), "stack cannot grow by 1 slot(s)");
}

#[test]
fn test_owning_handle_lends_its_pointee() {
    let owner: Option<Box<str>> = Some("vault".into());
    let mut state = State::new();
    let name = UniqueHandle::get(&owner).expect("pointee");
    checked_push(&mut state, name).unwrap();
    assert_eq!(checked_get::<String, _>(&mut state, -1).unwrap(), "vault");
    assert!(!owner.is_null());

    let released: Option<Box<str>> = None;
    assert!(released.is_null());
}
