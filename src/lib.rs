//! Tether - type-directed conversions between host values and a dynamic
//! value stack
//!
//! # Overview
//!
//! Every convertible host type gets three operations against a stack slot:
//!
//! - **check**: does the value fit? Never converts, never panics.
//! - **get**: convert it, after a successful check.
//! - **push**: the inverse direction.
//!
//! Leaves (`i64`, `f64`, `bool`, `String`, [`ErrorRecord`]) compose into
//! `Option<T>`, `Vec<T>`, `Result<T, ErrorRecord>` (push only) and the sum
//! types [`Variant2`] and friends, or a user enum with `#[derive(Variant)]`.
//!
//! # Quick Start
//!
//! ```
//! use tether::{Stack, State, Variant2, checked_get, checked_push};
//!
//! let mut state = State::new();
//! checked_push(&mut state, 42i64).unwrap();
//!
//! // Later alternatives win: strings accept numbers.
//! let value: Variant2<i64, String> = checked_get(&mut state, -1).unwrap();
//! assert_eq!(value, Variant2::B("42".to_string()));
//!
//! // Nil reads as the empty alternative.
//! state.push_nil();
//! assert!(checked_get::<Variant2<i64, String>, _>(&mut state, -1).unwrap().is_empty());
//! ```
//!
//! # Deriving sum types
//!
//! ```
//! use tether::{Stack, State, Variant, checked_get};
//!
//! #[derive(Debug, PartialEq, Variant)]
//! #[variant(crate = tether::tether_core)]
//! enum Level {
//!     #[variant(empty)]
//!     Default,
//!     Named(String),
//!     Numeric(i64),
//! }
//!
//! let mut state = State::new();
//! state.push_integer(3);
//! assert_eq!(checked_get::<Level, _>(&mut state, -1).unwrap(), Level::Numeric(3));
//! ```
//!
//! # Namespaces
//!
//! ```
//! use tether::{State, ensure_namespace_table};
//!
//! let mut state = State::new();
//! let globals = state.globals();
//! let io = ensure_namespace_table(&mut state, &globals, "std.io");
//! assert!(io.ptr_eq(&ensure_namespace_table(&mut state, &globals, "std.io")));
//! ```

mod checked;
mod error;

pub use checked::{checked_get, checked_push};
pub use error::Error;

// Re-export the conversion layer
pub use tether_core::{
    Collect, ErrorCategory, ErrorRecord, Handler, Marshal, Mismatch, NO_ERROR_CATEGORY, NoPanic,
    Push, Tracking, UNKNOWN_CATEGORY, UniqueHandle, Variant1, Variant2, Variant3, Variant4,
    Variant5, Variant6, Variant7, Variant8, check, ensure_namespace_table, get, push,
};

// Re-export the reference runtime
pub use tether_values::{
    Key, LightPtr, Stack, State, StateError, StateOptions, StateOptionsOverride, Table, Type,
    Value,
};

pub use tether_macros::Variant;

/// Path for `#[variant(crate = tether::tether_core)]` when deriving through
/// this crate.
pub use tether_core;
