#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![deny(unsafe_code)]

//! Type-directed conversions between host values and a dynamic value stack.
//!
//! Every convertible host type implements [`Marshal`]: a checker that probes a
//! stack slot without converting it, a getter that converts it, and (through
//! [`Push`]) a pusher for the inverse direction. Composite types build their
//! triads out of their components' triads:
//!
//! - `String` and [`ErrorRecord`] are leaves, alongside `i64`, `f64` and `bool`
//! - `Option<T>` maps `None` to nil
//! - [`Variant2`] and friends resolve a closed list of alternatives, preferring
//!   the last-declared one that fits
//! - `Result<T, ErrorRecord>` is push-only
//! - `Vec<T>` is a 1-based sequence table
//!
//! # Example
//!
//! ```
//! use tether_core::{Marshal, NoPanic, Push, Tracking, Variant2};
//! use tether_values::State;
//!
//! let mut state = State::new();
//! 42i64.push(&mut state);
//!
//! let mut tracking = Tracking::new();
//! assert!(<Variant2<i64, String>>::check(&state, -1, &mut NoPanic, &mut tracking));
//! let value = <Variant2<i64, String>>::get(&mut state, -1, &mut tracking);
//! assert_eq!(value, Variant2::B("42".to_string()));
//! ```

// Lets derived impls refer to `::tether_core` from within this crate too.
extern crate self as tether_core;

extern crate alloc;

pub mod handle;
pub mod handler;
pub mod marshal;
pub mod namespace;
pub mod record;
pub mod tracking;
pub mod variant;

mod fallible;
mod optional;
mod sequence;
mod string;

pub use handle::UniqueHandle;
pub use handler::{Collect, Handler, Mismatch, NoPanic};
pub use marshal::{Marshal, Push, check, get, push};
pub use namespace::ensure_namespace_table;
pub use record::{ErrorCategory, ErrorRecord, NO_ERROR_CATEGORY, UNKNOWN_CATEGORY};
pub use tracking::Tracking;
pub use variant::{Variant1, Variant2, Variant3, Variant4, Variant5, Variant6, Variant7, Variant8};

pub use tether_values::{LightPtr, Stack, Type};
