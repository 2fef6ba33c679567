#![no_std]
#![deny(unsafe_code)]

//! The dynamic side of the bridge.
//!
//! [`Stack`] is the cursor every conversion is written against: an index into
//! the runtime's value stack plus the handful of primitives needed to inspect,
//! read and push values. [`State`] is a small reference runtime implementing
//! it, with Lua-style indexing and reference-identity tables.

extern crate alloc;

mod error;
mod light;
mod options;
pub mod state;
pub mod traits;
mod ty;

pub use error::StateError;
pub use light::LightPtr;
pub use options::{StateOptions, StateOptionsOverride};
pub use state::{Key, State, Table, Value};
pub use traits::Stack;
pub use ty::Type;
