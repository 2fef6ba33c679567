//! The stack cursor conversions are written against.
//!
//! # Indices
//!
//! Positive indices count from the bottom of the stack starting at 1.
//! Negative indices count down from the top, so `-1` is the most recently
//! pushed value. Index `0` never names a value. Every conversion normalizes
//! its index once with [`Stack::abs_index`] so that pushing temporaries (for
//! example while reading table fields) does not shift what it is looking at.
//!
//! # Reading
//!
//! The `to_*` accessors never fail loudly: a value of the wrong shape, or an
//! index past the top, reads as `None` (or `false`).

use alloc::borrow::Cow;

use crate::{LightPtr, Type};

pub trait Stack {
    /// Handle to a runtime table. Equality is identity, not contents.
    type Table: Clone + PartialEq + core::fmt::Debug;

    /// Index of the topmost value; `0` when the stack is empty.
    fn top(&self) -> i32;

    /// Convert a top-relative index into an absolute one.
    fn abs_index(&self, index: i32) -> i32 {
        if index > 0 { index } else { self.top() + index + 1 }
    }

    fn type_of(&self, index: i32) -> Type;

    fn is_none_or_nil(&self, index: i32) -> bool {
        self.type_of(index).is_none_or_nil()
    }

    /// `true` when [`Stack::to_bytes`] would succeed.
    fn is_string(&self, index: i32) -> bool;

    /// The value's string bytes, with explicit length.
    fn to_bytes(&self, index: i32) -> Option<Cow<'_, [u8]>>;

    /// The value as an integer, accepting floats with an exact integral value.
    fn to_integer(&self, index: i32) -> Option<i64>;

    fn to_number(&self, index: i32) -> Option<f64>;

    /// Truthiness: only nil, a missing value and `false` are false.
    fn to_boolean(&self, index: i32) -> bool;

    fn to_table(&self, index: i32) -> Option<Self::Table>;

    fn to_light(&self, index: i32) -> Option<LightPtr>;

    fn push_nil(&mut self);

    fn push_boolean(&mut self, value: bool);

    fn push_integer(&mut self, value: i64);

    fn push_number(&mut self, value: f64);

    fn push_bytes(&mut self, bytes: &[u8]);

    fn push_light(&mut self, ptr: LightPtr);

    fn push_table(&mut self, table: Self::Table);

    /// Remove the `count` topmost values.
    fn pop(&mut self, count: usize);

    /// Make room for `extra` more values. Returns `false` when the runtime's
    /// stack limit would be exceeded.
    fn check_stack(&mut self, extra: usize) -> bool;

    /// Create a table pre-sized for `narr` sequence and `nrec` record entries.
    fn new_table(&mut self, narr: usize, nrec: usize) -> Self::Table;

    /// Push `table[key]` and return its type.
    fn get_field(&mut self, table: &Self::Table, key: &str) -> Type;

    /// Pop the top value into `table[key]`. Storing nil removes the key.
    fn set_field(&mut self, table: &Self::Table, key: &str);

    /// Push `table[n]` and return its type.
    fn get_index(&mut self, table: &Self::Table, n: i64) -> Type;

    /// Pop the top value into `table[n]`.
    fn set_index(&mut self, table: &Self::Table, n: i64);

    /// Length of the table's sequence part (`#t`).
    fn raw_len(&self, table: &Self::Table) -> usize;
}
