//! Failure reporting for checkers.
//!
//! A checker that rejects a value reports why through a [`Handler`] and then
//! returns `false`. It never panics. The caller decides what a mismatch
//! means: try another type, collect a diagnostic, or ignore it.

use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::fmt;

use tether_values::Type;

/// Why a dynamic value could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Absolute stack index of the rejected value.
    pub index: i32,
    pub expected: Type,
    pub actual: Type,
    pub message: Cow<'static, str>,
}

impl Mismatch {
    pub fn new(
        index: i32,
        expected: Type,
        actual: Type,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            index,
            expected,
            actual,
            message: message.into(),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stack index {}: expected {}, received {}: {}",
            self.index, self.expected, self.actual, self.message
        )
    }
}

pub trait Handler {
    fn mismatch(&mut self, mismatch: Mismatch);
}

/// Discards every mismatch. Used for silent probes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPanic;

impl Handler for NoPanic {
    fn mismatch(&mut self, _mismatch: Mismatch) {}
}

/// Keeps every mismatch, in report order.
#[derive(Debug, Default, Clone)]
pub struct Collect {
    mismatches: Vec<Mismatch>,
}

impl Collect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    pub fn len(&self) -> usize {
        self.mismatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn into_first(self) -> Option<Mismatch> {
        self.mismatches.into_iter().next()
    }
}

impl Handler for Collect {
    fn mismatch(&mut self, mismatch: Mismatch) {
        self.mismatches.push(mismatch);
    }
}

impl<F: FnMut(Mismatch)> Handler for F {
    fn mismatch(&mut self, mismatch: Mismatch) {
        self(mismatch)
    }
}
