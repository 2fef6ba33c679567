//! Conversion traits and the scalar leaves.
//!
//! [`Marshal`] is the checker/getter pair for one host type, [`Push`] the
//! pusher. They are split because some types only travel one way (`Result`
//! is push-only).
//!
//! # Implemented for
//!
//! - `i64` (integers, and floats with an exact integral value)
//! - `f64` (any number)
//! - `bool` (booleans only, no truthiness)
//! - `String`, see `string.rs`
//! - [`ErrorRecord`](crate::ErrorRecord), see `record.rs`
//! - `Option<T>`, `Vec<T>`, [`Variant2`](crate::Variant2) and friends
//! - `Result<T, ErrorRecord>` (push only)

use tether_values::{Stack, Type};

use crate::{Handler, Mismatch, Tracking};

/// Host to dynamic conversion.
///
/// With this trait in scope, `vec.push(item)` on a `Vec<T>` resolves to
/// [`Push::push`] rather than `Vec::push`, since `Vec<T>` is itself `Push`.
/// Write `Vec::push(&mut vec, item)` there, or call the free [`push`].
pub trait Push<S: Stack> {
    /// Dynamic type family the pushed value belongs to.
    const TYPE: Type;

    /// Push the dynamic form of `self`; returns the number of values pushed.
    fn push(self, stack: &mut S) -> usize;
}

/// Dynamic to host conversion.
pub trait Marshal<S: Stack>: Push<S> + Sized {
    /// Stack slots one value of this type occupies.
    const SLOTS: usize = 1;

    /// Probe the value at `index` without converting it.
    ///
    /// Records [`Self::SLOTS`] in `tracking` whether or not the value fits. On
    /// failure, reports a [`Mismatch`] to `handler` and returns `false`.
    fn check<H: Handler + ?Sized>(
        stack: &S,
        index: i32,
        handler: &mut H,
        tracking: &mut Tracking,
    ) -> bool;

    /// Convert the value at `index`.
    ///
    /// Only meaningful after `check` accepted the same slot. On a value that
    /// does not fit, the result is unspecified (but never a panic).
    fn get(stack: &mut S, index: i32, tracking: &mut Tracking) -> Self;
}

/// Check the value at `index` with a fresh [`Tracking`].
pub fn check<T: Marshal<S>, S: Stack>(stack: &S, index: i32, handler: &mut impl Handler) -> bool {
    T::check(stack, index, handler, &mut Tracking::new())
}

/// Get the value at `index` with a fresh [`Tracking`].
pub fn get<T: Marshal<S>, S: Stack>(stack: &mut S, index: i32) -> T {
    T::get(stack, index, &mut Tracking::new())
}

pub fn push<T: Push<S>, S: Stack>(stack: &mut S, value: T) -> usize {
    value.push(stack)
}

/// Report `mismatch` and return `false`, for use as a checker's tail.
pub(crate) fn reject<H: Handler + ?Sized>(handler: &mut H, mismatch: Mismatch) -> bool {
    tracing::debug!(%mismatch, "conversion rejected");
    handler.mismatch(mismatch);
    false
}

// =============================================================================
// Primitive implementations
// =============================================================================

impl<S: Stack> Push<S> for i64 {
    const TYPE: Type = Type::Number;

    fn push(self, stack: &mut S) -> usize {
        stack.push_integer(self);
        1
    }
}

impl<S: Stack> Marshal<S> for i64 {
    fn check<H: Handler + ?Sized>(
        stack: &S,
        index: i32,
        handler: &mut H,
        tracking: &mut Tracking,
    ) -> bool {
        tracking.use_slots(1);
        let index = stack.abs_index(index);
        if stack.to_integer(index).is_some() {
            return true;
        }
        reject(
            handler,
            Mismatch::new(index, Type::Number, stack.type_of(index), "expected an integer"),
        )
    }

    fn get(stack: &mut S, index: i32, tracking: &mut Tracking) -> Self {
        tracking.use_slots(1);
        stack.to_integer(index).unwrap_or_default()
    }
}

impl<S: Stack> Push<S> for f64 {
    const TYPE: Type = Type::Number;

    fn push(self, stack: &mut S) -> usize {
        stack.push_number(self);
        1
    }
}

impl<S: Stack> Marshal<S> for f64 {
    fn check<H: Handler + ?Sized>(
        stack: &S,
        index: i32,
        handler: &mut H,
        tracking: &mut Tracking,
    ) -> bool {
        tracking.use_slots(1);
        let index = stack.abs_index(index);
        if stack.to_number(index).is_some() {
            return true;
        }
        reject(
            handler,
            Mismatch::new(index, Type::Number, stack.type_of(index), "expected a number"),
        )
    }

    fn get(stack: &mut S, index: i32, tracking: &mut Tracking) -> Self {
        tracking.use_slots(1);
        stack.to_number(index).unwrap_or_default()
    }
}

impl<S: Stack> Push<S> for bool {
    const TYPE: Type = Type::Boolean;

    fn push(self, stack: &mut S) -> usize {
        stack.push_boolean(self);
        1
    }
}

impl<S: Stack> Marshal<S> for bool {
    fn check<H: Handler + ?Sized>(
        stack: &S,
        index: i32,
        handler: &mut H,
        tracking: &mut Tracking,
    ) -> bool {
        tracking.use_slots(1);
        let index = stack.abs_index(index);
        match stack.type_of(index) {
            Type::Boolean => true,
            actual => reject(
                handler,
                Mismatch::new(index, Type::Boolean, actual, "expected a boolean"),
            ),
        }
    }

    fn get(stack: &mut S, index: i32, tracking: &mut Tracking) -> Self {
        tracking.use_slots(1);
        stack.to_boolean(index)
    }
}
