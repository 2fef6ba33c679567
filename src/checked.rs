use tether_core::{Collect, Marshal, Mismatch, Push, Stack, Tracking};

use crate::Error;

/// Check, then get, the value at `index`.
///
/// Returns the first mismatch the checker reported instead of a value. On
/// success the conversion behaves exactly like a `check` followed by a `get`.
///
/// ```
/// use tether::{Stack, State, checked_get};
///
/// let mut state = State::new();
/// state.push_bytes(b"ten");
/// assert_eq!(checked_get::<String, _>(&mut state, -1).unwrap(), "ten");
///
/// let err = checked_get::<bool, _>(&mut state, -1).unwrap_err();
/// assert_eq!(err.mismatch().unwrap().message, "expected a boolean");
/// ```
pub fn checked_get<T: Marshal<S>, S: Stack>(stack: &mut S, index: i32) -> Result<T, Error> {
    let index = stack.abs_index(index);
    let mut handler = Collect::new();
    let mut tracking = Tracking::new();
    if !T::check(stack, index, &mut handler, &mut tracking) {
        let mismatch = handler.into_first().unwrap_or_else(|| {
            Mismatch::new(index, T::TYPE, stack.type_of(index), "rejected without a report")
        });
        return Err(mismatch.into());
    }
    Ok(T::get(stack, index, &mut tracking))
}

/// Push `value` after making room for it.
pub fn checked_push<T: Push<S>, S: Stack>(stack: &mut S, value: T) -> Result<usize, Error> {
    if !stack.check_stack(1) {
        return Err(Error::StackOverflow { requested: 1 });
    }
    Ok(value.push(stack))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tether_core::{ErrorCategory, ErrorRecord, Type, Variant2};
    use tether_values::{State, StateOptions, StateOptionsOverride};

    use super::*;

    static PARSE: ErrorCategory = ErrorCategory::new("parse");

    #[test]
    fn test_checked_get_returns_value() {
        let mut state = State::new();
        checked_push(&mut state, ErrorRecord::new(3, &PARSE, "bad", "p.rs", 8)).unwrap();
        let record: ErrorRecord = checked_get(&mut state, -1).unwrap();
        assert_eq!(record.code(), 3);
    }

    #[test]
    fn test_checked_get_reports_first_mismatch() {
        let mut state = State::new();
        state.push_boolean(true);
        let err = checked_get::<Variant2<i64, String>, _>(&mut state, -1).unwrap_err();
        let mismatch = err.mismatch().expect("mismatch");
        assert_eq!(mismatch.index, 1);
        assert_eq!(mismatch.expected, Type::Poly);
        assert_eq!(mismatch.actual, Type::Boolean);
        assert_eq!(
            err.to_string(),
            "conversion failed at stack index 1: expected polymorphic, received boolean: \
             value does not fit any alternative of Variant2"
        );
    }

    #[test]
    fn test_checked_push_respects_stack_limit() {
        let options = StateOptions::default().override_with(StateOptionsOverride {
            stack_limit: Some(1),
            ..Default::default()
        });
        let mut state = State::with_options(options);
        assert_eq!(checked_push(&mut state, 1i64).unwrap(), 1);
        let err = checked_push(&mut state, 2i64).unwrap_err();
        assert!(matches!(err, Error::StackOverflow { requested: 1 }));
        assert_eq!(state.top(), 1);
    }
}
