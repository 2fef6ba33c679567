use tether_values::{Stack, Type};

use crate::{ErrorRecord, Push};

/// `Ok` pushes its value, `Err` pushes the record (nil for the "no error"
/// record). Push only: a table on the stack does not say which side it came
/// from.
impl<S: Stack, T: Push<S>> Push<S> for Result<T, ErrorRecord> {
    const TYPE: Type = Type::Poly;

    fn push(self, stack: &mut S) -> usize {
        match self {
            Ok(value) => value.push(stack),
            Err(error) => error.push(stack),
        }
    }
}
