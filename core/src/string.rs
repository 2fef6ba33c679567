use alloc::string::String;

use tether_values::{Stack, Type};

use crate::marshal::reject;
use crate::{Handler, Marshal, Mismatch, Push, Tracking};

impl<S: Stack> Push<S> for String {
    const TYPE: Type = Type::String;

    fn push(self, stack: &mut S) -> usize {
        self.as_str().push(stack)
    }
}

impl<S: Stack> Push<S> for &str {
    const TYPE: Type = Type::String;

    fn push(self, stack: &mut S) -> usize {
        // Explicit length: embedded NULs survive and the empty string is just
        // a zero-length slice.
        stack.push_bytes(self.as_bytes());
        1
    }
}

impl<S: Stack> Marshal<S> for String {
    fn check<H: Handler + ?Sized>(
        stack: &S,
        index: i32,
        handler: &mut H,
        tracking: &mut Tracking,
    ) -> bool {
        tracking.use_slots(1);
        let index = stack.abs_index(index);
        if stack.is_string(index) {
            return true;
        }
        reject(
            handler,
            Mismatch::new(index, Type::String, stack.type_of(index), "expected a string"),
        )
    }

    fn get(stack: &mut S, index: i32, tracking: &mut Tracking) -> Self {
        tracking.use_slots(1);
        match stack.to_bytes(index) {
            Some(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            None => String::new(),
        }
    }
}
