use tether_values::{Stack, Type};

use crate::{Handler, Marshal, Push, Tracking};

impl<S: Stack, T: Push<S>> Push<S> for Option<T> {
    const TYPE: Type = Type::Poly;

    fn push(self, stack: &mut S) -> usize {
        match self {
            Some(value) => value.push(stack),
            None => {
                stack.push_nil();
                1
            }
        }
    }
}

/// Nil (or a missing slot) is `None`; anything else must satisfy `T`.
impl<S: Stack, T: Marshal<S>> Marshal<S> for Option<T> {
    const SLOTS: usize = T::SLOTS;

    fn check<H: Handler + ?Sized>(
        stack: &S,
        index: i32,
        handler: &mut H,
        tracking: &mut Tracking,
    ) -> bool {
        if stack.is_none_or_nil(index) {
            tracking.use_slots(1);
            return true;
        }
        T::check(stack, index, handler, tracking)
    }

    fn get(stack: &mut S, index: i32, tracking: &mut Tracking) -> Self {
        if stack.is_none_or_nil(index) {
            tracking.use_slots(1);
            return None;
        }
        Some(T::get(stack, index, tracking))
    }
}
