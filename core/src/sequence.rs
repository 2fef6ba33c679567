use alloc::vec::Vec;

use tether_values::{Stack, Type};

use crate::marshal::reject;
use crate::{Handler, Marshal, Mismatch, NoPanic, Push, Tracking};

/// Pushes a 1-based array table.
impl<S: Stack, T: Push<S>> Push<S> for Vec<T> {
    const TYPE: Type = Type::Table;

    fn push(self, stack: &mut S) -> usize {
        let table = stack.new_table(self.len(), 0);
        for (position, item) in (1..).zip(self) {
            item.push(stack);
            stack.set_index(&table, position);
        }
        stack.push_table(table);
        1
    }
}

/// Reads `1..=len`, stopping at the first element that is nil or that `T`
/// does not accept. Elements are not validated by the checker.
impl<S: Stack, T: Marshal<S>> Marshal<S> for Vec<T> {
    fn check<H: Handler + ?Sized>(
        stack: &S,
        index: i32,
        handler: &mut H,
        tracking: &mut Tracking,
    ) -> bool {
        tracking.use_slots(1);
        let index = stack.abs_index(index);
        match stack.type_of(index) {
            Type::Table => true,
            actual => reject(
                handler,
                Mismatch::new(index, Type::Table, actual, "expected a sequence table"),
            ),
        }
    }

    fn get(stack: &mut S, index: i32, tracking: &mut Tracking) -> Self {
        tracking.use_slots(1);
        let Some(table) = stack.to_table(index) else {
            return Vec::new();
        };

        let len = stack.raw_len(&table);
        let mut items = Vec::with_capacity(len);
        for position in (1..).take(len) {
            stack.get_index(&table, position);
            let mut scratch = Tracking::new();
            let fits = !stack.is_none_or_nil(-1) && T::check(stack, -1, &mut NoPanic, &mut scratch);
            if fits {
                Vec::push(&mut items, T::get(stack, -1, &mut scratch));
            }
            stack.pop(1);
            if !fits {
                break;
            }
        }
        items
    }
}
