//! Reference runtime: a Lua-style value stack.

mod table;
mod value;

use alloc::borrow::Cow;
use alloc::vec::Vec;

pub use table::{Key, Table};
pub use value::Value;

use crate::{LightPtr, StateError, StateOptions, Stack, Type};

/// A single-threaded value stack with a globals table.
///
/// # Example
///
/// ```
/// use tether_values::{Stack, State, Type};
///
/// let mut state = State::new();
/// state.push_integer(7);
/// state.push_bytes(b"seven");
/// assert_eq!(state.type_of(-1), Type::String);
/// assert_eq!(state.to_integer(1), Some(7));
/// assert_eq!(state.type_of(3), Type::None);
/// ```
#[derive(Debug)]
pub struct State {
    stack: Vec<Value>,
    globals: Table,
    options: StateOptions,
}

static_assertions::assert_not_impl_any!(State: Send, Sync);

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    pub fn new() -> Self {
        Self::with_options(StateOptions::default())
    }

    pub fn with_options(options: StateOptions) -> Self {
        Self {
            stack: Vec::new(),
            globals: Table::new(),
            options,
        }
    }

    pub fn options(&self) -> &StateOptions {
        &self.options
    }

    /// Handle to the globals table.
    pub fn globals(&self) -> Table {
        self.globals.clone()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    /// The value at `index`, if the index names a slot.
    pub fn value(&self, index: i32) -> Option<&Value> {
        self.slot(index).map(|slot| &self.stack[slot])
    }

    pub fn try_value(&self, index: i32) -> Result<&Value, StateError> {
        self.value(index).ok_or(StateError::InvalidIndex {
            index,
            top: self.top(),
        })
    }

    /// Truncate the stack, or extend it with nils, to exactly `top` values.
    pub fn set_top(&mut self, top: usize) {
        self.stack.resize(top, Value::Nil);
    }

    /// Fail unless `extra` more values fit under the stack limit.
    pub fn ensure_stack(&mut self, extra: usize) -> Result<(), StateError> {
        let limit = self.options.stack_limit;
        let available = limit.saturating_sub(self.stack.len());
        if extra > available {
            return Err(StateError::StackOverflow {
                requested: extra,
                available,
                limit,
            });
        }
        self.stack.reserve(extra);
        Ok(())
    }

    fn slot(&self, index: i32) -> Option<usize> {
        let abs = self.abs_index(index);
        if abs < 1 || abs > self.top() {
            return None;
        }
        Some(abs as usize - 1)
    }

    fn pop_value(&mut self) -> Value {
        self.stack.pop().unwrap_or(Value::Nil)
    }
}

impl Stack for State {
    type Table = Table;

    fn top(&self) -> i32 {
        i32::try_from(self.stack.len()).unwrap_or(i32::MAX)
    }

    fn type_of(&self, index: i32) -> Type {
        self.value(index).map_or(Type::None, Value::ty)
    }

    fn is_string(&self, index: i32) -> bool {
        match self.value(index) {
            Some(Value::String(_)) => true,
            Some(Value::Integer(_) | Value::Number(_)) => self.options.coerce_numbers_to_strings,
            _ => false,
        }
    }

    fn to_bytes(&self, index: i32) -> Option<Cow<'_, [u8]>> {
        self.value(index)?
            .to_bytes(self.options.coerce_numbers_to_strings)
    }

    fn to_integer(&self, index: i32) -> Option<i64> {
        self.value(index)?.to_integer()
    }

    fn to_number(&self, index: i32) -> Option<f64> {
        self.value(index)?.to_number()
    }

    fn to_boolean(&self, index: i32) -> bool {
        !matches!(self.value(index), None | Some(Value::Nil | Value::Boolean(false)))
    }

    fn to_table(&self, index: i32) -> Option<Table> {
        self.value(index)?.as_table().cloned()
    }

    fn to_light(&self, index: i32) -> Option<LightPtr> {
        match self.value(index)? {
            Value::LightUserdata(ptr) => Some(*ptr),
            _ => None,
        }
    }

    fn push_nil(&mut self) {
        self.push(Value::Nil);
    }

    fn push_boolean(&mut self, value: bool) {
        self.push(Value::Boolean(value));
    }

    fn push_integer(&mut self, value: i64) {
        self.push(Value::Integer(value));
    }

    fn push_number(&mut self, value: f64) {
        self.push(Value::Number(value));
    }

    fn push_bytes(&mut self, bytes: &[u8]) {
        self.push(Value::string(bytes));
    }

    fn push_light(&mut self, ptr: LightPtr) {
        self.push(Value::LightUserdata(ptr));
    }

    fn push_table(&mut self, table: Table) {
        self.push(Value::Table(table));
    }

    fn pop(&mut self, count: usize) {
        let len = self.stack.len().saturating_sub(count);
        self.stack.truncate(len);
    }

    fn check_stack(&mut self, extra: usize) -> bool {
        self.ensure_stack(extra).is_ok()
    }

    fn new_table(&mut self, narr: usize, nrec: usize) -> Table {
        Table::with_capacity(narr + nrec)
    }

    fn get_field(&mut self, table: &Table, key: &str) -> Type {
        let value = table.get(key);
        let ty = value.ty();
        self.push(value);
        ty
    }

    fn set_field(&mut self, table: &Table, key: &str) {
        let value = self.pop_value();
        table.set(key, value);
    }

    fn get_index(&mut self, table: &Table, n: i64) -> Type {
        let value = table.get(n);
        let ty = value.ty();
        self.push(value);
        ty
    }

    fn set_index(&mut self, table: &Table, n: i64) {
        let value = self.pop_value();
        table.set(n, value);
    }

    fn raw_len(&self, table: &Table) -> usize {
        table.len()
    }
}
