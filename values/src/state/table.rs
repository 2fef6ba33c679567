use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;

use super::Value;

/// Key of a [`Table`] entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Integer(i64),
    String(Rc<[u8]>),
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Integer(n)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::String(Rc::from(s.as_bytes()))
    }
}

/// A shared, mutable runtime table.
///
/// Cloning a `Table` clones the handle: both clones see the same entries, and
/// `==` compares identity.
#[derive(Clone, Default)]
pub struct Table(Rc<RefCell<HashMap<Key, Value>>>);

static_assertions::assert_not_impl_any!(Table: Send, Sync);

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Table(Rc::new(RefCell::new(HashMap::with_capacity(capacity))))
    }

    /// The value stored at `key`, or nil.
    pub fn get(&self, key: impl Into<Key>) -> Value {
        self.0
            .borrow()
            .get(&key.into())
            .cloned()
            .unwrap_or(Value::Nil)
    }

    /// Store `value` at `key`; nil removes the entry.
    pub fn set(&self, key: impl Into<Key>, value: Value) {
        let key = key.into();
        let mut entries = self.0.borrow_mut();
        if value.is_nil() {
            entries.remove(&key);
        } else {
            entries.insert(key, value);
        }
    }

    /// Length of the sequence part: the largest `n` such that `1..=n` are all
    /// present.
    pub fn len(&self) -> usize {
        let entries = self.0.borrow();
        let mut n = 0;
        while entries.contains_key(&Key::Integer(n as i64 + 1)) {
            n += 1;
        }
        n
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Total number of entries, sequence and record parts alike.
    pub fn entry_count(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn ptr_eq(&self, other: &Table) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Table {}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Table({:p}, entries={})", Rc::as_ptr(&self.0), self.entry_count())
    }
}
