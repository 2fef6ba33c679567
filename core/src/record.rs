//! Structured error records and their table form.
//!
//! A populated [`ErrorRecord`] crosses to the dynamic side as a table:
//!
//! | key           | value                                   |
//! |---------------|-----------------------------------------|
//! | `message`     | string                                  |
//! | `code`        | integer                                 |
//! | `category`    | light userdata pointing at the category |
//! | `file`        | string                                  |
//! | `line`        | integer                                 |
//! | `description` | string, push only                       |
//!
//! The "no error" record crosses as nil, both ways.

use alloc::format;
use alloc::string::String;
use core::fmt;

use tether_values::{LightPtr, Stack, Type};

use crate::marshal::reject;
use crate::{Handler, Marshal, Mismatch, NoPanic, Push, Tracking};

/// A process-wide error category descriptor.
///
/// Categories are compared by identity, so declare each one as a `static`.
///
/// ```
/// use tether_core::ErrorCategory;
///
/// static IO: ErrorCategory = ErrorCategory::new("io");
/// assert_eq!(IO.name(), "io");
/// ```
#[derive(Debug)]
pub struct ErrorCategory {
    name: &'static str,
}

impl ErrorCategory {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ErrorCategory {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self, other)
    }
}

impl Eq for ErrorCategory {}

/// Category of the "no error" record.
pub static NO_ERROR_CATEGORY: ErrorCategory = ErrorCategory::new("no error");

/// Stands in for a category pointer that is missing or of a foreign type.
pub static UNKNOWN_CATEGORY: ErrorCategory = ErrorCategory::new("unknown");

/// An error code with its category and origin.
///
/// Code `0` means "no error": such a record is falsy ([`is_error`] returns
/// `false`) whatever its other fields hold.
///
/// [`is_error`]: ErrorRecord::is_error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    code: i32,
    category: &'static ErrorCategory,
    message: String,
    file: String,
    line: usize,
}

impl Default for ErrorRecord {
    fn default() -> Self {
        Self::none()
    }
}

impl ErrorRecord {
    /// The "no error" record.
    pub fn none() -> Self {
        Self {
            code: 0,
            category: &NO_ERROR_CATEGORY,
            message: String::new(),
            file: String::new(),
            line: 0,
        }
    }

    pub fn new(
        code: i32,
        category: &'static ErrorCategory,
        message: impl Into<String>,
        file: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            code,
            category,
            message: message.into(),
            file: file.into(),
            line,
        }
    }

    pub fn is_error(&self) -> bool {
        self.code != 0
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn category(&self) -> &'static ErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// Source line. Lines above `i64::MAX` are pushed as `i64::MAX`, so they
    /// do not survive a round trip.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Human-readable summary, e.g. `io error 404: not found (x.cpp:12)`.
    pub fn description(&self) -> String {
        format!(
            "{} error {}: {} ({}:{})",
            self.category.name, self.code, self.message, self.file, self.line
        )
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

// =============================================================================
// Conversion
// =============================================================================

const RECORD_FIELDS: usize = 6;

fn store<S: Stack, T: Push<S>>(stack: &mut S, table: &S::Table, key: &str, value: T) {
    value.push(stack);
    stack.set_field(table, key);
}

/// Read `table[key]` through `T`'s own checker and getter; a missing or
/// ill-typed field reads as `T::default()`.
fn load<S: Stack, T: Marshal<S> + Default>(stack: &mut S, table: &S::Table, key: &str) -> T {
    stack.get_field(table, key);
    let mut tracking = Tracking::new();
    let value = if T::check(stack, -1, &mut NoPanic, &mut tracking) {
        T::get(stack, -1, &mut tracking)
    } else {
        T::default()
    };
    stack.pop(1);
    value
}

fn load_category<S: Stack>(stack: &mut S, table: &S::Table) -> &'static ErrorCategory {
    stack.get_field(table, "category");
    let category = stack
        .to_light(-1)
        .and_then(|ptr| ptr.downcast::<ErrorCategory>())
        .unwrap_or(&UNKNOWN_CATEGORY);
    stack.pop(1);
    category
}

impl<S: Stack> Push<S> for ErrorRecord {
    const TYPE: Type = Type::Table;

    fn push(self, stack: &mut S) -> usize {
        if !self.is_error() {
            stack.push_nil();
            return 1;
        }

        let table = stack.new_table(0, RECORD_FIELDS);
        let description = self.description();
        store(stack, &table, "message", self.message);
        store(stack, &table, "code", i64::from(self.code));
        stack.push_light(LightPtr::new(self.category));
        stack.set_field(&table, "category");
        store(stack, &table, "file", self.file);
        store(stack, &table, "line", i64::try_from(self.line).unwrap_or(i64::MAX));
        store(stack, &table, "description", description);
        stack.push_table(table);
        1
    }
}

impl<S: Stack> Marshal<S> for ErrorRecord {
    fn check<H: Handler + ?Sized>(
        stack: &S,
        index: i32,
        handler: &mut H,
        tracking: &mut Tracking,
    ) -> bool {
        tracking.use_slots(1);
        let index = stack.abs_index(index);
        match stack.type_of(index) {
            Type::None | Type::Nil | Type::Table => true,
            actual => reject(
                handler,
                Mismatch::new(
                    index,
                    Type::Table,
                    actual,
                    "expected nil or a table to convert to an error record",
                ),
            ),
        }
    }

    fn get(stack: &mut S, index: i32, tracking: &mut Tracking) -> Self {
        tracking.use_slots(1);
        let index = stack.abs_index(index);
        let Some(table) = stack.to_table(index) else {
            return ErrorRecord::none();
        };

        let code = load::<S, i64>(stack, &table, "code");
        let category = load_category(stack, &table);
        let message = load::<S, String>(stack, &table, "message");
        let file = load::<S, String>(stack, &table, "file");
        let line = load::<S, i64>(stack, &table, "line");

        ErrorRecord {
            code: i32::try_from(code).unwrap_or_default(),
            category,
            message,
            file,
            line: usize::try_from(line).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tether_values::State;

    use super::*;
    use crate::{check, get, push};

    static NET: ErrorCategory = ErrorCategory::new("net");

    #[test]
    fn test_sentinel_is_nil() {
        let mut state = State::new();
        assert_eq!(push(&mut state, ErrorRecord::none()), 1);
        assert_eq!(state.type_of(-1), Type::Nil);
        assert!(check::<ErrorRecord, _>(&state, -1, &mut NoPanic));
        assert_eq!(get::<ErrorRecord, _>(&mut state, -1), ErrorRecord::none());
    }

    #[test]
    fn test_missing_value_reads_as_sentinel() {
        let mut state = State::new();
        assert!(check::<ErrorRecord, _>(&state, 1, &mut NoPanic));
        assert!(!get::<ErrorRecord, _>(&mut state, 1).is_error());
    }

    #[test]
    fn test_populated_record_round_trip() {
        let mut state = State::new();
        let record = ErrorRecord::new(404, &NET, "not found", "x.cpp", 12);
        push(&mut state, record.clone());

        assert_eq!(state.type_of(-1), Type::Table);
        assert!(check::<ErrorRecord, _>(&state, -1, &mut NoPanic));
        let read = get::<ErrorRecord, _>(&mut state, -1);
        assert_eq!(read, record);
        assert!(core::ptr::eq(read.category(), &NET));
        assert_eq!(state.top(), 1);
    }

    #[test]
    fn test_table_has_description() {
        let mut state = State::new();
        push(&mut state, ErrorRecord::new(7, &NET, "refused", "net.rs", 3));
        let table = state.to_table(-1).expect("table");
        assert_eq!(state.get_field(&table, "description"), Type::String);
        assert_eq!(
            get::<String, _>(&mut state, -1),
            "net error 7: refused (net.rs:3)"
        );
        assert_eq!(table.entry_count(), 6);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_line_saturates_at_integer_max() {
        let mut state = State::new();
        push(&mut state, ErrorRecord::new(-7, &NET, "m", "f", usize::MAX));
        let read = get::<ErrorRecord, _>(&mut state, -1);
        assert_eq!(read.code(), -7);
        assert_eq!(read.line(), i64::MAX as usize);
    }

    #[test]
    fn test_foreign_category_pointer_reads_as_unknown() {
        static NOT_A_CATEGORY: u8 = 0;
        let mut state = State::new();
        let table = state.new_table(0, 2);
        state.push_integer(5);
        state.set_field(&table, "code");
        state.push_light(LightPtr::new(&NOT_A_CATEGORY));
        state.set_field(&table, "category");
        state.push_table(table);

        let read = get::<ErrorRecord, _>(&mut state, -1);
        assert_eq!(read.code(), 5);
        assert_eq!(read.category(), &UNKNOWN_CATEGORY);
        assert_eq!(read.message(), "");
    }

    #[test]
    fn test_rejects_string() {
        let mut state = State::new();
        state.push_bytes(b"oops");
        let mut calls = 0;
        assert!(!check::<ErrorRecord, _>(&state, -1, &mut |_: Mismatch| calls += 1));
        assert_eq!(calls, 1);
    }
}
