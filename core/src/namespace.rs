use tether_values::{Stack, Type};

/// Walk `path` (dot separated) down from `root`, creating missing tables, and
/// return the innermost table.
///
/// An empty path returns `root`. Empty segments (`"a..b"`) are skipped. A
/// segment that holds something other than a table is replaced by a fresh
/// table. The stack is left as it was found.
///
/// ```
/// use tether_core::ensure_namespace_table;
/// use tether_values::State;
///
/// let mut state = State::new();
/// let globals = state.globals();
/// let first = ensure_namespace_table(&mut state, &globals, "app.io");
/// let second = ensure_namespace_table(&mut state, &globals, "app.io");
/// assert!(first.ptr_eq(&second));
/// ```
pub fn ensure_namespace_table<S: Stack>(stack: &mut S, root: &S::Table, path: &str) -> S::Table {
    let mut current = root.clone();
    for segment in path.split('.').filter(|segment| !segment.is_empty()) {
        let existing = match stack.get_field(&current, segment) {
            Type::Table => stack.to_table(-1),
            _ => None,
        };
        stack.pop(1);

        current = match existing {
            Some(table) => table,
            None => {
                tracing::debug!(segment, "creating namespace table");
                let table = stack.new_table(0, 0);
                stack.push_table(table.clone());
                stack.set_field(&current, segment);
                table
            }
        };
    }
    current
}
