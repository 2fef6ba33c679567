/// Runtime configuration for [`State`](crate::State).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateOptions {
    /// Maximum number of values the stack may hold.
    pub stack_limit: usize,
    /// Whether numbers satisfy string checks and read back as their decimal
    /// text, the way Lua's `lua_tolstring` behaves.
    pub coerce_numbers_to_strings: bool,
}

impl Default for StateOptions {
    fn default() -> Self {
        StateOptions::default()
    }
}

impl StateOptions {
    const fn default() -> Self {
        Self {
            stack_limit: 1_000_000,
            coerce_numbers_to_strings: true,
        }
    }

    /// Apply every field set in `overrides` on top of these options.
    pub fn override_with(self, overrides: StateOptionsOverride) -> Self {
        Self {
            stack_limit: overrides.stack_limit.unwrap_or(self.stack_limit),
            coerce_numbers_to_strings: overrides
                .coerce_numbers_to_strings
                .unwrap_or(self.coerce_numbers_to_strings),
        }
    }
}

/// Partial [`StateOptions`]; `None` fields keep the base value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateOptionsOverride {
    pub stack_limit: Option<usize>,
    pub coerce_numbers_to_strings: Option<bool>,
}
