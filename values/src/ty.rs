use core::fmt;

/// Classification of a dynamic value, as reported by [`Stack::type_of`].
///
/// `None` is what an index past the top of the stack reports. `Poly` never
/// describes a stored value; conversions whose dynamic shape depends on the
/// host value (options, sum types, results) declare it as their type.
///
/// [`Stack::type_of`]: crate::Stack::type_of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    None,
    Nil,
    Boolean,
    LightUserdata,
    Number,
    String,
    Table,
    Poly,
}

impl Type {
    pub fn name(self) -> &'static str {
        match self {
            Type::None => "no value",
            Type::Nil => "nil",
            Type::Boolean => "boolean",
            Type::LightUserdata => "lightuserdata",
            Type::Number => "number",
            Type::String => "string",
            Type::Table => "table",
            Type::Poly => "polymorphic",
        }
    }

    /// `true` for both nil and a missing value.
    pub fn is_none_or_nil(self) -> bool {
        matches!(self, Type::None | Type::Nil)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
