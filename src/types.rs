use std::fmt;

/// The kind of value a [`Variable`](crate::Variable) holds.
///
/// The lowercase name doubles as the default argument placeholder in help
/// output (uppercased there) and as the `type` key in variable manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    /// Accepts no value. Produced by [`ValueType::parse`] for unrecognized names.
    #[default]
    Invalid,
    Bool,
    Int,
    Float,
    String,
    Json,
    /// A value with its own text encoding, see [`TextCodec`](crate::TextCodec).
    Serial,
}

impl ValueType {
    /// Canonical lowercase name, or an error sentinel for `Invalid`.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Invalid => "!Type(Invalid)",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::Json => "json",
            ValueType::Serial => "serial",
        }
    }

    /// Parse a type name. Case-insensitive, surrounding whitespace ignored.
    ///
    /// Unrecognized names yield [`ValueType::Invalid`] rather than an error;
    /// callers check for it explicitly.
    pub fn parse(name: &str) -> ValueType {
        match name.trim().to_lowercase().as_str() {
            "bool" => ValueType::Bool,
            "int" => ValueType::Int,
            "float" => ValueType::Float,
            "string" => ValueType::String,
            "json" => ValueType::Json,
            "serial" => ValueType::Serial,
            _ => ValueType::Invalid,
        }
    }

    /// Numbers and booleans are exported without shell quotes.
    pub fn is_bare(self) -> bool {
        matches!(self, ValueType::Bool | ValueType::Int | ValueType::Float)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
