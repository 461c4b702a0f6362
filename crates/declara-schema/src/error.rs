use thiserror::Error;
use miette::Diagnostic;

/// Errors that can occur while constructing or loading a schema.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two types were declared with the same name.
    #[error("Duplicate type: `{name}` is declared more than once")]
    #[diagnostic(
        code(declara_schema::duplicate_type),
        help("Type names must be unique within a schema")
    )]
    DuplicateType { name: String },

    /// A property or function name was declared twice within one type.
    #[error("Duplicate {kind}: `{member}` is declared more than once in `{type_name}`")]
    #[diagnostic(
        code(declara_schema::duplicate_member),
        help("Property names and function names must each be unique within their declaring type")
    )]
    DuplicateMember {
        type_name: String,
        member: String,
        /// `"property"` or `"function"`
        kind: &'static str,
    },

    /// A member refers to a type that is neither primitive nor declared.
    #[error("Unknown type: `{referenced}` used by `{type_name}.{member}` is not declared")]
    #[diagnostic(
        code(declara_schema::unknown_type),
        help("Declare the type in the schema or use one of Int, String, Boolean, Unit")
    )]
    UnknownType {
        type_name: String,
        member: String,
        referenced: String,
    },

    /// The root receiver type is not among the declared types.
    #[error("Unknown root: the root receiver type `{name}` is not declared")]
    #[diagnostic(code(declara_schema::unknown_root))]
    UnknownRoot { name: String },

    /// A configuring function names a primitive as its receiver.
    #[error("Invalid receiver: `{type_name}.{function}` configures `{receiver}`, which is not a receiver type")]
    #[diagnostic(
        code(declara_schema::invalid_receiver),
        help("Only declared schema types can be configured by a trailing block")
    )]
    InvalidReceiver {
        type_name: String,
        function: String,
        receiver: String,
    },

    /// The schema descriptor could not be parsed.
    #[error("Invalid schema descriptor: {0}")]
    #[diagnostic(
        code(declara_schema::descriptor),
        help("Check the descriptor's TOML syntax and field names")
    )]
    Descriptor(String),

    /// The schema descriptor could not be read.
    #[error("Error reading schema descriptor: {0}")]
    #[diagnostic(code(declara_schema::io))]
    Io(String),
}

// Conversion from io::Error to SchemaError
impl From<std::io::Error> for SchemaError {
    fn from(err: std::io::Error) -> Self {
        SchemaError::Io(err.to_string())
    }
}

// Conversion from toml::de::Error to SchemaError
impl From<toml::de::Error> for SchemaError {
    fn from(err: toml::de::Error) -> Self {
        SchemaError::Descriptor(err.to_string())
    }
}
