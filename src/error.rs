use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;

use thiserror::Error;

use crate::types::ValueType;

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum EnvfigError {
    #[error("Invalid type for '--{flag}': no value can be decoded")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::invalid_type)))]
    InvalidType { flag: String },

    #[error("Unsupported {kind} value for '--{flag}': no text codec available")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(envfig::unsupported_type),
            help("declare serial variables with Variable::serial and a TextCodec default")
        )
    )]
    UnsupportedType { flag: String, kind: ValueType },

    #[error("Cannot decode {raw:?} as {kind} for '--{flag}': {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::decode)))]
    DecodeFailure {
        flag: String,
        raw: String,
        kind: ValueType,
        source: DecodeError,
    },

    #[error("Undefined value for {0:?}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(envfig::undefined_ident),
            help("pass the flag on the command line or export the variable")
        )
    )]
    UndefinedIdent(String),

    #[error("Failed to parse variable manifest: {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::manifest)))]
    ManifestParse { source: toml::de::Error },

    #[error("Unknown key '{key}' in variable manifest (line {line})")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::unknown_key)))]
    UnknownKey { key: String, line: usize },

    #[error("Unknown keys in variable manifest")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::unknown_keys)))]
    UnknownKeys(Vec<EnvfigError>),

    #[error("Unknown type {name:?} for '--{flag}'")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::unknown_type)))]
    UnknownType { flag: String, name: String },

    #[error("Duplicate flag '--{0}'")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::duplicate_flag)))]
    DuplicateFlag(String),

    #[error("Invalid default for '--{flag}': {reason}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::invalid_default)))]
    InvalidDefault { flag: String, reason: String },

    #[error("Failed to write document: {0}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::io)))]
    Io(#[from] std::io::Error),
}

/// The underlying cause of a [`EnvfigError::DecodeFailure`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Bool(#[from] ParseBoolError),
    #[error(transparent)]
    Int(#[from] ParseIntError),
    #[error(transparent)]
    Float(#[from] ParseFloatError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Serial(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_failure_echoes_raw_and_cause() {
        let source = "eighty".parse::<i64>().unwrap_err();
        let err = EnvfigError::DecodeFailure {
            flag: "listen-port".into(),
            raw: "eighty".into(),
            kind: ValueType::Int,
            source: source.into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"eighty\""));
        assert!(msg.contains("int"));
        assert!(msg.contains("--listen-port"));
        assert!(msg.contains("invalid digit"));
    }

    #[test]
    fn undefined_ident_names_variable() {
        let err = EnvfigError::UndefinedIdent("proj_source".into());
        assert!(err.to_string().contains("proj_source"));
    }

    #[test]
    fn unknown_key_formats_line() {
        let err = EnvfigError::UnknownKey {
            key: "variable.0.typo".into(),
            line: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("typo"));
        assert!(msg.contains("7"));
    }
}
