//! Typed values and their text encodings.
//!
//! Every [`ValueType`] except `Invalid` has exactly one [`Value`] variant.
//! Encoding never fails (a value that cannot be encoded renders as `""`);
//! decoding returns the parse error so the caller can decide whether it is
//! fatal.

use std::error::Error;
use std::fmt;

use crate::error::DecodeError;
use crate::types::ValueType;

/// Error type returned by [`TextCodec`] implementations.
pub type CodecError = Box<dyn Error + Send + Sync>;

/// A value that knows how to write itself as text and read itself back.
///
/// `serial` variables hold one of these. Decoding clones the variable's
/// codec and unmarshals into the clone, so implementations may keep any
/// state they need between calls (units, precision, a format string).
pub trait TextCodec: fmt::Debug {
    fn marshal_text(&self) -> Result<String, CodecError>;
    fn unmarshal_text(&mut self, text: &str) -> Result<(), CodecError>;
    fn clone_codec(&self) -> Box<dyn TextCodec>;
}

impl<T> TextCodec for T
where
    T: fmt::Display + std::str::FromStr + Clone + fmt::Debug + 'static,
    T::Err: Error + Send + Sync + 'static,
{
    fn marshal_text(&self) -> Result<String, CodecError> {
        Ok(self.to_string())
    }

    fn unmarshal_text(&mut self, text: &str) -> Result<(), CodecError> {
        *self = text.parse()?;
        Ok(())
    }

    fn clone_codec(&self) -> Box<dyn TextCodec> {
        Box::new(self.clone())
    }
}

#[derive(Debug)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Json(serde_json::Value),
    Serial(Box<dyn TextCodec>),
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Bool(b) => Value::Bool(*b),
            Value::Int(i) => Value::Int(*i),
            Value::Float(f) => Value::Float(*f),
            Value::String(s) => Value::String(s.clone()),
            Value::Json(j) => Value::Json(j.clone()),
            Value::Serial(c) => Value::Serial(c.clone_codec()),
        }
    }
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::Json(_) => ValueType::Json,
            Value::Serial(_) => ValueType::Serial,
        }
    }

    /// Canonical text form. Values that fail to encode render as `""`.
    pub fn encode(&self) -> String {
        match self {
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Json(j) => serde_json::to_string(j).unwrap_or_default(),
            Value::Serial(c) => c.marshal_text().unwrap_or_default(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<serde_json::Value> for Value {
    fn from(j: serde_json::Value) -> Self {
        Value::Json(j)
    }
}

/// Decode `raw` as `ty`.
///
/// Every call produces a fresh value; JSON text replaces whatever the slot
/// held before. `codec` is the prototype cloned for `serial` decoding.
///
/// `ty` must not be `Invalid`; callers reject that before decoding.
pub(crate) fn decode(
    ty: ValueType,
    raw: &str,
    codec: Option<&dyn TextCodec>,
) -> Result<Value, DecodeError> {
    Ok(match ty {
        ValueType::Bool => Value::Bool(raw.parse()?),
        ValueType::Int => Value::Int(raw.parse()?),
        ValueType::Float => Value::Float(raw.parse()?),
        ValueType::String => Value::String(raw.to_string()),
        ValueType::Json => Value::Json(serde_json::from_str(raw)?),
        ValueType::Serial => {
            let mut fresh = codec
                .map(|c| c.clone_codec())
                .ok_or_else(|| DecodeError::Serial("no text codec".into()))?;
            fresh
                .unmarshal_text(raw)
                .map_err(|e| DecodeError::Serial(e.to_string()))?;
            Value::Serial(fresh)
        }
        ValueType::Invalid => return Err(DecodeError::Serial("invalid type".into())),
    })
}
