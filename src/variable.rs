//! A single named, typed configuration parameter.
//!
//! A [`Variable`] tracks two candidate values: the user-facing one (seeded
//! with the compiled default, replaced by command-line values) and the one
//! inherited from the environment. Which one renders depends on the
//! bookkeeping flags:
//!
//! ```text
//! user_defined || !suppress_default   → user-facing value
//! otherwise                           → environment value
//! ```
//!
//! Every call to [`Variable::set`] re-resolves the environment side as well,
//! so both candidates stay current no matter which source ends up selected.

use std::fmt;

use crate::env::Environ;
use crate::error::{DecodeError, EnvfigError};
use crate::slot::{Aggregate, Scalar, Slot, Source};
use crate::types::ValueType;
use crate::usage;
use crate::value::{self, TextCodec, Value};

#[derive(Debug)]
pub struct Variable {
    long: String,
    short: String,
    ident: String,
    description: Vec<String>,
    ty: ValueType,
    slot: Box<dyn Slot>,
    codec: Option<Box<dyn TextCodec>>,
    user_defined: bool,
    suppress_default: bool,
    suppress_env: bool,
}

impl Variable {
    fn with_slot(long: &str, short: &str, ident: &str, ty: ValueType, slot: Box<dyn Slot>) -> Self {
        Self {
            long: long.to_string(),
            short: short.to_string(),
            ident: ident.to_string(),
            description: Vec::new(),
            ty,
            slot,
            codec: None,
            user_defined: false,
            suppress_default: false,
            suppress_env: false,
        }
    }

    /// A scalar variable whose type follows its compiled default.
    pub fn new(long: &str, short: &str, ident: &str, default: impl Into<Value>) -> Self {
        let default = default.into();
        let ty = default.value_type();
        let codec = match &default {
            Value::Serial(c) => Some(c.clone_codec()),
            _ => None,
        };
        let mut var = Self::with_slot(long, short, ident, ty, Box::new(Scalar::new(Some(default))));
        var.codec = codec;
        var
    }

    /// A scalar `serial` variable decoded through `codec`, which is also its default.
    pub fn serial(long: &str, short: &str, ident: &str, codec: impl TextCodec + 'static) -> Self {
        Self::new(long, short, ident, Value::Serial(Box::new(codec)))
    }

    /// A scalar variable with no compiled default.
    pub fn empty(long: &str, short: &str, ident: &str, ty: ValueType) -> Self {
        Self::with_slot(long, short, ident, ty, Box::new(Scalar::new(None)))
    }

    /// A variable that accumulates one element per [`set`](Self::set) call.
    pub fn aggregate(long: &str, short: &str, ident: &str, ty: ValueType) -> Self {
        Self::with_slot(long, short, ident, ty, Box::new(Aggregate::new()))
    }

    /// Attach a text codec, enabling `serial` decoding for variables built
    /// without a default.
    pub fn with_codec(mut self, codec: impl TextCodec + 'static) -> Self {
        self.codec = Some(Box::new(codec));
        self
    }

    /// Replace the description lines.
    ///
    /// A single back-quoted word in the text names the argument in help
    /// output, e.g. ``"Bundle `ID` of the target app"``.
    pub fn description<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.description = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn long(&self) -> &str {
        &self.long
    }

    pub fn short(&self) -> &str {
        &self.short
    }

    pub fn ident(&self) -> &str {
        &self.ident
    }

    pub fn lines(&self) -> &[String] {
        &self.description
    }

    pub fn value_type(&self) -> ValueType {
        self.ty
    }

    pub fn is_aggregate(&self) -> bool {
        self.slot.is_aggregate()
    }

    pub fn is_user_defined(&self) -> bool {
        self.user_defined
    }

    pub fn set_user_defined(&mut self, user_defined: bool) {
        self.user_defined = user_defined;
    }

    pub fn is_default_suppressed(&self) -> bool {
        self.suppress_default
    }

    pub fn is_env_suppressed(&self) -> bool {
        self.suppress_env
    }

    /// Stop using the compiled default and drop the user-facing value.
    pub fn suppress_default(&mut self) {
        self.suppress_default = true;
        self.slot.clear(Source::User);
    }

    /// Stop inheriting from the environment and drop the inherited value.
    pub fn suppress_env(&mut self) {
        self.suppress_env = true;
        self.slot.clear(Source::Env);
    }

    /// Boolean variables may be given as bare flags.
    pub fn is_flag_without_argument(&self) -> bool {
        self.ty == ValueType::Bool
    }

    fn selected(&self) -> Source {
        if self.user_defined || !self.suppress_default {
            Source::User
        } else {
            Source::Env
        }
    }

    /// The resolved value. Never fails; anything that cannot be encoded
    /// (including an `Invalid` type) renders as `""`.
    pub fn value(&self) -> String {
        if self.ty == ValueType::Invalid {
            return String::new();
        }
        self.slot.encode(self.selected())
    }

    /// Decode `raw` into the user-facing value and re-resolve the
    /// environment value from `env`.
    ///
    /// Only a failure to decode `raw` is returned. The environment side is
    /// decoded on a best-effort basis and left empty when it does not parse.
    /// With defaults suppressed, `raw` is not decoded at all.
    pub fn set(&mut self, raw: &str, env: &Environ) -> Result<(), EnvfigError> {
        if let Some(e) = self.resolve(raw, env)? {
            tracing::debug!(
                ident = %self.ident,
                error = %e,
                "ignoring undecodable environment value"
            );
        }
        Ok(())
    }

    /// Like [`set`](Self::set), but hands back the environment-side decode
    /// failure instead of swallowing it.
    pub(crate) fn resolve(
        &mut self,
        raw: &str,
        env: &Environ,
    ) -> Result<Option<DecodeError>, EnvfigError> {
        match self.ty {
            ValueType::Invalid => {
                return Err(EnvfigError::InvalidType {
                    flag: self.long.clone(),
                });
            }
            ValueType::Serial if self.codec.is_none() => {
                return Err(EnvfigError::UnsupportedType {
                    flag: self.long.clone(),
                    kind: self.ty,
                });
            }
            _ => {}
        }

        let codec = self.codec.as_deref();

        let user = if self.suppress_default {
            None
        } else {
            let decoded =
                value::decode(self.ty, raw, codec).map_err(|source| EnvfigError::DecodeFailure {
                    flag: self.long.clone(),
                    raw: raw.to_string(),
                    kind: self.ty,
                    source,
                })?;
            Some(decoded)
        };

        let mut rejected = None;
        let inherited = match env.get(&self.ident) {
            Some(text) if !self.suppress_env => match value::decode(self.ty, text, codec) {
                Ok(v) => Some(v),
                Err(e) => {
                    rejected = Some(e);
                    None
                }
            },
            _ => None,
        };

        self.slot.store(user, inherited);
        Ok(rejected)
    }

    /// The argument placeholder shown in help output: the back-quoted word
    /// from the description, else the type name, uppercased.
    pub fn placeholder(&self) -> String {
        usage::placeholder(self).0
    }

    /// Help text block for this variable, see [`usage`](crate::usage).
    pub fn usage(&self) -> String {
        usage::render(self)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value())
    }
}
