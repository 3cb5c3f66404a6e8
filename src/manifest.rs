//! Declaring variables in a TOML manifest.
//!
//! ```toml
//! [[variable]]
//! long = "wda-port"
//! short = "t"
//! ident = "driver_port"
//! type = "int"
//! default = 8100
//! description = ["Connect to WebDriverAgent listening on TCP `port`"]
//! ```
//!
//! Unknown keys are detected with `serde_ignored` and reported with a
//! best-effort line number. [`VariableSet::from_manifest`] rejects them;
//! [`VariableSet::from_manifest_lenient`] only logs them.

use std::collections::HashSet;

use serde::Deserialize;

use crate::env::Environ;
use crate::error::EnvfigError;
use crate::set::VariableSet;
use crate::types::ValueType;
use crate::value::Value;
use crate::variable::Variable;

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    variable: Vec<Declaration>,
}

#[derive(Debug, Deserialize)]
struct Declaration {
    long: String,
    #[serde(default)]
    short: String,
    #[serde(default)]
    ident: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    aggregate: bool,
    default: Option<toml::Value>,
    #[serde(default)]
    description: Vec<String>,
}

impl Declaration {
    fn into_variable(self) -> Result<Variable, EnvfigError> {
        let ty = ValueType::parse(&self.kind);
        if ty == ValueType::Invalid {
            return Err(EnvfigError::UnknownType {
                flag: self.long,
                name: self.kind,
            });
        }

        let var = match (self.aggregate, self.default) {
            (true, Some(_)) => {
                return Err(EnvfigError::InvalidDefault {
                    flag: self.long,
                    reason: "aggregate variables start empty".into(),
                });
            }
            (true, None) => Variable::aggregate(&self.long, &self.short, &self.ident, ty),
            (false, None) => Variable::empty(&self.long, &self.short, &self.ident, ty),
            (false, Some(default)) => {
                let value = default_value(ty, default).map_err(|reason| EnvfigError::InvalidDefault {
                    flag: self.long.clone(),
                    reason,
                })?;
                Variable::new(&self.long, &self.short, &self.ident, value)
            }
        };
        Ok(var.description(self.description))
    }
}

fn default_value(ty: ValueType, default: toml::Value) -> Result<Value, String> {
    match (ty, default) {
        (ValueType::Bool, toml::Value::Boolean(b)) => Ok(Value::Bool(b)),
        (ValueType::Int, toml::Value::Integer(i)) => Ok(Value::Int(i)),
        (ValueType::Float, toml::Value::Float(f)) => Ok(Value::Float(f)),
        (ValueType::Float, toml::Value::Integer(i)) => Ok(Value::Float(i as f64)),
        (ValueType::String, toml::Value::String(s)) => Ok(Value::String(s)),
        (ValueType::Json, other) => serde_json::to_value(other)
            .map(Value::Json)
            .map_err(|e| e.to_string()),
        (ValueType::Serial, _) => Err("serial variables need a codec and cannot have a manifest default".into()),
        (ty, other) => Err(format!("expected {ty}, found {}", other.type_str())),
    }
}

impl VariableSet {
    /// Declare variables from a TOML manifest, rejecting unknown keys.
    pub fn from_manifest(text: &str, environ: Environ) -> Result<Self, EnvfigError> {
        load(text, environ, true)
    }

    /// Like [`from_manifest`](Self::from_manifest) but unknown keys are
    /// logged and skipped.
    pub fn from_manifest_lenient(text: &str, environ: Environ) -> Result<Self, EnvfigError> {
        load(text, environ, false)
    }
}

fn load(text: &str, environ: Environ, strict: bool) -> Result<VariableSet, EnvfigError> {
    let mut unknown: Vec<String> = Vec::new();
    let deserializer = toml::Deserializer::new(text);
    let manifest: Manifest = serde_ignored::deserialize(deserializer, |path| {
        unknown.push(path.to_string());
    })
    .map_err(|source| EnvfigError::ManifestParse { source })?;

    if !unknown.is_empty() {
        if strict {
            let errors = unknown
                .into_iter()
                .map(|key| {
                    let line = find_key_line(text, &key);
                    EnvfigError::UnknownKey { key, line }
                })
                .collect();
            return Err(EnvfigError::UnknownKeys(errors));
        }
        for key in &unknown {
            tracing::warn!(key = %key, line = find_key_line(text, key), "ignoring unknown manifest key");
        }
    }

    let mut seen = HashSet::new();
    let mut vars = Vec::with_capacity(manifest.variable.len());
    for decl in manifest.variable {
        if !seen.insert(decl.long.clone()) {
            return Err(EnvfigError::DuplicateFlag(decl.long));
        }
        vars.push(decl.into_variable()?);
    }
    tracing::debug!(count = vars.len(), "loaded variable manifest");
    Ok(VariableSet::with_environ(vars, environ))
}

/// Find the 1-indexed line of an ignored key.
///
/// Paths look like `variable.2.typo` (third `[[variable]]` table) or `typo`
/// (top level, before any table). Returns 0 when the key cannot be located.
fn find_key_line(content: &str, path: &str) -> usize {
    let segments: Vec<&str> = path.split('.').collect();
    let leaf = segments.last().copied().unwrap_or(path);
    let wanted: Option<(&str, usize)> = match segments.as_slice() {
        [table, index, _] => index.parse().ok().map(|i| (*table, i)),
        _ => None,
    };

    let mut current: Option<(String, usize)> = None;
    let mut counts: Vec<(String, usize)> = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if let Some(header) = trimmed.strip_prefix("[[").and_then(|h| h.strip_suffix("]]")) {
            let name = header.trim().to_string();
            let index = match counts.iter().position(|(n, _)| *n == name) {
                Some(pos) => {
                    counts[pos].1 += 1;
                    counts[pos].1
                }
                None => {
                    counts.push((name.clone(), 0));
                    0
                }
            };
            current = Some((name, index));
            continue;
        }

        let in_right_table = match (&current, wanted) {
            (None, None) => true,
            (Some((name, index)), Some((table, want))) => name == table && *index == want,
            _ => false,
        };

        if in_right_table
            && let Some(after_key) = trimmed.strip_prefix(leaf)
            && after_key.trim_start().starts_with('=')
        {
            return i + 1;
        }
    }
    0
}
