//! Typed command-line configuration that exports to the shell. Declare your
//! variables, parse the command line, and print a script to `source`.
//!
//! Envfig manages a set of named, typed configuration variables. Each one is
//! reachable as a command-line flag and maps to a shell environment
//! identifier. Values come from three places: compiled defaults, the
//! inherited environment, and the command line. The result is rendered either
//! as a formatted usage screen or as an `export`/`unset` document.
//!
//! ```ignore
//! let mut set = VariableSet::from_manifest(DEFAULTS, Environ::process())?;
//! let matches = Command::new("launcher").args(envfig::cli::args(&set)).get_matches();
//! envfig::cli::apply_matches(&mut set, &matches)?;
//! set.override_with(false, false).validate()?;
//! set.write_export(&mut std::io::stdout(), &ExportOptions::default())?;
//! ```
//!
//! # Variables
//!
//! A [`Variable`] carries a long flag, an optional short flag, an optional
//! environment identifier, description lines and a [`ValueType`]:
//!
//! | Type | Decoded from | Rendered as |
//! |------|--------------|-------------|
//! | `bool` | `true` / `false` | bare |
//! | `int` | decimal, 64-bit | bare |
//! | `float` | decimal, 64-bit | bare, shortest form |
//! | `string` | text, verbatim | quoted |
//! | `json` | a JSON document | quoted, compact |
//! | `serial` | a [`TextCodec`] | quoted |
//!
//! Scalar variables hold one value. Aggregate variables
//! ([`Variable::aggregate`]) append one element per [`Variable::set`] and
//! render comma-joined.
//!
//! Every variable tracks two candidates side by side: the user-facing value
//! (seeded with the default, replaced from the command line) and the value
//! inherited from the [`Environ`] snapshot. Which one renders depends on
//! whether defaults were suppressed and whether the variable was given on
//! the command line.
//!
//! # Source precedence
//!
//! ```text
//! Compiled default      Variable::new(.., default)
//!        ↑ overridden by
//! Environment           ident=value, unless suppressed
//!        ↑ overridden by
//! Command line          --flag value, marks the variable user-defined
//! ```
//!
//! [`VariableSet::override_with`] applies the environment layer to every
//! variable not given on the command line. Passing `suppress_env` ignores the
//! environment entirely; passing `suppress_default` discards compiled
//! defaults so only explicit values survive. [`VariableSet::validate`] then
//! reports the first variable left empty.
//!
//! # Declaring variables
//!
//! Either in code with the [`Variable`] constructors, or in a TOML manifest
//! through [`VariableSet::from_manifest`]. The manifest is strict by
//! default: unknown keys fail loading with their line number.
//!
//! # Output
//!
//! - [`Variable::usage`] lays out one help block: flag syntax, a connector
//!   to the description column, wrapped description, and an
//!   `{env:IDENT="value"}` footer. [`Help`] assembles a whole usage screen.
//! - [`VariableSet::render`] produces the `export`/`unset` statements and
//!   [`VariableSet::write_export`] the full document with banner and footer.
//!
//! # Clap adapter
//!
//! The `cli` module (behind the `clap` feature, on by default) declares one
//! clap argument per variable and feeds parsed matches back into the set.
//! To use envfig with another parser:
//!
//! ```toml
//! envfig = { version = "...", default-features = false }
//! ```
//!
//! and call [`VariableSet::set`] plus
//! [`VariableSet::apply_to_matching_flags`] yourself.
//!
//! # Error handling
//!
//! All fallible operations return [`EnvfigError`]. With the `rich-errors`
//! feature the error type also implements `miette::Diagnostic`.

pub mod error;
pub mod types;
pub mod usage;

#[cfg(feature = "clap")]
pub mod cli;
mod env;
mod export;
mod manifest;
mod set;
mod slot;
mod value;
mod variable;

#[cfg(test)]
mod fixtures;

pub use env::Environ;
pub use error::{DecodeError, EnvfigError};
pub use export::{DEFAULT_QUOTE, ExportOptions};
pub use set::{VariableSet, by_flag};
pub use types::ValueType;
pub use usage::Help;
pub use value::{CodecError, TextCodec, Value};
pub use variable::Variable;
