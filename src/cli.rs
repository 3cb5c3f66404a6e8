//! Clap adapter for envfig.
//!
//! This module is the optional bridge between a [`VariableSet`] and the
//! [clap](https://docs.rs/clap) parser. It is compiled only when the `clap`
//! Cargo feature is enabled (on by default).
//!
//! [`args`] declares one clap argument per variable, [`apply_matches`] feeds
//! the values given on the command line back into the set, and
//! [`builtin_variables`] turns the application's other flags into variables
//! so the [`Help`](crate::Help) screen can lay them out the same way.
//!
//! ```ignore
//! let mut set = VariableSet::from_manifest(DEFAULTS, Environ::process())?;
//! let cmd = Command::new("launcher").args(envfig::cli::args(&set));
//! let matches = cmd.get_matches();
//! envfig::cli::apply_matches(&mut set, &matches)?;
//! ```

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::error::EnvfigError;
use crate::set::VariableSet;
use crate::types::ValueType;
use crate::variable::Variable;

/// One clap argument per variable, keyed by its long flag.
///
/// Boolean variables may be given bare (`--trace`, meaning `true`) or with
/// an attached value (`--trace=false`). Aggregates accept repeated flags.
pub fn args(set: &VariableSet) -> Vec<Arg> {
    set.iter().map(arg).collect()
}

fn arg(var: &Variable) -> Arg {
    let mut arg = Arg::new(var.long().to_string())
        .long(var.long().to_string())
        .help(var.lines().join(" "))
        .value_name(var.placeholder());
    if let Some(short) = var.short().chars().next() {
        arg = arg.short(short);
    }
    if var.is_flag_without_argument() {
        arg = arg
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true");
    }
    if var.is_aggregate() {
        arg.action(ArgAction::Append)
    } else {
        arg.action(ArgAction::Set)
    }
}

/// Decode every value given on the command line into `set` and mark those
/// variables user-defined.
///
/// Returns whether any variable was given on the command line. The first
/// value that fails to decode is returned as an error.
pub fn apply_matches(set: &mut VariableSet, matches: &ArgMatches) -> Result<bool, EnvfigError> {
    let supplied: Vec<(String, Vec<String>)> = set
        .iter()
        .filter(|var| matches.value_source(var.long()) == Some(ValueSource::CommandLine))
        .filter_map(|var| {
            let values = matches.get_many::<String>(var.long())?;
            Some((var.long().to_string(), values.cloned().collect()))
        })
        .collect();

    for (long, values) in &supplied {
        for raw in values {
            set.set(long, raw)?;
        }
    }

    Ok(set.apply_to_matching_flags(supplied.iter().map(|(long, _)| long), |var| {
        var.set_user_defined(true);
        true
    }))
}

/// The command's arguments that are not variables in `set`, as variables
/// with no environment identifier.
///
/// Flags that take no value become `bool` variables, everything else
/// `string`. Positional arguments are skipped.
pub fn builtin_variables(cmd: &Command, set: &VariableSet) -> Vec<Variable> {
    cmd.get_arguments()
        .filter(|arg| !arg.is_positional())
        .filter(|arg| set.get(arg.get_id().as_str()).is_none())
        .map(|arg| {
            let long = arg.get_long().unwrap_or(arg.get_id().as_str());
            let short = arg.get_short().map(String::from).unwrap_or_default();
            let ty = if arg.get_action().takes_values() {
                ValueType::String
            } else {
                ValueType::Bool
            };
            let help = arg.get_help().map(ToString::to_string);
            Variable::empty(long, &short, "", ty).description(help)
        })
        .collect()
}
