//! # envfig demo application
//!
//! A sample launcher that showcases how to wire [envfig](https://docs.rs/envfig)
//! into a real command-line tool. It does not launch anything: the resolved
//! configuration is printed as a shell script you could `source`.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example envfig_demo -- --help
//! cargo run --example envfig_demo -- --wda-port 8200 -x
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature                 | How to exercise it                                                  |
//! |-------------------------|---------------------------------------------------------------------|
//! | Manifest defaults       | `cargo run --example envfig_demo`                                   |
//! | Environment inheritance | `DRIVER_PORT=9100 cargo run --example envfig_demo`                  |
//! | Command line wins       | `DRIVER_PORT=9100 cargo run --example envfig_demo -- -t 9200`       |
//! | Ignore environment      | `DRIVER_PORT=9100 cargo run --example envfig_demo -- --orphan`      |
//! | Explicit values only    | `cargo run --example envfig_demo -- --zero --dryrun -t 8100`        |
//! | Debug shortcut          | `cargo run --example envfig_demo -- --debug-config`                 |
//! | Double quotes           | `cargo run --example envfig_demo -- --quote '"'`                    |
//! | JSON capabilities       | `cargo run --example envfig_demo -- -k '{"newCommandTimeout":5}'`   |
//! | Usage screen            | `cargo run --example envfig_demo -- --help`                         |
//!
//! Set `ENVFIG_LOG=debug` to see how each source was applied.

use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};
use tracing_subscriber::EnvFilter;

use envfig::{Environ, EnvfigError, ExportOptions, Help, VariableSet};

const DEFAULTS: &str = include_str!("defaults.toml");
const VERSION: &str = "0.3.1";

// ---------------------------------------------------------------------------
// CLI definitions
// ---------------------------------------------------------------------------

/// Flags that steer the launcher itself rather than the exported variables.
#[derive(Parser, Debug)]
#[command(name = "envfig-demo", disable_help_flag = true)]
struct Cli {
    /// Use the target debug configuration by default
    #[arg(short = 'g', long)]
    debug_config: bool,

    /// Print configuration without checking for missing values
    #[arg(short = 'y', long)]
    dryrun: bool,

    /// Do not inherit configuration parameters from current environment
    /// (combine with -z to use command-line flags only)
    #[arg(short = 'j', long)]
    orphan: bool,

    /// Do not initialize default configuration parameters
    /// (use command-line flags or environment variables only)
    #[arg(short = 'z', long)]
    zero: bool,

    /// Quote `char` wrapped around string values
    #[arg(long, default_value_t = envfig::DEFAULT_QUOTE)]
    quote: char,

    /// Show this help message
    #[arg(short = 'h', long, action = ArgAction::SetTrue)]
    help: bool,
}

// ---------------------------------------------------------------------------
// Shortcuts
// ---------------------------------------------------------------------------

/// Replace the last dot-separated segment, e.g. a bundle id suffix.
fn set_tail(value: &str, tail: &str) -> String {
    match value.rsplit_once('.') {
        Some((head, _)) => format!("{head}.{tail}"),
        None => tail.to_string(),
    }
}

fn debug_shortcut(set: &mut VariableSet) -> Result<(), EnvfigError> {
    set.force("target-app-config", "Debug")?;
    set.force_with("target-app-bundle", |bundle| set_tail(bundle, "Debug"))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn run() -> Result<(), EnvfigError> {
    let mut set = VariableSet::from_manifest(DEFAULTS, Environ::process())?;

    let cmd = Cli::command().args(envfig::cli::args(&set));
    let matches = cmd.clone().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if cli.help {
        let builtin = envfig::cli::builtin_variables(&cmd, &set);
        let help = Help {
            program: cmd.get_name(),
            version: VERSION,
            synopsis: "[flags]",
            builtin_prose: vec!["The following flags control the launcher itself.".into()],
            builtin: &builtin,
            config_prose: vec![
                "The following flags set configuration variables. Each defaults to the value \
                 shown in braces, which is overridden by the named environment variable, which \
                 is in turn overridden by the flag."
                    .into(),
            ],
            config: &set,
        };
        print!("{help}");
        return Ok(());
    }

    let modified = envfig::cli::apply_matches(&mut set, &matches)?;
    tracing::debug!(modified, "applied command line");

    if cli.debug_config {
        debug_shortcut(&mut set)?;
    }

    set.override_with(cli.orphan, cli.zero);

    if !cli.dryrun {
        set.validate()?;
    }

    let options = ExportOptions {
        quote: cli.quote,
        title: "Launcher Configuration -- DO NOT EDIT".into(),
        footer: vec![
            "# Source this file before starting the launcher:\n".into(),
            "#   . ./launcher.env\n".into(),
        ],
        ..ExportOptions::default()
    };
    set.write_export(&mut std::io::stdout().lock(), &options)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("ENVFIG_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    run().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_replaces_last_segment() {
        assert_eq!(
            set_tail("com.example.Calculator.Release", "Debug"),
            "com.example.Calculator.Debug"
        );
        assert_eq!(set_tail("Calculator", "Debug"), "Debug");
    }

    #[test]
    fn defaults_manifest_loads() {
        let set = VariableSet::from_manifest(DEFAULTS, Environ::empty()).unwrap();
        assert_eq!(set.get("wda-port").unwrap().value(), "8100");
        assert_eq!(set.get("target-app-source").unwrap().value(), "$(pwd)");
        set.validate().unwrap();
    }

    #[test]
    fn debug_shortcut_rewrites_defaults() {
        let mut set = VariableSet::from_manifest(DEFAULTS, Environ::empty()).unwrap();
        debug_shortcut(&mut set).unwrap();
        assert_eq!(set.get("target-app-config").unwrap().value(), "Debug");
        assert_eq!(
            set.get("target-app-bundle").unwrap().value(),
            "com.example.Calculator.Debug"
        );
    }

    #[test]
    fn cli_flags_do_not_collide() {
        let set = VariableSet::from_manifest(DEFAULTS, Environ::empty()).unwrap();
        Cli::command().args(envfig::cli::args(&set)).debug_assert();
    }
}
