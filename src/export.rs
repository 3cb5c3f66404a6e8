//! Shell export document rendering.
//!
//! Each variable becomes an `export IDENT=VALUE` statement preceded by its
//! description as `#` comments, or `unset -v IDENT` when it resolved empty
//! and was not given on the command line. Values are quoted with a
//! configurable quote character except when they are numbers, booleans or
//! a `$( ... )` command substitution.

use std::io::Write;

use chrono::{DateTime, Utc};

use crate::error::EnvfigError;
use crate::set::VariableSet;
use crate::variable::Variable;

pub const DEFAULT_QUOTE: char = '\'';

const RULE_HEAVY: &str =
    "# ==============================================================================";
const RULE_LIGHT: &str =
    "# ------------------------------------------------------------------------------";

/// Everything around the variable statements in an export document.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Quote character for string-like values.
    pub quote: char,
    /// Banner title, e.g. `"Launcher Configuration -- DO NOT EDIT"`.
    pub title: String,
    /// The invoking argument vector, recorded in the header.
    pub argv: Vec<String>,
    /// Generation time; `None` means now.
    pub generated_at: Option<DateTime<Utc>>,
    /// Lines written verbatim after the statements.
    pub footer: Vec<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            quote: DEFAULT_QUOTE,
            title: "Configuration -- DO NOT EDIT".into(),
            argv: std::env::args().collect(),
            generated_at: None,
            footer: Vec::new(),
        }
    }
}

impl ExportOptions {
    fn header(&self) -> String {
        let at = self.generated_at.unwrap_or_else(Utc::now);
        let argv = self
            .argv
            .iter()
            .map(|a| format!("{a:?}"))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "{RULE_HEAVY}\n#  {}\n{RULE_LIGHT}\n#  Generated on {} with:\n#    [{argv}]\n{RULE_HEAVY}\n",
            self.title,
            at.format("%a, %d %b %Y %H:%M:%S UTC"),
        )
    }
}

/// Render the value part of an `export` statement.
fn quoted(var: &Variable, quote: char) -> String {
    let full = var.value();
    let trimmed = full.trim();
    if var.value_type().is_bare() {
        return trimmed.to_string();
    }
    if trimmed.starts_with("$(") && trimmed.ends_with(')') {
        return trimmed.to_string();
    }
    format!("{quote}{full}{quote}")
}

fn statement(var: &Variable, quote: char) -> String {
    let mut out = String::new();
    for line in var.lines() {
        out.push_str("# ");
        out.push_str(line);
        out.push('\n');
    }
    if !var.is_user_defined() && var.value().is_empty() {
        out.push_str("unset -v ");
        out.push_str(var.ident());
    } else {
        out.push_str("export ");
        out.push_str(var.ident());
        out.push('=');
        out.push_str(&quoted(var, quote));
    }
    out.push('\n');
    out
}

impl VariableSet {
    /// The variable statements in current order, separated by blank lines.
    ///
    /// Variables without an environment identifier are command-line only and
    /// produce no statement.
    pub fn render(&self, quote: char) -> String {
        self.iter()
            .filter(|var| !var.ident().is_empty())
            .map(|var| statement(var, quote))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The full export document: banner header, statements, footer.
    pub fn export_document(&self, options: &ExportOptions) -> String {
        let mut doc = options.header();
        doc.push('\n');
        doc.push_str(&self.render(options.quote));
        doc.push('\n');
        for line in &options.footer {
            doc.push_str(line);
        }
        doc
    }

    /// Write [`export_document`](Self::export_document) to `out`.
    pub fn write_export<W: Write>(&self, out: &mut W, options: &ExportOptions) -> Result<(), EnvfigError> {
        out.write_all(self.export_document(options).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
