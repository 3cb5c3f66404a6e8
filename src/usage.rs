//! Help text layout.
//!
//! Each variable renders as a fixed-width block split into two regions: the
//! flag syntax on the left and the wrapped description on the right, joined
//! by a box-drawing connector. Variables with an environment identifier get
//! a footer showing the identifier and its resolved value.
//!
//! ```text
//!     -x, --example ARG ─────────────╥ The description of the flag may span
//!                                    ║ multiple lines
//!                                    ╙── {env:example_var="inherited value"}
//! ```
//!
//! Flag names are unbounded, so the syntax region degrades instead of
//! overflowing: the short alternative is dropped first, then the long one,
//! and the connector shrinks to a single space when there is no room left.

use std::fmt;

use textwrap::{Options, WordSplitter};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::set::VariableSet;
use crate::types::ValueType;
use crate::variable::Variable;

/// Width of one indentation level.
pub const TAB: usize = 8;
/// Maximum width of a rendered line.
pub const MAX_WIDTH: usize = 12 * TAB;
/// Number of aligned regions per line.
pub const COLUMNS: usize = 2;
/// Width of the left (syntax + connector) region.
pub const COLUMN: usize = MAX_WIDTH / COLUMNS - 8;
/// Left padding before the flag syntax.
pub const PAD: usize = TAB / 2;
/// Width available to the flag syntax itself.
pub const SYNTAX: usize = COLUMN - PAD;
/// Indentation of section prose in the help document.
pub const MARGIN: usize = PAD / 2;

const PIPE: &str = "║ ";
const TAIL: &str = "╙── ";
const RULE: char = '─';
const JOINT: char = '╥';

/// Render the help block for one variable.
pub fn render(var: &Variable) -> String {
    let (name, text) = placeholder(var);

    let mut top = " ".repeat(PAD);
    top.push_str(&syntax(var, &name, SYNTAX - 1));
    let remaining = COLUMN.saturating_sub(top.width());
    top.push_str(&connector(remaining));

    let indent = " ".repeat(COLUMN - 2);
    let mut lines = Vec::new();

    let body = wrap(&text, MAX_WIDTH - COLUMN);
    let mut body = body.into_iter();
    if let Some(first) = body.next() {
        top.push_str(&first);
    }
    lines.push(top);
    lines.extend(body.map(|line| format!("{indent}{PIPE}{line}")));

    if let Some(inherit) = inherit(var) {
        let mut footer = wrap(&inherit, MAX_WIDTH - COLUMN - 2).into_iter();
        if let Some(first) = footer.next() {
            lines.push(format!("{indent}{TAIL}{first}"));
        }
        let hang = " ".repeat(COLUMN + 2);
        lines.extend(footer.map(|line| format!("{hang}{line}")));
    }

    lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolve the argument placeholder and the description text.
///
/// The first pair of back quotes in the joined description names the
/// argument. The quotes are stripped and the word is shown uppercased in
/// place. An empty pair is removed from the text and the type name is used,
/// as it is when no pair exists.
pub(crate) fn placeholder(var: &Variable) -> (String, String) {
    let text = var.lines().join("\n");
    let fallback = var.value_type().name().to_uppercase();
    if let Some(open) = text.find('`')
        && let Some(len) = text[open + 1..].find('`')
    {
        let close = open + 1 + len;
        let name = text[open + 1..close].to_uppercase();
        let shown = format!("{}{}{}", &text[..open], name, &text[close + 1..]);
        if name.is_empty() {
            return (fallback, shown);
        }
        return (name, shown);
    }
    (fallback, text)
}

/// Build the flag syntax, dropping alternatives until it fits in `max`.
///
/// `-s, --long ARG` → `--long ARG` → `-s ARG`. If even the shortest form
/// does not fit, the long form is cut short with an ellipsis.
fn syntax(var: &Variable, name: &str, max: usize) -> String {
    let arg = if var.value_type() == ValueType::Bool {
        String::new()
    } else {
        format!(" {name}")
    };

    let mut alts: Vec<String> = [("-", var.short()), ("--", var.long())]
        .into_iter()
        .filter(|(_, flag)| !flag.trim().is_empty())
        .map(|(dash, flag)| format!("{dash}{flag}"))
        .collect();
    let Some(fallback) = alts.last().map(|last| format!("{last}{arg}")) else {
        return String::new();
    };

    while !alts.is_empty() {
        for i in 0..alts.len() {
            let candidate = format!("{}{arg}", alts[i..].join(", "));
            if candidate.width() <= max {
                return candidate;
            }
        }
        alts.pop();
    }
    truncate(&fallback, max)
}

fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// The gap between the syntax and the description, exactly `width` wide
/// when `width > 1`, otherwise a single space.
fn connector(width: usize) -> String {
    let mut out = String::from(" ");
    if width > 1 {
        if width > 2 {
            out.extend(std::iter::repeat_n(RULE, width - 3));
            out.push(JOINT);
        }
        out.push(' ');
    }
    out
}

fn inherit(var: &Variable) -> Option<String> {
    if var.ident().is_empty() {
        return None;
    }
    let value = var.value();
    if value.is_empty() {
        Some(format!("{{env:{}}}", var.ident()))
    } else {
        Some(format!("{{env:{}={:?}}}", var.ident(), value))
    }
}

/// Word-wrap `text` to `width` columns, keeping its explicit line breaks.
/// Blank text yields no lines.
fn wrap(text: &str, width: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let options = Options::new(width.max(1)).word_splitter(WordSplitter::NoHyphenation);
    textwrap::wrap(text, options)
        .into_iter()
        .map(|cow| cow.into_owned())
        .collect()
}

/// Paragraphs separated by blank lines, wrapped and indented by [`MARGIN`].
pub fn prose<S: AsRef<str>>(paragraphs: &[S]) -> String {
    let text = paragraphs
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<&str>>()
        .join("\n\n");
    let margin = " ".repeat(MARGIN);
    let options = Options::new(MAX_WIDTH - MARGIN).word_splitter(WordSplitter::NoHyphenation);
    textwrap::wrap(&text, options)
        .iter()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{margin}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The complete help screen.
///
/// ```text
/// <program> version <version>
///
/// USAGE
///
///   <program> <synopsis>
///
/// FLAGS
///
///   <builtin prose>
///
/// <one block per built-in flag>
///
///   <config prose>
///
/// <one block per configuration variable>
/// ```
#[derive(Debug)]
pub struct Help<'a> {
    pub program: &'a str,
    pub version: &'a str,
    pub synopsis: &'a str,
    pub builtin_prose: Vec<String>,
    pub builtin: &'a [Variable],
    pub config_prose: Vec<String>,
    pub config: &'a VariableSet,
}

impl fmt::Display for Help<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let margin = " ".repeat(MARGIN);
        writeln!(f, "{} version {}", self.program, self.version)?;
        writeln!(f)?;
        writeln!(f, "USAGE")?;
        writeln!(f)?;
        writeln!(f, "{margin}{} {}", self.program, self.synopsis)?;
        writeln!(f)?;
        writeln!(f, "FLAGS")?;
        writeln!(f)?;
        writeln!(f, "{}", prose(&self.builtin_prose))?;
        writeln!(f)?;
        for (i, var) in self.builtin.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", var.usage())?;
        }
        writeln!(f)?;
        writeln!(f, "{}", prose(&self.config_prose))?;
        writeln!(f)?;
        for (i, var) in self.config.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", var.usage())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Environ;
    use crate::fixtures::test::launcher_set;

    fn gap(n: usize) -> String {
        " ".repeat(n)
    }

    #[test]
    fn layout_constants() {
        assert_eq!(MAX_WIDTH, 96);
        assert_eq!(COLUMN, 40);
        assert_eq!(PAD, 4);
        assert_eq!(SYNTAX, 36);
        assert_eq!(MARGIN, 2);
    }

    #[test]
    fn single_line_with_footer() {
        let v = Variable::new("wda-port", "t", "driver_port", 8100i64)
            .description(["Connect to WebDriverAgent listening on TCP `port`"]);
        let expected = format!(
            "    -t, --wda-port PORT {}╥ Connect to WebDriverAgent listening on TCP PORT\n{}╙── {{env:driver_port=\"8100\"}}",
            "─".repeat(14),
            gap(38)
        );
        assert_eq!(v.usage(), expected);
    }

    #[test]
    fn description_starts_at_column_boundary() {
        let set = launcher_set(Environ::empty());
        for var in &set {
            let usage = var.usage();
            let first = usage.lines().next().unwrap();
            let joint = first.chars().position(|c| c == JOINT).unwrap();
            assert_eq!(joint, COLUMN - 2, "{first}");
        }
    }

    #[test]
    fn wrapped_lines_hang_under_joint() {
        let v = Variable::new("trace", "g", "trace_agent", false).description([
            "Print each command in the init script before it is executed",
            "(useful for debugging)",
        ]);
        let usage = v.usage();
        let lines: Vec<&str> = usage.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("    -g, --trace ─"));
        assert!(lines[0].ends_with("╥ Print each command in the init script before it is"));
        assert_eq!(lines[1], format!("{}║ executed", gap(38)));
        assert_eq!(lines[2], format!("{}║ (useful for debugging)", gap(38)));
        assert_eq!(lines[3], format!("{}╙── {{env:trace_agent=\"false\"}}", gap(38)));
    }

    #[test]
    fn bool_has_no_placeholder() {
        let v = Variable::new("trace", "g", "", false);
        assert_eq!(v.usage(), format!("    -g, --trace {}╥", "─".repeat(22)));
    }

    #[test]
    fn backquoted_word_is_uppercased_in_place() {
        let v = Variable::new("target-app-bundle", "a", "", "x").description(["Bundle `id` of the app"]);
        let (name, text) = placeholder(&v);
        assert_eq!(name, "ID");
        assert_eq!(text, "Bundle ID of the app");
    }

    #[test]
    fn unmatched_backquote_uses_type_name() {
        let v = Variable::new("port", "", "", 1i64).description(["TCP `port of the server"]);
        let (name, text) = placeholder(&v);
        assert_eq!(name, "INT");
        assert_eq!(text, "TCP `port of the server");
    }

    #[test]
    fn empty_backquotes_use_type_name() {
        let v = Variable::new("rate", "", "", 1.5f64).description(["Sample ``rate``"]);
        let (name, text) = placeholder(&v);
        assert_eq!(name, "FLOAT");
        assert_eq!(text, "Sample rate``");
    }

    #[test]
    fn short_flag_dropped_when_too_wide() {
        let v = Variable::new("extremely-long-flag-name-x", "s", "", "v").description(["Value `arg`"]);
        let usage = v.usage();
        let first = usage.lines().next().unwrap();
        assert!(first.starts_with("    --extremely-long-flag-name-x ARG "), "{first}");
        assert!(!first.contains("-s,"));
        assert!(first[..].width() <= MAX_WIDTH);
    }

    #[test]
    fn short_flag_kept_when_it_fits() {
        let v = Variable::new("long-flag-name-x", "s", "", "v").description(["Value `arg`"]);
        assert!(v.usage().starts_with("    -s, --long-flag-name-x ARG ─"));
    }

    #[test]
    fn missing_short_flag_is_omitted() {
        let v = Variable::new("output", "", "", "v").description(["Write to `file`"]);
        assert!(v.usage().starts_with("    --output FILE ─"));
    }

    #[test]
    fn long_form_too_wide_falls_back_to_short() {
        let v = Variable::new("a-configuration-flag-that-never-fits", "n", "", "v")
            .description(["`x`"]);
        assert!(v.usage().starts_with("    -n X "));
    }

    #[test]
    fn unfit_syntax_is_truncated() {
        let v = Variable::new("a-configuration-flag-that-never-ever-fits-anywhere", "", "", true);
        let usage = v.usage();
        let first = usage.lines().next().unwrap();
        assert!(first.contains('…'));
        let syntax_part = first.trim_start().split(' ').next().unwrap();
        assert!(syntax_part.width() <= SYNTAX - 1);
    }

    #[test]
    fn connector_degrades() {
        assert_eq!(connector(0), " ");
        assert_eq!(connector(1), " ");
        assert_eq!(connector(2), "  ");
        assert_eq!(connector(3), " ╥ ");
        assert_eq!(connector(5), " ──╥ ");
    }

    #[test]
    fn lines_never_exceed_max_width() {
        let v = Variable::new("very-long-flag-for-testing-widths", "w", "a_rather_long_identifier_name", "x")
            .description([
                "An unusually long description that keeps going well past the right margin so it must wrap several times before it ends",
                "Another line with a https://example.com/an/unreasonably/long/path/that/cannot/be/split/at/spaces/anywhere",
            ]);
        for line in v.usage().lines() {
            assert!(line.width() <= MAX_WIDTH, "{line}");
        }
    }

    #[test]
    fn footer_without_value() {
        let v = Variable::new("target-app-source", "p", "proj_source", "")
            .description(["Directory `path` of the target app source code"]);
        let usage = v.usage();
        assert_eq!(
            usage.lines().last().unwrap(),
            format!("{}╙── {{env:proj_source}}", gap(38))
        );
    }

    #[test]
    fn footer_escapes_quotes() {
        let v = Variable::new("greeting", "", "greeting", "say \"hi\"");
        assert!(v.usage().ends_with(r#"{env:greeting="say \"hi\""}"#));
    }

    #[test]
    fn no_ident_no_footer() {
        let v = Variable::new("verbose", "v", "", false).description(["Increase output verbosity"]);
        assert_eq!(v.usage().lines().count(), 1);
    }

    #[test]
    fn prose_wraps_and_indents() {
        let text = prose(&["The following flags control how demo itself operates.", "Second."]);
        assert_eq!(
            text,
            "  The following flags control how demo itself operates.\n\n  Second."
        );
    }

    #[test]
    fn help_document_sections() {
        let set = launcher_set(Environ::empty());
        let builtin = vec![
            Variable::new("dryrun", "y", "", false).description(["Print configuration"]),
            Variable::new("verbose", "v", "", false).description(["Increase output verbosity"]),
        ];
        let help = Help {
            program: "demo",
            version: "0.3.1",
            synopsis: "[flags]",
            builtin_prose: vec!["The following flags control how demo itself operates.".into()],
            builtin: &builtin,
            config_prose: vec!["The following flags affect the service.".into()],
            config: &set,
        };
        let text = help.to_string();
        assert!(text.starts_with("demo version 0.3.1\n\nUSAGE\n\n  demo [flags]\n\nFLAGS\n\n"));
        assert!(text.contains("\n\n  The following flags affect the service.\n\n"));
        let dryrun = text.find("--dryrun").unwrap();
        let verbose = text.find("--verbose").unwrap();
        let service = text.find("affect the service").unwrap();
        let build = text.find("--build-config").unwrap();
        assert!(dryrun < verbose && verbose < service && service < build);
        assert!(text.contains("Print configuration\n\n    -v, --verbose"));
        assert!(text.ends_with("\n"));
    }
}
