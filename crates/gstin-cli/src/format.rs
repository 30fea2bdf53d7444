/// Output writers: human-readable and JSON modes.
///
/// - **Human mode** (default): aligned `Label: value` lines, with nested
///   blocks indented by two spaces. Labels are colored unless `--no-color`
///   is set, the `NO_COLOR` environment variable is non-empty (per
///   <https://no-color.org>), or stdout is not a TTY.
/// - **JSON mode**: the normalized record as one pretty-printed object
///   (`lookup`, `render`), or one compact object per line (`validate`,
///   `session`).
///
/// Every writer takes a generic `Write` so tests can capture output in a
/// `Vec<u8>`.
use std::ffi::OsStr;
use std::io::{IsTerminal as _, Write};

use gstin_core::{
    DisplayNode, EMPTY_NOTICE, Gstin, Labeled, LookupResult, RequestState, ResultView,
    ValidationError, render_result,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if ANSI color codes should be emitted to stdout.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag || no_color_requested(std::env::var_os("NO_COLOR").as_deref()) {
        return false;
    }
    std::io::stdout().is_terminal()
}

/// Any non-empty `NO_COLOR` value disables color; an empty one is ignored.
fn no_color_requested(value: Option<&OsStr>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RED: &str = "\x1b[31m";
const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_RESET: &str = "\x1b[0m";

/// Configuration for the human-mode writers, derived from CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct FormatterConfig {
    /// Whether ANSI colors are enabled.
    pub colors: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the `--no-color` flag, the
    /// `NO_COLOR` env var and the stdout TTY state.
    pub fn from_flags(no_color_flag: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
        }
    }

    fn paint(self, text: &str, color: &str) -> String {
        if self.colors {
            format!("{color}{text}{ANSI_RESET}")
        } else {
            text.to_owned()
        }
    }
}

// ---------------------------------------------------------------------------
// Lookup results
// ---------------------------------------------------------------------------

/// Writes a lookup result in human-readable form.
///
/// The main table comes first, then a blank line and the detail blocks. An
/// empty record prints the empty-result notice instead.
///
/// # Errors
///
/// Returns an error only if writing to `w` fails.
pub fn write_result_human<W: Write>(
    w: &mut W,
    result: &LookupResult,
    config: FormatterConfig,
) -> std::io::Result<()> {
    match render_result(result) {
        ResultView::Empty => writeln!(w, "{EMPTY_NOTICE}"),
        ResultView::Table { rows, details } => {
            write_entries(w, &rows, 0, config)?;
            if !details.is_empty() {
                writeln!(w)?;
                write_entries(w, &details, 0, config)?;
            }
            Ok(())
        }
    }
}

/// Writes the normalized record as a pretty-printed JSON object.
///
/// # Errors
///
/// Returns an error only if writing to `w` fails.
pub fn write_result_json<W: Write>(w: &mut W, result: &LookupResult) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, result)?;
    writeln!(w)
}

/// Writes sibling entries with their inline values aligned.
fn write_entries<W: Write>(
    w: &mut W,
    entries: &[Labeled],
    indent: usize,
    config: FormatterConfig,
) -> std::io::Result<()> {
    let width = entries
        .iter()
        .filter(|e| matches!(e.node, DisplayNode::Text(_)))
        .map(|e| e.label.chars().count() + 1)
        .max()
        .unwrap_or(0);
    let pad = " ".repeat(indent);
    for entry in entries {
        let heading = format!("{}:", entry.label);
        match &entry.node {
            DisplayNode::Text(text) => {
                let label = config.paint(&format!("{heading:<width$}"), ANSI_BOLD);
                writeln!(w, "{pad}{label} {text}")?;
            }
            DisplayNode::Dump(dump) => {
                writeln!(w, "{pad}{}", config.paint(&heading, ANSI_BOLD))?;
                for line in dump.lines() {
                    writeln!(w, "{pad}  {line}")?;
                }
            }
            DisplayNode::Group(children) => {
                writeln!(w, "{pad}{}", config.paint(&heading, ANSI_BOLD))?;
                write_entries(w, children, indent + 2, config)?;
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Validation lines
// ---------------------------------------------------------------------------

/// Writes one `validate` outcome: `27ABCDE1234F1Z5  valid  state 27  PAN ABCDE1234F`.
///
/// # Errors
///
/// Returns an error only if writing to `w` fails.
pub fn write_validation_human<W: Write>(
    w: &mut W,
    input: &str,
    outcome: &Result<Gstin, ValidationError>,
    config: FormatterConfig,
) -> std::io::Result<()> {
    match outcome {
        Ok(gstin) => writeln!(
            w,
            "{gstin}  {}  state {}  PAN {}",
            config.paint("valid", ANSI_GREEN),
            gstin.state_code(),
            gstin.pan(),
        ),
        Err(e) => writeln!(w, "{input}  {}: {e}", config.paint("invalid", ANSI_RED)),
    }
}

/// Writes one `validate` outcome as a single NDJSON line.
///
/// # Errors
///
/// Returns an error only if writing to `w` fails.
pub fn write_validation_json<W: Write>(
    w: &mut W,
    input: &str,
    outcome: &Result<Gstin, ValidationError>,
) -> std::io::Result<()> {
    let line = match outcome {
        Ok(gstin) => json!({
            "input": input,
            "valid": true,
            "gstin": gstin,
            "state_code": gstin.state_code(),
            "pan": gstin.pan(),
        }),
        Err(e) => json!({
            "input": input,
            "valid": false,
            "error": e.to_string(),
        }),
    };
    serde_json::to_writer(&mut *w, &line)?;
    writeln!(w)
}

// ---------------------------------------------------------------------------
// Session states
// ---------------------------------------------------------------------------

fn state_name(state: &RequestState) -> &'static str {
    match state {
        RequestState::Idle => "idle",
        RequestState::Loading => "loading",
        RequestState::Success(_) => "success",
        RequestState::Error(_) => "error",
    }
}

/// Writes the form state reached for one session input.
///
/// # Errors
///
/// Returns an error only if writing to `w` fails.
pub fn write_state_human<W: Write>(
    w: &mut W,
    input: &str,
    state: &RequestState,
    config: FormatterConfig,
) -> std::io::Result<()> {
    writeln!(w, "> {input}")?;
    match state {
        RequestState::Success(result) => write_result_human(w, result, config),
        RequestState::Error(message) => {
            writeln!(w, "{} {message}", config.paint("error:", ANSI_RED))
        }
        RequestState::Idle | RequestState::Loading => writeln!(w, "{}", state_name(state)),
    }
}

/// Writes the form state reached for one session input as an NDJSON line.
///
/// # Errors
///
/// Returns an error only if writing to `w` fails.
pub fn write_state_json<W: Write>(
    w: &mut W,
    input: &str,
    state: &RequestState,
) -> std::io::Result<()> {
    let mut line = json!({ "input": input, "state": state_name(state) });
    match state {
        RequestState::Success(result) => line["result"] = json!(result),
        RequestState::Error(message) => line["message"] = json!(message),
        RequestState::Idle | RequestState::Loading => {}
    }
    serde_json::to_writer(&mut *w, &line)?;
    writeln!(w)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use gstin_core::{PLACEHOLDER, normalize, validate};
    use serde_json::{Map, Value};

    use super::*;

    const PLAIN: FormatterConfig = FormatterConfig { colors: false };

    fn record(value: Value) -> LookupResult {
        let Value::Object(map) = value else {
            unreachable!("test records are objects");
        };
        normalize(map)
    }

    fn human(result: &LookupResult) -> String {
        let mut out = Vec::new();
        write_result_human(&mut out, result, PLAIN).expect("write");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn empty_record_prints_notice() {
        let text = human(&normalize(Map::new()));
        assert_eq!(text, format!("{EMPTY_NOTICE}\n"));
    }

    #[test]
    fn table_rows_are_aligned() {
        let text = human(&record(json!({
            "gstin": "27ABCDE1234F1Z5",
            "legal_name": "Acme Traders",
        })));
        let first = text.lines().next().expect("first row");
        assert!(first.starts_with("GSTIN:"), "{text}");
        assert!(first.ends_with(" 27ABCDE1234F1Z5"), "{text}");
        let name_row = text
            .lines()
            .find(|l| l.starts_with("Legal Name:"))
            .expect("legal name row");
        assert_eq!(
            first.len() - "27ABCDE1234F1Z5".len(),
            name_row.len() - "Acme Traders".len(),
            "values start in the same column:\n{text}"
        );
        assert!(text.contains("PAN Number:"), "{text}");
        assert!(text.contains("ABCDE1234F"), "{text}");
        assert!(text.contains(PLACEHOLDER), "missing fields show N/A: {text}");
    }

    #[test]
    fn principal_place_is_an_indented_block() {
        let text = human(&record(json!({
            "gstin": "27ABCDE1234F1Z5",
            "place_of_business_principal": {
                "address": { "city": "Pune", "district": "Pune", "state": "MH", "pin_code": "411001" },
                "nature": ["Retail Business"],
            },
        })));
        assert!(text.contains("\nPlace Of Business Principal:\n"), "{text}");
        assert!(text.contains("  Address: Pune, MH, 411001\n"), "{text}");
        assert!(text.contains("  Nature:  Retail Business\n"), "{text}");
    }

    #[test]
    fn colors_wrap_labels_only_when_enabled() {
        let result = record(json!({ "gstin": "27ABCDE1234F1Z5" }));
        let mut out = Vec::new();
        write_result_human(&mut out, &result, FormatterConfig { colors: true }).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains(ANSI_BOLD), "{text:?}");
        assert!(!human(&result).contains('\x1b'));
    }

    #[test]
    fn no_color_env_value_must_be_non_empty() {
        assert!(!no_color_requested(None));
        assert!(!no_color_requested(Some(OsStr::new(""))));
        for value in ["1", "true", "0", "false", "yes"] {
            assert!(no_color_requested(Some(OsStr::new(value))), "NO_COLOR={value}");
        }
    }

    #[test]
    fn json_result_includes_pan() {
        let mut out = Vec::new();
        write_result_json(&mut out, &record(json!({ "gstin": "27ABCDE1234F1Z5" })))
            .expect("write");
        let parsed: Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(parsed["panNum"], "ABCDE1234F");
    }

    #[test]
    fn validation_lines() {
        let ok = validate("27abcde1234f1z5");
        let bad = validate("nope");

        let mut out = Vec::new();
        write_validation_human(&mut out, "27abcde1234f1z5", &ok, PLAIN).expect("write");
        write_validation_human(&mut out, "nope", &bad, PLAIN).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(
            text,
            "27ABCDE1234F1Z5  valid  state 27  PAN ABCDE1234F\n\
             nope  invalid: enter a valid 15-character GSTIN\n"
        );

        let mut out = Vec::new();
        write_validation_json(&mut out, "nope", &bad).expect("write");
        let parsed: Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(parsed["valid"], false);
        assert_eq!(parsed["error"], "enter a valid 15-character GSTIN");
    }

    #[test]
    fn session_state_lines() {
        let mut out = Vec::new();
        write_state_json(&mut out, "x", &RequestState::Error("not found".to_owned()))
            .expect("write");
        let parsed: Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(parsed, json!({ "input": "x", "state": "error", "message": "not found" }));

        let mut out = Vec::new();
        write_state_human(&mut out, "x", &RequestState::Error("not found".to_owned()), PLAIN)
            .expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), "> x\nerror: not found\n");
    }
}
