//! Text and JSON rendering of reports and token streams.

use colored::*;
use eyre::Result;
use serde::Serialize;

use crate::pddl::{scanner::Token, Issue, Severity};
use crate::report::{FullReport, Report};

/// `FileReport` is a `Report` labelled with the file it came from.
#[derive(Debug, Serialize)]
pub struct FileReport<'a> {
    pub file: &'a str,
    #[serde(flatten)]
    pub report: &'a Report,
}

/// `TokenRow` is a scanned token as it is printed.
#[derive(Debug, Serialize)]
pub struct TokenRow<'a> {
    pub line: usize,
    pub col: usize,
    pub kind: &'static str,
    pub text: &'a str,
}

impl<'a> TokenRow<'a> {
    pub fn new(t: Token, src: &'a str) -> Self {
        TokenRow {
            line: t.line,
            col: t.col,
            kind: t.what.kind(),
            text: t.to_str(src),
        }
    }
}

pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn severity_tag(s: Severity) -> ColoredString {
    match s {
        Severity::Error => s.as_str().red().bold(),
        Severity::Warning => s.as_str().yellow().bold(),
        Severity::Info => s.as_str().cyan(),
    }
}

fn issue_lines(out: &mut String, issues: &[Issue], show_info: bool) {
    for i in issues.iter().filter(|i| show_info || i.severity != Severity::Info) {
        match &i.location {
            Some(loc) => out.push_str(&format!("  {}: {} [{}]\n", severity_tag(i.severity), i.message, loc.dimmed())),
            None => out.push_str(&format!("  {}: {}\n", severity_tag(i.severity), i.message)),
        }
    }
}

fn status(valid: bool) -> ColoredString {
    if valid {
        "valid".green().bold()
    } else {
        "invalid".red().bold()
    }
}

/// `text_report` renders `r` for a terminal, headed by `label`.
pub fn text_report(label: &str, r: &Report, show_info: bool) -> String {
    let mut out = format!(
        "{}: {} ({} errors, {} warnings)\n",
        label,
        status(r.valid),
        r.error_count,
        r.warning_count
    );
    issue_lines(&mut out, &r.issues, show_info);
    out
}

pub fn text_full(domain: &str, problem: &str, r: &FullReport, show_info: bool) -> String {
    let mut out = format!("{}: {}\n", domain, status(r.domain_valid));
    issue_lines(&mut out, &r.domain_issues, show_info);
    out.push_str(&format!("{}: {}\n", problem, status(r.problem_valid)));
    issue_lines(&mut out, &r.problem_issues, show_info);
    out.push_str(&format!(
        "overall: {} ({} errors, {} warnings)\n",
        status(r.overall_valid),
        r.total_errors,
        r.total_warnings
    ));
    out
}

pub fn text_tokens(rows: &[TokenRow]) -> String {
    rows.iter()
        .map(|r| format!("{:>4}:{:<4} {:<9} {}\n", r.line, r.col, r.kind, r.text))
        .collect()
}
