//! Test driver for getopt integration tests.
//!
//! Small helpers for driving a full scan and capturing what it produced:
//! the sequence of results, the final scan index, and any diagnostic text.

use getopt::{OptionTable, ParsedOpt, Parser};

/// Build an owned argument vector from string literals.
pub fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Everything one full scan produced.
pub struct ScanOutcome {
    /// All results up to and excluding the first `End`.
    pub results: Vec<OwnedResult>,
    /// Scan index once `End` was observed.
    pub final_index: usize,
    /// Positional tail at that point.
    pub remaining: Vec<String>,
    /// Diagnostic text the scan wrote.
    pub diagnostics: String,
}

/// An owned copy of [`ParsedOpt`], detached from the argument vector's
/// lifetime so outcomes can be returned from helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedResult {
    Opt(i32, Option<String>),
    Unknown(getopt::ErrorOpt),
    MissingArg(getopt::ErrorOpt),
}

impl OwnedResult {
    pub fn opt(c: char, arg: Option<&str>) -> OwnedResult {
        OwnedResult::Opt(c as i32, arg.map(|s| s.to_string()))
    }
}

/// Run a scan to completion with diagnostics captured and error reporting
/// left at its default (enabled).
pub fn scan(args: &[String], table: &OptionTable) -> ScanOutcome {
    scan_with(args, table, true)
}

/// Run a scan to completion, optionally disabling error reporting first.
pub fn scan_with(args: &[String], table: &OptionTable, report: bool) -> ScanOutcome {
    let mut sink = Vec::new();
    let mut results = Vec::new();
    let final_index;
    let remaining;
    {
        let mut parser = Parser::new(args, table).diagnostics_to(&mut sink);
        parser.set_error_reporting(report);
        loop {
            match parser.next() {
                ParsedOpt::End => break,
                ParsedOpt::Opt(c, arg) => {
                    results.push(OwnedResult::Opt(c, arg.map(|s| s.to_string())))
                }
                ParsedOpt::Unknown(e) => results.push(OwnedResult::Unknown(e)),
                ParsedOpt::MissingArg(e) => results.push(OwnedResult::MissingArg(e)),
            }
        }
        final_index = parser.opt_index();
        remaining = parser.remaining().to_vec();
    }
    ScanOutcome {
        results,
        final_index,
        remaining,
        diagnostics: String::from_utf8(sink).unwrap_or_default(),
    }
}
