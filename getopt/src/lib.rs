//! Native Rust implementation of the POSIX `getopt()` / GNU `getopt_long()`
//! option-scanning API.
//!
//! The caller declares recognized options once (an optstring such as
//! `"vn:o:"` for short options, plus an optional table of long-option
//! descriptors) and then pulls recognized options out of an argument
//! vector one call at a time, exactly the way a C `while ((c = getopt(...))
//! != -1)` loop does:
//!
//! ```
//! use getopt::{OptionTable, ParsedOpt, Parser};
//!
//! let args: Vec<String> = vec!["-v".into(), "-n".into(), "42".into(), "file.txt".into()];
//! let table = OptionTable::build("vn:", Vec::new()).unwrap();
//! let mut parser = Parser::new(&args, &table);
//!
//! let mut verbose = false;
//! let mut number = 0;
//! loop {
//!     match parser.next() {
//!         ParsedOpt::Opt(c, _) if c == 'v' as i32 => verbose = true,
//!         ParsedOpt::Opt(c, Some(v)) if c == 'n' as i32 => number = v.parse().unwrap(),
//!         ParsedOpt::End => break,
//!         other => panic!("unexpected result: {:?}", other),
//!     }
//! }
//! assert!(verbose);
//! assert_eq!(number, 42);
//! assert_eq!(parser.remaining().to_vec(), vec!["file.txt".to_string()]);
//! ```
//!
//! Scanning stops at the first non-option token (no argv permutation), or
//! at an explicit `--` terminator; `Parser::remaining` then yields the
//! positional tail. Error-reporting semantics follow the C convention: an
//! unknown option or a missing required argument is returned as a value
//! (`?`-style `ParsedOpt::Unknown`, or `:`-style `ParsedOpt::MissingArg`
//! when the optstring begins with `:`), never as an abort, and the
//! accompanying stderr diagnostic can be suppressed or redirected.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::{self, Write};

// ============================================================================
// Construction-time errors
// ============================================================================

/// A malformed option declaration. Raised by [`OptionTable::build`] before
/// any parsing happens; parse-time conditions are returned as [`ParsedOpt`]
/// values instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("empty optstring and no long options")]
    EmptySpec,

    #[error("':' in optstring is not attached to an option character")]
    DanglingColon,

    #[error("long option with an empty name")]
    EmptyLongName,

    #[error("duplicate long option name '{0}'")]
    DuplicateLongName(String),
}

// ============================================================================
// Option declarations
// ============================================================================

/// Whether an option consumes an argument.
///
/// Short options can only be [`None`](ArgRequirement::None) or
/// [`Required`](ArgRequirement::Required); [`Optional`](ArgRequirement::Optional)
/// exists for long options, where `--name=value` makes the attached form
/// unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgRequirement {
    None,
    Required,
    Optional,
}

/// Declaration of one long option.
#[derive(Debug, Clone)]
pub struct LongOpt {
    name: String,
    requirement: ArgRequirement,
    val: i32,
}

impl LongOpt {
    /// Declare a long option taking no argument. `val` is the code that
    /// [`Parser::next`] returns when the option is matched; conventionally
    /// the code point of the equivalent short option.
    pub fn new(name: &str, val: i32) -> Self {
        LongOpt {
            name: name.to_string(),
            requirement: ArgRequirement::None,
            val,
        }
    }

    /// The option requires an argument (`--name=value` or `--name value`).
    pub fn required_arg(mut self) -> Self {
        self.requirement = ArgRequirement::Required;
        self
    }

    /// The option takes an argument only in the attached `--name=value`
    /// form; the next token is never consumed.
    pub fn optional_arg(mut self) -> Self {
        self.requirement = ArgRequirement::Optional;
        self
    }
}

// ============================================================================
// OptionTable
// ============================================================================

/// The validated form of an optstring and long-option table. Built once,
/// consulted read-only by any number of parse sessions.
#[derive(Debug)]
pub struct OptionTable {
    shorts: HashMap<char, ArgRequirement>,
    silent_missing_arg: bool,
    longs: Vec<LongOpt>,
}

impl OptionTable {
    /// Validate an optstring and a (possibly empty) long-option table.
    ///
    /// The optstring is scanned left to right: a character followed by `:`
    /// requires an argument, any other character takes none. A leading `:`
    /// is not an option: it selects silent missing-argument handling,
    /// where [`Parser::next`] returns [`ParsedOpt::MissingArg`] instead of
    /// [`ParsedOpt::Unknown`] and prints nothing.
    pub fn build(short_spec: &str, longs: Vec<LongOpt>) -> Result<OptionTable, ConfigError> {
        let (silent_missing_arg, body) = match short_spec.strip_prefix(':') {
            Some(rest) => (true, rest),
            None => (false, short_spec),
        };

        if body.is_empty() && longs.is_empty() {
            return Err(ConfigError::EmptySpec);
        }

        let mut shorts = HashMap::new();
        let mut pending: Option<char> = None;
        for c in body.chars() {
            if c == ':' {
                // A colon binds to the option character just before it.
                match pending.take() {
                    Some(opt) => {
                        shorts.insert(opt, ArgRequirement::Required);
                    }
                    None => return Err(ConfigError::DanglingColon),
                }
            } else {
                if let Some(opt) = pending {
                    shorts.insert(opt, ArgRequirement::None);
                }
                pending = Some(c);
            }
        }
        if let Some(opt) = pending {
            shorts.insert(opt, ArgRequirement::None);
        }

        let mut names = HashSet::new();
        for long in &longs {
            if long.name.is_empty() {
                return Err(ConfigError::EmptyLongName);
            }
            if !names.insert(long.name.as_str()) {
                return Err(ConfigError::DuplicateLongName(long.name.clone()));
            }
        }

        Ok(OptionTable {
            shorts,
            silent_missing_arg,
            longs,
        })
    }

    fn find_long(&self, name: &str) -> Option<usize> {
        // Exact-name matching only; prefix abbreviation is not supported.
        self.longs.iter().position(|l| l.name == name)
    }
}

// ============================================================================
// Per-call results
// ============================================================================

/// The option that triggered an error result: a short-option character, or
/// a long-option name (which has no single-character representation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorOpt {
    Short(char),
    Long(String),
}

impl fmt::Display for ErrorOpt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorOpt::Short(c) => write!(f, "-{}", c),
            ErrorOpt::Long(name) => write!(f, "--{}", name),
        }
    }
}

/// One step of the scan, as returned by [`Parser::next`].
///
/// `Opt` carries the matched option's code (the character's code point
/// for a short option, the descriptor's `val` for a long one) and the
/// bound argument, if any. `Unknown` corresponds to C getopt's `'?'`
/// return, `MissingArg` to the `':'` return of silent mode, and `End` to
/// `-1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedOpt<'a> {
    Opt(i32, Option<&'a str>),
    End,
    Unknown(ErrorOpt),
    MissingArg(ErrorOpt),
}

// ============================================================================
// Parser
// ============================================================================

enum Diag<'a> {
    Stderr,
    Sink(&'a mut dyn Write),
}

/// One scan over one argument vector.
///
/// The vector is borrowed, never copied: bound arguments and the
/// [`remaining`](Parser::remaining) tail are slices into the caller's
/// storage. A `Parser` is single-threaded state; independent parses use
/// independent `Parser` values and never interfere.
pub struct Parser<'a> {
    args: &'a [String],
    table: &'a OptionTable,
    /// Index of the next token to inspect; past the last consumed option
    /// token once the scan has ended.
    opt_index: usize,
    /// Byte offset into the current token when mid-way through a combined
    /// short-option cluster such as `-abc`.
    cluster: Option<usize>,
    done: bool,
    opt_arg: Option<&'a str>,
    error_opt: i32,
    long_index: Option<usize>,
    seen: HashSet<char>,
    report_errors: bool,
    diag: Diag<'a>,
}

impl<'a> Parser<'a> {
    /// Start a scan over `args` (the post-program-name argument vector).
    /// Diagnostics go to stderr until redirected with
    /// [`diagnostics_to`](Parser::diagnostics_to) or disabled with
    /// [`set_error_reporting`](Parser::set_error_reporting).
    pub fn new(args: &'a [String], table: &'a OptionTable) -> Parser<'a> {
        Parser {
            args,
            table,
            opt_index: 0,
            cluster: None,
            done: false,
            opt_arg: None,
            error_opt: 0,
            long_index: None,
            seen: HashSet::new(),
            report_errors: true,
            diag: Diag::Stderr,
        }
    }

    /// Redirect diagnostic lines to `sink` instead of stderr.
    pub fn diagnostics_to(mut self, sink: &'a mut dyn Write) -> Self {
        self.diag = Diag::Sink(sink);
        self
    }

    /// Scan the next option. Returns [`ParsedOpt::End`] once the vector is
    /// exhausted, a `--` terminator has been consumed, or a non-option
    /// token has been reached; after that every further call returns `End`
    /// without touching the scan position.
    pub fn next(&mut self) -> ParsedOpt<'a> {
        self.opt_arg = None;

        if self.done {
            return ParsedOpt::End;
        }
        if let Some(pos) = self.cluster {
            return self.short_opt(pos);
        }
        if self.opt_index >= self.args.len() {
            return ParsedOpt::End;
        }

        let token = self.args[self.opt_index].as_str();
        if token == "--" {
            self.opt_index += 1;
            self.done = true;
            return ParsedOpt::End;
        }
        if token == "-" || !token.starts_with('-') {
            // First positional argument: stop here and leave it in place.
            self.done = true;
            return ParsedOpt::End;
        }
        if token.starts_with("--") && !self.table.longs.is_empty() {
            return self.long_opt(token);
        }
        self.short_opt(1)
    }

    fn long_opt(&mut self, token: &'a str) -> ParsedOpt<'a> {
        let body = &token[2..];
        let (name, inline) = match body.find('=') {
            Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
            None => (body, None),
        };

        let idx = match self.table.find_long(name) {
            Some(idx) => idx,
            None => {
                self.error_opt = 0;
                self.opt_index += 1;
                self.report(format_args!("unrecognized option '--{}'", name));
                return ParsedOpt::Unknown(ErrorOpt::Long(name.to_string()));
            }
        };
        let long = &self.table.longs[idx];

        // long_index is recorded on success only; a match that ends in an
        // error leaves it at its previous value.
        match long.requirement {
            ArgRequirement::None => {
                if inline.is_some() {
                    self.error_opt = 0;
                    self.opt_index += 1;
                    self.report(format_args!(
                        "option '--{}' doesn't allow an argument",
                        name
                    ));
                    return ParsedOpt::Unknown(ErrorOpt::Long(name.to_string()));
                }
                self.long_index = Some(idx);
                self.opt_index += 1;
                ParsedOpt::Opt(long.val, None)
            }
            ArgRequirement::Required => {
                if let Some(value) = inline {
                    self.long_index = Some(idx);
                    self.opt_arg = Some(value);
                    self.opt_index += 1;
                    ParsedOpt::Opt(long.val, Some(value))
                } else if self.opt_index + 1 < self.args.len() {
                    let value = self.args[self.opt_index + 1].as_str();
                    self.long_index = Some(idx);
                    self.opt_arg = Some(value);
                    self.opt_index += 2;
                    ParsedOpt::Opt(long.val, Some(value))
                } else {
                    self.error_opt = long.val;
                    self.opt_index += 1;
                    if self.table.silent_missing_arg {
                        return ParsedOpt::MissingArg(ErrorOpt::Long(name.to_string()));
                    }
                    self.report(format_args!("option '--{}' requires an argument", name));
                    ParsedOpt::Unknown(ErrorOpt::Long(name.to_string()))
                }
            }
            ArgRequirement::Optional => {
                // Attached form only; the next token is never consumed.
                self.long_index = Some(idx);
                self.opt_arg = inline;
                self.opt_index += 1;
                ParsedOpt::Opt(long.val, inline)
            }
        }
    }

    fn short_opt(&mut self, pos: usize) -> ParsedOpt<'a> {
        let token = self.args[self.opt_index].as_str();
        // A cluster position always points at a character: step_cluster
        // never leaves an exhausted offset behind.
        let c = token[pos..].chars().next().unwrap();
        let after = pos + c.len_utf8();

        match self.table.shorts.get(&c).copied() {
            None => {
                self.error_opt = c as i32;
                self.step_cluster(after, token.len());
                if !self.table.silent_missing_arg {
                    self.report(format_args!("invalid option -- '{}'", c));
                }
                ParsedOpt::Unknown(ErrorOpt::Short(c))
            }
            Some(ArgRequirement::None) | Some(ArgRequirement::Optional) => {
                self.seen.insert(c);
                self.step_cluster(after, token.len());
                ParsedOpt::Opt(c as i32, None)
            }
            Some(ArgRequirement::Required) => {
                self.seen.insert(c);
                if after < token.len() {
                    // Attached: the rest of the token is the argument.
                    let value = &token[after..];
                    self.opt_arg = Some(value);
                    self.cluster = None;
                    self.opt_index += 1;
                    ParsedOpt::Opt(c as i32, Some(value))
                } else if self.opt_index + 1 < self.args.len() {
                    // Detached: the next token is the argument.
                    let value = self.args[self.opt_index + 1].as_str();
                    self.opt_arg = Some(value);
                    self.cluster = None;
                    self.opt_index += 2;
                    ParsedOpt::Opt(c as i32, Some(value))
                } else {
                    self.error_opt = c as i32;
                    self.cluster = None;
                    self.opt_index += 1;
                    if self.table.silent_missing_arg {
                        return ParsedOpt::MissingArg(ErrorOpt::Short(c));
                    }
                    self.report(format_args!("option requires an argument -- '{}'", c));
                    ParsedOpt::Unknown(ErrorOpt::Short(c))
                }
            }
        }
    }

    /// Advance past one cluster character: stay inside the token if more
    /// characters follow, otherwise move to the next token.
    fn step_cluster(&mut self, after: usize, token_len: usize) {
        if after < token_len {
            self.cluster = Some(after);
        } else {
            self.cluster = None;
            self.opt_index += 1;
        }
    }

    fn report(&mut self, msg: fmt::Arguments) {
        if !self.report_errors {
            return;
        }
        match &mut self.diag {
            Diag::Stderr => {
                let _ = writeln!(io::stderr(), "{}", msg);
            }
            Diag::Sink(sink) => {
                let _ = writeln!(sink, "{}", msg);
            }
        }
    }

    // -- accessors --

    /// The argument bound to the most recently returned option, if it
    /// required one.
    pub fn opt_arg(&self) -> Option<&'a str> {
        self.opt_arg
    }

    /// The current scan index. After [`ParsedOpt::End`] has been observed
    /// this marks where the non-option tail of the argument vector begins.
    pub fn opt_index(&self) -> usize {
        self.opt_index
    }

    /// The code of the option behind the most recent `Unknown`/`MissingArg`
    /// result: the short character's code point, the descriptor's `val` for
    /// a long option missing its argument, or 0 for an unmatched long name.
    pub fn error_opt(&self) -> i32 {
        self.error_opt
    }

    /// Index into the long-option table of the most recently matched long
    /// option.
    pub fn long_index(&self) -> Option<usize> {
        self.long_index
    }

    /// Whether the short option `c` has been returned at least once so far.
    pub fn has_option(&self, c: char) -> bool {
        self.seen.contains(&c)
    }

    /// Enable or disable diagnostic printing. Takes effect on subsequent
    /// calls only; returned values and scan progress never depend on it.
    pub fn set_error_reporting(&mut self, enabled: bool) {
        self.report_errors = enabled;
    }

    /// The tail of the argument vector that option scanning did not
    /// consume. Final once [`ParsedOpt::End`] has been observed; earlier
    /// calls see the not-yet-final boundary.
    pub fn remaining(&self) -> &'a [String] {
        &self.args[self.opt_index..]
    }
}

// ============================================================================
// Tests
// ============================================================================
