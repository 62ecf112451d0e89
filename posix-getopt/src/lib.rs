//! This crate implements the classic `getopt` and `getopt_long` option
//! scanners with the same calling contract: every call scans exactly one
//! option, moves a cursor (`optind`) forward and reports the option, its
//! argument (`optarg`) and unknown options or missing arguments.
//!
//! Unlike the C functions there is no global state.  The state lives in a
//! [`Parser`] owned by the caller, which also makes it possible to run
//! independent scans side by side.
//!
//! # Example
//!
//! ```
//! use posix_getopt::{Opt, Parser};
//!
//! let args = ["prog", "-v", "-o", "out.txt", "input"];
//! let mut parser = Parser::new();
//! let mut verbose = false;
//! let mut output = None;
//!
//! while let Some(opt) = parser.next_short(&args, "vo:").unwrap() {
//!     match opt {
//!         Opt::Short('v') => verbose = true,
//!         Opt::Short('o') => output = parser.optarg(),
//!         _ => unreachable!(),
//!     }
//! }
//!
//! assert!(verbose);
//! assert_eq!(output, Some("out.txt"));
//! assert_eq!(&args[parser.optind()..], ["input"]);
//! ```
//!
//! Code ported from C can use the integer returning [`Parser::getopt`] and
//! [`Parser::getopt_long`] instead, which return `-1` at the end of the
//! options, `'?'` on errors and the option character otherwise.
//!
//! # Behavior
//!
//! * Index `0` is the program name and never scanned.
//! * Scanning stops at the first argument that is not an option (this
//!   includes a lone `-`).  Arguments are never reordered, so
//!   `args[parser.optind()..]` are the operands.
//! * `--` ends the options.  It is consumed and every further call reports
//!   the end of the options until the parser is [`reset`](Parser::reset).
//! * Short options can be bundled (`-vx` is `-v -x`).  A required argument
//!   is either the rest of the token (`-ofile`) or the next argument
//!   (`-o file`), even if that argument starts with a dash.
//! * In the option string a character followed by `:` requires an argument,
//!   followed by `::` it takes an optional argument which must be attached.
//!   A leading `:` silences diagnostics and reports missing arguments with
//!   `':'` instead of `'?'`.  A leading `+` is accepted and ignored.
//! * Long options are `--name`, `--name=value` or `--name value`.  Optional
//!   arguments of long options are only recognized in the `--name=value`
//!   form.  Names must match exactly unless [`Flag::AllowAbbreviations`]
//!   is set.
//!
//! # Error Handling
//!
//! Errors never end the scan.  The parser moves past the offending option,
//! hands the [`Error`] to its [`Reporter`] (which prints to stderr unless
//! errors are [muted](Parser::mute_errors)) and returns it.  Calling the
//! parser again continues with the next option.
use std::path::Path;

use tracing::{debug, trace};

mod error;
mod options;
mod report;

pub use crate::error::{Error, ErrorKind, OptName};
pub use crate::options::{HasArg, LongAction, LongOption};
pub use crate::report::{Reporter, StderrReporter};

use crate::options::OptString;

/// Returned by the integer API when there are no more options.
pub const END_OF_OPTIONS: i32 = -1;

/// Returned by the integer API for errors.
pub const UNKNOWN: i32 = '?' as i32;

/// Returned by the integer API for missing arguments in silent mode.
pub const MISSING: i32 = ':' as i32;

/// A scanned option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opt {
    /// A short option character
    Short(char),
    /// A long option with a [`LongAction::Return`] action
    Long { index: usize, code: i32 },
    /// A long option with a [`LongAction::SetFlag`] action.  The flag has
    /// already been written.
    Flag { index: usize },
}

impl Opt {
    /// Returns the code `getopt` / `getopt_long` would return for this option.
    pub fn code(&self) -> i32 {
        match *self {
            Opt::Short(c) => c as i32,
            Opt::Long { code, .. } => code,
            Opt::Flag { .. } => 0,
        }
    }

    /// Is this a specific short option?
    pub fn is_short(&self, c: char) -> bool {
        matches!(*self, Opt::Short(r) if r == c)
    }

    /// Does this option report the given character as its code?
    ///
    /// This matches the short option as well as any long option that is
    /// an alias for it.
    pub fn is(&self, c: char) -> bool {
        self.code() == c as i32
    }

    /// The index into the long option table, if this is a long option.
    pub fn long_index(&self) -> Option<usize> {
        match *self {
            Opt::Short(_) => None,
            Opt::Long { index, .. } | Opt::Flag { index } => Some(index),
        }
    }
}

/// Parser behavior flags.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flag {
    /// When set, errors are handed to the [`Reporter`].
    ///
    /// **Default:** flag is set
    ReportErrors,
    /// When set, a long option may be abbreviated to any prefix that selects
    /// a single entry of the table.
    ///
    /// **Default:** flag is unset
    AllowAbbreviations,
}

impl Flag {
    fn as_u8(self) -> u8 {
        match self {
            Flag::ReportErrors => 1,
            Flag::AllowAbbreviations => 2,
        }
    }
}

/// The scanning state of a `getopt` style parse.
///
/// The same argument slice must be passed to every call until the parser is
/// [`reset`](Self::reset).  Arguments handed out by [`optarg`](Self::optarg)
/// borrow from that slice.
pub struct Parser<'a> {
    optind: usize,
    // byte offset of the next option character inside a bundle, 0 if none
    nextchar: usize,
    optarg: Option<&'a str>,
    optopt: Option<char>,
    finished: bool,
    flags: u8,
    reporter: Box<dyn Reporter>,
}

impl std::fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("optind", &self.optind)
            .field("optarg", &self.optarg)
            .field("optopt", &self.optopt)
            .field("finished", &self.finished)
            .finish()
    }
}

impl Default for Parser<'_> {
    fn default() -> Self {
        Parser::new()
    }
}

impl<'a> Parser<'a> {
    /// Creates a parser reporting errors to stderr.
    pub fn new() -> Parser<'a> {
        Parser::with_reporter(StderrReporter)
    }

    /// Creates a parser with a custom [`Reporter`].
    pub fn with_reporter<R: Reporter + 'static>(reporter: R) -> Parser<'a> {
        Parser {
            optind: 1,
            nextchar: 0,
            optarg: None,
            optopt: None,
            finished: false,
            flags: Flag::ReportErrors.as_u8(),
            reporter: Box::new(reporter),
        }
    }

    /// Replaces the [`Reporter`].
    pub fn set_reporter<R: Reporter + 'static>(&mut self, reporter: R) {
        self.reporter = Box::new(reporter);
    }

    /// The index of the next argument to scan.
    ///
    /// Once the scan is over this points at the first operand.
    #[inline]
    pub fn optind(&self) -> usize {
        self.optind
    }

    /// The argument of the last scanned option.
    ///
    /// This is `None` if the option took no argument, an optional argument
    /// was not given, or the last call failed.
    #[inline]
    pub fn optarg(&self) -> Option<&'a str> {
        self.optarg
    }

    /// The short option character that caused the last short option error.
    #[inline]
    pub fn optopt(&self) -> Option<char> {
        self.optopt
    }

    /// Starts over from the first argument.
    ///
    /// Flags and muting are left alone.
    pub fn reset(&mut self) {
        self.optind = 1;
        self.nextchar = 0;
        self.optarg = None;
        self.optopt = None;
        self.finished = false;
    }

    /// Stops handing errors to the [`Reporter`].
    pub fn mute_errors(&mut self) {
        self.set_flag(Flag::ReportErrors, false);
    }

    /// Hands errors to the [`Reporter`] again.
    pub fn unmute_errors(&mut self) {
        self.set_flag(Flag::ReportErrors, true);
    }

    /// Are errors currently muted?
    #[inline]
    pub fn is_muted(&self) -> bool {
        !self.get_flag(Flag::ReportErrors)
    }

    /// Check if a parsing [`Flag`] is currently set.
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.flags & flag.as_u8() != 0
    }

    /// Sets or unsets a parsing [`Flag`].
    #[inline]
    pub fn set_flag(&mut self, flag: Flag, yes: bool) {
        if yes {
            self.flags |= flag.as_u8();
        } else {
            self.flags &= !flag.as_u8();
        }
    }

    /// Scans the next short option.
    ///
    /// Returns `Ok(None)` when the options are over.  On errors the parser
    /// has already moved on, so the scan can be continued by calling this
    /// again.
    pub fn next_short<S: AsRef<str>>(
        &mut self,
        args: &'a [S],
        optstring: &str,
    ) -> Result<Option<Opt>, Error> {
        self.scan(args, &OptString::parse(optstring), None)
    }

    /// Scans the next short or long option.
    ///
    /// Arguments starting with `--` are looked up in `longopts`, everything
    /// else is handled like [`next_short`](Self::next_short).
    pub fn next_long<S: AsRef<str>>(
        &mut self,
        args: &'a [S],
        optstring: &str,
        longopts: &[LongOption<'_>],
    ) -> Result<Option<Opt>, Error> {
        self.scan(args, &OptString::parse(optstring), Some(longopts))
    }

    /// The `getopt` calling convention.
    ///
    /// Returns the option character, `'?'` for errors (`':'` for missing
    /// arguments if the option string starts with `:`) or `-1` at the end
    /// of the options.
    pub fn getopt<S: AsRef<str>>(&mut self, args: &'a [S], optstring: &str) -> i32 {
        let result = self.next_short(args, optstring);
        result_code(&result, OptString::parse(optstring).is_silent())
    }

    /// The `getopt_long` calling convention.
    ///
    /// Like [`getopt`](Self::getopt), but a matched long option returns the
    /// code of its table entry (`0` for flag entries) and stores the entry's
    /// position in `longindex`.
    pub fn getopt_long<S: AsRef<str>>(
        &mut self,
        args: &'a [S],
        optstring: &str,
        longopts: &[LongOption<'_>],
        longindex: &mut usize,
    ) -> i32 {
        let result = self.next_long(args, optstring, longopts);
        if let Some(index) = result.as_ref().ok().and_then(|opt| opt.as_ref()?.long_index()) {
            *longindex = index;
        }
        result_code(&result, OptString::parse(optstring).is_silent())
    }

    fn scan<S: AsRef<str>>(
        &mut self,
        args: &'a [S],
        spec: &OptString<'_>,
        longopts: Option<&[LongOption<'_>]>,
    ) -> Result<Option<Opt>, Error> {
        self.optarg = None;

        // a bundle is only continued if the arguments still line up with it
        if self.nextchar > 0
            && args
                .get(self.optind)
                .map_or(true, |arg| self.nextchar >= arg.as_ref().len())
        {
            self.nextchar = 0;
        }

        if self.nextchar == 0 {
            if self.finished {
                return Ok(None);
            }
            let arg = match args.get(self.optind) {
                Some(arg) => arg.as_ref(),
                None => return Ok(None),
            };
            trace!(optind = self.optind, arg, "examining argument");
            if arg == "--" {
                self.optind += 1;
                self.finished = true;
                return Ok(None);
            } else if !arg.starts_with('-') || arg == "-" {
                return Ok(None);
            }
            if let Some(longopts) = longopts {
                if let Some(body) = arg.strip_prefix("--") {
                    return self.scan_long(args, body, spec, longopts);
                }
            }
            self.nextchar = 1;
        }

        self.scan_short(args, spec)
    }

    fn scan_short<S: AsRef<str>>(
        &mut self,
        args: &'a [S],
        spec: &OptString<'_>,
    ) -> Result<Option<Opt>, Error> {
        let arg: &'a str = args[self.optind].as_ref();
        let ch = match arg.get(self.nextchar..).and_then(|rest| rest.chars().next()) {
            Some(ch) => ch,
            None => {
                self.next_arg();
                return Ok(None);
            }
        };
        self.nextchar += ch.len_utf8();
        let rest = &arg[self.nextchar..];

        match spec.policy(ch) {
            None => {
                self.optopt = Some(ch);
                if rest.is_empty() {
                    self.next_arg();
                }
                Err(self.fail(args, spec, Error::UnknownOption(OptName::Short(ch))))
            }
            Some(HasArg::No) => {
                if rest.is_empty() {
                    self.next_arg();
                }
                Ok(Some(Opt::Short(ch)))
            }
            Some(HasArg::Optional) => {
                self.next_arg();
                if !rest.is_empty() {
                    self.optarg = Some(rest);
                }
                Ok(Some(Opt::Short(ch)))
            }
            Some(HasArg::Required) => {
                self.next_arg();
                if !rest.is_empty() {
                    self.optarg = Some(rest);
                } else if let Some(value) = args.get(self.optind) {
                    self.optarg = Some(value.as_ref());
                    self.optind += 1;
                } else {
                    self.optopt = Some(ch);
                    return Err(self.fail(args, spec, Error::MissingArgument(OptName::Short(ch))));
                }
                Ok(Some(Opt::Short(ch)))
            }
        }
    }

    fn scan_long<S: AsRef<str>>(
        &mut self,
        args: &'a [S],
        body: &'a str,
        spec: &OptString<'_>,
        longopts: &[LongOption<'_>],
    ) -> Result<Option<Opt>, Error> {
        let (name, inline_value) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        self.optind += 1;

        let index = match self.find_long(name, longopts) {
            Ok(index) => index,
            Err(err) => return Err(self.fail(args, spec, err)),
        };
        let option = &longopts[index];
        match option.has_arg {
            HasArg::No => {
                if inline_value.is_some() {
                    let err = Error::UnexpectedArgument(option.name.to_string());
                    return Err(self.fail(args, spec, err));
                }
            }
            HasArg::Optional => self.optarg = inline_value,
            HasArg::Required => {
                if let Some(value) = inline_value {
                    self.optarg = Some(value);
                } else if let Some(value) = args.get(self.optind) {
                    self.optarg = Some(value.as_ref());
                    self.optind += 1;
                } else {
                    let err = Error::MissingArgument(OptName::Long(option.name.to_string()));
                    return Err(self.fail(args, spec, err));
                }
            }
        }

        trace!(option = option.name, index, "matched long option");
        Ok(Some(option.apply(index)))
    }

    /// Finds the table entry for a long option name.
    fn find_long(&self, name: &str, longopts: &[LongOption<'_>]) -> Result<usize, Error> {
        if let Some(index) = longopts.iter().position(|x| x.name == name) {
            return Ok(index);
        }
        if self.get_flag(Flag::AllowAbbreviations) && !name.is_empty() {
            let candidates: Vec<usize> = longopts
                .iter()
                .enumerate()
                .filter(|(_, x)| x.name.starts_with(name))
                .map(|(index, _)| index)
                .collect();
            match *candidates.as_slice() {
                [] => {}
                [index] => return Ok(index),
                _ => {
                    return Err(Error::AmbiguousLongOption {
                        name: name.to_string(),
                        candidates: candidates
                            .iter()
                            .map(|&index| longopts[index].name.to_string())
                            .collect(),
                    })
                }
            }
        }
        Err(Error::UnknownOption(OptName::Long(name.to_string())))
    }

    /// Moves on to the next argument, leaving any bundle.
    fn next_arg(&mut self) {
        self.nextchar = 0;
        self.optind += 1;
    }

    /// Reports an error unless muted and passes it through.
    fn fail<S: AsRef<str>>(&mut self, args: &[S], spec: &OptString<'_>, err: Error) -> Error {
        debug!(optind = self.optind, option = %err.option(), "{}", err);
        if self.get_flag(Flag::ReportErrors) && !spec.is_silent() {
            self.reporter.report(prog_name(args), &err);
        }
        err
    }
}

/// Maps a scan result to the integer `getopt` convention.
fn result_code(result: &Result<Option<Opt>, Error>, silent: bool) -> i32 {
    match result {
        Ok(Some(opt)) => opt.code(),
        Ok(None) => END_OF_OPTIONS,
        Err(Error::MissingArgument(_)) if silent => MISSING,
        Err(_) => UNKNOWN,
    }
}

/// Returns the file name portion of the first argument.
fn prog_name<S: AsRef<str>>(args: &[S]) -> &str {
    args.first()
        .map(|x| Path::new(x.as_ref()))
        .and_then(|x| x.file_name())
        .and_then(|x| x.to_str())
        .unwrap_or_default()
}
