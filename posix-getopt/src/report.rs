use std::io::Write;

use crate::Error;

/// Receives diagnostics for scanning errors.
///
/// The parser calls the reporter synchronously whenever it returns an
/// [`Error`], unless errors are muted or the option string starts with `:`.
/// `prog` is the file name portion of the first argument.
///
/// Any `FnMut(&str, &Error)` closure is a reporter:
///
/// ```
/// use posix_getopt::{Error, Parser};
///
/// let args = ["prog", "-x"];
/// let mut parser = Parser::with_reporter(|prog: &str, err: &Error| {
///     println!("{}: {}", prog, err);
/// });
/// assert_eq!(parser.getopt(&args, "a"), '?' as i32);
/// ```
pub trait Reporter {
    fn report(&mut self, prog: &str, error: &Error);
}

impl<F> Reporter for F
where
    F: FnMut(&str, &Error),
{
    fn report(&mut self, prog: &str, error: &Error) {
        self(prog, error)
    }
}

/// The default reporter, printing `prog: message` to standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrReporter;

impl Reporter for StderrReporter {
    fn report(&mut self, prog: &str, error: &Error) {
        // diagnostics are best effort
        let _ = writeln!(std::io::stderr().lock(), "{}: {}", prog, error);
    }
}
