use std::cell::Cell;

use crate::Opt;

/// Whether an option takes an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HasArg {
    /// The option is a plain switch.
    No,
    /// The option must be followed by a value.
    Required,
    /// The option accepts a value, but only when attached (`-ovalue` or
    /// `--option=value`).  A separate following argument is never taken.
    Optional,
}

/// What happens when a long option matches.
#[derive(Debug, Clone, Copy)]
pub enum LongAction<'o> {
    /// The scan reports the given code, conventionally the short option
    /// character the long option is an alias of.
    Return(i32),
    /// The value is stored into the cell and the scan reports code `0`.
    SetFlag(&'o Cell<i32>, i32),
}

/// One entry of a long option table.
///
/// Tables are plain slices, so no terminating entry is needed:
///
/// ```
/// use posix_getopt::{HasArg, LongOption};
///
/// const LONG_OPTIONS: &[LongOption<'static>] = &[
///     LongOption::new("host", HasArg::Required, 'h' as i32),
///     LongOption::new("port", HasArg::Required, 'p' as i32),
/// ];
/// # assert_eq!(LONG_OPTIONS.len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LongOption<'o> {
    pub name: &'o str,
    pub has_arg: HasArg,
    pub action: LongAction<'o>,
}

impl<'o> LongOption<'o> {
    /// Creates an entry that reports `code` when matched.
    pub const fn new(name: &'o str, has_arg: HasArg, code: i32) -> LongOption<'o> {
        LongOption {
            name,
            has_arg,
            action: LongAction::Return(code),
        }
    }

    /// Creates an entry that stores `value` into `cell` when matched.
    pub const fn flag(
        name: &'o str,
        has_arg: HasArg,
        cell: &'o Cell<i32>,
        value: i32,
    ) -> LongOption<'o> {
        LongOption {
            name,
            has_arg,
            action: LongAction::SetFlag(cell, value),
        }
    }

    pub(crate) fn apply(&self, index: usize) -> Opt {
        match self.action {
            LongAction::Return(code) => Opt::Long { index, code },
            LongAction::SetFlag(cell, value) => {
                cell.set(value);
                Opt::Flag { index }
            }
        }
    }
}

/// A parsed view of a getopt option string such as `"+:ab:c::"`.
pub(crate) struct OptString<'s> {
    chars: &'s str,
    silent: bool,
}

impl<'s> OptString<'s> {
    pub fn parse(optstring: &'s str) -> OptString<'s> {
        // arguments are never permuted, so `+` changes nothing
        let optstring = optstring.strip_prefix('+').unwrap_or(optstring);
        match optstring.strip_prefix(':') {
            Some(chars) => OptString {
                chars,
                silent: true,
            },
            None => OptString {
                chars: optstring,
                silent: false,
            },
        }
    }

    /// A leading `:` asks for no diagnostics and `':'` for missing arguments.
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    /// Looks up the argument policy of a short option character.
    pub fn policy(&self, ch: char) -> Option<HasArg> {
        if ch == ':' {
            return None;
        }
        let pos = self.chars.find(ch)?;
        let markers = &self.chars[pos + ch.len_utf8()..];
        Some(if markers.starts_with("::") {
            HasArg::Optional
        } else if markers.starts_with(':') {
            HasArg::Required
        } else {
            HasArg::No
        })
    }
}
