use std::fmt;

/// The name of an option as it appeared on the command line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptName {
    /// A single character option (`-x`)
    Short(char),
    /// A long option (`--name`), without the leading dashes
    Long(String),
}

impl OptName {
    /// Is this a specific short option?
    pub fn is_short(&self, c: char) -> bool {
        match self {
            OptName::Short(r) => c == *r,
            OptName::Long(_) => false,
        }
    }

    /// Is this a specific long option?
    pub fn is_long(&self, name: &str) -> bool {
        match self {
            OptName::Long(s) => s == name,
            OptName::Short(_) => false,
        }
    }
}

impl fmt::Display for OptName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptName::Short(c) => write!(f, "-{}", c),
            OptName::Long(name) => write!(f, "--{}", name),
        }
    }
}

/// The category of a scanning [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The option is not part of the option string or the long option table.
    UnknownOption,
    /// An option requiring an argument reached the end of the command line.
    MissingArgument,
    /// A long option that takes no argument was given one with `--name=value`.
    UnexpectedArgument,
    /// An abbreviated long option matched more than one table entry.
    ///
    /// Only produced with [`Flag::AllowAbbreviations`](crate::Flag::AllowAbbreviations).
    AmbiguousLongOption,
}

/// Represents a scanning error.
///
/// Errors never stop the scan.  By the time one is returned the parser has
/// already moved past the offending option, so calling it again continues
/// with the next one.  The `Display` output is the diagnostic that is handed
/// to the [`Reporter`](crate::Reporter).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("{}", unknown_message(.0))]
    UnknownOption(OptName),
    #[error("{}", missing_message(.0))]
    MissingArgument(OptName),
    #[error("option '--{0}' doesn't allow an argument")]
    UnexpectedArgument(String),
    #[error("option '--{name}' is ambiguous; possibilities:{}", possibilities(.candidates))]
    AmbiguousLongOption { name: String, candidates: Vec<String> },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownOption(_) => ErrorKind::UnknownOption,
            Error::MissingArgument(_) => ErrorKind::MissingArgument,
            Error::UnexpectedArgument(_) => ErrorKind::UnexpectedArgument,
            Error::AmbiguousLongOption { .. } => ErrorKind::AmbiguousLongOption,
        }
    }

    /// Returns the name of the offending option.
    ///
    /// For abbreviated long options this is the abbreviation that was typed,
    /// for unexpected arguments the full name of the matched option.
    pub fn option(&self) -> OptName {
        match self {
            Error::UnknownOption(name) | Error::MissingArgument(name) => name.clone(),
            Error::UnexpectedArgument(name) => OptName::Long(name.clone()),
            Error::AmbiguousLongOption { name, .. } => OptName::Long(name.clone()),
        }
    }
}

fn unknown_message(name: &OptName) -> String {
    match name {
        OptName::Short(c) => format!("invalid option -- '{}'", c),
        OptName::Long(name) => format!("unrecognized option '--{}'", name),
    }
}

fn missing_message(name: &OptName) -> String {
    match name {
        OptName::Short(c) => format!("option requires an argument -- '{}'", c),
        OptName::Long(name) => format!("option '--{}' requires an argument", name),
    }
}

fn possibilities(candidates: &[String]) -> String {
    candidates
        .iter()
        .map(|name| format!(" '--{}'", name))
        .collect()
}
