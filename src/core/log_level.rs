//! Log level definitions

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warning = 3,
    Error = 4,
    Fatal = 5,
}

/// Wire tokens, matched case-sensitively.
pub const LEVEL_TOKENS: [(&str, LogLevel); 6] = [
    ("trace", LogLevel::Trace),
    ("debug", LogLevel::Debug),
    ("info", LogLevel::Info),
    ("warning", LogLevel::Warning),
    ("error", LogLevel::Error),
    ("fatal", LogLevel::Fatal),
];

impl LogLevel {
    /// Level used when the `logLevel` field is absent or not a string.
    pub const MISSING_DEFAULT: LogLevel = LogLevel::Debug;

    /// Level used when the `logLevel` field holds an unrecognized token.
    pub const UNRECOGNIZED_DEFAULT: LogLevel = LogLevel::Info;

    pub const ALL: [LogLevel; 6] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// The lowercase token this level travels as on the wire
    pub fn token(&self) -> &'static str {
        LEVEL_TOKENS[*self as usize].0
    }

    /// Uppercase first letter of the level name, as shown in a rendered line
    pub fn initial(&self) -> char {
        match self {
            LogLevel::Trace => 'T',
            LogLevel::Debug => 'D',
            LogLevel::Info => 'I',
            LogLevel::Warning => 'W',
            LogLevel::Error => 'E',
            LogLevel::Fatal => 'F',
        }
    }

    /// Look up an exact lowercase wire token.
    pub fn from_token(token: &str) -> Option<Self> {
        LEVEL_TOKENS
            .iter()
            .find(|(candidate, _)| *candidate == token)
            .map(|(_, level)| *level)
    }

    /// Resolve the `logLevel` field of a payload.
    ///
    /// `None` means the field was absent, null or not a string. A string that
    /// is not one of the known tokens resolves to [`LogLevel::UNRECOGNIZED_DEFAULT`],
    /// which deliberately differs from [`LogLevel::MISSING_DEFAULT`].
    pub fn resolve(token: Option<&str>) -> Self {
        match token {
            None => Self::MISSING_DEFAULT,
            Some(token) => Self::from_token(token).unwrap_or(Self::UNRECOGNIZED_DEFAULT),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| format!("Invalid log level: '{}'", s))
    }
}
