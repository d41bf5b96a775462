//! Log severity levels.
//!
//! The five severities form a fixed total order; a message is emitted iff
//! its rank is at or below the configured threshold's rank. The table of
//! tags and colors is static, never runtime-mutable.

use std::str::FromStr;

use crate::ansi;

/// Log severity, ordered `None < Error < Warning < Info < Debug`.
///
/// `None` is a threshold-only value: configuring it suppresses all output,
/// and logging *at* `None` never emits anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    None = 0,
    Error = 1,
    Warning = 2,
    Info = 3,
    Debug = 4,
}

impl Level {
    /// All levels in rank order.
    pub const ALL: [Level; 5] = [
        Level::None,
        Level::Error,
        Level::Warning,
        Level::Info,
        Level::Debug,
    ];

    /// Numeric rank used for threshold comparison.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Display tag prepended to each message. Empty for `None`.
    pub fn tag(self) -> &'static str {
        match self {
            Level::None => "",
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        }
    }

    /// ANSI color for the tag on an interactive terminal, if the level
    /// defines one.
    pub(crate) fn color(self) -> Option<&'static str> {
        match self {
            Level::Error => Some(ansi::RED),
            Level::Warning => Some(ansi::YELLOW),
            Level::Debug => Some(ansi::BLUE),
            Level::None | Level::Info => None,
        }
    }

    /// Lowercase name, the inverse of [`Level::from_str`].
    pub fn as_str(self) -> &'static str {
        match self {
            Level::None => "none",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Level::None),
            "error" => Ok(Level::Error),
            "warning" => Ok(Level::Warning),
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            other => Err(crate::Error::InvalidLogLevel(other.to_string())),
        }
    }
}
