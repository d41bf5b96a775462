//! Construction-time configuration for [`CliIo`](crate::CliIo).
//!
//! Built once, immutable afterwards. Per-call option bags
//! ([`InputOptions`](crate::InputOptions), [`OutputOptions`](crate::OutputOptions))
//! shallow-merge over these defaults.

use encoding_rs::{Encoding, UTF_8};

use crate::level::Level;
use crate::{Error, Result};

/// Default User-Agent sent with HTTP reads.
const DEFAULT_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configuration shared by the transport router and the log emitter.
#[derive(Debug, Clone)]
pub struct Options {
    /// Text codec for reads and writes. Defaults to UTF-8.
    pub encoding: &'static Encoding,
    /// Maximum severity that will be emitted. Defaults to `info`.
    pub log_level: Level,
    /// Prepend a wall-clock timestamp to every log line. Defaults to true.
    pub log_time: bool,
    /// Program prefix for log lines; empty disables it. Defaults to the
    /// running executable's file name with its extension stripped.
    pub log_prefix: String,
    /// User-Agent for HTTP reads. Defaults to `cli-io/<version>`.
    pub agent: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            encoding: UTF_8,
            log_level: Level::Info,
            log_time: true,
            log_prefix: program_name(),
            agent: DEFAULT_AGENT.to_string(),
        }
    }
}

impl Options {
    /// Start building options from the defaults.
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }
}

/// Builder for [`Options`]; unset fields keep their defaults.
#[derive(Debug, Default)]
pub struct OptionsBuilder {
    encoding: Option<&'static Encoding>,
    log_level: Option<Level>,
    log_time: Option<bool>,
    log_prefix: Option<String>,
    agent: Option<String>,
}

impl OptionsBuilder {
    /// Select the text codec by WHATWG label (e.g. `"utf-8"`, `"latin1"`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] for an unknown label.
    pub fn encoding(mut self, label: &str) -> Result<Self> {
        self.encoding = Some(resolve_encoding(label)?);
        Ok(self)
    }

    /// Set the log threshold.
    pub fn log_level(mut self, level: Level) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Enable or disable log timestamps.
    pub fn log_time(mut self, on: bool) -> Self {
        self.log_time = Some(on);
        self
    }

    /// Set the program prefix for log lines; empty disables it.
    pub fn log_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_prefix = Some(prefix.into());
        self
    }

    /// Set the default User-Agent for HTTP reads.
    pub fn agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Options {
        let defaults = Options::default();
        Options {
            encoding: self.encoding.unwrap_or(defaults.encoding),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            log_time: self.log_time.unwrap_or(defaults.log_time),
            log_prefix: self.log_prefix.unwrap_or(defaults.log_prefix),
            agent: self.agent.unwrap_or(defaults.agent),
        }
    }
}

/// Resolve a WHATWG encoding label to its codec.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] for an unknown label.
pub(crate) fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.as_bytes()).ok_or_else(|| Error::InvalidEncoding(label.to_string()))
}

/// Base name of the running executable with its extension stripped.
fn program_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .unwrap_or_default()
}
