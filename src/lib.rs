//! cli-io - unified I/O and leveled logging for command-line tools.
//!
//! A [`CliIo`] handle reads input from and writes output to one of three
//! transports, chosen by inspecting the locator string:
//!
//! - standard streams (`-`, `stdin:`, `stdout:`)
//! - HTTP/WebDAV endpoints (`http://...`, `https://...`)
//! - the local filesystem (everything else; `file:` / `file://` prefixes
//!   are stripped)
//!
//! It also carries a leveled, timestamped, optionally colorized logger
//! that writes to standard error and never lets a stderr failure abort
//! the primary operation.
//!
//! ```no_run
//! use cli_io::{CliIo, InputOptions, Level, Options, OutputOptions};
//!
//! # fn main() -> cli_io::Result<()> {
//! let io = CliIo::with_options(
//!     Options::builder().log_level(Level::Debug).build(),
//! );
//!
//! let text = io.input("config.yaml", &InputOptions::new())?;
//! io.log(Level::Info, "configuration loaded");
//! io.output("-", &text, &OutputOptions::new().trailing_newline(true))?;
//! # Ok(())
//! # }
//! ```

pub mod ansi;
pub mod level;
pub mod locator;
pub mod logger;
pub mod options;
pub mod transport;

pub use level::Level;
pub use locator::Locator;
pub use options::{Options, OptionsBuilder};
pub use transport::{DumpFormat, InputOptions, OpenFlag, OutputOptions};

/// Library-level error type for cli-io operations.
///
/// Validation errors (`InvalidLogLevel`, `InvalidFormat`, `InvalidEncoding`,
/// `InvalidInput`) are raised before any I/O is attempted. Transport errors
/// keep their source and propagate unchanged to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP request failed: {0}")]
    Http(Box<ureq::Error>),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid log level \"{0}\"")]
    InvalidLogLevel(String),

    #[error("invalid output format \"{0}\"")]
    InvalidFormat(String),

    #[error("unknown text encoding \"{0}\"")]
    InvalidEncoding(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

// ureq::Error is large; box it rather than inflating every Result.
impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        Error::Http(Box::new(err))
    }
}

/// Result type alias for cli-io operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified command-line I/O handle.
///
/// Holds one immutable [`Options`] value; every call merges its per-call
/// option bag over these defaults. Handles are cheap to clone and
/// independent, so differently-configured instances can coexist.
#[derive(Debug, Clone, Default)]
pub struct CliIo {
    options: Options,
}

impl CliIo {
    /// Create a handle with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle with explicit options.
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    /// The configuration this handle was built with.
    pub fn options(&self) -> &Options {
        &self.options
    }
}
