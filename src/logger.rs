//! Log emitter - level-gated, formatted diagnostics on standard error.
//!
//! Formatting runs through a fixed pipeline: level tag (colorized on an
//! interactive terminal), optional timestamp, optional program prefix,
//! exactly one trailing newline, ANSI stripping when stderr is redirected.
//! Write failures on stderr are swallowed: diagnostics must never fail
//! the primary operation.

use std::io::{IsTerminal, Write};

use chrono::Local;

use crate::ansi::{self, strip_ansi};
use crate::level::Level;
use crate::options::Options;
use crate::{CliIo, Result};

impl CliIo {
    /// Emit `message` at `level` to standard error.
    ///
    /// Messages ranked above the configured threshold produce no output,
    /// as does [`Level::None`], which is a threshold-only value. The call
    /// waits for the stderr write to complete but discards any error it
    /// reports.
    pub fn log(&self, level: Level, message: &str) {
        let stderr = std::io::stderr();
        let Some(line) = render(self.options(), level, message, stderr.is_terminal()) else {
            return;
        };
        let mut stderr = stderr.lock();
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
    }

    /// Emit `message` at the level named by `level`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLogLevel`](crate::Error::InvalidLogLevel)
    /// for an unknown level name, before anything is written or filtered.
    pub fn log_named(&self, level: &str, message: &str) -> Result<()> {
        let level: Level = level.parse()?;
        self.log(level, message);
        Ok(())
    }
}

/// Build the final log line, or `None` when the level is filtered out.
///
/// `color` reports whether the destination is an interactive terminal;
/// when it is not, every ANSI sequence is stripped, including any the
/// caller put in the message itself.
fn render(options: &Options, level: Level, message: &str, color: bool) -> Option<String> {
    if level == Level::None || level.rank() > options.log_level.rank() {
        return None;
    }

    let mut tag = level.tag().to_string();
    if color {
        if let Some(code) = level.color() {
            tag = format!("{code}{tag}{}", ansi::RESET);
        }
    }
    let mut line = format!("{tag}: {message}");

    if options.log_time {
        let time = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        line = format!("[{time}] {line}");
    }

    if !options.log_prefix.is_empty() {
        line = format!("{}: {line}", options.log_prefix);
    }

    if !line.ends_with('\n') {
        line.push('\n');
    }

    if !color {
        line = strip_ansi(&line).into_owned();
    }

    Some(line)
}
