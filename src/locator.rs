//! Locator classification.
//!
//! A locator string maps to exactly one transport. Classification is
//! order-sensitive: the stream marker is checked first, then the URL
//! scheme, and everything else falls back to a filesystem path.

use std::path::PathBuf;

/// The transport an I/O locator resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Standard input or output stream (`-`, `stdin:`, `stdout:`).
    Stdio,
    /// HTTP or HTTPS endpoint.
    Url(String),
    /// Local filesystem path, `file:` / `file://` prefix already stripped.
    Path(PathBuf),
}

impl Locator {
    /// Classify a locator for reading (`stdin:` is the stream marker).
    pub fn for_input(raw: &str) -> Self {
        Self::classify(raw, "stdin:")
    }

    /// Classify a locator for writing (`stdout:` is the stream marker).
    pub fn for_output(raw: &str) -> Self {
        Self::classify(raw, "stdout:")
    }

    fn classify(raw: &str, stream_marker: &str) -> Self {
        if raw == "-" || raw == stream_marker {
            return Locator::Stdio;
        }
        if is_http_url(raw) {
            return Locator::Url(raw.to_string());
        }
        // "file://" must be tried before "file:" or the slashes survive.
        let path = raw
            .strip_prefix("file://")
            .or_else(|| raw.strip_prefix("file:"))
            .unwrap_or(raw);
        Locator::Path(PathBuf::from(path))
    }
}

fn is_http_url(raw: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| raw.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()))
}
