//! Transport router - locator-dispatched input and output.
//!
//! [`CliIo::input`] and [`CliIo::output`] move one whole buffer of text
//! between the caller and a standard stream, a file, or an HTTP/WebDAV
//! endpoint. No partial reads or writes are exposed, nothing is retried,
//! and no connection outlives the call that opened it.

use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use url::Url;

use crate::ansi::strip_ansi;
use crate::locator::Locator;
use crate::options::resolve_encoding;
use crate::{CliIo, Error, Result};

/// Per-call options for [`CliIo::input`], merged over the configured
/// defaults.
#[derive(Debug, Clone, Default)]
pub struct InputOptions {
    encoding: Option<String>,
    agent: Option<String>,
}

impl InputOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the configured text encoding for this call (WHATWG label).
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }

    /// Override the User-Agent sent with an HTTP read.
    pub fn agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }
}

/// Serialization format used when [`OutputOptions::dump`] is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DumpFormat {
    /// Pretty-printed JSON, four-space indentation.
    #[default]
    Json,
    /// YAML document.
    Yaml,
}

impl FromStr for DumpFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(DumpFormat::Json),
            "yaml" => Ok(DumpFormat::Yaml),
            other => Err(Error::InvalidFormat(other.to_string())),
        }
    }
}

/// File open disposition for filesystem output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenFlag {
    /// Create the file or truncate an existing one.
    #[default]
    Truncate,
    /// Create the file or append to an existing one.
    Append,
}

/// Per-call options for [`CliIo::output`], merged over the configured
/// defaults.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    dump: bool,
    format: DumpFormat,
    trailing_newline: bool,
    no_color: bool,
    encoding: Option<String>,
    mode: u32,
    flag: OpenFlag,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            dump: false,
            format: DumpFormat::Json,
            trailing_newline: false,
            no_color: false,
            encoding: None,
            mode: 0o666,
            flag: OpenFlag::Truncate,
        }
    }
}

impl OutputOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the data argument instead of treating it as text.
    pub fn dump(mut self, on: bool) -> Self {
        self.dump = on;
        self
    }

    /// Serialization format for dumping. Ignored unless `dump` is set.
    pub fn format(mut self, format: DumpFormat) -> Self {
        self.format = format;
        self
    }

    /// Append a final newline unless the text already ends in one.
    pub fn trailing_newline(mut self, on: bool) -> Self {
        self.trailing_newline = on;
        self
    }

    /// Strip ANSI escape sequences from non-dumped text.
    pub fn no_color(mut self, on: bool) -> Self {
        self.no_color = on;
        self
    }

    /// Override the configured text encoding for this call (WHATWG label).
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }

    /// File creation mode bits (Unix only). Defaults to `0o666`.
    pub fn mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    /// File open disposition. Defaults to [`OpenFlag::Truncate`].
    pub fn flag(mut self, flag: OpenFlag) -> Self {
        self.flag = flag;
        self
    }
}

impl CliIo {
    /// Read one complete text buffer from `locator`.
    ///
    /// Blocks until the source is exhausted: EOF on stdin, the full HTTP
    /// response body, or the whole file. The bytes are decoded with the
    /// requested encoding.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidEncoding`] before any I/O for an unknown encoding
    /// label; otherwise the underlying transport error ([`Error::Io`],
    /// [`Error::Http`]) propagated unchanged.
    pub fn input(&self, locator: &str, opts: &InputOptions) -> Result<String> {
        let encoding = match &opts.encoding {
            Some(label) => resolve_encoding(label)?,
            None => self.options().encoding,
        };
        let agent = opts.agent.as_deref().unwrap_or(&self.options().agent);

        let bytes = match Locator::for_input(locator) {
            Locator::Stdio => read_stdin()?,
            Locator::Url(url) => http_get(&url, agent)?,
            Locator::Path(path) => std::fs::read(&path)?,
        };
        let (text, _, _) = encoding.decode(&bytes);
        Ok(text.into_owned())
    }

    /// Write `data` to `locator`.
    ///
    /// The payload pipeline runs first: optional serialization (JSON or
    /// YAML), optional trailing newline, optional ANSI stripping. The
    /// result is encoded and handed to the transport in one write; the
    /// call returns only once the write is acknowledged.
    ///
    /// When `dump` is off, `data` must serialize to a plain string.
    ///
    /// # Errors
    ///
    /// Validation errors ([`Error::InvalidEncoding`], [`Error::InvalidInput`])
    /// before any I/O; otherwise the transport error propagated unchanged.
    pub fn output<T: Serialize>(&self, locator: &str, data: &T, opts: &OutputOptions) -> Result<()> {
        let encoding = match &opts.encoding {
            Some(label) => resolve_encoding(label)?,
            None => self.options().encoding,
        };
        let text = render_payload(data, opts)?;
        let (bytes, _, _) = encoding.encode(&text);

        match Locator::for_output(locator) {
            Locator::Stdio => write_stdout(&bytes),
            Locator::Url(url) => webdav_put(&url, &bytes),
            Locator::Path(path) => write_file(&path, &bytes, opts.mode, opts.flag),
        }
    }
}

/// Apply the serialization / newline / color stages, in that fixed order.
fn render_payload<T: Serialize>(data: &T, opts: &OutputOptions) -> Result<String> {
    let mut text = if opts.dump {
        match opts.format {
            DumpFormat::Json => to_pretty_json(data)?,
            DumpFormat::Yaml => serde_yaml::to_string(data)?,
        }
    } else {
        match serde_json::to_value(data)? {
            serde_json::Value::String(text) => text,
            _ => {
                return Err(Error::InvalidInput(
                    "output data must be a string unless dump is enabled".to_string(),
                ));
            }
        }
    };

    if opts.trailing_newline && !text.ends_with('\n') {
        text.push('\n');
    }

    // Dumped structured output contains no color codes to strip.
    if !opts.dump && opts.no_color {
        text = strip_ansi(&text).into_owned();
    }

    Ok(text)
}

/// Pretty-print as JSON with four-space indentation, keys in the order
/// the serializer yields them.
fn to_pretty_json<T: Serialize>(data: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf).expect("serde_json emits UTF-8"))
}

fn read_stdin() -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    std::io::stdin().lock().read_to_end(&mut buf)?;
    Ok(buf)
}

fn http_get(url: &str, agent: &str) -> Result<Vec<u8>> {
    let response = ureq::get(url).set("User-Agent", agent).call()?;
    let mut body = Vec::new();
    response.into_reader().read_to_end(&mut body)?;
    Ok(body)
}

fn write_stdout(bytes: &[u8]) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()?;
    Ok(())
}

/// PUT `bytes` to a WebDAV endpoint, replacing any existing resource.
///
/// Credentials embedded in the URL's user-info become HTTP Basic auth;
/// the request itself targets the URL with the user-info removed.
fn webdav_put(raw_url: &str, bytes: &[u8]) -> Result<()> {
    let url = Url::parse(raw_url)?;
    let host = url
        .host_str()
        .ok_or_else(|| Error::InvalidInput(format!("URL has no host: {raw_url}")))?;

    let mut target = format!("{}://{host}", url.scheme());
    if let Some(port) = url.port() {
        target.push_str(&format!(":{port}"));
    }
    target.push_str(url.path());

    let mut request = ureq::put(&target);
    if !url.username().is_empty() {
        let credentials = format!("{}:{}", url.username(), url.password().unwrap_or(""));
        let header = format!("Basic {}", BASE64.encode(credentials));
        request = request.set("Authorization", &header);
    }
    // No If-None-Match precondition: an existing remote resource is
    // overwritten, not appended to.
    request.send_bytes(bytes)?;
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8], mode: u32, flag: OpenFlag) -> Result<()> {
    let mut open = OpenOptions::new();
    open.write(true).create(true);
    match flag {
        OpenFlag::Truncate => open.truncate(true),
        OpenFlag::Append => open.append(true),
    };

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        open.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = open.open(path)?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dump_json_uses_four_space_indent_and_no_trailing_newline() {
        let opts = OutputOptions::new().dump(true).format(DumpFormat::Json);
        let text = render_payload(&json!({ "a": 1 }), &opts).unwrap();
        assert_eq!(text, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn dump_json_keeps_key_order() {
        let opts = OutputOptions::new().dump(true);
        let text = render_payload(&json!({ "b": 1, "a": 2 }), &opts).unwrap();
        assert!(text.find("\"b\"").unwrap() < text.find("\"a\"").unwrap());
    }

    #[test]
    fn dump_yaml() {
        let opts = OutputOptions::new().dump(true).format(DumpFormat::Yaml);
        let text = render_payload(&json!({ "a": 1 }), &opts).unwrap();
        assert_eq!(text, "a: 1\n");
    }

    #[test]
    fn unknown_format_name_is_rejected() {
        let err = "xml".parse::<DumpFormat>().unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(name) if name == "xml"));
    }

    #[test]
    fn non_string_without_dump_is_rejected() {
        let opts = OutputOptions::new();
        let err = render_payload(&json!({ "a": 1 }), &opts).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn trailing_newline_is_idempotent() {
        let opts = OutputOptions::new().trailing_newline(true);
        assert_eq!(render_payload(&"text", &opts).unwrap(), "text\n");
        assert_eq!(render_payload(&"text\n", &opts).unwrap(), "text\n");
    }

    #[test]
    fn no_color_strips_ansi_from_text() {
        let opts = OutputOptions::new().no_color(true);
        let text = render_payload(&"\x1b[31mred\x1b[0m", &opts).unwrap();
        assert_eq!(text, "red");
    }

    #[test]
    fn no_color_is_skipped_when_dumping() {
        let opts = OutputOptions::new().dump(true).no_color(true);
        let text = render_payload(&json!({ "a": "\u{1b}[31m" }), &opts).unwrap();
        assert!(text.contains("\\u001b"));
    }
}
