//! Minimal in-process HTTP fixture for transport tests.
//!
//! Binds a `TcpListener` on 127.0.0.1:0, answers a fixed number of
//! requests with one canned response, and records each request (method,
//! path, headers, body) for assertions. Single-threaded and blocking,
//! which is all the whole-buffer transports need.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

/// One captured HTTP request.
pub struct Request {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Handle to the running fixture server.
pub struct FixtureServer {
    addr: SocketAddr,
    requests: Receiver<Request>,
}

impl FixtureServer {
    /// Serve `count` requests, each answered with `status` (e.g.
    /// `"200 OK"`) and `body`. Returns once the listener is bound.
    pub fn start(count: usize, status: &'static str, body: &'static [u8]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fixture listener");
        let addr = listener.local_addr().expect("fixture local addr");
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for _ in 0..count {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                let request = handle_connection(stream, status, body);
                if tx.send(request).is_err() {
                    return;
                }
            }
        });

        Self { addr, requests: rx }
    }

    /// Base URL of the server, e.g. `http://127.0.0.1:PORT`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Host and port, for building URLs with embedded credentials.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Next recorded request; panics if none arrives within five seconds.
    pub fn recv(&self) -> Request {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("fixture server saw no request")
    }
}

fn handle_connection(stream: TcpStream, status: &'static str, body: &'static [u8]) -> Request {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).expect("read request line");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("read header line");
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim().to_string();
            let value = value.trim().to_string();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            }
            headers.push((name, value));
        }
    }

    let mut request_body = vec![0u8; content_length];
    reader.read_exact(&mut request_body).expect("read request body");

    let mut stream = reader.into_inner();
    let header = format!(
        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    stream.write_all(header.as_bytes()).expect("write response header");
    stream.write_all(body).expect("write response body");
    stream.flush().expect("flush response");

    Request {
        method,
        path,
        headers,
        body: request_body,
    }
}
