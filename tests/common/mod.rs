//! Shared test fixtures for the sheet-metrics integration tests.
//!
//! Provides sample CSV exports and `serve_once()`, a one-shot HTTP server on
//! a loopback port that answers a single request with a canned response and
//! hands the raw request back to the test.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use sheet_metrics::ClientRecord;
use tracing_subscriber::EnvFilter;

/// Route library logs to the test output. Set `RUST_LOG=sheet_metrics=debug`
/// to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The three-row example export: a currency-formatted amount, a plain one,
/// and a row whose numeric fields are both garbage.
pub const SAMPLE_CSV: &str = "\
Client,Number of Headshots,Amount/Price,Email
Alice,3,\"$1,200.50\",a@x.com
Bob,3,900,b@x.com
Cara,x,abc,c@x.com
";

/// Same rows as [`SAMPLE_CSV`] but without quoting, so the naive splitter
/// reads Alice's amount as one field.
pub const SAMPLE_CSV_UNQUOTED: &str = "\
Client,Number of Headshots,Amount/Price,Email
Alice,3,$1200.50,a@x.com
Bob,3,900,b@x.com
Cara,x,abc,c@x.com
";

pub fn record(client: &str, headshots: u64, amount: f64, email: &str) -> ClientRecord {
    ClientRecord {
        client: client.to_string(),
        headshot_count: headshots,
        amount,
        email: email.to_string(),
    }
}

/// Records the example exports parse into.
pub fn sample_records() -> Vec<ClientRecord> {
    vec![
        record("Alice", 3, 1200.5, "a@x.com"),
        record("Bob", 3, 900.0, "b@x.com"),
        record("Cara", 0, 0.0, "c@x.com"),
    ]
}

// ---------------------------------------------------------------------------
// One-shot HTTP server
// ---------------------------------------------------------------------------

/// A request captured by [`serve_once`].
#[derive(Debug)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub struct TestServer {
    pub url: String,
    handle: JoinHandle<CapturedRequest>,
}

impl TestServer {
    /// Wait for the single request and return it.
    pub fn request(self) -> CapturedRequest {
        self.handle.join().unwrap()
    }
}

/// Serve exactly one HTTP response, then shut down.
pub fn serve_once(status: u16, content_type: &str, body: &str) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let content_type = content_type.to_string();
    let body = body.to_string();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((k, v)) = line.split_once(':') {
                headers.push((k.trim().to_string(), v.trim().to_string()));
            }
        }

        let buf = read_body(&mut reader, &headers);

        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n\
             Connection: close\r\n\r\n{}",
            status,
            reason(status),
            content_type,
            body.len(),
            body
        );
        let mut stream = stream;
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        CapturedRequest {
            request_line: request_line.trim_end().to_string(),
            headers,
            body: String::from_utf8(buf).unwrap(),
        }
    });

    TestServer {
        url: format!("http://{}/hook", addr),
        handle,
    }
}

/// Read a request body framed by `Content-Length` or chunked transfer
/// encoding. Requests with neither have no body.
fn read_body<R: BufRead>(reader: &mut R, headers: &[(String, String)]) -> Vec<u8> {
    let header = |name: &str| {
        headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    };

    let chunked = header("transfer-encoding")
        .is_some_and(|v| v.to_ascii_lowercase().contains("chunked"));
    if !chunked {
        let length = header("content-length")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0);
        let mut buf = vec![0u8; length];
        reader.read_exact(&mut buf).unwrap();
        return buf;
    }

    let mut body = Vec::new();
    loop {
        let mut size_line = String::new();
        reader.read_line(&mut size_line).unwrap();
        let size_hex = size_line.trim().split(';').next().unwrap_or("0");
        let size = usize::from_str_radix(size_hex, 16).unwrap();

        if size == 0 {
            // Trailer section ends with an empty line.
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line.trim_end().is_empty() {
                    break;
                }
            }
            return body;
        }

        let mut chunk = vec![0u8; size];
        reader.read_exact(&mut chunk).unwrap();
        body.extend_from_slice(&chunk);

        let mut crlf = [0u8; 2];
        reader.read_exact(&mut crlf).unwrap();
    }
}

/// A loopback URL with nothing listening on it.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/export?format=csv", addr)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
