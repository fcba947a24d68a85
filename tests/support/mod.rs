//! Shared fakes for integration tests: scripted terminal I/O and a local
//! HTTP relay server.

#![allow(dead_code)]

use chatline::error::InputError;
use chatline::tui::{ByteSource, Chunk, RawTerminal};
use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Terminal fakes
// ---------------------------------------------------------------------------

/// Replays chunks in order, then reports `Closed`.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    chunks: VecDeque<io::Result<Chunk>>,
    pub timeouts: Vec<Option<Duration>>,
}

impl ScriptedSource {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self {
            chunks: chunks.into_iter().map(Ok).collect(),
            timeouts: Vec::new(),
        }
    }

    /// One chunk per byte string.
    pub fn bytes(chunks: &[&[u8]]) -> Self {
        Self::new(chunks.iter().map(|c| Chunk::Bytes(c.to_vec())).collect())
    }

    /// Fail with `kind` once the scripted chunks run out.
    pub fn then_fail(mut self, kind: io::ErrorKind) -> Self {
        self.chunks.push_back(Err(io::Error::new(kind, "scripted failure")));
        self
    }
}

impl ByteSource for ScriptedSource {
    fn next_chunk(&mut self, timeout: Option<Duration>) -> io::Result<Chunk> {
        self.timeouts.push(timeout);
        self.chunks.pop_front().unwrap_or(Ok(Chunk::Closed))
    }
}

/// Counts raw-mode transitions.
#[derive(Debug, Default)]
pub struct RecordingTerminal {
    pub enabled: usize,
    pub disabled: usize,
    pub refuse: bool,
}

impl RecordingTerminal {
    /// True when every enable was matched by a disable.
    pub fn balanced(&self) -> bool {
        self.enabled == self.disabled
    }
}

impl RawTerminal for RecordingTerminal {
    fn enable_raw_mode(&mut self) -> Result<(), InputError> {
        if self.refuse {
            return Err(InputError::NoTerminal);
        }
        self.enabled += 1;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> io::Result<()> {
        self.disabled += 1;
        Ok(())
    }
}

/// Sink that rejects every write.
#[derive(Debug, Default)]
pub struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Mock relay server
// ---------------------------------------------------------------------------

/// One scripted HTTP response.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    /// Sleep before answering.
    pub delay: Duration,
}

impl MockReply {
    pub fn json(body: serde_json::Value) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A request as seen by the server.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub head: String,
    pub body: String,
}

impl SeenRequest {
    pub fn header(&self, name: &str) -> Option<String> {
        self.head.lines().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim().to_string())
        })
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }
}

/// Local HTTP server on `127.0.0.1:*` answering with scripted replies.
///
/// Once the script is exhausted the last reply is repeated.
pub struct MockRelayServer {
    address: String,
    shutdown: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<SeenRequest>>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl MockRelayServer {
    pub fn start(replies: Vec<MockReply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        listener
            .set_nonblocking(true)
            .expect("nonblocking listener");
        let addr = listener.local_addr().expect("mock server addr");

        let shutdown = Arc::new(AtomicBool::new(false));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let shutdown_flag = Arc::clone(&shutdown);
        let seen = Arc::clone(&requests);
        let thread = thread::spawn(move || {
            let mut served = 0usize;
            while !shutdown_flag.load(Ordering::Relaxed) {
                match listener.accept() {
                    Ok((mut stream, _)) => {
                        let Some(request) = read_http_request(&mut stream) else {
                            continue;
                        };
                        seen.lock().unwrap().push(request);
                        let reply = replies
                            .get(served)
                            .or_else(|| replies.last())
                            .cloned()
                            .unwrap_or_else(|| MockReply::text(500, "no scripted reply"));
                        served += 1;
                        // Delayed replies must not block the next accept.
                        thread::spawn(move || {
                            thread::sleep(reply.delay);
                            let _ = write_http_reply(&mut stream, &reply);
                        });
                    }
                    Err(_) => thread::sleep(Duration::from_millis(10)),
                }
            }
        });

        Self {
            address: format!("http://{addr}"),
            shutdown,
            requests,
            thread: Some(thread),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.address)
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockRelayServer {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(host) = self.address.strip_prefix("http://") {
            let _ = TcpStream::connect(host).and_then(|s| s.shutdown(Shutdown::Both));
        }
        if let Some(join) = self.thread.take() {
            let _ = join.join();
        }
    }
}

fn read_http_request(stream: &mut TcpStream) -> Option<SeenRequest> {
    stream.set_nonblocking(false).ok()?;
    stream.set_read_timeout(Some(Duration::from_secs(5))).ok()?;
    let mut buffer = Vec::<u8>::new();
    let mut temp = [0u8; 2048];
    let mut header_end: Option<usize> = None;
    let mut content_length = 0usize;

    loop {
        let n = stream.read(&mut temp).ok()?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&temp[..n]);
        if header_end.is_none() {
            if let Some(idx) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
                header_end = Some(idx);
                let head = String::from_utf8_lossy(&buffer[..idx]).to_string();
                content_length = parse_content_length(&head).unwrap_or(0);
            }
        }
        if let Some(idx) = header_end {
            if buffer.len().saturating_sub(idx + 4) >= content_length {
                break;
            }
        }
    }

    let idx = header_end?;
    Some(SeenRequest {
        head: String::from_utf8_lossy(&buffer[..idx]).to_string(),
        body: String::from_utf8_lossy(&buffer[idx + 4..]).to_string(),
    })
}

fn parse_content_length(head: &str) -> Option<usize> {
    head.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.eq_ignore_ascii_case("content-length") {
            value.trim().parse::<usize>().ok()
        } else {
            None
        }
    })
}

fn write_http_reply(stream: &mut TcpStream, reply: &MockReply) -> io::Result<()> {
    let response = format!(
        "HTTP/1.1 {} Scripted\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reply.content_type,
        reply.body.len(),
        reply.body
    );
    stream.write_all(response.as_bytes())
}
