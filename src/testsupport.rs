//! Shared test fixtures: a temp dir and scripted terminal fakes.

use crate::error::InputError;
use crate::tui::{ByteSource, Chunk, RawTerminal};
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory removed on drop.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("chatline-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write UTF-8 text under the fixture root, creating parents.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Byte source that replays a fixed list of chunks, then reports `Closed`.
///
/// Records the timeout passed to every call.
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

/// Terminal that counts raw-mode transitions.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_files() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(&file).unwrap(), "hello");
        assert!(file_under(fixture.path(), &file));
    }

    fn file_under(root: &Path, file: &Path) -> bool {
        file.starts_with(root)
    }

    #[test]
    fn scripted_source_closes_when_exhausted() {
        let mut source = ScriptedSource::new(vec![Chunk::Bytes(b"x".to_vec())]);
        assert_eq!(source.next_chunk(None).unwrap(), Chunk::Bytes(b"x".to_vec()));
        assert_eq!(source.next_chunk(None).unwrap(), Chunk::Closed);
        assert_eq!(source.timeouts, vec![None, None]);
    }

    #[test]
    fn scripted_failure_follows_the_chunks() {
        let mut source = ScriptedSource::bytes(&[b"x"]).then_fail(io::ErrorKind::BrokenPipe);
        assert!(source.next_chunk(None).is_ok());
        let err = source.next_chunk(None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn refusing_terminal_records_nothing() {
        let mut terminal = RecordingTerminal {
            refuse: true,
            ..RecordingTerminal::default()
        };
        assert!(matches!(terminal.enable_raw_mode(), Err(InputError::NoTerminal)));
        assert_eq!(terminal.enabled, 0);
        assert!(terminal.balanced());
    }
}
