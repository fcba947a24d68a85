//! Terminal mode control and raw byte sources.

use crate::error::InputError;
use crossterm::terminal;
use std::io::{self, IsTerminal, Read};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info, warn};

const STDIN_CHUNK_SIZE: usize = 1024;
const STDIN_THREAD_NAME: &str = "chatline-stdin";

/// Switches the controlling terminal in and out of raw mode.
pub trait RawTerminal {
    /// Fails with [`InputError::NoTerminal`] when there is no interactive terminal.
    fn enable_raw_mode(&mut self) -> Result<(), InputError>;
    fn disable_raw_mode(&mut self) -> io::Result<()>;
}

/// Keeps raw mode enabled for its lifetime.
///
/// Dropping the guard restores cooked mode, including while unwinding.
pub struct RawModeGuard<'a, T: RawTerminal + ?Sized> {
    terminal: &'a mut T,
}

impl<'a, T: RawTerminal + ?Sized> RawModeGuard<'a, T> {
    pub fn acquire(terminal: &'a mut T) -> Result<Self, InputError> {
        terminal.enable_raw_mode()?;
        info!("raw mode enabled");
        Ok(Self { terminal })
    }
}

impl<T: RawTerminal + ?Sized> Drop for RawModeGuard<'_, T> {
    fn drop(&mut self) {
        match self.terminal.disable_raw_mode() {
            Ok(()) => info!("raw mode released"),
            Err(err) => warn!(error = %err, "failed to release raw mode"),
        }
    }
}

/// The process terminal, driven through crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermTerminal;

impl RawTerminal for CrosstermTerminal {
    fn enable_raw_mode(&mut self) -> Result<(), InputError> {
        if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
            return Err(InputError::NoTerminal);
        }
        terminal::enable_raw_mode().map_err(|err| {
            debug!(error = %err, "enable_raw_mode failed");
            InputError::NoTerminal
        })
    }

    fn disable_raw_mode(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()
    }
}

/// One read from a [`ByteSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    Bytes(Vec<u8>),
    /// The timeout passed before any bytes arrived.
    TimedOut,
    /// The stream ended.
    Closed,
}

/// Where raw keystroke bytes come from.
pub trait ByteSource {
    /// Block until bytes arrive, the stream ends, or `timeout` passes.
    ///
    /// `None` waits indefinitely.
    fn next_chunk(&mut self, timeout: Option<Duration>) -> io::Result<Chunk>;
}

#[derive(Debug)]
enum ReaderMessage {
    Bytes(Vec<u8>),
    Failed(io::ErrorKind, String),
}

/// Receiver for the single stdin reader thread, started on first use.
///
/// A blocking `read` on stdin cannot be cancelled, so the thread outlives
/// any one editing session and every session shares its channel.
static STDIN_READER: Mutex<Option<Receiver<ReaderMessage>>> = Mutex::new(None);

/// Process stdin, read on a dedicated thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinSource;

impl StdinSource {
    pub fn new() -> Self {
        Self
    }
}

impl ByteSource for StdinSource {
    fn next_chunk(&mut self, timeout: Option<Duration>) -> io::Result<Chunk> {
        let mut guard = STDIN_READER
            .lock()
            .map_err(|_| io::Error::other("stdin reader lock poisoned"))?;
        if guard.is_none() {
            *guard = Some(spawn_stdin_reader()?);
        }
        let Some(rx) = guard.as_ref() else {
            return Ok(Chunk::Closed);
        };

        let message = match timeout {
            Some(timeout) => match rx.recv_timeout(timeout) {
                Ok(message) => message,
                Err(RecvTimeoutError::Timeout) => return Ok(Chunk::TimedOut),
                Err(RecvTimeoutError::Disconnected) => return Ok(Chunk::Closed),
            },
            None => match rx.recv() {
                Ok(message) => message,
                Err(_) => return Ok(Chunk::Closed),
            },
        };

        match message {
            ReaderMessage::Bytes(bytes) => Ok(Chunk::Bytes(bytes)),
            ReaderMessage::Failed(kind, message) => Err(io::Error::new(kind, message)),
        }
    }
}

fn spawn_stdin_reader() -> io::Result<Receiver<ReaderMessage>> {
    let (tx, rx) = mpsc::channel();
    std::thread::Builder::new()
        .name(STDIN_THREAD_NAME.into())
        .spawn(move || stdin_reader_loop(tx))?;
    debug!("stdin reader thread started");
    Ok(rx)
}

fn stdin_reader_loop(tx: Sender<ReaderMessage>) {
    let mut stdin = io::stdin().lock();
    let mut buffer = [0u8; STDIN_CHUNK_SIZE];
    loop {
        match stdin.read(&mut buffer) {
            Ok(0) => {
                debug!("stdin reached end of stream");
                return;
            }
            Ok(n) => {
                if tx.send(ReaderMessage::Bytes(buffer[..n].to_vec())).is_err() {
                    return;
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                let _ = tx.send(ReaderMessage::Failed(err.kind(), err.to_string()));
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[derive(Default)]
    struct CountingTerminal {
        enabled: usize,
        disabled: usize,
        refuse: bool,
    }

    impl RawTerminal for CountingTerminal {
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

    #[test]
    fn guard_releases_on_drop() {
        let mut terminal = CountingTerminal::default();
        {
            let _guard = RawModeGuard::acquire(&mut terminal).unwrap();
        }
        assert_eq!((terminal.enabled, terminal.disabled), (1, 1));
    }

    #[test]
    fn guard_releases_while_unwinding() {
        let mut terminal = CountingTerminal::default();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _guard = RawModeGuard::acquire(&mut terminal).unwrap();
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(terminal.disabled, 1);
    }

    #[test]
    fn refused_acquire_does_not_release() {
        let mut terminal = CountingTerminal {
            refuse: true,
            ..CountingTerminal::default()
        };
        assert!(matches!(
            RawModeGuard::acquire(&mut terminal),
            Err(InputError::NoTerminal)
        ));
        assert_eq!(terminal.disabled, 0);
    }
}
