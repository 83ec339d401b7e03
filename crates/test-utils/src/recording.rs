use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use streamtap::intercept::Consumer;

/// A consumer that records every chunk it receives.
///
/// Clones share the same record, so a test keeps one clone and hands the
/// other to the interceptor.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn joined(&self) -> String {
        self.calls().concat()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().unwrap().is_empty()
    }
}

impl Consumer for Recorder {
    fn consume(&mut self, text: &str) -> io::Result<()> {
        self.calls.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// A sink that captures written bytes and counts flushes.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    bytes: Arc<Mutex<Vec<u8>>>,
    flushes: Arc<Mutex<usize>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.lock().unwrap().clone()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }

    pub fn flushes(&self) -> usize {
        *self.flushes.lock().unwrap()
    }
}

impl Write for CaptureSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        *self.flushes.lock().unwrap() += 1;
        Ok(())
    }
}

/// A sink whose every write and flush fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingSink;

impl Write for FailingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }
}

/// A consumer that always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingConsumer;

impl Consumer for FailingConsumer {
    fn consume(&mut self, _text: &str) -> io::Result<()> {
        Err(io::Error::other("console unavailable"))
    }
}
