// src/streams/shared.rs

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use super::BoxWriter;

/// A writer shared between a stream slot's owner and the interceptor
/// sitting in front of it.
///
/// The interceptor writes through one clone; the redirect guard keeps
/// another so it can hand the original writer back intact.
#[derive(Clone)]
pub struct SharedSink {
    inner: Arc<Mutex<BoxWriter>>,
}

impl SharedSink {
    pub fn new(writer: BoxWriter) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    /// Recover the wrapped writer.
    ///
    /// If other clones are still alive they are left holding an
    /// `io::sink()`, so later writes through them are discarded.
    pub fn into_inner(self) -> BoxWriter {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex.into_inner().unwrap_or_else(PoisonError::into_inner),
            Err(shared) => {
                let mut guard = shared.lock().unwrap_or_else(PoisonError::into_inner);
                std::mem::replace(&mut *guard, Box::new(io::sink()))
            }
        }
    }

    fn with<T>(&self, f: impl FnOnce(&mut BoxWriter) -> io::Result<T>) -> io::Result<T> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("shared sink lock poisoned"))?;
        f(&mut guard)
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with(|w| w.write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.with(|w| w.write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with(|w| w.flush())
    }
}

impl std::fmt::Debug for SharedSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSink")
            .field("handles", &Arc::strong_count(&self.inner))
            .finish()
    }
}
