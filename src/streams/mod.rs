// src/streams/mod.rs

//! Explicit handles for standard output and standard error.
//!
//! Instead of swapping process-wide globals, code that produces output is
//! handed a [`Streams`] value and writes through [`Streams::stdout`] /
//! [`Streams::stderr`]. Interceptors are installed with
//! [`Streams::redirect`], whose guard puts the original writer back on
//! every exit path.

pub mod redirect;
pub mod shared;

use std::fmt;
use std::io::{self, Write};

use crate::intercept::{Consumer, InterceptMode};

pub use redirect::Redirect;
pub use shared::SharedSink;

/// Owned, sendable writer stored in a stream slot.
pub type BoxWriter = Box<dyn Write + Send>;

/// One of the two standard streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Stdout => f.write_str("stdout"),
            Stream::Stderr => f.write_str("stderr"),
        }
    }
}

/// The current stdout and stderr writers.
pub struct Streams {
    stdout: BoxWriter,
    stderr: BoxWriter,
}

impl Streams {
    pub fn new<O, E>(stdout: O, stderr: E) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            stdout: Box::new(stdout),
            stderr: Box::new(stderr),
        }
    }

    /// Handles onto the real process streams.
    pub fn process() -> Self {
        Self::new(io::stdout(), io::stderr())
    }

    pub fn stdout(&mut self) -> &mut (dyn Write + Send) {
        self.stdout.as_mut()
    }

    pub fn stderr(&mut self) -> &mut (dyn Write + Send) {
        self.stderr.as_mut()
    }

    pub fn get_mut(&mut self, stream: Stream) -> &mut (dyn Write + Send) {
        self.slot(stream).as_mut()
    }

    /// Put `writer` in place of the current writer for `stream` and return
    /// the one it replaced. Nothing is flushed.
    pub fn install(&mut self, stream: Stream, writer: BoxWriter) -> BoxWriter {
        std::mem::replace(self.slot(stream), writer)
    }

    /// Install an interceptor in front of the current writer for `stream`.
    ///
    /// The returned guard dereferences to these streams, so output code keeps
    /// writing through it. Dropping the guard restores the original writer.
    pub fn redirect<C>(&mut self, stream: Stream, consumer: C, mode: InterceptMode) -> Redirect<'_>
    where
        C: Consumer + Send + 'static,
    {
        Redirect::new(self).and(stream, consumer, mode)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()?;
        self.stderr.flush()
    }

    fn slot(&mut self, stream: Stream) -> &mut BoxWriter {
        match stream {
            Stream::Stdout => &mut self.stdout,
            Stream::Stderr => &mut self.stderr,
        }
    }
}

impl fmt::Debug for Streams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Streams").finish_non_exhaustive()
    }
}
