// src/intercept/consumer.rs

//! The callback side of an interceptor.
//!
//! A [`Consumer`] receives every chunk of text an interceptor decides to
//! forward. Interceptors are generic over it, so a plain closure, a writer,
//! or the host console can sit behind the same stream.

use std::io::{self, Write};

/// Receives text forwarded by an interceptor.
///
/// Errors are returned to the interceptor, which hands them straight back
/// to whoever was writing.
pub trait Consumer {
    fn consume(&mut self, text: &str) -> io::Result<()>;
}

impl<C: Consumer + ?Sized> Consumer for &mut C {
    fn consume(&mut self, text: &str) -> io::Result<()> {
        (**self).consume(text)
    }
}

impl<C: Consumer + ?Sized> Consumer for Box<C> {
    fn consume(&mut self, text: &str) -> io::Result<()> {
        (**self).consume(text)
    }
}

/// Adapter turning an infallible `FnMut(&str)` into a [`Consumer`].
///
/// Built with [`from_fn`].
pub struct FnConsumer<F> {
    f: F,
}

/// Wrap a closure as a consumer.
///
/// ```
/// use streamtap::intercept::{consumer, Consumer};
///
/// let mut seen = Vec::new();
/// let mut c = consumer::from_fn(|text| seen.push(text.to_string()));
/// c.consume("hi").unwrap();
/// drop(c);
/// assert_eq!(seen, ["hi"]);
/// ```
pub fn from_fn<F>(f: F) -> FnConsumer<F>
where
    F: FnMut(&str),
{
    FnConsumer { f }
}

impl<F> Consumer for FnConsumer<F>
where
    F: FnMut(&str),
{
    fn consume(&mut self, text: &str) -> io::Result<()> {
        (self.f)(text);
        Ok(())
    }
}

impl<F> std::fmt::Debug for FnConsumer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnConsumer")
    }
}

/// Forwards text into any writer (a log file, a socket, a `Vec<u8>`).
///
/// Each chunk is written in full and the writer is flushed, so a consumer
/// backed by a file is up to date after every callback.
#[derive(Debug)]
pub struct WriterConsumer<W> {
    writer: W,
}

impl<W: Write> WriterConsumer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Consumer for WriterConsumer<W> {
    fn consume(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()
    }
}
