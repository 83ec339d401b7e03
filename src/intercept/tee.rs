// src/intercept/tee.rs

//! Pass-through interceptor: every write goes to the sink, then to the
//! consumer. Nothing is buffered.

use std::io::{self, Write};

use super::consumer::Consumer;
use super::decode::Utf8Decoder;

/// Simple stream interceptor.
///
/// The sink sees exactly the bytes that were written. The consumer sees the
/// same chunk as text, once the sink accepted it. A failing sink therefore
/// means the consumer is never called for that chunk.
#[derive(Debug)]
pub struct Tee<W, C> {
    sink: W,
    consumer: C,
    decoder: Utf8Decoder,
}

impl<W: Write, C: Consumer> Tee<W, C> {
    pub fn new(sink: W, consumer: C) -> Self {
        Self {
            sink,
            consumer,
            decoder: Utf8Decoder::new(),
        }
    }

    /// Write a text chunk: sink first, then the consumer.
    ///
    /// The consumer is called even for an empty chunk.
    pub fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.sink.write_all(text.as_bytes())?;
        self.consumer.consume(text)
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn consumer(&self) -> &C {
        &self.consumer
    }

    /// Take the sink back. The sink is not flushed or closed.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write, C: Consumer> Write for Tee<W, C> {
    /// Raw bytes go to the sink untouched. The consumer gets the decoded
    /// text; a chunk holding only part of a character is delivered with the
    /// write that completes it.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.write_all(buf)?;
        let text = self.decoder.decode(buf);
        if !text.is_empty() {
            self.consumer.consume(&text)?;
        }
        Ok(buf.len())
    }

    /// Flushes the sink. Bytes of an unfinished character are then handed
    /// to the consumer as U+FFFD.
    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()?;
        let tail = self.decoder.finish();
        if !tail.is_empty() {
            self.consumer.consume(&tail)?;
        }
        Ok(())
    }
}
