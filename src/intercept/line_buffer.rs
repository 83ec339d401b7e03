// src/intercept/line_buffer.rs

//! Line-buffered interceptor with start/end decoration.
//!
//! Text accumulates until a line is complete. The completed line is written
//! to the sink as-is and handed to the consumer wrapped in the decoration,
//! e.g. `[color=red]...[/color]` so a console can colour error output.

use std::io::{self, Write};
use std::str::FromStr;

use serde::Deserialize;

use super::consumer::Consumer;
use super::decode::Utf8Decoder;

/// Prefix/suffix wrapped around each flushed chunk on its way to the
/// consumer. The sink never sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoration {
    pub start: String,
    pub end: String,
}

impl Decoration {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Colour markup understood by the host console, e.g. `[color=red]`.
    pub fn color(name: &str) -> Self {
        Self::new(format!("[color={name}]"), "[/color]")
    }

    /// The decoration used for standard error.
    pub fn error() -> Self {
        Self::color("red")
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }
}

/// When a [`LineBuffer`] considers a line complete.
///
/// - `ExactNewline`: only a write consisting of exactly `"\n"` completes the
///   line. Writers that send the newline as its own chunk, like
///   `writeln!(w, "{}", x)` or the command runner, flush per line. A chunk
///   with the newline inside it stays buffered until the next bare `"\n"` or
///   an explicit flush; `writeln!(w, "hello")` is one `"hello\n"` chunk and
///   does not flush. Use `AnyNewline` for such writers.
/// - `AnyNewline`: chunks are split after every newline and each completed
///   line is flushed on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlushPolicy {
    #[default]
    ExactNewline,
    AnyNewline,
}

impl FromStr for FlushPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact_newline" | "exact" => Ok(FlushPolicy::ExactNewline),
            "any_newline" | "any" => Ok(FlushPolicy::AnyNewline),
            other => Err(format!(
                "invalid flush_on: {other} (expected \"exact_newline\" or \"any_newline\")"
            )),
        }
    }
}

/// Buffered, decorated stream interceptor.
///
/// The decorated buffer always starts with `decoration.start`. Once a line
/// completes, `decoration.end` is appended and the buffer is flushed:
/// the raw text goes to the sink, the decorated text to the consumer, and
/// the buffer resets to `decoration.start`.
#[derive(Debug)]
pub struct LineBuffer<W, C> {
    sink: W,
    consumer: C,
    decoration: Decoration,
    policy: FlushPolicy,
    buffer: String,
    raw: Vec<u8>,
    decoder: Utf8Decoder,
}

impl<W: Write, C: Consumer> LineBuffer<W, C> {
    pub fn new(sink: W, consumer: C, decoration: Decoration) -> Self {
        Self {
            sink,
            consumer,
            buffer: decoration.start.clone(),
            decoration,
            policy: FlushPolicy::default(),
            raw: Vec::new(),
            decoder: Utf8Decoder::new(),
        }
    }

    pub fn with_policy(mut self, policy: FlushPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FlushPolicy {
        self.policy
    }

    pub fn decoration(&self) -> &Decoration {
        &self.decoration
    }

    /// Decorated text waiting for the consumer, including `decoration.start`.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Raw bytes written since the last flush, not yet sent to the sink.
    pub fn pending(&self) -> &[u8] {
        &self.raw
    }

    pub fn consumer(&self) -> &C {
        &self.consumer
    }

    /// Buffer a text chunk, flushing if it completes a line.
    pub fn write_str(&mut self, text: &str) -> io::Result<()> {
        match self.policy {
            FlushPolicy::ExactNewline => self.accept(text.as_bytes(), text, text == "\n"),
            FlushPolicy::AnyNewline => {
                for line in text.split_inclusive('\n') {
                    self.accept(line.as_bytes(), line, line.ends_with('\n'))?;
                }
                Ok(())
            }
        }
    }

    /// Flush whatever is pending and hand the sink back.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.flush()?;
        Ok(self.sink)
    }

    fn accept(&mut self, raw: &[u8], text: &str, completes_line: bool) -> io::Result<()> {
        self.raw.extend_from_slice(raw);
        self.buffer.push_str(text);
        if completes_line {
            self.buffer.push_str(&self.decoration.end);
            self.emit()?;
        }
        Ok(())
    }

    // On error the buffers are left as they were so the caller sees the
    // same state the failed flush saw.
    fn emit(&mut self) -> io::Result<()> {
        self.sink.write_all(&self.raw)?;
        self.sink.flush()?;
        let text = std::mem::replace(&mut self.buffer, self.decoration.start.clone());
        self.raw.clear();
        self.consumer.consume(&text)
    }
}

impl<W: Write, C: Consumer> Write for LineBuffer<W, C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.policy {
            FlushPolicy::ExactNewline => {
                let text = self.decoder.decode(buf);
                self.accept(buf, &text, buf == b"\n")?;
            }
            FlushPolicy::AnyNewline => {
                // '\n' never occurs inside a multi-byte sequence, so splitting
                // the bytes here cannot cut a character in half.
                for line in buf.split_inclusive(|b| *b == b'\n') {
                    let text = self.decoder.decode(line);
                    self.accept(line, &text, line.ends_with(b"\n"))?;
                }
            }
        }
        Ok(buf.len())
    }

    /// Emits the pending line, if any text was written since the last
    /// flush. A buffer holding only `decoration.start` is not emitted.
    /// Bytes of an unfinished character are emitted as U+FFFD.
    fn flush(&mut self) -> io::Result<()> {
        if self.raw.is_empty() {
            return self.sink.flush();
        }
        let tail = self.decoder.finish();
        self.buffer.push_str(&tail);
        self.emit()
    }
}
