// src/intercept/mod.rs

//! Stream interceptors.
//!
//! An interceptor stands in for an output sink. It passes every write
//! through to the sink and forwards a copy of the text to a [`Consumer`].
//!
//! - [`tee`] holds the pass-through variant: write, then call back.
//! - [`line_buffer`] holds the buffered variant with start/end decoration.
//! - [`consumer`] defines the callback contract and its stock adapters.
//! - [`decode`] turns byte writes back into text for the consumer.

pub mod consumer;
pub mod decode;
pub mod line_buffer;
pub mod tee;

use std::io::Write;

pub use consumer::{Consumer, FnConsumer, WriterConsumer, from_fn};
pub use decode::Utf8Decoder;
pub use line_buffer::{Decoration, FlushPolicy, LineBuffer};
pub use tee::Tee;

/// Which interceptor to build in front of a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptMode {
    /// [`Tee`]: forward every chunk immediately.
    Passthrough,
    /// [`LineBuffer`]: forward completed, decorated lines.
    Buffered {
        decoration: Decoration,
        policy: FlushPolicy,
    },
}

impl InterceptMode {
    /// Buffered, undecorated. The standard output layout.
    pub fn plain_lines() -> Self {
        InterceptMode::Buffered {
            decoration: Decoration::none(),
            policy: FlushPolicy::default(),
        }
    }

    /// Buffered and wrapped in red markup. The standard error layout.
    pub fn error_lines() -> Self {
        InterceptMode::Buffered {
            decoration: Decoration::error(),
            policy: FlushPolicy::default(),
        }
    }

    /// Wrap `sink` in the interceptor this mode describes.
    pub fn build<W, C>(self, sink: W, consumer: C) -> Box<dyn Write + Send>
    where
        W: Write + Send + 'static,
        C: Consumer + Send + 'static,
    {
        match self {
            InterceptMode::Passthrough => Box::new(Tee::new(sink, consumer)),
            InterceptMode::Buffered { decoration, policy } => {
                Box::new(LineBuffer::new(sink, consumer, decoration).with_policy(policy))
            }
        }
    }
}
