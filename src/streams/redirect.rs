// src/streams/redirect.rs

//! Scoped interceptor installation.

use std::io::{self, Write};
use std::ops::{Deref, DerefMut};

use tracing::{debug, warn};

use crate::intercept::{Consumer, InterceptMode};

use super::{SharedSink, Stream, Streams};

/// Guard returned by [`Streams::redirect`].
///
/// While alive, the redirected streams write through their interceptors.
/// On drop, each interceptor is flushed and the writer it replaced is put
/// back, most recent first. Use [`Redirect::restore`] to see flush errors;
/// `Drop` can only log them.
pub struct Redirect<'a> {
    streams: &'a mut Streams,
    saved: Vec<(Stream, SharedSink)>,
}

impl<'a> Redirect<'a> {
    pub(crate) fn new(streams: &'a mut Streams) -> Self {
        Self {
            streams,
            saved: Vec::new(),
        }
    }

    /// Redirect one more stream under the same guard.
    ///
    /// Redirecting a stream that is already redirected stacks the new
    /// interceptor in front of the existing one.
    pub fn and<C>(mut self, stream: Stream, consumer: C, mode: InterceptMode) -> Self
    where
        C: Consumer + Send + 'static,
    {
        let original = self.streams.install(stream, Box::new(io::sink()));
        let shared = SharedSink::new(original);
        let interceptor = mode.build(shared.clone(), consumer);
        self.streams.install(stream, interceptor);
        self.saved.push((stream, shared));
        debug!(%stream, depth = self.saved.len(), "interceptor installed");
        self
    }

    /// Streams currently redirected by this guard, oldest first.
    pub fn redirected(&self) -> impl Iterator<Item = Stream> + '_ {
        self.saved.iter().map(|(stream, _)| *stream)
    }

    /// Flush the interceptors and restore the original writers now.
    ///
    /// Every stream is restored even if a flush fails; the first error is
    /// returned.
    pub fn restore(mut self) -> io::Result<()> {
        self.restore_all()
    }

    fn restore_all(&mut self) -> io::Result<()> {
        let mut first_err = None;

        while let Some((stream, shared)) = self.saved.pop() {
            let mut interceptor = self.streams.install(stream, Box::new(io::sink()));
            if let Err(e) = interceptor.flush() {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
            // The interceptor holds a clone of `shared`; drop it first so the
            // original writer can be unwrapped.
            drop(interceptor);
            self.streams.install(stream, shared.into_inner());
            debug!(%stream, "original writer restored");
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Deref for Redirect<'_> {
    type Target = Streams;

    fn deref(&self) -> &Streams {
        &*self.streams
    }
}

impl DerefMut for Redirect<'_> {
    fn deref_mut(&mut self) -> &mut Streams {
        &mut *self.streams
    }
}

impl Drop for Redirect<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.restore_all() {
            warn!(error = %e, "flushing interceptor during restore failed");
        }
    }
}

impl std::fmt::Debug for Redirect<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Redirect")
            .field("redirected", &self.redirected().collect::<Vec<_>>())
            .finish()
    }
}
