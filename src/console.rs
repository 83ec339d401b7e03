// src/console.rs

//! Bridge between intercepted streams and the embedder's console.
//!
//! A [`HostConsole`] is the pair of print functions an embedding engine
//! exposes: one for normal text and one for errors. Either can be replaced
//! with a custom function; unset ones fall back to this process's own
//! stdout/stderr. [`HostConsole::attach`] installs the standard pair of
//! interceptors in front of a [`Streams`] value.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Arc;

use tracing::{error, info};

use crate::config::{ConsoleConfig, ConsoleTarget};
use crate::errors::{Result, StreamtapError};
use crate::intercept::{Consumer, InterceptMode, WriterConsumer};
use crate::logging::CONSOLE_TARGET;
use crate::streams::{Redirect, SharedSink, Stream, Streams};

/// Console print function.
pub type PrintFn = Box<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
pub struct HostConsole {
    stdout_fn: Option<PrintFn>,
    stderr_fn: Option<PrintFn>,
}

impl HostConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// A console that reports through `tracing` under [`CONSOLE_TARGET`].
    pub fn logging() -> Self {
        let mut console = Self::new();
        console.set_stdout_fn(|text| info!(target: CONSOLE_TARGET, "{}", log_line(text)));
        console.set_stderr_fn(|text| error!(target: CONSOLE_TARGET, "{}", log_line(text)));
        console
    }

    pub fn set_stdout_fn(&mut self, f: impl Fn(&str) + Send + Sync + 'static) {
        self.stdout_fn = Some(Box::new(f));
    }

    pub fn set_stderr_fn(&mut self, f: impl Fn(&str) + Send + Sync + 'static) {
        self.stderr_fn = Some(Box::new(f));
    }

    pub fn print(&self, text: &str) {
        match &self.stdout_fn {
            Some(f) => f(text),
            None => print!("{text}"),
        }
    }

    pub fn print_err(&self, text: &str) {
        match &self.stderr_fn {
            Some(f) => f(text),
            None => eprint!("{text}"),
        }
    }

    pub fn emit(&self, stream: Stream, text: &str) {
        match stream {
            Stream::Stdout => self.print(text),
            Stream::Stderr => self.print_err(text),
        }
    }

    /// Consumer forwarding to [`print`](Self::print) or
    /// [`print_err`](Self::print_err).
    pub fn consumer(self: &Arc<Self>, stream: Stream) -> ConsoleConsumer {
        ConsoleConsumer {
            console: Arc::clone(self),
            stream,
        }
    }

    /// Redirect both streams into this console: stdout line-buffered and
    /// undecorated, stderr line-buffered and wrapped in red markup.
    pub fn attach<'s>(self: &Arc<Self>, streams: &'s mut Streams) -> Redirect<'s> {
        self.attach_with(
            streams,
            InterceptMode::plain_lines(),
            InterceptMode::error_lines(),
        )
    }

    pub fn attach_with<'s>(
        self: &Arc<Self>,
        streams: &'s mut Streams,
        stdout: InterceptMode,
        stderr: InterceptMode,
    ) -> Redirect<'s> {
        streams
            .redirect(Stream::Stdout, self.consumer(Stream::Stdout), stdout)
            .and(Stream::Stderr, self.consumer(Stream::Stderr), stderr)
    }
}

/// Fold a console chunk onto one log line.
///
/// Trailing line terminators are dropped, as is a terminator sitting right
/// before closing markup, so `"[color=red]oops\n[/color]"` logs as
/// `"[color=red]oops[/color]"`.
pub fn log_line(text: &str) -> String {
    text.trim_end_matches(['\r', '\n'])
        .replace("\r\n[/", "[/")
        .replace("\n[/", "[/")
}

impl fmt::Debug for HostConsole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostConsole")
            .field("stdout_fn", &self.stdout_fn.is_some())
            .field("stderr_fn", &self.stderr_fn.is_some())
            .finish()
    }
}

/// One stream's view of a [`HostConsole`].
#[derive(Debug, Clone)]
pub struct ConsoleConsumer {
    console: Arc<HostConsole>,
    stream: Stream,
}

impl Consumer for ConsoleConsumer {
    fn consume(&mut self, text: &str) -> io::Result<()> {
        self.console.emit(self.stream, text);
        Ok(())
    }
}

/// A boxed consumer per stream, as selected by a `[console]` section.
pub struct Console {
    pub stdout: Box<dyn Consumer + Send>,
    pub stderr: Box<dyn Consumer + Send>,
}

impl Console {
    /// Build the consumers for `cfg`.
    ///
    /// The `file` target opens its file in append mode and shares it between
    /// both streams. Write failures reach the writer of the intercepted stream.
    pub fn open(cfg: &ConsoleConfig) -> Result<Self> {
        match cfg.target {
            ConsoleTarget::Log => Ok(Self::from_host(Arc::new(HostConsole::logging()))),
            ConsoleTarget::Inherit => Ok(Self::inherit(io::stdout(), io::stderr())),
            ConsoleTarget::File => {
                let path = cfg.path.as_ref().ok_or_else(|| {
                    StreamtapError::ConfigError(
                        "[console] target = \"file\" requires a `path`".to_string(),
                    )
                })?;
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                let shared = SharedSink::new(Box::new(file));
                Ok(Self {
                    stdout: Box::new(WriterConsumer::new(shared.clone())),
                    stderr: Box::new(WriterConsumer::new(shared)),
                })
            }
        }
    }

    /// Console text written straight to the given writers, normally this
    /// process's own stdout and stderr.
    pub fn inherit<O, E>(stdout: O, stderr: E) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            stdout: Box::new(WriterConsumer::new(stdout)),
            stderr: Box::new(WriterConsumer::new(stderr)),
        }
    }

    pub fn from_host(host: Arc<HostConsole>) -> Self {
        Self {
            stdout: Box::new(host.consumer(Stream::Stdout)),
            stderr: Box::new(host.consumer(Stream::Stderr)),
        }
    }

    /// Redirect both streams into these consumers.
    pub fn attach<'s>(
        self,
        streams: &'s mut Streams,
        stdout: InterceptMode,
        stderr: InterceptMode,
    ) -> Redirect<'s> {
        streams
            .redirect(Stream::Stdout, self.stdout, stdout)
            .and(Stream::Stderr, self.stderr, stderr)
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}
