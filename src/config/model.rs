// src/config/model.rs

use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::intercept::{Decoration, FlushPolicy, InterceptMode};

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [stdout]
/// mode = "buffered"
///
/// [stderr]
/// mode = "buffered"
/// start = "[color=red]"
/// end = "[/color]"
///
/// [console]
/// target = "file"
/// path = "console.log"
/// ```
///
/// All sections are optional. An empty file gives the standard layout:
/// plain buffered stdout, red-decorated buffered stderr, console to the log.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    #[serde(default = "StreamConfig::stdout_default")]
    pub stdout: StreamConfig,

    #[serde(default = "StreamConfig::stderr_default")]
    pub stderr: StreamConfig,

    #[serde(default)]
    pub console: ConsoleConfig,
}

impl Default for RawConfigFile {
    fn default() -> Self {
        Self {
            stdout: StreamConfig::stdout_default(),
            stderr: StreamConfig::stderr_default(),
            console: ConsoleConfig::default(),
        }
    }
}

/// Validated configuration. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub stdout: StreamConfig,
    pub stderr: StreamConfig,
    pub console: ConsoleConfig,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            stdout: raw.stdout,
            stderr: raw.stderr,
            console: raw.console,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(RawConfigFile::default())
    }
}

/// `[stdout]` / `[stderr]` sections.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreamConfig {
    #[serde(default)]
    pub mode: ModeKind,

    /// Prefix for every chunk sent to the console (buffered mode only).
    #[serde(default)]
    pub start: String,

    /// Suffix for every chunk sent to the console (buffered mode only).
    #[serde(default)]
    pub end: String,

    #[serde(default)]
    pub flush_on: FlushPolicy,
}

impl StreamConfig {
    pub fn stdout_default() -> Self {
        Self {
            mode: ModeKind::Buffered,
            start: String::new(),
            end: String::new(),
            flush_on: FlushPolicy::default(),
        }
    }

    pub fn stderr_default() -> Self {
        let Decoration { start, end } = Decoration::error();
        Self {
            mode: ModeKind::Buffered,
            start,
            end,
            flush_on: FlushPolicy::default(),
        }
    }

    pub fn decoration(&self) -> Decoration {
        Decoration::new(self.start.clone(), self.end.clone())
    }

    /// The interceptor this section asks for.
    pub fn intercept_mode(&self) -> InterceptMode {
        match self.mode {
            ModeKind::Passthrough => InterceptMode::Passthrough,
            ModeKind::Buffered => InterceptMode::Buffered {
                decoration: self.decoration(),
                policy: self.flush_on,
            },
        }
    }
}

/// `mode = "passthrough" | "buffered"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    Passthrough,
    #[default]
    Buffered,
}

impl FromStr for ModeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "passthrough" => Ok(ModeKind::Passthrough),
            "buffered" => Ok(ModeKind::Buffered),
            other => Err(format!(
                "invalid mode: {other} (expected \"passthrough\" or \"buffered\")"
            )),
        }
    }
}

/// `[console]` section: where intercepted text ends up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub target: ConsoleTarget,

    /// Output file, required when `target = "file"`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// - `Log`: emit console text as tracing events (stdout at `info`, stderr
///   at `error`).
/// - `File`: append console text to `path`.
/// - `Inherit`: print console text on this process's own streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTarget {
    #[default]
    Log,
    File,
    Inherit,
}

impl FromStr for ConsoleTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "log" => Ok(ConsoleTarget::Log),
            "file" => Ok(ConsoleTarget::File),
            "inherit" => Ok(ConsoleTarget::Inherit),
            other => Err(format!(
                "invalid console target: {other} (expected \"log\", \"file\" or \"inherit\")"
            )),
        }
    }
}
