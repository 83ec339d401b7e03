#![allow(dead_code)]

use std::path::PathBuf;

use streamtap::config::{
    ConfigFile, ConsoleConfig, ConsoleTarget, ModeKind, RawConfigFile, StreamConfig,
};
use streamtap::errors::Result;
use streamtap::intercept::FlushPolicy;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn with_stdout(mut self, stream: StreamConfig) -> Self {
        self.config.stdout = stream;
        self
    }

    pub fn with_stderr(mut self, stream: StreamConfig) -> Self {
        self.config.stderr = stream;
        self
    }

    pub fn with_console_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.console = ConsoleConfig {
            target: ConsoleTarget::File,
            path: Some(path.into()),
        };
        self
    }

    pub fn with_console_target(mut self, target: ConsoleTarget) -> Self {
        self.config.console.target = target;
        self
    }

    pub fn try_build(self) -> Result<ConfigFile> {
        ConfigFile::try_from(self.config)
    }

    pub fn build(self) -> ConfigFile {
        self.try_build()
            .expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `StreamConfig`.
pub struct StreamConfigBuilder {
    stream: StreamConfig,
}

impl StreamConfigBuilder {
    pub fn buffered() -> Self {
        Self {
            stream: StreamConfig::stdout_default(),
        }
    }

    pub fn passthrough() -> Self {
        let mut stream = StreamConfig::stdout_default();
        stream.mode = ModeKind::Passthrough;
        Self { stream }
    }

    pub fn decorated(mut self, start: &str, end: &str) -> Self {
        self.stream.start = start.to_string();
        self.stream.end = end.to_string();
        self
    }

    pub fn flush_on(mut self, policy: FlushPolicy) -> Self {
        self.stream.flush_on = policy;
        self
    }

    pub fn build(self) -> StreamConfig {
        self.stream
    }
}
