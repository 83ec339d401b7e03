// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `streamtap`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "streamtap",
    version,
    about = "Run a command and tee its stdout/stderr into a console.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// If omitted, `Streamtap.toml` is used when it exists in the current
    /// directory; otherwise built-in defaults apply.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Send console text to this file instead of the configured target.
    #[arg(long, value_name = "PATH")]
    pub console_file: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STREAMTAP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load + validate the config, print the interceptor layout, run nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Command to run, passed to the platform shell.
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND",
        required_unless_present = "dry_run"
    )]
    pub command: Vec<String>,
}

impl CliArgs {
    /// The command words joined into a single shell string.
    pub fn shell_command(&self) -> String {
        self.command.join(" ")
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
