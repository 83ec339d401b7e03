// src/exec/mod.rs

//! Process execution layer.
//!
//! Runs a shell command with piped stdout/stderr and replays every line it
//! prints into a [`Streams`](crate::streams::Streams) value, so whatever
//! interceptors are installed there see the child's output.
//!
//! - [`command`] builds the platform shell invocation.
//! - [`task_runner`] drives the child process and forwards its output.

pub mod command;
pub mod task_runner;

pub use command::shell_command;
pub use task_runner::{forward_line, run_command};
