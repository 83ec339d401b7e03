// src/exec/task_runner.rs

//! Child process runner.

use std::io::{self, Write};

use anyhow::{Context, Result, anyhow};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::streams::{Stream, Streams};

use super::command::shell_command;

/// Run `cmd` through the platform shell and forward its output.
///
/// Child stdout lines are written to `streams.stdout()`, stderr lines to
/// `streams.stderr()`, in the order they arrive. Each line is written as two
/// chunks, the text and then its `"\n"`, the way `print` does it, which is
/// what line-buffered interceptors flush on.
///
/// Returns the child's exit code (`-1` if it was killed by a signal).
pub async fn run_command(cmd: &str, streams: &mut Streams) -> Result<i32> {
    info!(cmd = %cmd, "starting command");

    let mut child = shell_command(cmd)
        .spawn()
        .with_context(|| format!("spawning process for command '{cmd}'"))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("child stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("child stderr was not piped"))?;

    let mut out_reader = BufReader::new(stdout);
    let mut err_reader = BufReader::new(stderr);
    let mut out_line = Vec::new();
    let mut err_line = Vec::new();
    let mut out_open = true;
    let mut err_open = true;

    // `read_until` is cancel safe: bytes read by a losing branch stay in its
    // buffer and the next call continues from there.
    while out_open || err_open {
        tokio::select! {
            read = out_reader.read_until(b'\n', &mut out_line), if out_open => {
                let n = read.context("reading child stdout")?;
                if n == 0 {
                    debug!(stream = %Stream::Stdout, "child stream closed");
                    out_open = false;
                } else {
                    forward_line(streams.stdout(), &out_line)
                        .context("forwarding child stdout")?;
                    out_line.clear();
                }
            }
            read = err_reader.read_until(b'\n', &mut err_line), if err_open => {
                let n = read.context("reading child stderr")?;
                if n == 0 {
                    debug!(stream = %Stream::Stderr, "child stream closed");
                    err_open = false;
                } else {
                    forward_line(streams.stderr(), &err_line)
                        .context("forwarding child stderr")?;
                    err_line.clear();
                }
            }
        }
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process of command '{cmd}'"))?;

    streams.flush().context("flushing streams")?;

    let code = status.code().unwrap_or(-1);
    info!(
        cmd = %cmd,
        exit_code = code,
        success = status.success(),
        "command exited"
    );

    Ok(code)
}

/// Write one line read from a child: the text, then its newline as a
/// separate chunk. A final line without a newline is written as is.
pub fn forward_line(writer: &mut dyn Write, line: &[u8]) -> io::Result<()> {
    match line.strip_suffix(b"\n") {
        Some(text) => {
            writer.write_all(text)?;
            writer.write_all(b"\n")
        }
        None => writer.write_all(line),
    }
}
