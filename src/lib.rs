// src/lib.rs

pub mod cli;
pub mod config;
pub mod console;
pub mod errors;
pub mod exec;
pub mod intercept;
pub mod logging;
pub mod streams;

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, ConsoleTarget, load_or_default, validate_config};
use crate::console::Console;
use crate::exec::run_command;
use crate::streams::Streams;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (+ `--console-file` override)
/// - the console consumers
/// - interceptors in front of the process streams
/// - the child command
///
/// Returns the exit code the process should end with.
pub async fn run(args: CliArgs) -> Result<i32> {
    let mut cfg = load_or_default(args.config.as_deref().map(Path::new))?;

    if let Some(ref path) = args.console_file {
        cfg.console.target = ConsoleTarget::File;
        cfg.console.path = Some(path.into());
        validate_config(&cfg)?;
    }

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(0);
    }

    let console = Console::open(&cfg.console).context("opening console")?;
    let code = tee_command(&cfg, &args.shell_command(), console, Streams::process()).await?;

    info!(exit_code = code, "done");
    Ok(code)
}

/// Run `cmd` with its output passed through `process` and copied into
/// `console`, using the interceptor layout from `cfg`.
///
/// With `target = "inherit"` the console itself writes to the process
/// streams, so `process` is replaced by discarding sinks and each line is
/// printed once.
pub async fn tee_command(
    cfg: &ConfigFile,
    cmd: &str,
    console: Console,
    process: Streams,
) -> Result<i32> {
    let mut streams = match cfg.console.target {
        ConsoleTarget::Inherit => Streams::new(io::sink(), io::sink()),
        ConsoleTarget::Log | ConsoleTarget::File => process,
    };

    let mut redirect = console.attach(
        &mut streams,
        cfg.stdout.intercept_mode(),
        cfg.stderr.intercept_mode(),
    );
    let code = run_command(cmd, &mut redirect).await?;
    redirect.restore().context("restoring process streams")?;
    Ok(code)
}

/// Simple dry-run output: print how each stream would be intercepted.
fn print_dry_run(cfg: &ConfigFile) {
    println!("streamtap dry-run");
    for (name, stream) in [("stdout", &cfg.stdout), ("stderr", &cfg.stderr)] {
        println!("  {name}:");
        println!("      mode: {:?}", stream.mode);
        if !stream.start.is_empty() {
            println!("      start: {:?}", stream.start);
        }
        if !stream.end.is_empty() {
            println!("      end: {:?}", stream.end);
        }
        println!("      flush_on: {:?}", stream.flush_on);
    }
    println!("  console: {:?}", cfg.console.target);
    if let Some(ref path) = cfg.console.path {
        println!("      path: {}", path.display());
    }

    debug!("dry-run complete (no execution)");
}
