// src/exec/command.rs

use std::process::Stdio;

use tokio::process::Command;

/// Build a shell command appropriate for the platform, with stdout and
/// stderr piped back to us and stdin inherited.
pub fn shell_command(cmd: &str) -> Command {
    let mut command = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd);
        c
    };

    command
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    command
}
