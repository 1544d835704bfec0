// src/exec/task_runner.rs

//! External tool process runner.

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{debug, info};

use crate::engine::TaskOutcome;
use crate::exec::shell::shell_command;

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Run `cmd` through the platform shell in `cwd` and wait for it.
///
/// Tool output is forwarded line by line to our own stdout/stderr, prefixed
/// with `label`, and fully drained before this returns so the next task's
/// output never interleaves with it.
pub async fn run_command(
    label: &str,
    cmd: &str,
    cwd: &Path,
    envs: &[(String, String)],
) -> Result<TaskOutcome> {
    info!(task = %label, cmd = %cmd, "starting tool process");

    let mut command = shell_command(cmd);
    command
        .current_dir(cwd)
        .envs(envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = command
        .spawn()
        .with_context(|| format!("spawning process for task '{label}'"))?;

    let stdout = child
        .stdout
        .take()
        .map(|s| tokio::spawn(forward_lines(s, label.to_string(), Stream::Stdout)));
    let stderr = child
        .stderr
        .take()
        .map(|s| tokio::spawn(forward_lines(s, label.to_string(), Stream::Stderr)));

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process of task '{label}'"))?;

    for forwarder in [stdout, stderr].into_iter().flatten() {
        let _ = forwarder.await;
    }

    let code = status.code().unwrap_or(-1);
    info!(
        task = %label,
        exit_code = code,
        success = status.success(),
        "tool process exited"
    );

    Ok(if status.success() {
        TaskOutcome::Success
    } else {
        TaskOutcome::Failed(code)
    })
}

async fn forward_lines<R>(reader: R, label: String, stream: Stream)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match stream {
            Stream::Stdout => println!("[{label}] {line}"),
            Stream::Stderr => {
                debug!(task = %label, "stderr: {}", line);
                eprintln!("[{label}] {line}");
            }
        }
    }
}
