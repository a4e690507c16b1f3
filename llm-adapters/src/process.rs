//! Subprocess execution with stdin input, bounded capture, and timeouts.

use crate::error::AdapterError;
use crate::types::RunResult;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio::time::timeout;

const MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024; // 10 MB
const GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Spawns `path` with `args`, writes `input` to its stdin, and collects its output.
///
/// A non-zero exit is reported as `AdapterError::NonZeroExit`; callers decide
/// whether that is fatal. On timeout the process receives SIGTERM, then
/// SIGKILL after a grace period.
///
/// # Errors
///
/// Returns an [`AdapterError`] if the process cannot be spawned, times out,
/// exits unsuccessfully, or produces more than 10 MB on either stream.
pub async fn run_with_input(
    path: &Path,
    args: &[OsString],
    input: &str,
    limit: Duration,
    cwd: Option<&Path>,
) -> Result<RunResult, AdapterError> {
    let start_time = Instant::now();

    let mut child = spawn_child(path, args, cwd)?;
    let mut stdin = child.stdin.take().ok_or(AdapterError::NoStdin)?;
    let stdout = child.stdout.take().ok_or(AdapterError::NoStdout)?;
    let stderr = child.stderr.take().ok_or(AdapterError::NoStderr)?;
    let pid = child.id().ok_or(AdapterError::NoPid)?;

    let input = input.to_owned();
    let writer = tokio::spawn(async move {
        stdin.write_all(input.as_bytes()).await?;
        // The pipe closes when `stdin` drops at the end of this task.
        stdin.shutdown().await
    });
    let stdout_task = tokio::spawn(read_bounded(stdout));
    let stderr_task = tokio::spawn(read_bounded(stderr));

    let collected = timeout(
        limit,
        collect_output(&mut child, writer, stdout_task, stderr_task),
    )
    .await;
    let elapsed = start_time.elapsed();

    match collected {
        Ok(result) => {
            let (stdout, stderr, status) = result?;
            let exit_code = status.code().unwrap_or(-1);

            if exit_code != 0 {
                return Err(AdapterError::NonZeroExit {
                    exit_code,
                    elapsed,
                    stdout,
                    stderr,
                });
            }

            Ok(RunResult {
                stdout,
                stderr,
                exit_code,
                duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            })
        }
        Err(_elapsed) => {
            tracing::warn!(pid, ?elapsed, "Subprocess timed out, shutting down");
            if let Err(e) = graceful_shutdown(&mut child, pid).await {
                tracing::warn!(pid, error = %e, "Graceful shutdown failed");
            }
            Err(AdapterError::Timeout { elapsed, pid })
        }
    }
}

fn spawn_child(path: &Path, args: &[OsString], cwd: Option<&Path>) -> Result<Child, AdapterError> {
    let mut cmd = Command::new(path);
    cmd.args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    cmd.spawn().map_err(|e| AdapterError::SpawnFailed {
        stage: "spawn subprocess".to_string(),
        source: e,
    })
}

async fn collect_output(
    child: &mut Child,
    writer: JoinHandle<std::io::Result<()>>,
    stdout_task: JoinHandle<Result<String, AdapterError>>,
    stderr_task: JoinHandle<Result<String, AdapterError>>,
) -> Result<(String, String, std::process::ExitStatus), AdapterError> {
    match writer.await {
        Ok(Ok(())) => {}
        // The child may exit without reading all of its input; its exit
        // status is what decides success.
        Ok(Err(e)) => tracing::debug!(error = %e, "Writing prompt to stdin failed"),
        Err(source) => {
            return Err(AdapterError::StreamFailed {
                stage: "stdin".to_string(),
                source,
            })
        }
    }

    let status = child.wait().await.map_err(|e| AdapterError::SpawnFailed {
        stage: "wait for child".to_string(),
        source: e,
    })?;

    let stdout = stdout_task
        .await
        .map_err(|source| AdapterError::StreamFailed {
            stage: "stdout".to_string(),
            source,
        })??;
    let stderr = stderr_task
        .await
        .map_err(|source| AdapterError::StreamFailed {
            stage: "stderr".to_string(),
            source,
        })??;

    Ok((stdout, stderr, status))
}

/// Reads a stream to the end, refusing to buffer more than the output limit.
async fn read_bounded<R>(reader: R) -> Result<String, AdapterError>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = Vec::new();
    let mut limited = reader.take(MAX_OUTPUT_BYTES as u64 + 1);
    limited
        .read_to_end(&mut buffer)
        .await
        .map_err(|e| AdapterError::SpawnFailed {
            stage: "read output".to_string(),
            source: e,
        })?;

    if buffer.len() > MAX_OUTPUT_BYTES {
        return Err(AdapterError::OutputTruncated {
            captured_bytes: buffer.len(),
            limit_bytes: MAX_OUTPUT_BYTES,
        });
    }

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Graceful shutdown: SIGTERM, wait grace period, then SIGKILL.
#[cfg(unix)]
async fn graceful_shutdown(child: &mut Child, pid: u32) -> Result<(), AdapterError> {
    use nix::sys::signal::{self, Signal};
    use nix::unistd::Pid;

    let raw_pid = i32::try_from(pid).map_err(|_| AdapterError::NoPid)?;
    signal::kill(Pid::from_raw(raw_pid), Signal::SIGTERM).map_err(|e| {
        AdapterError::SignalFailed {
            signal: "SIGTERM".to_string(),
            pid,
            source: e,
        }
    })?;

    match timeout(GRACE_PERIOD, child.wait()).await {
        Ok(Ok(_status)) => Ok(()),
        Ok(Err(e)) => Err(AdapterError::SpawnFailed {
            stage: "graceful_shutdown wait".to_string(),
            source: e,
        }),
        Err(_) => force_kill(child).await,
    }
}

#[cfg(not(unix))]
async fn graceful_shutdown(child: &mut Child, _pid: u32) -> Result<(), AdapterError> {
    force_kill(child).await
}

async fn force_kill(child: &mut Child) -> Result<(), AdapterError> {
    child.kill().await.map_err(|e| AdapterError::SpawnFailed {
        stage: "SIGKILL".to_string(),
        source: e,
    })
}
