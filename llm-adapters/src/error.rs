//! Error types returned by adapter operations.

use std::time::Duration;
use thiserror::Error;

/// Errors from locating, spawning, or talking to a model backend.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// No usable executable was found.
    #[error("Executable not found: {0}")]
    ExecutableNotFound(String),

    /// An I/O step of the subprocess lifecycle failed.
    #[error("Subprocess failed at stage '{stage}': {source}")]
    SpawnFailed {
        /// Lifecycle stage, e.g. `"spawn subprocess"`.
        stage: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The subprocess did not finish in time and was shut down.
    #[error("Process timed out after {elapsed:?} (PID: {pid})")]
    Timeout {
        /// Time waited before shutdown.
        elapsed: Duration,
        /// Process id.
        pid: u32,
    },

    /// The subprocess exited unsuccessfully.
    #[error("Process exited with code {exit_code} (elapsed: {elapsed:?})\nSTDERR: {stderr}")]
    NonZeroExit {
        /// Exit code, `-1` when killed by a signal.
        exit_code: i32,
        /// Wall time of the run.
        elapsed: Duration,
        /// Captured stdout.
        stdout: String,
        /// Captured stderr.
        stderr: String,
    },

    /// A reader or writer task panicked or was cancelled.
    #[error("Stream task failed at stage '{stage}': {source}")]
    StreamFailed {
        /// Which stream.
        stage: String,
        /// Join failure.
        #[source]
        source: tokio::task::JoinError,
    },

    /// Sending a signal to the subprocess failed.
    #[cfg(unix)]
    #[error("Failed to send signal {signal} to PID {pid}: {source}")]
    SignalFailed {
        /// Signal name.
        signal: String,
        /// Process id.
        pid: u32,
        /// Errno from the kill call.
        #[source]
        source: nix::errno::Errno,
    },

    /// The child's stdin pipe was not captured.
    #[error("Child process stdin was not captured")]
    NoStdin,

    /// The child's stdout pipe was not captured.
    #[error("Child process stdout was not captured")]
    NoStdout,

    /// The child's stderr pipe was not captured.
    #[error("Child process stderr was not captured")]
    NoStderr,

    /// The child exited before its PID could be read.
    #[error("Could not get PID from child process")]
    NoPid,

    /// A stream exceeded the capture limit.
    #[error("Output truncated: captured {captured_bytes} bytes (limit: {limit_bytes} bytes)")]
    OutputTruncated {
        /// Bytes read before giving up.
        captured_bytes: usize,
        /// The limit.
        limit_bytes: usize,
    },

    /// The HTTP request could not be completed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Server returned status {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// A backend response did not have the expected shape.
    #[error("Failed to parse backend response: {0}")]
    ResponseParsing(String),
}
