//! Child process execution.
//!
//! Programs are run directly with an argument vector, never through a
//! shell, so scope names and directories need no quoting.

use crate::error::{DriftError, Result};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Result of running a program.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the program exited with code 0.
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Options for running a program.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with the inherited environment).
    pub env: HashMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

impl CommandOptions {
    /// Capture both streams.
    pub fn captured() -> Self {
        Self {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        }
    }
}

/// Output line from a streamed run.
#[derive(Debug, Clone)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Callback for streaming output.
pub type OutputCallback = Box<dyn Fn(OutputLine) + Send>;

fn display_command<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()));
    parts.join(" ")
}

fn build<S: AsRef<OsStr>>(program: &str, args: &[S], options: &CommandOptions) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd
}

/// Run `program` with `args` and wait for it.
///
/// A non-zero exit is reported in the result, not as an error. Only a
/// failure to start the program is an error.
pub fn execute<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    options: &CommandOptions,
) -> Result<CommandResult> {
    let start = Instant::now();
    let mut cmd = build(program, args, options);

    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    tracing::debug!("Running: {}", display_command(program, args));

    let output = cmd.output().map_err(|_| DriftError::CommandFailed {
        command: display_command(program, args),
        code: None,
    })?;

    let duration = start.elapsed();

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Run `program` and pass each output line to `callback` as it arrives.
///
/// Both streams are always captured in the returned result as well.
pub fn execute_streaming<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    options: &CommandOptions,
    callback: OutputCallback,
) -> Result<CommandResult> {
    let start = Instant::now();
    let command = display_command(program, args);
    let mut cmd = build(program, args, options);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!("Running: {}", command);

    let spawn_failed = || DriftError::CommandFailed {
        command: command.clone(),
        code: None,
    };

    let mut child = cmd.spawn().map_err(|_| spawn_failed())?;
    let stdout = child.stdout.take().ok_or_else(spawn_failed)?;
    let stderr = child.stderr.take().ok_or_else(spawn_failed)?;

    let (tx, rx) = mpsc::channel();
    let tx_stdout = tx.clone();
    let tx_stderr = tx;

    let stdout_handle = thread::spawn(move || {
        let reader = BufReader::new(stdout);
        let mut output = String::new();
        for line in reader.lines().map_while(std::result::Result::ok) {
            output.push_str(&line);
            output.push('\n');
            let _ = tx_stdout.send(OutputLine::Stdout(line));
        }
        output
    });

    let stderr_handle = thread::spawn(move || {
        let reader = BufReader::new(stderr);
        let mut output = String::new();
        for line in reader.lines().map_while(std::result::Result::ok) {
            output.push_str(&line);
            output.push('\n');
            let _ = tx_stderr.send(OutputLine::Stderr(line));
        }
        output
    });

    for line in rx {
        callback(line);
    }

    let stdout_output = stdout_handle.join().unwrap_or_default();
    let stderr_output = stderr_handle.join().unwrap_or_default();

    let status = child.wait().map_err(|_| spawn_failed())?;
    let duration = start.elapsed();

    if status.success() {
        Ok(CommandResult::success(
            stdout_output,
            stderr_output,
            duration,
        ))
    } else {
        Ok(CommandResult::failure(
            status.code(),
            stdout_output,
            stderr_output,
            duration,
        ))
    }
}
