//! External command execution.
//!
//! [`ProcessInvoker`] is the seam between the refresh pipeline and the real
//! daemon binary; tests swap in a scripted implementation.

use std::future::Future;
use std::process::Stdio;

use tokio::process::Command;

use yadisk_core::ProcessResult;

use crate::error::{spawn_err, IndicatorError};

/// Runs one command to completion and captures both output streams.
///
/// No timeout and no retry: a process that never exits keeps the returned
/// future pending forever. Dropping the future does not kill the process.
pub trait ProcessInvoker: Send + Sync + 'static {
    fn run(
        &self,
        argv: &[String],
    ) -> impl Future<Output = Result<ProcessResult, IndicatorError>> + Send;
}

/// [`ProcessInvoker`] backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioInvoker;

impl ProcessInvoker for TokioInvoker {
    async fn run(&self, argv: &[String]) -> Result<ProcessResult, IndicatorError> {
        let (program, args) = argv.split_first().ok_or(IndicatorError::EmptyCommand)?;

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_err(program.as_str(), e))?;

        tracing::trace!(program = %program, pid = ?child.id(), "spawned");

        let output = child
            .wait_with_output()
            .await
            .map_err(|source| IndicatorError::Capture {
                program: program.clone(),
                source,
            })?;

        Ok(ProcessResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }
}
