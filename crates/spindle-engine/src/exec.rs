//! Concurrent execution of command requests.
//!
//! Every request gets its own tokio task. The join handles are kept in
//! discovery order, so the resulting edits follow document order no matter
//! which command finishes first. The tasks do not outlive the call: dropping
//! an unfinished [`Executor::execute`] future aborts them, and aborting a
//! task kills its child process.

use std::process::Stdio;
use std::sync::Arc;

use futures::future::join_all;
use tokio::process::Command;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, warn};

use crate::edit::Edit;
use crate::error::{CommandError, CommandFailure};
use crate::extract::{CommandRequest, render_replacement};

/// Default program used to interpret commands.
pub const DEFAULT_SHELL: &str = "sh";

/// The shell that interprets command text via `-c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    program: String,
}

impl Shell {
    /// Uses `program` as the shell.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Program name or path.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Prepares `<program> -c <script>` with stdin closed and output captured.
    ///
    /// The child is killed if the returned command's future is dropped.
    #[must_use]
    pub fn command(&self, script: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("-c")
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

/// Runs command requests in parallel and turns their output into edits.
#[derive(Debug, Clone, Default)]
pub struct Executor {
    shell: Arc<Shell>,
}

impl Executor {
    /// Creates an executor running commands through `shell`.
    #[must_use]
    pub fn new(shell: Shell) -> Self {
        Self {
            shell: Arc::new(shell),
        }
    }

    /// Shell used for every command.
    #[must_use]
    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// Executes every request and waits for all of them.
    ///
    /// Failures do not cancel siblings. Dropping the returned future before it
    /// completes aborts every command still running.
    ///
    /// # Errors
    ///
    /// Returns every [`CommandError`], in document order, when at least one
    /// request failed. No edits are returned in that case.
    pub async fn execute(
        &self,
        requests: Vec<CommandRequest>,
    ) -> Result<Vec<Edit>, Vec<CommandError>> {
        let handles: Vec<_> = requests
            .iter()
            .map(|request| {
                debug!(
                    line = request.position().line(),
                    column = request.position().column(),
                    command = request.prompt(),
                    "dispatching command"
                );
                let shell = Arc::clone(&self.shell);
                let prompt = request.prompt().to_owned();
                tokio::spawn(async move { run_one(&shell, &prompt).await })
            })
            .collect();
        let _running = AbortOnDrop(handles.iter().map(JoinHandle::abort_handle).collect());

        let mut edits = Vec::with_capacity(handles.len());
        let mut failures = Vec::new();
        for (request, joined) in requests.iter().zip(join_all(handles).await) {
            let failure = match joined {
                Ok(Ok(output)) => {
                    debug!(
                        line = request.position().line(),
                        command = request.prompt(),
                        "command finished"
                    );
                    edits.push(Edit::new(
                        request.span(),
                        render_replacement(request.prompt(), &output),
                    ));
                    continue;
                }
                Ok(Err(failure)) => failure,
                Err(join_error) => CommandFailure::Aborted(join_error.to_string()),
            };
            let error = CommandError::new(request, failure);
            warn!(error = %error, "command failed");
            failures.push(error);
        }

        if failures.is_empty() {
            Ok(edits)
        } else {
            Err(failures)
        }
    }
}

/// Aborts the command tasks of an [`Executor::execute`] call when dropped.
///
/// Aborting a finished task is a no-op.
struct AbortOnDrop(Vec<AbortHandle>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

async fn run_one(shell: &Shell, prompt: &str) -> Result<String, CommandFailure> {
    let output = shell
        .command(prompt)
        .output()
        .await
        .map_err(CommandFailure::Spawn)?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        Err(CommandFailure::Exit {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        })
    }
}
