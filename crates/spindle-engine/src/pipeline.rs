//! Orchestration of the per-file pipeline and the fan-out over files.
//!
//! One file goes through tokenising, scanning, command execution, edit
//! application and formatting. [`Pipeline::run`] drives many files at once,
//! one tokio task each, and reports them in input order.

use std::path::PathBuf;
use std::sync::Arc;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use spindle_syntax::Parser;
use tracing::{debug, warn};

use crate::edit::apply_edits;
use crate::error::{FileError, RunError};
use crate::exec::Executor;
use crate::file::SourceFile;
use crate::format::SourceFormatter;
use crate::scan::scan;

/// What happens to a successfully rewritten file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Hand the final contents back to the caller.
    #[default]
    Preview,
    /// Overwrite the file in place when its contents changed.
    Write,
}

/// Final state of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// New contents were written to disk.
    Written,
    /// Write mode found nothing to change; the file was not touched.
    Unchanged,
    /// Preview mode: the final contents.
    Preview(Vec<u8>),
}

/// Result of processing one file successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// The processed file.
    pub path: PathBuf,
    /// What was done with the result.
    pub disposition: Disposition,
    /// Number of commands executed.
    pub commands: usize,
}

/// Rewritten contents of one file before they are written or shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Formatted contents.
    pub content: Vec<u8>,
    /// Number of commands executed.
    pub commands: usize,
}

/// Per-file results of a run, in input order.
#[derive(Debug, Default)]
pub struct RunReport {
    outcomes: Vec<FileOutcome>,
    failures: Vec<FileError>,
}

impl RunReport {
    /// Files that were processed successfully.
    #[must_use]
    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    /// Files that failed.
    #[must_use]
    pub fn failures(&self) -> &[FileError] {
        &self.failures
    }

    /// True when every file succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The configured comment-rewriting pipeline.
pub struct Pipeline {
    executor: Executor,
    formatter: Arc<dyn SourceFormatter>,
    mode: OutputMode,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("executor", &self.executor)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Assembles a pipeline.
    #[must_use]
    pub fn new(executor: Executor, formatter: Arc<dyn SourceFormatter>, mode: OutputMode) -> Self {
        Self {
            executor,
            formatter,
            mode,
        }
    }

    /// Output mode applied to successful files.
    #[must_use]
    pub const fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Produces the rewritten, formatted contents of `file`.
    ///
    /// Commands only run once the whole file has been scanned, so a fatal
    /// directive anywhere in the file prevents every command in it.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure as a [`FileError`].
    pub async fn rewrite(&self, file: &SourceFile) -> Result<Rewrite, FileError> {
        let path = file.path();
        let requests = {
            let mut parser = Parser::new(file.language()).map_err(|source| FileError::Syntax {
                path: path.to_path_buf(),
                source,
            })?;
            let parsed = parser.parse(file.text()).map_err(|source| FileError::Syntax {
                path: path.to_path_buf(),
                source,
            })?;
            scan(path, parsed.tokens()).map_err(|source| FileError::Scan {
                path: path.to_path_buf(),
                source,
            })?
        };

        let commands = requests.len();
        let edits = if requests.is_empty() {
            Vec::new()
        } else {
            self.executor
                .execute(requests)
                .await
                .map_err(|failures| FileError::Commands {
                    path: path.to_path_buf(),
                    failures,
                })?
        };

        let rewritten =
            apply_edits(file.text().as_bytes(), &edits).map_err(|source| FileError::Edit {
                path: path.to_path_buf(),
                source,
            })?;
        let content = self
            .formatter
            .format(file, rewritten)
            .await
            .map_err(|source| FileError::Format {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Rewrite { content, commands })
    }

    /// Reads, rewrites and disposes of one file.
    ///
    /// # Errors
    ///
    /// Returns a [`FileError`] describing the first failing stage.
    pub async fn process_file(&self, path: PathBuf) -> Result<FileOutcome, FileError> {
        debug!(path = %path.display(), "processing file");
        let file = SourceFile::read(path).await?;
        let Rewrite { content, commands } = self.rewrite(&file).await?;

        let disposition = match self.mode {
            OutputMode::Preview => Disposition::Preview(content),
            OutputMode::Write if content == file.text().as_bytes() => {
                debug!(path = %file.path().display(), "unchanged, skipping write");
                Disposition::Unchanged
            }
            OutputMode::Write => {
                tokio::fs::write(file.path(), &content)
                    .await
                    .map_err(|source| FileError::Write {
                        path: file.path().to_path_buf(),
                        source,
                    })?;
                Disposition::Written
            }
        };

        debug!(path = %file.path().display(), commands, "finished file");
        Ok(FileOutcome {
            path: file.path().to_path_buf(),
            disposition,
            commands,
        })
    }

    /// Processes every path concurrently.
    ///
    /// File-scoped failures are recorded in the report while the other files
    /// carry on. Outcomes and failures keep the order of `paths`.
    ///
    /// # Errors
    ///
    /// Returns a [`RunError`] as soon as any file hits an unknown directive.
    /// Every other file task is aborted at that point; dropping its pending
    /// [`Executor::execute`] future aborts the command tasks and kills their
    /// child processes.
    pub async fn run(self: Arc<Self>, paths: Vec<PathBuf>) -> Result<RunReport, RunError> {
        let handles: Vec<_> = paths
            .iter()
            .cloned()
            .map(|path| {
                let pipeline = Arc::clone(&self);
                tokio::spawn(async move { pipeline.process_file(path).await })
            })
            .collect();
        let aborts: Vec<_> = handles.iter().map(|handle| handle.abort_handle()).collect();

        let mut pending: FuturesUnordered<_> = handles
            .into_iter()
            .enumerate()
            .map(|(index, handle)| async move { (index, handle.await) })
            .collect();
        let mut slots: Vec<Option<Result<FileOutcome, FileError>>> =
            std::iter::repeat_with(|| None).take(paths.len()).collect();

        while let Some((index, joined)) = pending.next().await {
            let result = joined.unwrap_or_else(|join_error| {
                Err(FileError::Aborted {
                    path: path_at(&paths, index),
                    message: join_error.to_string(),
                })
            });
            match result {
                Err(FileError::Scan { path, source }) if source.is_fatal() => {
                    for abort in &aborts {
                        abort.abort();
                    }
                    return Err(RunError { path, source });
                }
                other => {
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = Some(other);
                    }
                }
            }
        }

        let mut report = RunReport::default();
        for result in slots.into_iter().flatten() {
            match result {
                Ok(outcome) => report.outcomes.push(outcome),
                Err(error) => {
                    warn!(path = %error.path().display(), error = %error, "file failed");
                    report.failures.push(error);
                }
            }
        }
        Ok(report)
    }
}

fn path_at(paths: &[PathBuf], index: usize) -> PathBuf {
    paths.get(index).cloned().unwrap_or_default()
}
