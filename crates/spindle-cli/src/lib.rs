//! Command-line runtime for Spindle.
//!
//! The module owns argument parsing, configuration bootstrapping, file
//! discovery, and the mapping of pipeline results onto the output streams
//! and exit status. The runtime can be driven from the binary entrypoint or
//! from tests, where the configuration loader and IO streams are substituted.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use spindle_config::Config;
use spindle_engine::{
    CommandFormatter, Executor, OutputMode, Pipeline, RunReport, Shell, SourceFormatter,
    SyntaxCheckFormatter,
};
use tracing::info;

mod cli;
mod config;
mod discovery;
mod errors;
mod report;
mod telemetry;

use cli::Cli;
use config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
use discovery::discover;
use errors::AppError;

struct CliRunner<'a, W: Write, E: Write, L: ConfigLoader> {
    stdout: &'a mut W,
    stderr: &'a mut E,
    loader: &'a L,
}

impl<W, E, L> CliRunner<'_, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);

        let cli = match Cli::try_parse_from(split.cli_arguments) {
            Ok(cli) => cli,
            Err(error) if !error.use_stderr() => {
                // --help and --version
                let _ = write!(self.stdout, "{error}");
                return ExitCode::SUCCESS;
            }
            Err(error) => return self.fail(&AppError::CliUsage(error)),
        };

        let result = self
            .loader
            .load(&split.config_arguments)
            .and_then(|config| self.execute(&cli, &config));
        match result {
            Ok(exit_code) => exit_code,
            Err(error) => self.fail(&error),
        }
    }

    fn execute(&mut self, cli: &Cli, config: &Config) -> Result<ExitCode, AppError> {
        telemetry::initialise(config)?;
        let files = discover(&cli.paths)?;
        let mode = if cli.write {
            OutputMode::Write
        } else {
            OutputMode::Preview
        };
        info!(files = files.len(), ?mode, shell = config.shell(), "starting run");

        let pipeline = Arc::new(build_pipeline(config, mode));
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(AppError::Runtime)?;

        match runtime.block_on(pipeline.run(files)) {
            Ok(report) => self.emit(&report),
            Err(error) => {
                let _ = writeln!(self.stderr, "{error}");
                Ok(ExitCode::FAILURE)
            }
        }
    }

    fn emit(&mut self, report: &RunReport) -> Result<ExitCode, AppError> {
        report::write_previews(&mut *self.stdout, report).map_err(AppError::Report)?;
        report::write_failures(&mut *self.stderr, report).map_err(AppError::Report)?;
        Ok(if report.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }

    fn fail(&mut self, error: &AppError) -> ExitCode {
        let _ = writeln!(self.stderr, "{error}");
        ExitCode::FAILURE
    }
}

fn build_pipeline(config: &Config, mode: OutputMode) -> Pipeline {
    let shell = Shell::new(config.shell());
    let formatter: Arc<dyn SourceFormatter> = match config.formatter() {
        Some(command) => Arc::new(CommandFormatter::new(shell.clone(), command)),
        None => Arc::new(SyntaxCheckFormatter::new()),
    };
    Pipeline::new(Executor::new(shell), formatter, mode)
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner {
        stdout,
        stderr,
        loader,
    }
    .run(args)
}

#[cfg(test)]
mod tests;
