//! Shared configuration for the Spindle command-comment runner.
//!
//! Values are layered by `ortho_config`: built-in defaults, then a
//! configuration file, then `SPINDLE_*` environment variables, then
//! command-line flags. The run mode (preview or write) is not
//! part of the layered configuration; it is chosen per invocation.

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

mod defaults;
mod logging;

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_SHELL, default_log_filter, default_log_filter_string,
    default_log_format, default_shell_string,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "SPINDLE")]
pub struct Config {
    /// `tracing` filter expression, for example `info` or `spindle=debug`.
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Output format for diagnostics written to stderr.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
    /// Shell used to run commands; invoked as `<shell> -c <command>`.
    #[serde(default = "default_shell_string")]
    pub shell: String,
    /// Optional formatter command fed the rewritten file on stdin.
    ///
    /// When unset, rewritten files are only checked for syntax errors.
    #[serde(default)]
    pub formatter: Option<String>,
}

impl Config {
    /// Filter expression for the telemetry subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Selected log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Shell program used for command comments and the formatter.
    #[must_use]
    pub fn shell(&self) -> &str {
        &self.shell
    }

    /// Formatter command, when one is configured and non-blank.
    #[must_use]
    pub fn formatter(&self) -> Option<&str> {
        self.formatter
            .as_deref()
            .map(str::trim)
            .filter(|command| !command.is_empty())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            shell: default_shell_string(),
            formatter: None,
        }
    }
}
