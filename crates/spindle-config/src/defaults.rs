/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default shell for command comments.
pub const DEFAULT_SHELL: &str = "sh";

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format. Spindle is an interactive tool, so diagnostics
/// default to the human-readable form.
#[must_use]
pub const fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Compact
}

/// Owned default shell used where allocation is required (e.g. serde).
#[must_use]
pub fn default_shell_string() -> String {
    DEFAULT_SHELL.to_owned()
}
