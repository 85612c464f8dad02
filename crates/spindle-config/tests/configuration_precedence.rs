//! Layering tests for `spindle-config`: defaults, file, environment, flags.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use ortho_config::OrthoConfig;
use spindle_config::{Config, LogFormat};

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Serialises environment access and restores overridden variables on drop.
struct Harness {
    temp_dir: TempDir,
    overrides: Vec<(&'static str, Option<OsString>)>,
    _guard: MutexGuard<'static, ()>,
}

impl Harness {
    fn new() -> Self {
        let guard = ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Self {
            temp_dir: TempDir::new().expect("create temp dir"),
            overrides: Vec::new(),
            _guard: guard,
        }
    }

    fn set_env(&mut self, key: &'static str, value: &str) {
        self.overrides.push((key, std::env::var_os(key)));
        // Environment mutation is `unsafe` in edition 2024; the guard keeps
        // tests in this binary from racing.
        unsafe { std::env::set_var(key, value) };
    }

    fn write_config(&self, body: &str) -> OsString {
        let path = self.temp_dir.path().join("spindle.toml");
        fs::write(&path, body).expect("write configuration");
        path.into_os_string()
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        while let Some((key, previous)) = self.overrides.pop() {
            match previous {
                Some(value) => unsafe { std::env::set_var(key, value) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

fn load<I, S>(args: I) -> Config
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut argv = vec![OsString::from("spindle")];
    argv.extend(args.into_iter().map(|arg| arg.as_ref().to_os_string()));
    Config::load_from_iter(argv).unwrap_or_else(|error| panic!("load config: {error}"))
}

#[rstest]
fn defaults_apply_without_overrides(harness: Harness) {
    let config = load(Vec::<OsString>::new());
    drop(harness);

    assert_eq!(config.shell(), "sh");
    assert_eq!(config.log_filter(), "info");
    assert_eq!(config.formatter(), None);
}

#[rstest]
fn file_values_override_defaults(harness: Harness) {
    let path = harness.write_config("shell = \"bash\"\nformatter = \"rustfmt --emit stdout\"\n");
    let config = load([OsString::from("--config-path"), path]);

    assert_eq!(config.shell(), "bash");
    assert_eq!(config.formatter(), Some("rustfmt --emit stdout"));
}

#[rstest]
fn environment_overrides_file(mut harness: Harness) {
    let path = harness.write_config("shell = \"bash\"\n");
    harness.set_env("SPINDLE_SHELL", "zsh");
    let config = load([OsString::from("--config-path"), path]);

    assert_eq!(config.shell(), "zsh");
}

#[rstest]
fn flags_override_environment(mut harness: Harness) {
    harness.set_env("SPINDLE_LOG_FORMAT", "compact");
    let config = load(["--log-format", "json"]);

    assert_eq!(config.log_format(), LogFormat::Json);
}
