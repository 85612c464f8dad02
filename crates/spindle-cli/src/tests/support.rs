//! Shared fixtures for CLI tests.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use spindle_config::Config;
use tempfile::TempDir;

use crate::config::ConfigLoader;
use crate::errors::AppError;
use crate::run_with_loader;

/// Hands out a fixed configuration without touching files or environment.
pub(crate) struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    pub(crate) fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

/// A temporary source tree plus the captured result of running the CLI.
pub(crate) struct Session {
    dir: TempDir,
    pub(crate) config: Config,
    pub(crate) stdout: Vec<u8>,
    pub(crate) stderr: Vec<u8>,
    pub(crate) exit_code: Option<ExitCode>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
            config: Config::default(),
            stdout: Vec::new(),
            stderr: Vec::new(),
            exit_code: None,
        }
    }
}

impl Session {
    pub(crate) fn root(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    pub(crate) fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, content).expect("write source file");
        path
    }

    pub(crate) fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("read source file")
    }

    /// Runs `spindle` with `args`; the token `{root}` expands to the tree.
    pub(crate) fn run(&mut self, args: &[&str]) {
        self.stdout.clear();
        self.stderr.clear();
        let root = self.root().to_string_lossy().into_owned();
        let mut argv = vec![OsString::from("spindle")];
        argv.extend(
            args.iter()
                .map(|arg| OsString::from(arg.replace("{root}", &root))),
        );
        let loader = StaticConfigLoader::new(self.config.clone());
        let exit = run_with_loader(argv, &mut self.stdout, &mut self.stderr, &loader);
        self.exit_code = Some(exit);
    }

    pub(crate) fn stdout_text(&self) -> String {
        String::from_utf8(self.stdout.clone()).expect("stdout utf8")
    }

    pub(crate) fn stderr_text(&self) -> String {
        String::from_utf8(self.stderr.clone()).expect("stderr utf8")
    }

    pub(crate) fn assert_exit(&self, expected: ExitCode) {
        let exit = self.exit_code.expect("exit code recorded");
        assert_eq!(
            exit,
            expected,
            "stdout: {}\nstderr: {}",
            self.stdout_text(),
            self.stderr_text()
        );
    }
}
