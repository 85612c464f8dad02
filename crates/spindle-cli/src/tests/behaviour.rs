//! Behaviour-driven step definitions for the CLI scenarios.

use std::cell::RefCell;
use std::process::ExitCode;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use super::support::Session;

#[fixture]
fn world() -> RefCell<Session> {
    RefCell::new(Session::default())
}

/// Strips surrounding double quotes and expands `\n` escapes.
fn unquote(s: &str) -> String {
    s.trim_matches('"').replace("\\n", "\n")
}

#[given("a source file {name} containing {content}")]
fn given_source_file(world: &RefCell<Session>, name: String, content: String) {
    world.borrow().write(&unquote(&name), &unquote(&content));
}

#[when("the operator runs {command}")]
fn when_operator_runs(world: &RefCell<Session>, command: String) {
    let command = unquote(&command);
    let args: Vec<&str> = command.split_whitespace().collect();
    world.borrow_mut().run(&args);
}

#[then("the CLI succeeds")]
fn then_succeeds(world: &RefCell<Session>) {
    world.borrow().assert_exit(ExitCode::SUCCESS);
}

#[then("the CLI fails")]
fn then_fails(world: &RefCell<Session>) {
    world.borrow().assert_exit(ExitCode::FAILURE);
}

#[then("stdout contains {snippet}")]
fn then_stdout_contains(world: &RefCell<Session>, snippet: String) {
    let stdout = world.borrow().stdout_text();
    let snippet = unquote(&snippet);
    assert!(
        stdout.contains(&snippet),
        "stdout {stdout:?} did not contain {snippet:?}"
    );
}

#[then("stderr contains {snippet}")]
fn then_stderr_contains(world: &RefCell<Session>, snippet: String) {
    let stderr = world.borrow().stderr_text();
    let snippet = unquote(&snippet);
    assert!(
        stderr.contains(&snippet),
        "stderr {stderr:?} did not contain {snippet:?}"
    );
}

#[then("file {name} contains {content}")]
fn then_file_contains(world: &RefCell<Session>, name: String, content: String) {
    assert_eq!(world.borrow().read(&unquote(&name)), unquote(&content));
}

#[scenario(
    path = "tests/features/spindle_cli.feature",
    name = "Preview leaves files untouched"
)]
fn preview_leaves_files_untouched(world: RefCell<Session>) {
    drop(world);
}

#[scenario(
    path = "tests/features/spindle_cli.feature",
    name = "Write mode only touches allowed commands"
)]
fn write_mode_only_touches_allowed_commands(world: RefCell<Session>) {
    drop(world);
}

#[scenario(
    path = "tests/features/spindle_cli.feature",
    name = "Ignored directories are skipped"
)]
fn ignored_directories_are_skipped(world: RefCell<Session>) {
    drop(world);
}

#[scenario(
    path = "tests/features/spindle_cli.feature",
    name = "Command output that breaks the file is refused"
)]
fn breaking_output_is_refused(world: RefCell<Session>) {
    drop(world);
}
