use std::path::Path;

use scrunkly::template::TemplateError;
use scrunkly::{Action, DispatchError, Dispatcher, EnvOverlay, Invocation, Outcome, TaskTable};

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn run(dispatcher: &Dispatcher, invocation: &Invocation) -> Result<Outcome, DispatchError> {
    let mut out = Vec::new();
    dispatcher.run_to(invocation, &mut out, false)
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_default()
}

#[test]
fn test_nested_task_runs_before_following_step() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("log.txt");
    let log = log.display();
    let table = TaskTable::new()
        .task("build", format!("echo hello >> '{log}'"))
        .task("test", vec!["build".to_string(), format!("echo world >> '{log}'")]);

    let mut out = Vec::new();
    let result = Dispatcher::new(table)
        .run_to(&Invocation::new("test", vec![]), &mut out, false)
        .unwrap();
    assert_eq!(result, Outcome::Completed);
    assert_eq!(read(&dir.path().join("log.txt")), "hello\nworld\n");

    let output = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("❱ Running script: [build, echo world"));
    assert_eq!(lines[1], "❱ Running sub-script: build");
    assert!(lines[2].starts_with("❱ Running script: echo hello"));
}

#[test]
fn test_sequence_waits_for_each_command() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("marker");
    let marker = marker.display();
    let table = TaskTable::new().task(
        "slow",
        [
            format!("sleep 0.2 && touch '{marker}'"),
            format!("test -f '{marker}'"),
        ],
    );
    let result = run(&Dispatcher::new(table), &Invocation::new("slow", vec![]));
    assert_eq!(result.unwrap(), Outcome::Completed);
}

#[test]
fn test_extra_args_fill_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let table = TaskTable::new().task("greet", format!("echo {{0}} > '{}'", out.display()));
    let result = run(&Dispatcher::new(table), &Invocation::new("greet", args(&["hi"])));
    assert_eq!(result.unwrap(), Outcome::Completed);
    assert_eq!(read(&out), "hi\n");
}

#[test]
fn test_without_args_command_runs_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let table = TaskTable::new().task("braces", format!("echo '{{0}}' > '{}'", out.display()));
    let result = run(&Dispatcher::new(table), &Invocation::new("braces", vec![]));
    assert_eq!(result.unwrap(), Outcome::Completed);
    assert_eq!(read(&out), "{0}\n");
}

#[test]
fn test_args_forwarded_to_nested_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let table = TaskTable::new()
        .task("write", format!("echo {{0}}-{{1}} >> '{}'", out.display()))
        .task("all", ["write", "write"]);
    let result = run(&Dispatcher::new(table), &Invocation::new("all", args(&["a", "b"])));
    assert_eq!(result.unwrap(), Outcome::Completed);
    assert_eq!(read(&out), "a-b\na-b\n");
}

#[test]
fn test_overlay_overrides_inherited_env() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("env.txt");
    let table = TaskTable::new().task(
        "show",
        format!(
            "printf '%s %s' \"$X\" \"$HOME\" > '{}'",
            out.display()
        ),
    );
    let dispatcher = Dispatcher::new(table)
        .with_env(EnvOverlay::new().var("X", "1").var("HOME", "/overlay"));
    let result = run(&dispatcher, &Invocation::new("show", vec![]));
    assert_eq!(result.unwrap(), Outcome::Completed);
    assert_eq!(read(&out), "1 /overlay");
}

#[test]
fn test_inherited_env_kept() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("path.txt");
    let table = TaskTable::new().task("path", format!("printf '%s' \"$PATH\" > '{}'", out.display()));
    let dispatcher = Dispatcher::new(table).with_env(EnvOverlay::new().var("X", "1"));
    let result = run(&dispatcher, &Invocation::new("path", vec![]));
    assert_eq!(result.unwrap(), Outcome::Completed);
    assert_eq!(read(&out), std::env::var("PATH").unwrap_or_default());
}

#[test]
fn test_self_reference_spawns_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("marker");
    let table = TaskTable::new().task(
        "bad",
        [format!("touch '{}'", marker.display()), "bad".to_string()],
    );
    let result = run(&Dispatcher::new(table), &Invocation::new("bad", vec![]));
    match result {
        Err(DispatchError::SelfReference { task }) => assert_eq!(task, "bad"),
        other => panic!("Expected SelfReference, got: {other:?}"),
    }
    assert!(!marker.exists());
}

#[test]
fn test_failing_command_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("marker");
    let table = TaskTable::new()
        .task("fail", "exit 3")
        .task(
            "ci",
            ["fail".to_string(), format!("touch '{}'", marker.display())],
        );
    let result = run(&Dispatcher::new(table), &Invocation::new("ci", vec![]));
    match result {
        Err(DispatchError::CommandFailed { command, code }) => {
            assert_eq!(command, "exit 3");
            assert_eq!(code, Some(3));
        }
        other => panic!("Expected CommandFailed, got: {other:?}"),
    }
    assert!(!marker.exists());
}

#[test]
fn test_too_few_args_for_template() {
    let table = TaskTable::new().task("greet", "echo {0} {1}");
    let result = run(&Dispatcher::new(table), &Invocation::new("greet", args(&["hi"])));
    match result {
        Err(DispatchError::Template { source, .. }) => assert_eq!(
            source,
            TemplateError::MissingArgument {
                index: 1,
                available: 1
            }
        ),
        other => panic!("Expected Template error, got: {other:?}"),
    }
}

#[test]
fn test_parsed_invocation_dispatch() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let table = TaskTable::new()
        .task("greet", format!("echo {{0}} > '{}'", out.display()))
        .task("noop", Action::call("noop", |_| Ok(())));

    let invocation = Invocation::from_args(["scripts", "greet", "hi"]).unwrap();
    let result = run(&Dispatcher::new(table.clone()), &invocation);
    assert_eq!(result.unwrap(), Outcome::Completed);
    assert_eq!(read(&out), "hi\n");

    let invocation = Invocation::from_args(["scripts"]).unwrap();
    let mut usage = Vec::new();
    let result = Dispatcher::new(table).run_to(&invocation, &mut usage, false);
    assert_eq!(result.unwrap(), Outcome::Usage);
    assert_eq!(
        String::from_utf8(usage).unwrap(),
        "Please provide a script to run\n  greet\n  noop\n"
    );
}

#[test]
fn test_double_dash_reaches_template() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let table = TaskTable::new().task("show", format!("printf '%s|%s' '{{0}}' '{{1}}' > '{}'", out.display()));

    let invocation = Invocation::from_args(["scripts", "show", "--", "--nocapture"]).unwrap();
    let result = run(&Dispatcher::new(table), &invocation);
    assert_eq!(result.unwrap(), Outcome::Completed);
    assert_eq!(read(&out), "--|--nocapture");
}

#[test]
fn test_current_exe_can_build_commands() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("exe.txt");
    let exe = scrunkly::current_exe().unwrap();
    let table = TaskTable::new().task(
        "where",
        format!("test -x '{}' && printf ok > '{}'", exe.display(), out.display()),
    );
    let result = run(&Dispatcher::new(table), &Invocation::new("where", vec![]));
    assert_eq!(result.unwrap(), Outcome::Completed);
    assert_eq!(read(&out), "ok");
}
