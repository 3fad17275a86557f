//! End-to-end: compile database → ingestion → merge → query loop.

use std::io::Cursor as Input;
use std::path::Path;

use callgraph_analysis::call_graph::{ingest, merge, MergedGraph};
use callgraph_analysis::compdb;
use callgraph_analysis::parsers::{CppAnalyzer, CppUnit, SourceAnalyzer, UnitLifecycle};
use callgraph_analysis::query::{QueryOptions, QuerySession};
use callgraph_core::errors::{CallGraphError, PipelineError};
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    let mut entries = Vec::new();
    for (name, text) in files {
        std::fs::write(dir.path().join(name), text).unwrap();
        entries.push(serde_json::json!({
            "directory": dir.path(),
            "file": name,
            "arguments": ["cc", "-c", name],
        }));
    }
    std::fs::write(
        dir.path().join("compile_commands.json"),
        serde_json::to_string_pretty(&entries).unwrap(),
    )
    .unwrap();
    dir
}

fn build(root: &Path, workers: usize) -> (CppAnalyzer, MergedGraph<CppUnit>) {
    let db = compdb::load(root).unwrap();
    let analyzer = CppAnalyzer::default();
    let results = ingest(&analyzer, &db.commands, workers).unwrap();
    (analyzer, merge(results))
}

fn options(root: &Path, max_call_paths: usize) -> QueryOptions {
    QueryOptions {
        filter: root.display().to_string(),
        show_all: false,
        max_call_paths,
    }
}

fn chain_project() -> TempDir {
    project(&[
        ("main.c", "void foo(void);\nint main(void) {\n    foo();\n    return 0;\n}\n"),
        ("foo.c", "void bar(void);\nvoid foo(void) {\n    bar();\n}\n"),
        ("bar.c", "void bar(void) {\n}\nvoid unused(void) {}\n"),
    ])
}

#[test]
fn test_main_foo_bar_session() {
    let dir = chain_project();
    let d = dir.path().display().to_string();
    let (analyzer, mut graph) = build(dir.path(), 2);
    graph.store.verify_integrity().unwrap();

    let input = "bar.c:1:6\nbar.c:3:6\nnothing.c:1:1\ngarbage\nmain.c:1:1\n";
    let mut out = Vec::new();
    {
        let mut session =
            QuerySession::new(&analyzer, &graph.store, &mut graph.units, options(dir.path(), 300));
        session.run(Input::new(input), &mut out).unwrap();
    }
    let out = String::from_utf8(out).unwrap();

    let expected = format!(
        "> mapped 'bar.c' to 'bar.c'
symbol of specified cursor: c:bar
----path 1----
main():{d}/main.c:2
  foo():{d}/main.c:1
    bar():{d}/foo.c:1
----call graph rooted at bar():{d}/foo.c:1----
bar():{d}/foo.c:1
> mapped 'bar.c' to 'bar.c'
symbol of specified cursor: c:unused
This function doesn't seem to be used in the project
> failed to map 'nothing.c' to a file in the project
> Please specify a function definition: <filename>:<line number>:<column number>
> mapped 'main.c' to 'main.c'
failed to map main.c:1:1 to a function definition
> "
    );
    assert_eq!(out, expected);

    // Every unit is back to suspended after the session.
    assert!(graph
        .units
        .iter()
        .all(|u| analyzer.lifecycle(&u.unit) == UnitLifecycle::Suspended));
}

#[test]
fn test_call_graph_from_root() {
    let dir = chain_project();
    let d = dir.path().display().to_string();
    let (analyzer, mut graph) = build(dir.path(), 10);

    let mut out = Vec::new();
    let mut session =
        QuerySession::new(&analyzer, &graph.store, &mut graph.units, options(dir.path(), 300));
    session.answer("main.c:3:5", &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    // Column 5 on line 3 is the callee name `foo`, which this unit only declares.
    assert!(out.starts_with("mapped 'main.c' to 'main.c'\nfailed to map main.c:3:5"));

    let mut out = Vec::new();
    session.answer("main.c:2:5", &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.ends_with(&format!(
        "----call graph rooted at main():{d}/main.c:2----
main():{d}/main.c:2
  foo():{d}/main.c:1
    bar():{d}/foo.c:1
"
    )));
}

#[test]
fn test_path_limit_ends_the_session() {
    let dir = project(&[(
        "fan.c",
        "void t(void) {}\nvoid r1(void) { t(); }\nvoid r2(void) { t(); }\n",
    )]);
    let (analyzer, mut graph) = build(dir.path(), 1);

    let mut out = Vec::new();
    let mut session =
        QuerySession::new(&analyzer, &graph.store, &mut graph.units, options(dir.path(), 1));
    let err = session
        .run(Input::new("fan.c:1:6\nfan.c:1:6\n"), &mut out)
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::CallGraph(CallGraphError::PathLimitExceeded { limit: 1 })
    ));
    assert_eq!(err.exit_code(), 1);
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("symbol of specified cursor: c:t"));
    assert_eq!(out.matches("> ").count(), 1);
}

#[test]
fn test_unparseable_unit_is_not_mappable() {
    let dir = project(&[("ok.c", "void a(void) {}\n")]);
    let mut entries: Vec<serde_json::Value> = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("compile_commands.json")).unwrap(),
    )
    .unwrap();
    entries.push(serde_json::json!({
        "directory": dir.path(),
        "file": "missing.c",
        "arguments": ["cc", "-c", "missing.c"],
    }));
    std::fs::write(
        dir.path().join("compile_commands.json"),
        serde_json::to_string(&entries).unwrap(),
    )
    .unwrap();

    let (analyzer, mut graph) = build(dir.path(), 10);
    assert_eq!(graph.failures.len(), 1);

    let mut out = Vec::new();
    let mut session =
        QuerySession::new(&analyzer, &graph.store, &mut graph.units, options(dir.path(), 300));
    session.run(Input::new("missing.c:1:1"), &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "> failed to map 'missing.c' to a file in the project\n> "
    );
}

/// A single-unit project under `src/`, registered with the given directory
/// and `file` spelling. `command` picks the shell-string entry form.
fn qualified_project(directory: &str, file: &str, command: bool) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("src")).unwrap();
    std::fs::create_dir_all(dir.path().join("build")).unwrap();
    std::fs::write(
        dir.path().join("src/main.c"),
        "void foo(void) {}\nint main(void) { foo(); return 0; }\n",
    )
    .unwrap();

    let directory = dir.path().join(directory);
    let entry = if command {
        serde_json::json!({
            "directory": directory,
            "command": format!("cc -c {file} -o main.o"),
            "file": file,
        })
    } else {
        serde_json::json!({
            "directory": directory,
            "arguments": ["cc", "-c", file],
            "file": file,
        })
    };
    std::fs::write(
        dir.path().join("compile_commands.json"),
        serde_json::to_string(&[entry]).unwrap(),
    )
    .unwrap();
    dir
}

fn query_qualified(directory: &str, file: &str, command: bool) -> (String, String) {
    let dir = qualified_project(directory, file, command);
    let root = dir.path().display().to_string();
    let (analyzer, mut graph) = build(dir.path(), 1);
    assert!(graph.failures.is_empty(), "{file} failed to ingest");

    let mut out = Vec::new();
    let mut session =
        QuerySession::new(&analyzer, &graph.store, &mut graph.units, options(dir.path(), 300));
    session.run(Input::new("main.c:1:6\n"), &mut out).unwrap();
    (String::from_utf8(out).unwrap(), root)
}

fn assert_foo_answered(out: &str, file: &str, root: &str) {
    let expected = format!(
        "> mapped 'main.c' to '{file}'
symbol of specified cursor: c:foo
----path 1----
main():{root}/src/main.c:2
  foo():{root}/src/main.c:1
----call graph rooted at foo():{root}/src/main.c:1----
foo():{root}/src/main.c:1
> "
    );
    assert_eq!(out, expected);
}

#[test]
fn test_query_unit_with_subdirectory_file() {
    let (out, root) = query_qualified(".", "src/main.c", false);
    assert_foo_answered(&out, "src/main.c", &root);
}

#[test]
fn test_query_unit_with_dot_slash_file() {
    let (out, root) = query_qualified(".", "./src/main.c", false);
    assert_foo_answered(&out, "./src/main.c", &root);
}

#[test]
fn test_query_unit_with_parent_relative_file() {
    let (out, root) = query_qualified("build", "../src/main.c", false);
    assert_foo_answered(&out, "../src/main.c", &root);
}

#[test]
fn test_query_unit_from_command_string_entry() {
    let (out, root) = query_qualified("build", "../src/main.c", true);
    assert_foo_answered(&out, "../src/main.c", &root);

    let (out, root) = query_qualified(".", "./src/main.c", true);
    assert_foo_answered(&out, "./src/main.c", &root);
}
