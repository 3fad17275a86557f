//! Runs the `callgraph` binary against small projects on disk.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn callgraph(root: &Path, home: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_callgraph"))
        .arg(root)
        .args(args)
        .env("HOME", home)
        .env("CALLGRAPH_LOG", "off")
        .env_remove("CALLGRAPH_INGEST_WORKERS")
        .env_remove("CALLGRAPH_INGEST_FOLLOW_INCLUDES")
        .env_remove("CALLGRAPH_INGEST_MAX_INCLUDE_DEPTH")
        .env_remove("CALLGRAPH_QUERY_MAX_CALL_PATHS")
        .env_remove("CALLGRAPH_QUERY_SHOW_ALL")
        .env_remove("CALLGRAPH_QUERY_FILTER")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    if let Some(mut pipe) = child.stdin.take() {
        // The binary may exit before reading; a broken pipe is fine.
        let _ = pipe.write_all(stdin.as_bytes());
    }
    child.wait_with_output().unwrap()
}

fn write_project(dir: &Path, files: &[(&str, &str)]) {
    let mut entries = Vec::new();
    for (name, text) in files {
        std::fs::write(dir.join(name), text).unwrap();
        entries.push(serde_json::json!({
            "directory": dir,
            "command": format!("cc -c {name} -o {name}.o"),
            "file": name,
        }));
    }
    std::fs::write(
        dir.join("compile_commands.json"),
        serde_json::to_string(&entries).unwrap(),
    )
    .unwrap();
}

#[test]
fn test_missing_compilation_database_exits_1() {
    let dir = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    let out = callgraph(dir.path(), home.path(), &[], "");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("compile_commands.json"), "stderr: {stderr}");
    assert!(out.stdout.is_empty());
}

#[test]
fn test_invalid_config_exits_1() {
    let dir = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_project(dir.path(), &[("a.c", "void a(void) {}\n")]);
    let out = callgraph(dir.path(), home.path(), &["--workers", "0"], "");
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("ingest.workers"));
}

#[test]
fn test_query_session_over_stdin() {
    let dir = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_project(
        dir.path(),
        &[
            ("main.c", "void leaf(void);\nint main(void) { leaf(); return 0; }\n"),
            ("leaf.c", "void leaf(void) {}\n"),
        ],
    );
    let d = dir.path().display().to_string();

    let out = callgraph(dir.path(), home.path(), &["--workers", "2"], "leaf.c:1:6\nnope\n");
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(
        stdout,
        format!(
            "> mapped 'leaf.c' to 'leaf.c'
symbol of specified cursor: c:leaf
----path 1----
main():{d}/main.c:2
  leaf():{d}/main.c:1
----call graph rooted at leaf():{d}/main.c:1----
leaf():{d}/main.c:1
> Please specify a function definition: <filename>:<line number>:<column number>
> "
        )
    );
}

#[test]
fn test_path_cap_exits_1() {
    let dir = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_project(
        dir.path(),
        &[(
            "fan.c",
            "void t(void) {}\nvoid a(void) { t(); }\nvoid b(void) { t(); }\nvoid c(void) { t(); }\n",
        )],
    );

    let out = callgraph(dir.path(), home.path(), &["--max-paths", "2"], "fan.c:1:6\n");
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("2"));

    let out = callgraph(dir.path(), home.path(), &["--max-paths", "3"], "fan.c:1:6\n");
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("----path 3----"));
}

#[test]
fn test_usage_errors_exit_1() {
    let out = Command::new(env!("CARGO_BIN_EXE_callgraph"))
        .env("CALLGRAPH_LOG", "off")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));

    let out = Command::new(env!("CARGO_BIN_EXE_callgraph"))
        .args(["proj", "--workers", "many"])
        .env("CALLGRAPH_LOG", "off")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_help_exits_0() {
    let out = Command::new(env!("CARGO_BIN_EXE_callgraph"))
        .arg("--help")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("--max-paths"));
}
