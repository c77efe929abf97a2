use std::process::{Command, Output};

fn maze_runner(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_maze-runner"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch maze-runner")
}

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "maze-runner"])
        .status()
        .expect("failed to invoke cargo check for maze-runner CLI binary");

    assert!(status.success(), "cargo check --bin maze-runner should succeed");
}

#[test]
fn compare_lists_every_algorithm_on_an_open_maze() {
    let output = maze_runner(&[
        "compare",
        "--seed",
        "7",
        "--rows",
        "5",
        "--columns",
        "8",
        "--wall-probability",
        "0",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for label in ["BFS", "DFS", "A*"] {
        let row = stdout
            .lines()
            .find(|line| line.starts_with(label))
            .unwrap_or_else(|| panic!("missing {label} row in {stdout}"));
        assert!(row.contains("true"), "{label} did not reach the goal");
    }
}

#[test]
fn solve_escapes_an_open_maze() {
    let output = maze_runner(&[
        "solve",
        "--seed",
        "3",
        "--rows",
        "4",
        "--columns",
        "6",
        "--wall-probability",
        "0",
        "--algorithm",
        "bfs",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("BFS escaped in"), "unexpected output: {stdout}");
}

#[test]
fn invalid_session_flags_fail_before_running() {
    let output = maze_runner(&["compare", "--rows", "0"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid session configuration"));
}
