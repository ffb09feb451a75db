use std::{
    io::Write,
    path::PathBuf,
    process::{Command, Output, Stdio},
};

const CONSTANTS: &str = r#"{"DROPOFF_COST":4000,"EXTRACT_RATIO":4,"MAX_ENERGY":1000,"MAX_TURNS":400,"MOVE_COST_RATIO":10,"NEW_ENTITY_ENERGY_COST":1000,"STRICT_ERRORS":false}"#;

fn log_dir(test: &str) -> PathBuf {
    std::env::temp_dir().join(format!("halite-fleet-{test}-{}", std::process::id()))
}

fn play(input: &str, log_dir: &PathBuf) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_halite-fleet"))
        .args(["7", "--name", "probe", "--log-dir"])
        .arg(log_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to launch halite-fleet binary");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("failed to feed host input");
    child.wait_with_output().expect("bot exits")
}

fn empty_map_setup() -> String {
    let mut text = format!("{CONSTANTS}\n2 0\n0 2 2\n1 5 5\n8 8\n");
    for _ in 0..8 {
        text.push_str("0 0 0 0 0 0 0 0\n");
    }
    text
}

#[test]
fn plays_a_turn_and_exits_at_end_of_input() {
    let mut input = empty_map_setup();
    input.push_str("1\n0 1 0 5000\n0 2 3 0\n1 0 0 5000\n0\n");
    let dir = log_dir("session");

    let output = play(&input, &dir);
    assert!(
        output.status.success(),
        "bot failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["probe", "m 0 o g"]);
    assert!(dir.join("halite-fleet-0.log").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn malformed_map_fails_before_announcing() {
    let input = format!("{CONSTANTS}\n1 0\n0 0 0\n3 1\n1 2\n");
    let dir = log_dir("malformed");

    let output = play(&input, &dir);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read game setup"), "stderr: {stderr}");
    let _ = std::fs::remove_dir_all(&dir);
}
