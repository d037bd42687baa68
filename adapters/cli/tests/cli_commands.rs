use std::{
    fs,
    io::Write,
    path::Path,
    process::{Command, Output, Stdio},
};

use tempfile::TempDir;

/// Scratch directory holding a settings file that points preferences inside it.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().expect("create sandbox");
        let preferences = dir.path().join("preferences.toml");
        fs::write(
            dir.path().join("settings.toml"),
            format!("preferences = {:?}\n", preferences.display().to_string()),
        )
        .expect("write settings");
        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn run(&self, args: &[&str], stdin: &str) -> Output {
        let config = self.root().join("settings.toml");
        let mut child = Command::new(env!("CARGO_BIN_EXE_huecheck"))
            .arg("--config")
            .arg(&config)
            .args(args)
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn huecheck");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(stdin.as_bytes())
            .expect("write stdin");
        child.wait_with_output().expect("huecheck runs to completion")
    }

    fn preferences(&self) -> String {
        fs::read_to_string(self.root().join("preferences.toml")).unwrap_or_default()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn classify_reports_a_normal_verdict_for_all_correct_answers() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["classify", "--answers", "0,0,0,0,0,0,0,0"], "");
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert_eq!(text.lines().next(), Some("Normal"));
    assert!(text.contains("Recommended mode: Normal."));
}

#[test]
fn classify_detects_tritan_misses() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["classify", "--answers", "0,0,0,0,0,1,-,0"], "");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).lines().next(), Some("Tritanopia"));
}

#[test]
fn classify_rejects_short_answer_lists() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["classify", "--answers", "0,0,0"], "");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("transcript holds 3 answers"));
}

#[test]
fn classify_rejects_foreign_transcripts() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["classify", "--transcript", "huecheck:v2:e30"], "");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("version 'v2' is not supported"));
}

#[test]
fn render_summarises_a_plate_deterministically() {
    let sandbox = Sandbox::new();
    let first = sandbox.run(&["render", "--plate", "RG1"], "");
    let second = sandbox.run(&["render", "--plate", "RG1"], "");
    assert!(first.status.success(), "{}", stderr(&first));
    let text = stdout(&first);
    assert!(text.starts_with("RG1 hides \"7\": 1800 dots, seed 0x79c1a854"));
    assert_eq!(text, stdout(&second));
}

#[test]
fn render_writes_svg_files() {
    let sandbox = Sandbox::new();
    let path = sandbox.root().join("c1.svg");
    let output = sandbox.run(
        &["render", "--plate", "C1", "--out", path.to_str().expect("utf-8 path")],
        "",
    );
    assert!(output.status.success(), "{}", stderr(&output));
    let svg = fs::read_to_string(&path).expect("svg written");
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<circle").count(), 1801);
}

#[test]
fn render_rejects_unknown_plates() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["render", "--plate", "ZZ"], "");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown plate `ZZ`"));
}

#[test]
fn mode_round_trips_through_the_preference_file() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["mode"], "");
    assert_eq!(stdout(&output).trim(), "Normal (normal)");

    let output = sandbox.run(&["mode", "tritanopia"], "");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "Tritanopia (tritanopia)");
    assert!(sandbox.preferences().contains("colorMode = \"tritanopia\""));

    let output = sandbox.run(&["mode"], "");
    assert_eq!(stdout(&output).trim(), "Tritanopia (tritanopia)");

    let output = sandbox.run(&["mode", "sepia"], "");
    assert_eq!(stdout(&output).trim(), "Normal (normal)");
}

#[test]
fn seeded_pairs_repeat() {
    let sandbox = Sandbox::new();
    let args = ["pair", "--axis", "luminance", "--delta", "10", "--seed", "7"];
    let first = sandbox.run(&args, "");
    let second = sandbox.run(&args, "");
    assert!(first.status.success(), "{}", stderr(&first));
    let text = stdout(&first);
    assert!(text.starts_with("Contrast (delta 10)"));
    assert_eq!(text.lines().count(), 3);
    assert_eq!(text, stdout(&second));
}

#[test]
fn terminal_assessment_prints_verdict_and_saves_it() {
    let sandbox = Sandbox::new();
    let out_dir = sandbox.root().join("plates");
    let answers = "n\n1\n1\n1\n1\n1\n3\n3\n1\n";
    let output = sandbox.run(
        &[
            "assess",
            "--save",
            "--out-dir",
            out_dir.to_str().expect("utf-8 path"),
        ],
        answers,
    );
    assert!(output.status.success(), "{}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("Choose an answer before continuing."));
    assert!(text.contains("Tritanopia. "));
    assert!(text.contains("Transcript: huecheck:v1:"));
    assert_eq!(fs::read_dir(&out_dir).expect("plates written").count(), 8);

    let preferences = sandbox.preferences();
    assert!(preferences.contains("deficiencyType = \"tritanopia\""));
    assert!(preferences.contains("firstTimeDone = \"true\""));

    let transcript = text
        .lines()
        .find_map(|line| line.strip_prefix("Transcript: "))
        .expect("transcript line");
    let replay = sandbox.run(&["classify", "--transcript", transcript], "");
    assert_eq!(stdout(&replay).lines().next(), Some("Tritanopia"));
}

#[test]
fn train_ends_after_the_requested_rounds() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(
        &["train", "--rounds", "2", "--axis", "red-green", "--seed", "3"],
        "1\n2\n",
    );
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Red\u{2013}Green"));
    assert_eq!(
        text.lines().filter(|line| line.starts_with("Level: ")).count(),
        3
    );
}
