use std::io::Write;
use std::process::{Command, Output, Stdio};

fn bin() -> String {
    // Cargo sets this for bin targets in integration tests
    env!("CARGO_BIN_EXE_quadcalc").to_string()
}

/// Command isolated from the user's config and terminal colors.
fn quadcalc(home: &std::path::Path) -> Command {
    let mut cmd = Command::new(bin());
    cmd.env("HOME", home).env("USERPROFILE", home).env("NO_COLOR", "1").env_remove("QUADCALC_DEBUG");
    cmd
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn integrate_prints_both_rules() {
    let home = tempfile::tempdir().unwrap();
    let output = quadcalc(home.path())
        .args(["integrate", "x", "--from", "0", "--to", "2", "-n", "4"])
        .output()
        .expect("run");
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(stdout(&output), "Midpoint rule: 2.0\nTrapezoidal rule: 2.0\n");
}

#[test]
fn integrate_accepts_leading_minus_everywhere() {
    let home = tempfile::tempdir().unwrap();
    let output = quadcalc(home.path())
        .args(["integrate", "-x**2", "--from", "-1", "--to", "1", "-n", "2", "--rule", "trapezoidal"])
        .output()
        .expect("run");
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(stdout(&output), "Trapezoidal rule: -1.0\n");
}

#[test]
fn integrate_json_report() {
    let home = tempfile::tempdir().unwrap();
    let output = quadcalc(home.path())
        .args(["integrate", "1/x", "-a", "0", "-b", "1", "-n", "10", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid json");
    assert_eq!(report["n"], 10);
    assert_eq!(report["variable"], "x");
    assert_eq!(report["results"][0]["rule"], "midpoint");
    assert!(report["results"][0]["value"].is_f64());
    assert_eq!(report["results"][1]["rule"], "trapezoidal");
    assert!(report["results"][1]["value"].is_null());
    assert_eq!(report["results"][1]["display"], "inf");
}

#[test]
fn bad_inputs_exit_with_code_two() {
    let home = tempfile::tempdir().unwrap();
    let output = quadcalc(home.path())
        .args(["integrate", "x + y", "--from", "0", "--to", "1"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("Undefined Name: 'y' at 1:5"), "{err}");
    assert!(err.contains("available: cos, sin"), "{err}");

    let output = quadcalc(home.path())
        .args(["integrate", "x", "--from", "1", "--to", "0"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("a must be less than or equal to b"));
    assert!(!stderr(&output).contains("available:"));
}

#[test]
fn pretty_errors_draw_a_caret() {
    let home = tempfile::tempdir().unwrap();
    let output = quadcalc(home.path())
        .args(["--pretty-errors", "integrate", "x + y", "--from", "0", "--to", "1"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("--> formula:1:5"), "{err}");
    assert!(err.contains("   1 | x + y"), "{err}");
}

#[test]
fn config_file_supplies_defaults() {
    let home = tempfile::tempdir().unwrap();
    let cfg = home.path().join("calc.toml");
    std::fs::write(&cfg, "variable = \"t\"\nprecision = 2\ndefault_n = 4\n").unwrap();
    let output = quadcalc(home.path())
        .arg("--config")
        .arg(&cfg)
        .args(["integrate", "t", "--from", "0", "--to", "1", "--rule", "midpoint"])
        .output()
        .expect("run");
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(stdout(&output), "Midpoint rule: 0.50\n");

    std::fs::write(&cfg, "default_n = 0\n").unwrap();
    let output = quadcalc(home.path()).arg("--config").arg(&cfg).arg("functions").output().expect("run");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("default_n must be positive"));
}

#[test]
fn functions_tokens_and_ast() {
    let home = tempfile::tempdir().unwrap();
    let output = quadcalc(home.path()).arg("functions").output().expect("run");
    assert!(output.status.success());
    assert!(stdout(&output).contains("gcd     function/2\n"));

    let output = quadcalc(home.path()).args(["tokens", "x**2"]).output().expect("run");
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("1:1  identifier 'x'\n1:2  '**'\n"));

    let output = quadcalc(home.path()).args(["ast", "-x**2"]).output().expect("run");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "(-(x ** 2))\n");

    let output = quadcalc(home.path()).args(["ast", "x +"]).output().expect("run");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn shell_reads_piped_stdin() {
    let home = tempfile::tempdir().unwrap();
    let mut child = quadcalc(home.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start shell");
    {
        let stdin = child.stdin.as_mut().expect("stdin");
        write!(stdin, "x\n0\n1\n2\nq\n").unwrap();
    }
    let output = child.wait_with_output().expect("shell run");
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Enter a formula in terms of x: "), "{out}");
    assert!(out.contains("Midpoint rule: 0.5\nTrapezoidal rule: 0.5\n"), "{out}");
}

#[test]
fn shell_ends_cleanly_at_end_of_input() {
    let home = tempfile::tempdir().unwrap();
    let output = quadcalc(home.path()).arg("shell").stdin(Stdio::null()).output().expect("run");
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
}
