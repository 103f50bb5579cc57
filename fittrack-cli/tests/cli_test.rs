use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn fittrack(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fittrack").unwrap();
    cmd.env("FITTRACK_CONFIG", config_dir.path().join("config.toml"))
        .env_remove("FITTRACK_API_URL")
        .env_remove("FITTRACK_PASSWORD");
    cmd
}

fn write_token(config_dir: &TempDir, token: &str) {
    fs::write(
        config_dir.path().join("config.toml"),
        format!("[auth]\ntoken = \"{}\"\n", token),
    )
    .unwrap();
}

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("fittrack").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Terminal client for your FitTrack workout log"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("workout"))
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("fittrack").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let mut cmd = Command::cargo_bin("fittrack").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_fittrack"));
}

#[test]
fn test_config_init_and_show_hides_token() {
    let dir = TempDir::new().unwrap();

    fittrack(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration initialized"));

    fittrack(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    write_token(&dir, "very-secret");

    fittrack(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<hidden>"))
        .stdout(predicate::str::contains("very-secret").not());
}

#[test]
fn test_commands_require_login() {
    let dir = TempDir::new().unwrap();

    fittrack(&dir)
        .arg("exercises")
        .assert()
        .failure()
        .stdout(predicate::str::contains("You are not logged in."));
}

#[test]
fn test_exercises_lists_catalog() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/exercises")
        .match_header("authorization", "Bearer tok")
        .with_body(r#"[{"id": "e1", "name": "Squat", "muscle_group": "Legs"}]"#)
        .create();

    let dir = TempDir::new().unwrap();
    write_token(&dir, "tok");

    fittrack(&dir)
        .args(["--api-url", &server.url(), "exercises"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Squat (Legs)"));

    mock.assert();
}

#[test]
fn test_expired_session_clears_token() {
    let mut server = mockito::Server::new();
    server.mock("GET", "/api/exercises").with_status(401).create();

    let dir = TempDir::new().unwrap();
    write_token(&dir, "stale");

    fittrack(&dir)
        .args(["--api-url", &server.url(), "exercises"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Session expired"))
        .stdout(predicate::str::contains("fittrack login"));

    let saved = fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(!saved.contains("stale"));
}

#[test]
fn test_declined_delete_without_terminal_is_not_sent() {
    let mut server = mockito::Server::new();
    let mock = server.mock("DELETE", "/api/workouts/w1").expect(0).create();

    let dir = TempDir::new().unwrap();
    write_token(&dir, "tok");

    // No TTY: the prompt cannot be answered, so nothing is deleted
    fittrack(&dir)
        .args(["--api-url", &server.url(), "workout", "delete", "w1"])
        .write_stdin("")
        .assert();

    mock.assert();
}

#[test]
fn test_forced_delete_reloads_history() {
    let mut server = mockito::Server::new();
    let delete = server
        .mock("DELETE", "/api/workouts/w1")
        .with_body(r#"{"message": "deleted"}"#)
        .expect(1)
        .create();
    let history = server
        .mock("GET", "/api/workouts/history")
        .with_body("[]")
        .expect(1)
        .create();
    let stats = server
        .mock("GET", "/api/stats")
        .with_body("{}")
        .expect(1)
        .create();

    let dir = TempDir::new().unwrap();
    write_token(&dir, "tok");

    fittrack(&dir)
        .args(["--api-url", &server.url(), "workout", "delete", "w1", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout deleted."))
        .stdout(predicate::str::contains("0 workouts remaining"));

    delete.assert();
    history.assert();
    stats.assert();
}
