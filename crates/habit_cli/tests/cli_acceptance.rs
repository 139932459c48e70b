use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn habit(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("habit").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_STATE_HOME", home.join("state"))
        .arg("--data-dir")
        .arg(home.join("data"));
    cmd
}

fn created_id(output: &[u8]) -> String {
    let text = String::from_utf8_lossy(output);
    text.split_whitespace().nth(1).unwrap().to_string()
}

#[test]
fn add_toggle_and_report_stats() {
    let home = tempfile::tempdir().unwrap();

    let output = habit(home.path())
        .args(["add", "Morning run", "--category", "health"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("created "))
        .get_output()
        .stdout
        .clone();
    let id = created_id(&output);

    habit(home.path())
        .args(["toggle", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("done"));

    habit(home.path())
        .args(["stats", &id[..8], "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"currentStreak\": 1"))
        .stdout(predicate::str::contains("\"totalCompletions\": 1"));

    habit(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Morning run [health]"));
}

#[test]
fn explicit_dates_feed_longest_streak() {
    let home = tempfile::tempdir().unwrap();
    let output = habit(home.path())
        .args(["add", "Read"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let id = created_id(&output);

    for date in ["2024-01-01", "2024-01-02", "2024-01-04"] {
        habit(home.path())
            .args(["toggle", &id, "--date", date])
            .assert()
            .success();
    }

    habit(home.path())
        .args(["stats", &id, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"longestStreak\": 3"));
}

#[test]
fn invalid_date_and_unknown_habit_fail() {
    let home = tempfile::tempdir().unwrap();
    let output = habit(home.path())
        .args(["add", "Stretch"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let id = created_id(&output);

    habit(home.path())
        .args(["toggle", &id, "--date", "01/02/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date key"));

    habit(home.path())
        .args(["stats", "ffffffff"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no habit matches"));
}

#[test]
fn empty_overview_and_blank_name() {
    let home = tempfile::tempdir().unwrap();

    habit(home.path())
        .arg("overview")
        .assert()
        .success()
        .stdout(predicate::str::contains("habits:       0"));

    habit(home.path())
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("habit name cannot be empty"));
}
