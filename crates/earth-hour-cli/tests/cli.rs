use assert_cmd::Command;
use predicates::prelude::*;

fn earth_hour() -> Command {
    let mut cmd = Command::cargo_bin("earth-hour").unwrap();
    for var in [
        "EARTH_HOUR_TIMEZONE",
        "EARTH_HOUR_LOCALE",
        "EARTH_HOUR_NOW",
        "EARTH_HOUR_LOG_LEVEL",
        "EARTH_HOUR_STATE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn occurrence_text() {
    earth_hour()
        .args(["--timezone", "Europe/Amsterdam", "occurrence", "--year", "2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("start: 2025-03-29T20:30:00+01:00"))
        .stdout(predicate::str::contains("end:   2025-03-29T21:30:00+01:00"))
        .stdout(predicate::str::contains("29th March 2025, 20:30–21:30"));
}

#[test]
fn occurrence_json_dutch() {
    let output = earth_hour()
        .args([
            "--timezone",
            "Europe/Amsterdam",
            "--locale",
            "nl",
            "occurrence",
            "--year",
            "2026",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["year"], 2026);
    assert_eq!(json["start"], "2026-03-28T20:30:00+01:00");
    assert_eq!(json["friendly_date"], "28 maart 2026");
}

#[test]
fn occurrence_defaults_to_year_of_now() {
    earth_hour()
        .args(["--now", "2024-07-01T12:00:00Z", "occurrence"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Earth Hour 2024 (Europe/Amsterdam)"))
        .stdout(predicate::str::contains("2024-03-30T20:30:00+01:00"));
}

#[test]
fn status_during_window() {
    earth_hour()
        .args(["--now", "2025-03-29T20:45:00+01:00", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Active:              yes"))
        .stdout(predicate::str::contains("Minutes until start: -15"))
        .stdout(predicate::str::contains("Minutes until end:   45"));
}

#[test]
fn status_json_after_window_targets_next_year() {
    let output = earth_hour()
        .args(["--now", "2025-03-29T22:00:00+01:00", "status", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["is_active"], false);
    assert_eq!(json["is_event_day"], true);
    assert_eq!(json["upcoming_start"], "2026-03-28T20:30:00+01:00");
    assert!(json["minutes_until_start"].as_i64().unwrap() > 300 * 24 * 60);
}

#[test]
fn reminders_for_leap_year() {
    earth_hour()
        .args(["reminders", "--year", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-02-29T20:30:00+01:00"))
        .stdout(predicate::str::contains("2024-03-30T20:00:00+01:00"));
}

#[test]
fn reminders_json_lists_all_kinds() {
    let output = earth_hour()
        .args(["reminders", "--year", "2025", "--json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let kinds: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["kind"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "one_month_before",
            "one_week_before",
            "one_day_before",
            "thirty_minutes_before"
        ]
    );
    assert_eq!(json[0]["fires_at"], "2025-02-28T20:30:00+01:00");
}

#[test]
fn tick_fires_once_with_state_file() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    let state = state.to_str().unwrap();

    earth_hour()
        .args(["--now", "2025-03-22T21:00:00+01:00", "tick", "--state", state])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Earth Hour is one month away: 29th March at 20:30.\n\
             Earth Hour is one week away: 29th March at 20:30.\n",
        ));

    earth_hour()
        .args(["--now", "2025-03-22T21:05:00+01:00", "tick", "--state", state])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let raw = std::fs::read_to_string(dir.path().join("state.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["notifications.oneWeekBeforeYear"], 2025);
}

#[test]
fn tick_without_state_is_stateless() {
    for _ in 0..2 {
        earth_hour()
            .args(["--now", "2025-03-28T21:00:00+01:00", "tick"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Earth Hour is tomorrow"));
    }
}

#[test]
fn invalid_timezone_fails() {
    earth_hour()
        .args(["--timezone", "Atlantis/Capital", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}

#[test]
fn invalid_now_fails() {
    earth_hour()
        .args(["--now", "next tuesday", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid datetime"));
}

#[test]
fn environment_configuration() {
    earth_hour()
        .env("EARTH_HOUR_TIMEZONE", "America/New_York")
        .env("EARTH_HOUR_NOW", "2025-01-01T00:00:00Z")
        .args(["occurrence", "--year", "2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-03-29T20:30:00-04:00"));
}
