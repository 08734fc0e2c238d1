//! End-to-end tests for the offline `wl-geo` commands.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const LISBON: &str = "38.7223,-9.1393";

const FEED: &str = r##"[
    {"id": "belem", "author_id": "u1", "caption": "Pastéis at the tower", "location_name": "Belém",
     "location": "POINT(-9.2160 38.6916)", "tags": ["#pastry", "lisbon"]},
    {"id": "sintra", "author_id": "u2", "caption": "Pena Palace in the fog",
     "latitude": 38.8029, "longitude": -9.3817, "tags": ["palace"]},
    {"id": "somewhere", "author_id": "u3", "caption": "Lost the GPS again, tram ride anyway"},
    {"id": "alfama", "author_id": "u1", "caption": "Tram 28 up the hill", "location_name": "Alfama",
     "location": {"type": "Point", "coordinates": [-9.1300, 38.7118]}, "tags": ["tram"]},
    {"id": "porto", "author_id": "u4", "caption": "Ribeira at dusk",
     "location": {"lat": 41.1579, "lng": -8.6291}}
]"##;

/// A sandbox with no config file in reach and no `WANDERLUST_*` overrides
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("feed.json"), FEED).unwrap();
        Self { dir }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("wl-geo").unwrap();
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join(".config"))
            .env_remove("RUST_LOG")
            .env_remove("WANDERLUST_GEOCODER_URL")
            .env_remove("WANDERLUST_USER_AGENT")
            .env_remove("WANDERLUST_GEOCODER_TIMEOUT_SECS");
        cmd
    }

    fn json(&self, args: &[&str]) -> Value {
        let output = self.cmd().args(["--format", "json"]).args(args).output().unwrap();
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

fn ids(value: &Value) -> Vec<&str> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_str().unwrap())
        .collect()
}

#[test]
fn distance_paris_london() {
    Sandbox::new()
        .cmd()
        .args(["distance", "48.8566,2.3522", "51.5074,-0.1278"])
        .assert()
        .success()
        .stdout(predicate::str::contains("344km"));
}

#[test]
fn distance_json_with_negative_coordinates() {
    let out = Sandbox::new().json(&["distance", "-33.8688,151.2093", "-33.8688,151.2093"]);
    assert_eq!(out["distance_km"].as_f64().unwrap(), 0.0);
    assert_eq!(out["label"], "0m");
}

#[test]
fn distance_rejects_out_of_range() {
    Sandbox::new()
        .cmd()
        .args(["distance", "91,0", "0,0"])
        .assert()
        .failure();
}

#[test]
fn format_matches_display_rules() {
    let sandbox = Sandbox::new();
    for (km, label) in [("0.5", "500m"), ("1.0", "1.0km"), ("9.95", "10.0km"), ("15.4", "15km")] {
        sandbox
            .cmd()
            .args(["format", km])
            .assert()
            .success()
            .stdout(format!("{label}\n"));
    }
}

#[test]
fn format_rejects_non_numbers() {
    Sandbox::new().cmd().args(["format", "far"]).assert().failure();
}

#[test]
fn nearby_keeps_feed_order() {
    let out = Sandbox::new().json(&["nearby", "feed.json", "--at", LISBON, "--radius", "10"]);
    assert_eq!(ids(&out), ["belem", "alfama"]);
    assert_eq!(out[1]["distance_label"], "1.4km");
}

#[test]
fn nearby_sorted_and_limited() {
    let sandbox = Sandbox::new();

    let out = sandbox.json(&["nearby", "feed.json", "--at", LISBON, "--radius", "25", "--sort"]);
    assert_eq!(ids(&out), ["alfama", "belem", "sintra"]);

    let out = sandbox.json(&["nearby", "feed.json", "--at", LISBON, "--radius", "25", "--sort", "--limit", "1"]);
    assert_eq!(ids(&out), ["alfama"]);
}

#[test]
fn nearby_zero_radius_matches_identical_point() {
    let out = Sandbox::new().json(&["nearby", "feed.json", "--at", "38.7118,-9.1300", "--radius", "0"]);
    assert_eq!(ids(&out), ["alfama"]);
}

#[test]
fn nearby_text_output() {
    Sandbox::new()
        .cmd()
        .args(["nearby", "feed.json", "--at", LISBON])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 posts within 10km"))
        .stdout(predicate::str::contains("Tram 28 up the hill"))
        .stderr(predicate::str::contains("Skipped 1 post without a location"));
}

#[test]
fn nearby_requires_an_origin() {
    Sandbox::new()
        .cmd()
        .args(["nearby", "feed.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("an origin is required"));
}

#[test]
fn nearby_origin_flags_are_exclusive() {
    Sandbox::new()
        .cmd()
        .args(["nearby", "feed.json", "--at", LISBON, "--place", "Lisbon"])
        .assert()
        .failure();
}

#[test]
fn nearby_here_uses_configured_home() {
    let sandbox = Sandbox::new();
    sandbox.write("wanderlust.toml", "[geolocation]\nlatitude = 38.7223\nlongitude = -9.1393\n");

    let out = sandbox.json(&["nearby", "feed.json", "--here", "--radius", "10", "--sort"]);
    assert_eq!(ids(&out), ["alfama", "belem"]);
}

#[test]
fn nearby_missing_file() {
    Sandbox::new()
        .cmd()
        .args(["nearby", "missing.json", "--at", LISBON])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read missing.json"));
}

#[test]
fn nearby_reads_stdin() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd()
        .args(["--format", "json", "nearby", "-", "--at", LISBON, "--radius", "300", "--sort"])
        .write_stdin(FEED)
        .output()
        .unwrap();
    assert!(output.status.success());

    let out: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(ids(&out), ["alfama", "belem", "sintra", "porto"]);
}

#[test]
fn explore_by_text() {
    let out = Sandbox::new().json(&["explore", "feed.json", "--query", "TRAM"]);
    assert_eq!(
        out.as_array()
            .unwrap()
            .iter()
            .map(|hit| hit["post"]["id"].as_str().unwrap())
            .collect::<Vec<_>>(),
        ["somewhere", "alfama"]
    );
    assert!(out[0]["distance_km"].is_null());
}

#[test]
fn explore_by_text_near_origin() {
    let out = Sandbox::new().json(&["explore", "feed.json", "--query", "tram", "--at", LISBON]);
    let hits = out.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["post"]["id"], "alfama");
    assert_eq!(hits[0]["distance_label"], "1.4km");
}

#[test]
fn locate_without_location_service() {
    Sandbox::new()
        .cmd()
        .arg("locate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("UNSUPPORTED"));
}

#[test]
fn locate_with_configured_home() {
    let sandbox = Sandbox::new();
    let config = sandbox.write("home.toml", "[geolocation]\nlatitude = 60.1699\nlongitude = 24.9384\n");

    let out = sandbox.json(&["--config", config.to_str().unwrap(), "locate"]);
    assert_eq!(out["coordinate"]["latitude"], 60.1699);
    assert_eq!(out["coordinate"]["longitude"], 24.9384);
}

#[test]
fn explicit_config_must_exist() {
    Sandbox::new()
        .cmd()
        .args(["--config", "nope.toml", "format", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn reverse_falls_back_to_coordinates_when_offline() {
    Sandbox::new()
        .cmd()
        .args(["--geocoder-url", "http://127.0.0.1:1", "reverse", LISBON])
        .assert()
        .success()
        .stdout("38.7223, -9.1393\n");
}

#[test]
fn geocode_fails_when_offline() {
    Sandbox::new()
        .cmd()
        .args(["--geocoder-url", "http://127.0.0.1:1", "geocode", "Lisbon"])
        .assert()
        .failure();
}

#[test]
fn nearby_at_ignores_incomplete_home_position() {
    let sandbox = Sandbox::new();
    sandbox.write("wanderlust.toml", "[geolocation]\nlatitude = 38.7223\n");

    let out = sandbox.json(&["nearby", "feed.json", "--at", LISBON, "--radius", "10"]);
    assert_eq!(ids(&out), ["belem", "alfama"]);
}

#[test]
fn nearby_place_reports_unreachable_geocoder() {
    Sandbox::new()
        .cmd()
        .args(["--geocoder-url", "http://127.0.0.1:1", "nearby", "feed.json", "--place", "Lisbon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP request failed"))
        .stderr(predicate::str::contains("No place found").not());
}
