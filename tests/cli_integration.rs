//! CLI integration tests for athkar
//!
//! Each test runs the binary inside a temporary directory, so the default
//! corpus paths resolve there.

use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MORNING: &str = "أَصْبَحْنَا وَأَصْبَحَ الْمُلْكُ لِلَّهِ";
const SHARED: &str = "سُبْحَانَ اللَّهِ وَبِحَمْدِهِ";

/// Get a command instance for the athkar binary, rooted in `dir`
fn athkar_cmd(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("athkar"));
    cmd.current_dir(dir).env_remove("ATHKAR_CONFIG");
    cmd
}

fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn record(id: &str, category: &str, text: &str, order: u32, repeat: u32) -> Value {
    json!({
        "id": id,
        "category": category,
        "title": "",
        "text": text,
        "reference": "",
        "repeat": { "min": repeat, "max": repeat, "note": null },
        "orderIndex": order,
        "benefit": null,
        "grading": "sahih",
        "isOptional": false
    })
}

/// Writes a daily corpus and an empty library corpus
fn setup_corpora(dir: &Path, athkar: Vec<Value>) {
    write_json(&dir.join("daily_athkar.json"), &json!({ "athkar": athkar }));
    write_json(&dir.join("hisn.json"), &json!({ "categories": [], "duas": [] }));
}

/// Writes a reference snapshot for `--offline`
fn setup_snapshot(dir: &Path) -> std::path::PathBuf {
    let snapshot = dir.join("snapshot");
    fs::create_dir_all(&snapshot).unwrap();

    write_json(
        &snapshot.join("husn_ar.json"),
        &json!({ "العربية": [
            { "ID": 27, "TITLE": "أذكار الصباح والمساء", "TEXT": "" },
            { "ID": "3", "TITLE": "دعاء لبس الثوب", "TEXT": "" },
            { "ID": 99, "TITLE": "غير موجود", "TEXT": "" },
            { "ID": "x", "TITLE": "broken" }
        ]}),
    );
    write_json(
        &snapshot.join("27.json"),
        &json!({ "العربية": [
            { "ID": 75, "ARABIC_TEXT": "اللَّهُمَّ بِكَ أصبحنا", "REPEAT": "1", "REFERENCE": "الترمذي" },
            { "ID": 76, "ARABIC_TEXT": SHARED, "REPEAT": 100 }
        ]}),
    );
    write_json(
        &snapshot.join("3.json"),
        &json!([{ "ID": 5, "ARABIC_TEXT": "الْحَمْدُ لِلَّهِ الَّذِي كَسَانِي", "REPEAT": 1 }]),
    );
    snapshot
}

// =============================================================================
// Convert Tests
// =============================================================================

#[test]
fn test_convert_writes_daily_corpus() {
    let dir = TempDir::new().unwrap();
    write_json(
        &dir.path().join("adhkar.json"),
        &json!([
            { "id": 1, "category": "أذكار الصباح والمساء", "array": [
                { "id": 1, "text": MORNING, "count": 1 },
                { "id": 2, "text": SHARED, "count": "100" }
            ]},
            { "id": 2, "category": "أذكار النوم", "array": [
                { "id": 1, "text": "بِاسْمِكَ رَبِّي", "count": 1 }
            ]},
            { "id": 999, "category": "unknown", "array": [
                { "id": 1, "text": "x", "count": 1 }
            ]}
        ]),
    );

    athkar_cmd(dir.path())
        .arg("convert")
        .assert()
        .success()
        .stdout(predicate::str::contains("into 4 records"))
        .stderr(predicate::str::contains("Unknown category id=999"));

    let corpus = read_json(&dir.path().join("daily_athkar.json"));
    let ids: Vec<&str> = corpus["athkar"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["adhkar-1-000-m", "adhkar-1-001-m", "adhkar-1-001-e", "adhkar-2-000"]);
    assert_eq!(corpus["athkar"][1]["repeat"]["max"], 100);
}

#[test]
fn test_convert_json_reports_stats() {
    let dir = TempDir::new().unwrap();
    write_json(
        &dir.path().join("raw.json"),
        &json!([{ "id": 2, "category": "أذكار النوم", "array": [{ "text": "t", "count": 1 }] }]),
    );

    let assert = athkar_cmd(dir.path())
        .args(["--format", "json", "convert", "--input", "raw.json", "--output", "out.json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(report["stats"]["output_items"], 1);
    assert_eq!(report["stats"]["daily"], 1);
    assert!(dir.path().join("out.json").is_file());
}

#[test]
fn test_convert_missing_input_fails() {
    let dir = TempDir::new().unwrap();

    athkar_cmd(dir.path())
        .arg("convert")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open"));
}

// =============================================================================
// Dedupe Tests
// =============================================================================

#[test]
fn test_dedupe_keeps_morning_member() {
    let dir = TempDir::new().unwrap();
    setup_corpora(
        dir.path(),
        vec![
            record("e-1", "evening", SHARED, 1, 100),
            record("m-1", "morning", SHARED, 1, 100),
            record("m-2", "morning", "لَا إِلَهَ إِلَّا اللَّهُ", 2, 10),
        ],
    );

    athkar_cmd(dir.path())
        .arg("dedupe")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 records -> 2 (1 duplicates removed)"));

    let corpus = read_json(&dir.path().join("daily_athkar.json"));
    let ids: Vec<&str> = corpus["athkar"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["m-1", "m-2"]);
}

#[test]
fn test_dedupe_dry_run_leaves_file() {
    let dir = TempDir::new().unwrap();
    setup_corpora(
        dir.path(),
        vec![record("e-1", "evening", SHARED, 1, 1), record("m-1", "morning", SHARED, 1, 1)],
    );
    let before = fs::read_to_string(dir.path().join("daily_athkar.json")).unwrap();

    athkar_cmd(dir.path()).args(["dedupe", "--dry-run"]).assert().success();

    let after = fs::read_to_string(dir.path().join("daily_athkar.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_dedupe_keeps_essential_duplicates() {
    let dir = TempDir::new().unwrap();
    let text = "أَعُوذُ بِاللَّهِ - آية الكرسي";
    setup_corpora(
        dir.path(),
        vec![record("m-1", "morning", text, 1, 1), record("e-1", "evening", text, 1, 1)],
    );

    athkar_cmd(dir.path())
        .arg("dedupe")
        .assert()
        .success()
        .stdout(predicate::str::contains("(0 duplicates removed)"));

    let corpus = read_json(&dir.path().join("daily_athkar.json"));
    assert_eq!(corpus["athkar"].as_array().unwrap().len(), 2);
}

// =============================================================================
// Check Tests
// =============================================================================

#[test]
fn test_check_clean_corpus() {
    let dir = TempDir::new().unwrap();
    setup_corpora(
        dir.path(),
        vec![record("a", "morning", "x", 1, 1), record("b", "morning", "y", 2, 1)],
    );

    athkar_cmd(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("no problems"));
}

#[test]
fn test_check_reports_duplicate_ids() {
    let dir = TempDir::new().unwrap();
    setup_corpora(
        dir.path(),
        vec![record("a", "morning", "x", 1, 1), record("a", "morning", "y", 2, 1)],
    );

    athkar_cmd(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("ID a used by 2 records"))
        .stderr(predicate::str::contains("1 problem(s) found"));
}

#[test]
fn test_check_reports_order_and_repeat_problems() {
    let dir = TempDir::new().unwrap();
    let mut inverted = record("b", "morning", "y", 1, 1);
    inverted["repeat"] = json!({ "min": 3, "max": 1, "note": null });
    setup_corpora(
        dir.path(),
        vec![record("a", "morning", "x", 0, 1), inverted, record("c", "morning", "z", 5, 1)],
    );

    athkar_cmd(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Record a has order index 0"))
        .stdout(predicate::str::contains("Record b repeats min 3 above max 1"))
        .stdout(predicate::str::contains("Order indexes 2-4 missing in morning"))
        .stderr(predicate::str::contains("3 problem(s) found"));
}

#[test]
fn test_library_with_unknown_category_loads() {
    let dir = TempDir::new().unwrap();
    setup_corpora(dir.path(), vec![record("m-1", "morning", MORNING, 1, 1)]);
    write_json(
        &dir.path().join("hisn.json"),
        &json!({
            "categories": [{ "id": "hisn-cat-5", "name": "دعاء الخروج من المنزل", "icon": "leaf.fill" }],
            "duas": [
                record("old-5-000", "cat-5", "نص قديم", 1, 1),
                record("sync-5-000", "hisn-cat-5", SHARED, 1, 1)
            ]
        }),
    );

    athkar_cmd(dir.path())
        .args(["check", "--library"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 records, no problems"))
        .stderr(predicate::str::contains("skipping record old-5-000"));

    athkar_cmd(dir.path())
        .args(["revision", "--output", "listing.html"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown category: 'cat-5'"));

    let html = fs::read_to_string(dir.path().join("listing.html")).unwrap();
    assert!(html.contains("دعاء الخروج من المنزل"));
    assert!(html.contains(SHARED));
    assert!(!html.contains("نص قديم"));
}

// =============================================================================
// Reference Service Tests (offline snapshot)
// =============================================================================

#[test]
fn test_sync_offline_builds_both_corpora() {
    let dir = TempDir::new().unwrap();
    let snapshot = setup_snapshot(dir.path());

    athkar_cmd(dir.path())
        .arg("sync")
        .arg("--offline")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sync complete!"))
        .stderr(predicate::str::contains("broken"))
        .stderr(predicate::str::contains("Skipping غير موجود"));

    let daily = read_json(&dir.path().join("daily_athkar.json"));
    let ids: Vec<&str> = daily["athkar"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["sync-27-000-m", "sync-27-001-m", "sync-27-001-e"]);
    assert_eq!(daily["athkar"][0]["reference"], "الترمذي");

    let library = read_json(&dir.path().join("hisn.json"));
    assert_eq!(library["categories"][0]["id"], "hisn-cat-3");
    assert_eq!(library["categories"][0]["icon"], "leaf.fill");
    assert_eq!(library["duas"][0]["category"], "hisn-cat-3");
}

#[test]
fn test_sync_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let snapshot = setup_snapshot(dir.path());

    athkar_cmd(dir.path())
        .args(["--format", "json", "sync", "--dry-run", "--offline"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dry_run\":true"));

    assert!(!dir.path().join("daily_athkar.json").exists());
}

#[test]
fn test_compare_offline_writes_report() {
    let dir = TempDir::new().unwrap();
    let snapshot = setup_snapshot(dir.path());
    setup_corpora(dir.path(), vec![record("m-1", "morning", SHARED, 1, 3)]);

    athkar_cmd(dir.path())
        .arg("compare")
        .arg("--offline")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("report generated at"))
        .stderr(predicate::str::contains("Skipping أذكار النوم"));

    let html = fs::read_to_string(dir.path().join("api_comparison_report.html")).unwrap();
    assert!(html.contains(r#"dir="rtl""#));
    assert!(html.contains("Repeat Mismatch"));
    assert!(html.contains("Not found in app"));
}

#[test]
fn test_compare_requires_local_corpora() {
    let dir = TempDir::new().unwrap();
    let snapshot = setup_snapshot(dir.path());

    athkar_cmd(dir.path())
        .arg("compare")
        .arg("--offline")
        .arg(&snapshot)
        .assert()
        .failure();
}

// =============================================================================
// Revision and Config Tests
// =============================================================================

#[test]
fn test_revision_lists_records() {
    let dir = TempDir::new().unwrap();
    setup_corpora(dir.path(), vec![record("m-1", "morning", SHARED, 1, 100)]);

    athkar_cmd(dir.path())
        .args(["revision", "--output", "listing.html"])
        .assert()
        .success();

    let html = fs::read_to_string(dir.path().join("listing.html")).unwrap();
    assert!(html.contains("أذكار الصباح"));
    assert!(html.contains(SHARED));
}

#[test]
fn test_local_config_paths_are_used() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("Resources")).unwrap();
    fs::write(
        dir.path().join("athkar.toml"),
        "[paths]\ndaily = \"Resources/daily.json\"\n",
    )
    .unwrap();
    write_json(
        &dir.path().join("Resources/daily.json"),
        &json!({ "athkar": [record("a", "sleep", "x", 1, 1)] }),
    );

    athkar_cmd(dir.path()).arg("check").assert().success();
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.toml"), "[matching]\nmatch_threshold = 2.0\n").unwrap();

    athkar_cmd(dir.path())
        .args(["--config", "bad.toml", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}
