use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn catalog(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("catalog").expect("binary");
    cmd.current_dir(dir.path()).arg("--quiet");
    cmd
}

fn add_sample(dir: &tempfile::TempDir, id: &str, continent: &str, scholarship_type: &str) {
    catalog(dir)
        .args([
            "add",
            id,
            "--continent",
            continent,
            "--origin-country",
            "Japan",
            "--institution",
            "MEXT",
            "--program-level",
            "S2",
            "--scholarship-type",
            scholarship_type,
            "--window",
            "April - May",
        ])
        .assert()
        .success();
}

#[test]
fn add_list_search_delete_round_trip() {
    let dir = tempdir().unwrap();
    add_sample(&dir, "B001", "Asia", "Fully Funded");
    add_sample(&dir, "B002", "Europe", "Partial");

    catalog(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("B001").and(predicate::str::contains("B002")));

    catalog(&dir)
        .args(["search", "europe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("B002").and(predicate::str::contains("B001").not()));

    catalog(&dir)
        .args(["delete", "B001"])
        .assert()
        .success();

    catalog(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("B001").not());
}

#[test]
fn duplicate_add_is_ignored() {
    let dir = tempdir().unwrap();
    add_sample(&dir, "B001", "Asia", "Fully Funded");

    catalog(&dir)
        .args([
            "add",
            "B001",
            "--continent",
            "Europe",
            "--origin-country",
            "France",
            "--institution",
            "Eiffel",
            "--program-level",
            "S1",
            "--scholarship-type",
            "Partial",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    // The original payload survives.
    catalog(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Asia"));
}

#[test]
fn upload_strips_header_and_skips_malformed_rows() {
    let dir = tempdir().unwrap();
    let upload = dir.path().join("batch.csv");
    std::fs::write(
        &upload,
        "id,continent,origin_country,institution_name,top_university,program_level,scholarship_type,requirements,benefit,application_window,link\n\
         B010,Asia,Japan,MEXT,University of Tokyo,S2,Fully Funded,Bachelor,Tuition,April - May,https://example.org/mext\n\
         B011,Europe,UK,Chevening,,S2,Fully Funded,Bachelor,Stipend,June - August,https://example.org/chevening\n\
         broken,row\n",
    )
    .unwrap();

    catalog(&dir)
        .args(["upload", "batch.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 of 3 rows").and(
            predicate::str::contains("1 rows skipped"),
        ));

    catalog(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("B010").and(predicate::str::contains("B011")));
}

#[test]
fn filter_chart_and_summary_views() {
    let dir = tempdir().unwrap();
    add_sample(&dir, "B001", "Asia", "Fully Funded");
    add_sample(&dir, "B002", "Europe", "Partial");
    add_sample(&dir, "B003", "Asia", "Fully Funded");

    catalog(&dir)
        .args(["filter", "--where", "continent=Asia"])
        .assert()
        .success()
        .stdout(predicate::str::contains("B001").and(predicate::str::contains("B002").not()));

    catalog(&dir)
        .args(["chart", "--by", "scholarship_type", "--top", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fully Funded  2"));

    catalog(&dir)
        .args(["summary", "--by", "continent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("66.7"));

    // A typo'd attribute surfaces as an error, not an empty view.
    catalog(&dir)
        .args(["chart", "--by", "region"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid attribute"));
}

#[test]
fn fuzzy_search_finds_near_matches() {
    let dir = tempdir().unwrap();
    add_sample(&dir, "B001", "Asia", "Fully Funded"); // institution MEXT

    catalog(&dir)
        .args([
            "add",
            "B002",
            "--continent",
            "Europe",
            "--origin-country",
            "UK",
            "--institution",
            "Chevening Scholarship",
            "--program-level",
            "S2",
            "--scholarship-type",
            "Fully Funded",
        ])
        .assert()
        .success();

    catalog(&dir)
        .args(["fuzzy", "Chevening"])
        .assert()
        .success()
        .stdout(predicate::str::contains("B002").and(predicate::str::contains("B001").not()));
}

#[test]
fn closing_soon_uses_the_reference_month() {
    let dir = tempdir().unwrap();
    add_sample(&dir, "B001", "Asia", "Fully Funded"); // window "April - May"

    catalog(&dir)
        .args(["closing-soon", "--on", "2024-05-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("B001"));

    catalog(&dir)
        .args(["closing-soon", "--on", "2024-11-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No records."));
}

#[test]
fn edit_merges_changed_fields_only() {
    let dir = tempdir().unwrap();
    add_sample(&dir, "B001", "Asia", "Fully Funded");

    catalog(&dir)
        .args(["edit", "B001", "--continent", "Europe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated B001."));

    catalog(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Europe")
                // Untouched fields keep their values.
                .and(predicate::str::contains("Fully Funded")),
        );

    catalog(&dir)
        .args(["edit", "B404", "--continent", "Africa"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No record with id B404"));
}

#[test]
fn report_exports_csv() {
    let dir = tempdir().unwrap();
    add_sample(&dir, "B001", "Asia", "Fully Funded");

    catalog(&dir)
        .args(["report", "--out", "report.csv"])
        .assert()
        .success();

    let body = std::fs::read_to_string(dir.path().join("report.csv")).unwrap();
    assert!(body.starts_with("id,continent,origin_country"));
    assert!(body.contains("B001"));
}

#[test]
fn reset_requires_confirmation() {
    let dir = tempdir().unwrap();
    add_sample(&dir, "B001", "Asia", "Fully Funded");

    catalog(&dir).arg("reset").assert().failure();

    catalog(&dir).args(["reset", "--yes"]).assert().success();

    catalog(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No records."));
}

#[test]
fn session_gate_blocks_and_admits() {
    let dir = tempdir().unwrap();

    catalog(&dir)
        .env("CATALOG_REQUIRE_LOGIN", "true")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires login"));

    catalog(&dir)
        .env("CATALOG_REQUIRE_LOGIN", "true")
        .args(["--user", "admin", "--password", "admin123", "list"])
        .assert()
        .success();
}
