mod common;

use common::{cmd, pdf_with_pages, write_temp_pdf};
use predicates::prelude::*;

#[test]
fn info_shows_pages_and_boxes() {
    let file = write_temp_pdf(&pdf_with_pages(&[(600, 800, 0), (600, 800, 90)], &[]));
    cmd()
        .arg("info")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1:"))
        .stdout(predicate::str::contains("Page 2:"))
        .stdout(predicate::str::contains("MediaBox: [0.00, 0.00, 600.00, 800.00]"))
        .stdout(predicate::str::contains("Rotation: 90"))
        .stdout(predicate::str::contains("Dimensions: 800.00 x 600.00"))
        .stdout(predicate::str::contains("Pages: 2"));
}

#[test]
fn info_shows_metadata_and_bookmarks() {
    let file = write_temp_pdf(&pdf_with_pages(&[(600, 800, 0), (600, 800, 0)], &[1]));
    cmd()
        .arg("info")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Lecture Notes"))
        .stdout(predicate::str::contains("Section 1 -> 2"));
}

#[test]
fn info_json_is_valid() {
    let file = write_temp_pdf(&pdf_with_pages(&[(612, 792, 0)], &[0]));
    let output = cmd()
        .arg("info")
        .arg(file.path())
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["pages"], 1);
    assert_eq!(json["page_info"][0]["media_box"], serde_json::json!([0.0, 0.0, 612.0, 792.0]));
    assert_eq!(json["metadata"]["Title"], "Lecture Notes");
    assert_eq!(json["bookmarks"][0]["page"], 1);
}

#[test]
fn info_rejects_non_pdf() {
    let file = write_temp_pdf(b"plain text, not a PDF");
    cmd()
        .arg("info")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open PDF"));
}
