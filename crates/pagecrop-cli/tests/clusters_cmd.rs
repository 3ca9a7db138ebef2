mod common;

use common::{cmd, pdf_with_pages, write_temp_pdf};
use predicates::prelude::*;

fn mixed_pdf() -> tempfile::NamedTempFile {
    write_temp_pdf(&pdf_with_pages(
        &[(600, 800, 0), (600, 800, 0), (842, 595, 0), (605, 810, 0)],
        &[],
    ))
}

#[test]
fn clusters_group_by_size() {
    let file = mixed_pdf();
    cmd()
        .arg("clusters")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Cluster 1: 600 x 800 (3 pages)"))
        .stdout(predicate::str::contains("Pages: 1,2,4"))
        .stdout(predicate::str::contains("Cluster 2: 840 x 580 (1 pages)"));
}

#[test]
fn clusters_split_odd_even_and_exclude() {
    let file = mixed_pdf();
    cmd()
        .arg("clusters")
        .arg(file.path())
        .args(["--split-odd-even", "--exclude", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pages: 1\n"))
        .stdout(predicate::str::contains("Pages: 2\n"))
        .stdout(predicate::str::contains("excluded"));
}

#[test]
fn clusters_json_lists_pages() {
    let file = mixed_pdf();
    let output = cmd()
        .arg("clusters")
        .arg(file.path())
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let clusters = json["clusters"].as_array().unwrap();
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0]["all_pages"], serde_json::json!([1, 2, 4]));
    assert_eq!(clusters[1]["all_pages"], serde_json::json!([3]));
}

#[test]
fn clusters_rejects_bad_exclude_range() {
    let file = mixed_pdf();
    cmd()
        .arg("clusters")
        .arg(file.path())
        .args(["--exclude", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds document page count"));
}
