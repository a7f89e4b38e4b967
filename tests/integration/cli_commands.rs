#![allow(missing_docs)]

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

#[test]
fn run_writes_header_and_one_row_per_point() {
    let dir = TempDir::new().expect("tempdir");
    let output = dir.path().join("results.csv");
    let assert = cargo_bin_cmd!("widebench")
        .args(["run", "--chunk-sizes", "50,200", "--rows", "200", "--columns", "100"])
        .arg("--artifact")
        .arg(dir.path().join("a.parquet"))
        .arg("--output")
        .arg(&output)
        .args(["--seed", "11"])
        .assert()
        .success();

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("(100, 200), chunk_size=50"));
    assert!(stderr.contains("(100, 200), chunk_size=200"));

    let csv = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("100,200,50,"));
    assert!(lines[2].starts_with("100,200,200,"));
}

#[test]
fn run_reads_toml_config() {
    let dir = TempDir::new().expect("tempdir");
    let output = dir.path().join("from_config.csv");
    let config = dir.path().join("sweep.toml");
    fs::write(
        &config,
        format!(
            "chunk_sizes = [25]\nrow_counts = [50]\ncolumn_counts = [120]\nprojection = [3, 1]\n\
             artifact_path = {:?}\nresults_path = {:?}\nwrite_statistics = false\n",
            dir.path().join("a.parquet"),
            output
        ),
    )
    .unwrap();

    cargo_bin_cmd!("widebench")
        .arg("run")
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.lines().nth(1).unwrap().starts_with("120,50,25,"));
}

#[test]
fn run_fails_with_nonzero_exit_on_unwritable_artifact() {
    let dir = TempDir::new().expect("tempdir");
    let output = dir.path().join("results.csv");
    let assert = cargo_bin_cmd!("widebench")
        .args(["run", "--chunk-sizes", "10", "--rows", "10", "--columns", "100"])
        .arg("--artifact")
        .arg(dir.path().join("missing").join("a.parquet"))
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .code(1);

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("error: failed to open"));
    assert_eq!(fs::read_to_string(&output).unwrap().lines().count(), 1);
}

#[test]
fn run_rejects_zero_axis_values() {
    let dir = TempDir::new().expect("tempdir");
    cargo_bin_cmd!("widebench")
        .args(["run", "--rows", "0"])
        .arg("--output")
        .arg(dir.path().join("results.csv"))
        .assert()
        .failure()
        .code(1);
}

#[test]
fn summary_groups_results_by_chunk_size() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("results.csv");
    fs::write(
        &path,
        "columns,rows,chunk_size,writing(µs),reading_all(µs),reading_100(µs)\n\
         100,5000,100000,1000,500,400\n\
         100,5000,1000,2000,800,600\n\
         200,5000,1000,4000,1600,700\n",
    )
    .unwrap();

    let assert = cargo_bin_cmd!("widebench")
        .arg("summary")
        .arg(&path)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let small = stdout.find("chunk_size=1000, rows=5000").expect("small group");
    let large = stdout.find("chunk_size=100000, rows=5000").expect("large group");
    assert!(small < large);
    assert!(stdout.contains("20.00"));
}
