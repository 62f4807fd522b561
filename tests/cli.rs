//! Command-line tests for the three binaries
//!
//! Runs the built executables against generated PDFs.

use assert_cmd::Command;
use lopdf::Document;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn add_pagenumber() -> Command {
    Command::new(env!("CARGO_BIN_EXE_add-pagenumber"))
}

fn extract_first_page() -> Command {
    Command::new(env!("CARGO_BIN_EXE_extract-first-page"))
}

fn create_test_pdfs() -> Command {
    Command::new(env!("CARGO_BIN_EXE_create-test-pdfs"))
}

/// Generate the fixture set into `dir` using the generator binary
fn generate_fixtures(dir: &Path) {
    create_test_pdfs().arg("--dir").arg(dir).assert().success();
}

fn page_count(path: &Path) -> usize {
    Document::load(path).unwrap().get_pages().len()
}

// ============ create-test-pdfs ============

#[test]
fn test_create_test_pdfs_writes_fixture_set() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("fixtures");

    create_test_pdfs()
        .arg("--dir")
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 3 test PDFs in"))
        .stdout(predicate::str::contains("Created test PDF:"));

    assert_eq!(page_count(&dir.join("document1.pdf")), 3);
    assert_eq!(page_count(&dir.join("document2.pdf")), 2);
    assert_eq!(page_count(&dir.join("document3.pdf")), 4);
}

#[test]
fn test_create_test_pdfs_default_dir() {
    let temp_dir = TempDir::new().unwrap();

    create_test_pdfs()
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("test_pdfs directory"));

    assert!(temp_dir.path().join("test_pdfs").join("document1.pdf").is_file());
}

#[test]
fn test_create_test_pdfs_help() {
    create_test_pdfs()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Create multi-page test PDFs"));
}

// ============ add-pagenumber ============

#[test]
fn test_add_pagenumber_help() {
    add_pagenumber()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Add page numbers to PDF files"))
        .stdout(predicate::str::contains("--position"));
}

#[test]
fn test_add_pagenumber_single_file() {
    let temp_dir = TempDir::new().unwrap();
    generate_fixtures(temp_dir.path());
    let input = temp_dir.path().join("document3.pdf");
    let output = temp_dir.path().join("numbered.pdf");

    add_pagenumber()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["-p", "bottom-right", "-f", "tiro", "-s", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Adding page numbers to"))
        .stdout(predicate::str::contains(
            "Successfully added page numbers to 1 PDF file(s).",
        ));

    assert_eq!(page_count(&output), 4);
}

#[test]
fn test_add_pagenumber_page_count_only_when_verbose() {
    let temp_dir = TempDir::new().unwrap();
    generate_fixtures(temp_dir.path());
    let input = temp_dir.path().join("document1.pdf");

    add_pagenumber()
        .env_remove("RUST_LOG")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(temp_dir.path().join("quiet.pdf"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing 3 pages").not());

    add_pagenumber()
        .env_remove("RUST_LOG")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(temp_dir.path().join("verbose.pdf"))
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing 3 pages"));
}

#[test]
fn test_add_pagenumber_directory() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("in");
    let output_dir = temp_dir.path().join("out");
    generate_fixtures(&input_dir);

    add_pagenumber()
        .arg("-i")
        .arg(&input_dir)
        .arg("-o")
        .arg(&output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Successfully added page numbers to 3 PDF file(s).",
        ));

    for name in ["document1.pdf", "document2.pdf", "document3.pdf"] {
        assert!(output_dir.join(name).is_file(), "missing {}", name);
    }
}

#[test]
fn test_add_pagenumber_reports_partial_failure() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("in");
    generate_fixtures(&input_dir);
    fs::write(input_dir.join("broken.pdf"), b"not really a pdf").unwrap();

    add_pagenumber()
        .arg("-i")
        .arg(&input_dir)
        .arg("-o")
        .arg(temp_dir.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Successfully added page numbers to 3 PDF file(s).",
        ))
        .stdout(predicate::str::contains("1 PDF file(s) could not be processed."));
}

#[test]
fn test_add_pagenumber_empty_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("empty");
    fs::create_dir(&input_dir).unwrap();

    add_pagenumber()
        .arg("-i")
        .arg(&input_dir)
        .arg("-o")
        .arg(temp_dir.path().join("out"))
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("No PDF files found in"))
        .stdout(predicate::str::contains("Failed to process any PDF files."));
}

#[test]
fn test_add_pagenumber_missing_input_fails() {
    let temp_dir = TempDir::new().unwrap();

    add_pagenumber()
        .arg("-i")
        .arg(temp_dir.path().join("missing.pdf"))
        .arg("-o")
        .arg(temp_dir.path().join("out.pdf"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("does not exist"));
}

#[test]
fn test_add_pagenumber_rejects_unknown_position() {
    add_pagenumber()
        .args(["-i", "in.pdf", "-o", "out.pdf", "-p", "middle"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown position 'middle'"));
}

#[test]
fn test_add_pagenumber_rejects_unknown_font() {
    add_pagenumber()
        .args(["-i", "in.pdf", "-o", "out.pdf", "-f", "comic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("comic"));
}

#[test]
fn test_add_pagenumber_rejects_non_positive_size() {
    add_pagenumber()
        .args(["-i", "in.pdf", "-o", "out.pdf", "-s", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("font size must be positive"));
}

// ============ extract-first-page ============

#[test]
fn test_extract_first_page_combines_inputs() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("test_pdfs");
    generate_fixtures(&input_dir);
    let output = temp_dir.path().join("first_pages.pdf");

    extract_first_page()
        .arg("-o")
        .arg(&output)
        .arg(&input_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("All first pages saved to"))
        .stdout(predicate::str::contains(
            "Processed 3 out of 3 PDF files successfully.",
        ));

    assert_eq!(page_count(&output), 3);
}

#[test]
fn test_extract_first_page_skips_bad_inputs() {
    let temp_dir = TempDir::new().unwrap();
    generate_fixtures(temp_dir.path());
    let broken = temp_dir.path().join("broken.pdf");
    fs::write(&broken, b"garbage").unwrap();
    let notes = temp_dir.path().join("notes.txt");
    fs::write(&notes, b"text").unwrap();
    let output = temp_dir.path().join("out").join("first_pages.pdf");

    extract_first_page()
        .arg("-o")
        .arg(&output)
        .arg(temp_dir.path().join("document1.pdf"))
        .arg(&broken)
        .arg(&notes)
        .arg(temp_dir.path().join("missing.pdf"))
        .arg(temp_dir.path().join("document2.pdf"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Processed 2 out of 3 PDF files successfully.",
        ));

    assert_eq!(page_count(&output), 2);
}

#[test]
fn test_extract_first_page_no_valid_inputs() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.pdf");

    extract_first_page()
        .arg("-o")
        .arg(&output)
        .arg(temp_dir.path().join("missing.pdf"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No valid PDF files to process."));

    assert!(!output.exists());
}

#[test]
fn test_extract_first_page_help() {
    extract_first_page()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Extract the first page from each PDF and combine them into a single PDF",
        ))
        .stdout(predicate::str::contains("Command-line tools for numbering").not());
}

#[test]
fn test_extract_first_page_requires_inputs() {
    extract_first_page()
        .args(["-o", "out.pdf"])
        .assert()
        .failure();
}
