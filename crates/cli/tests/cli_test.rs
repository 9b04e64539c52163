//! # CLI Command Tests
//!
//! Runs the `legalsum` binary against generated PDFs. The `summarize` tests
//! point the provider at a `wiremock` server.

use assert_cmd::prelude::*;
use legalsum_test_utils::helpers::{
    generate_form_pdf, generate_test_pdf, read_docx_paragraphs, FieldSpec,
};
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Writes `pdf` into `dir` and returns its path.
fn write_fixture(dir: &Path, pdf: &[u8]) -> PathBuf {
    let file_path = dir.join("agreement.pdf");
    fs::write(&file_path, pdf).expect("Failed to write fixture file");
    file_path
}

/// A `legalsum` command isolated from provider settings in the environment.
///
/// It runs from `work_dir` so no `.env` from the checkout is loaded.
fn legalsum(work_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("legalsum").expect("binary should build");
    cmd.current_dir(work_dir);
    for var in [
        "AI_PROVIDER",
        "AI_API_URL",
        "AI_API_KEY",
        "OPENAI_API_KEY",
        "AI_MODEL",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// A mock completion endpoint that only answers requests bearing `api_key`.
async fn mock_completions(api_key: &str, content: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", format!("Bearer {api_key}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    server
}

#[test]
fn test_extract_prints_form_fields() {
    let temp_dir = tempdir().unwrap();
    let pdf = generate_form_pdf(
        "Employment Agreement",
        &[FieldSpec::new(Some("Employee"), Some("Jane Roe"))],
    )
    .unwrap();
    let fixture = write_fixture(temp_dir.path(), &pdf);

    legalsum(temp_dir.path())
        .arg("extract")
        .arg(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::contains("Form Fields:\nEmployee: Jane Roe\n"));
}

#[test]
fn test_prompt_prints_template_with_text() {
    let temp_dir = tempdir().unwrap();
    let pdf = generate_test_pdf("This NDA is between Acme and Beta.").unwrap();
    let fixture = write_fixture(temp_dir.path(), &pdf);

    legalsum(temp_dir.path())
        .arg("prompt")
        .arg(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::contains("7. Risk Flags:"))
        .stdout(predicate::str::ends_with("This NDA is between Acme and Beta."));
}

#[test]
fn test_missing_file_fails() {
    let temp_dir = tempdir().unwrap();
    legalsum(temp_dir.path())
        .arg("extract")
        .arg("/no/such/agreement.pdf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_summarize_without_key_fails() {
    let temp_dir = tempdir().unwrap();
    let pdf = generate_test_pdf("This NDA is between Acme and Beta.").unwrap();
    let fixture = write_fixture(temp_dir.path(), &pdf);
    let output = temp_dir.path().join("summary.docx");

    legalsum(temp_dir.path())
        .arg("summarize")
        .arg(&fixture)
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key is missing"));

    assert!(!output.exists());
}

#[test]
fn test_dotenv_is_read_from_working_directory() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join(".env"), "AI_PROVIDER=nonexistent\n").unwrap();
    let pdf = generate_test_pdf("This NDA is between Acme and Beta.").unwrap();
    let fixture = write_fixture(temp_dir.path(), &pdf);

    legalsum(temp_dir.path())
        .arg("summarize")
        .arg(&fixture)
        .arg("--api-key")
        .arg("sk-unused")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nonexistent"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_summarize_writes_document() {
    let server = mock_completions("sk-cli", "1. Parties:\n- Acme").await;

    let temp_dir = tempdir().unwrap();
    let pdf = generate_test_pdf("This NDA is between Acme and Beta.").unwrap();
    let fixture = write_fixture(temp_dir.path(), &pdf);
    let output = temp_dir.path().join("out.docx");

    legalsum(temp_dir.path())
        .arg("summarize")
        .arg(&fixture)
        .arg("--output")
        .arg(&output)
        .arg("--api-url")
        .arg(format!("{}/v1/chat/completions", server.uri()))
        .arg("--api-key")
        .arg("sk-cli")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Parties:\n- Acme"));

    let bytes = fs::read(&output).unwrap();
    let paragraphs = read_docx_paragraphs(&bytes).unwrap();
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[1].text, "1. Parties:\n- Acme");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_summarize_reads_key_from_environment() {
    for (var, key) in [("AI_API_KEY", "sk-env"), ("OPENAI_API_KEY", "sk-openai")] {
        let server = mock_completions(key, "1. Parties:\n- Beta").await;
        let temp_dir = tempdir().unwrap();
        let pdf = generate_test_pdf("This NDA is between Acme and Beta.").unwrap();
        let fixture = write_fixture(temp_dir.path(), &pdf);

        legalsum(temp_dir.path())
            .arg("summarize")
            .arg(&fixture)
            .arg("--output")
            .arg(temp_dir.path().join("out.docx"))
            .arg("--api-url")
            .arg(format!("{}/v1/chat/completions", server.uri()))
            .env(var, key)
            .assert()
            .success()
            .stdout(predicate::str::contains("- Beta"));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ai_api_key_takes_precedence() {
    let server = mock_completions("sk-primary", "1. Parties:\n- Acme").await;
    let temp_dir = tempdir().unwrap();
    let pdf = generate_test_pdf("This NDA is between Acme and Beta.").unwrap();
    let fixture = write_fixture(temp_dir.path(), &pdf);

    legalsum(temp_dir.path())
        .arg("summarize")
        .arg(&fixture)
        .arg("--output")
        .arg(temp_dir.path().join("out.docx"))
        .arg("--api-url")
        .arg(format!("{}/v1/chat/completions", server.uri()))
        .env("AI_API_KEY", "sk-primary")
        .env("OPENAI_API_KEY", "sk-fallback")
        .assert()
        .success();
}
