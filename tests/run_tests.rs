//! End-to-end tests for `pairjudge run` against a mock chat-completions API.

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pairjudge() -> Command {
    let mut cmd = cargo_bin_cmd!("pairjudge");
    cmd.env_remove("RUST_LOG")
        .env_remove("PAIRJUDGE_LOG")
        .env_remove("PAIRJUDGE_API_KEY")
        .env("OPENAI_API_KEY", "test-key");
    cmd
}

const COMPLETE: &str = "\
### Evaluation for Answer A:
- Clarity: 4
- Accuracy: 4
- Helpfulness: 3
- Relevance: 4

### Evaluation for Answer B:
- Clarity: 5
- Accuracy: 5
- Helpfulness: 5
- Relevance: 5

Answer B is more complete.";

const MISSING_B_CRITERION: &str = "\
### Evaluation for Answer A:
- Clarity: 4
- Accuracy: 4
- Helpfulness: 3
- Relevance: 4

### Evaluation for Answer B:
- Clarity: 5
- Accuracy: 5
- Relevance: 5";

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    }))
}

fn write_input(dir: &Path) -> std::path::PathBuf {
    let input = dir.join("responses.csv");
    fs::write(
        &input,
        "question,base_response,finetuned_response\n\
         What is a bond?,Base answer.,Fine answer.\n\
         What is equity?,Base equity.,Fine equity.\n\
         What is a swap?,Base swap.,Fine swap.\n",
    )
    .unwrap();
    input
}

async fn mock_judge() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("What is equity?"))
        .respond_with(completion(MISSING_B_CRITERION))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(completion(COMPLETE))
        .mount(&server)
        .await;

    server
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    rdr.records()
        .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
        .collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_run_writes_realigned_rows() {
    let server = mock_judge().await;
    let dir = tempdir().unwrap();
    let input = write_input(dir.path());
    let output = dir.path().join("results.csv");

    pairjudge()
        .current_dir(dir.path())
        .args(["run", "--seed", "42", "--api-base"])
        .arg(server.uri())
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Evaluated 3 of 3 item(s) with gpt-4"))
        .stdout(predicate::str::contains("rows written:   2"))
        .stdout(predicate::str::contains("parse failures: 1"));

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.starts_with(
        "question,raw_eval,base_clarity,base_accuracy,base_helpfulness,base_relevance,\
         fine_clarity,fine_accuracy,fine_helpfulness,fine_relevance\n"
    ));

    let rows = read_rows(&output);
    let questions: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(questions, vec!["What is a bond?", "What is a swap?"]);

    for row in &rows {
        assert_eq!(row[1], COMPLETE);
        let base: Vec<&str> = row[2..6].iter().map(|s| s.as_str()).collect();
        let fine: Vec<&str> = row[6..10].iter().map(|s| s.as_str()).collect();
        // The fixed verdict scores A at 4/4/3/4 and B at 5/5/5/5
        let a = vec!["4", "4", "3", "4"];
        let b = vec!["5", "5", "5", "5"];
        assert!((base == a && fine == b) || (base == b && fine == a));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_same_seed_same_output() {
    let server = mock_judge().await;
    let dir = tempdir().unwrap();
    let input = write_input(dir.path());

    let run = |name: &str| {
        let output = dir.path().join(name);
        pairjudge()
            .current_dir(dir.path())
            .args(["--quiet", "run", "--seed", "7", "--concurrency", "2", "--api-base"])
            .arg(server.uri())
            .arg("--input")
            .arg(&input)
            .arg("--output")
            .arg(&output)
            .assert()
            .success();
        fs::read_to_string(output).unwrap()
    };

    assert_eq!(run("first.csv"), run("second.csv"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_config_file_and_json_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({ "model": "judge-small" })))
        .respond_with(completion(COMPLETE))
        .expect(3)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let input = write_input(dir.path());
    let output = dir.path().join("results.csv");
    fs::write(
        dir.path().join("pairjudge.toml"),
        format!(
            "model = \"judge-small\"\napi_base = \"{}\"\nwrite_mode = \"incremental\"\n",
            server.uri()
        ),
    )
    .unwrap();

    let out = pairjudge()
        .current_dir(dir.path())
        .args(["--format", "json", "run", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .output()
        .unwrap();
    assert!(out.status.success());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["model"], "judge-small");
    assert_eq!(report["write_mode"], "incremental");
    assert_eq!(report["rows"], 3);
    assert_eq!(report["written"], 3);
    assert_eq!(report["judge_failures"], 0);
    assert_eq!(report["interrupted"], false);
    assert!(report["started_at"].is_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_judge_error_drops_only_that_item() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("What is a swap?"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(completion(COMPLETE))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let input = write_input(dir.path());
    let output = dir.path().join("results.csv");

    let out = pairjudge()
        .current_dir(dir.path())
        .args(["--format", "json", "run", "--api-base"])
        .arg(server.uri())
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .output()
        .unwrap();
    assert!(out.status.success());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["judge_failures"], 1);
    assert_eq!(report["rows"], 2);

    let questions: Vec<String> = read_rows(&output).into_iter().map(|r| r[0].clone()).collect();
    assert_eq!(questions, vec!["What is a bond?", "What is equity?"]);
}

#[test]
fn test_missing_api_key_is_usage_error() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path());

    pairjudge()
        .env_remove("OPENAI_API_KEY")
        .current_dir(dir.path())
        .arg("run")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("out.csv"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn test_missing_column_is_data_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("responses.csv");
    fs::write(&input, "question,base_response\nq1,b1\n").unwrap();

    pairjudge()
        .current_dir(dir.path())
        .arg("run")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("out.csv"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("finetuned_response"));
}

#[test]
fn test_zero_concurrency_is_usage_error() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path());

    pairjudge()
        .current_dir(dir.path())
        .args(["run", "--concurrency", "0", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("out.csv"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("concurrency"));
}
