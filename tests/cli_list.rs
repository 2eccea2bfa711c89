//! Execution tests for the `list` command of the lunchmoney binary.
//!
//! Uses wiremock to mock the Lunch Money API and runs the built binary
//! against it.

use std::process::Output;
use tokio::process::Command;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transaction_json(id: u64, is_group: bool) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "date": "2024-01-05",
        "amount": "5.00",
        "currency": "usd",
        "status": "cleared",
        "is_group": is_group
    })
}

async fn run_cli(server: &MockServer, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lunchmoney"))
        .args(["--token", "test-token", "--api-url", &server.uri()])
        .args(args)
        .env_remove("LUNCHMONEY_ACCESS_TOKEN")
        .env_remove("LUNCHMONEY_API_URL")
        .output()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_list_groups_without_groups_advances_offset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transactions": [transaction_json(3, false), transaction_json(4, false)],
            "has_more": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = run_cli(&mock_server, &["list", "groups", "--limit", "2"]).await;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("use --offset 2"), "stdout: {stdout}");
    assert!(!stdout.contains("use --offset 0"), "stdout: {stdout}");
}

#[tokio::test]
async fn test_list_groups_offset_counts_filtered_transactions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("offset", "4"))
        .and(query_param("limit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transactions": [
                transaction_json(7, false),
                transaction_json(500, true),
                transaction_json(8, false)
            ],
            "has_more": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = run_cli(
        &mock_server,
        &["list", "groups", "--offset", "4", "--limit", "3"],
    )
    .await;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("500"));
    assert!(stdout.contains("Items 5-7 (more available, use --offset 7)"), "stdout: {stdout}");
}

#[tokio::test]
async fn test_list_groups_json_holds_only_groups() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transactions": [transaction_json(1, false), transaction_json(500, true)],
            "has_more": false
        })))
        .mount(&mock_server)
        .await;

    let output = run_cli(&mock_server, &["--json", "list", "groups"]).await;
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    let ids: Vec<u64> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![500]);
}

#[tokio::test]
async fn test_list_transactions_shows_next_offset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transactions": [transaction_json(1, false), transaction_json(2, false)],
            "has_more": false
        })))
        .mount(&mock_server)
        .await;

    let output = run_cli(&mock_server, &["list", "transactions"]).await;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Items 1-2 (end)"), "stdout: {stdout}");
}
