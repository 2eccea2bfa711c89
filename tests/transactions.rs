//! Transaction endpoint tests.
//!
//! Uses wiremock to mock the Lunch Money API and check request shapes.

use chrono::NaiveDate;
use lunchmoney::{
    InsertTransactionsRequest, LunchMoney, LunchMoneyClient, LunchMoneyError, NewTransaction,
    TransactionListQuery, TransactionSplit, TransactionStatus, TransactionUpdate,
};
use rust_decimal_macros::dec;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn lunch_money(server: &MockServer) -> LunchMoney {
    LunchMoney::new(LunchMoneyClient::new("test-token", &server.uri()).unwrap())
}

fn transaction_json(id: u64, amount: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "date": "2024-01-05",
        "amount": amount,
        "currency": "usd",
        "to_base": 5.0,
        "payee": "Bakery",
        "status": "cleared",
        "is_group": false,
        "tags": [{"id": 1, "name": "food"}]
    })
}

#[tokio::test]
async fn test_get_transaction_sends_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transactions/10"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(transaction_json(10, "5.00")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transaction = lunch_money(&mock_server)
        .transactions()
        .get(10)
        .await
        .unwrap();

    assert_eq!(transaction.id, 10);
    assert_eq!(transaction.amount, dec!(5.00));
    assert_eq!(transaction.base_amount, Some(dec!(5.0)));
    assert_eq!(transaction.status, TransactionStatus::Cleared);
    assert_eq!(transaction.tags[0].name, "food");
    assert!(!transaction.is_group());
}

#[tokio::test]
async fn test_list_page_sends_filters_and_window() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("start_date", "2024-01-01"))
        .and(query_param("end_date", "2024-01-31"))
        .and(query_param("status", "cleared"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transactions": [transaction_json(1, "1.00"), transaction_json(2, "2.00")],
            "has_more": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut query = TransactionListQuery::between(date(2024, 1, 1), date(2024, 1, 31));
    query.status = Some(TransactionStatus::Cleared);

    let page = lunch_money(&mock_server)
        .transactions()
        .list_page(&query, 0, 2)
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert!(page.has_more);
    assert_eq!(page.next_offset(), 2);
}

#[tokio::test]
async fn test_list_all_follows_has_more() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transactions": [transaction_json(1, "1.00")],
            "has_more": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transactions": [transaction_json(2, "2.00")],
            "has_more": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let all = lunch_money(&mock_server)
        .transactions()
        .list_all(&TransactionListQuery::default())
        .await
        .unwrap();

    let ids: Vec<u64> = all.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_list_rejects_half_open_range_without_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let query = TransactionListQuery {
        start_date: Some(date(2024, 1, 1)),
        ..Default::default()
    };
    let result = lunch_money(&mock_server)
        .transactions()
        .list_page(&query, 0, 10)
        .await;

    assert!(matches!(result, Err(LunchMoneyError::Validation { .. })));
}

#[tokio::test]
async fn test_insert_transactions_reports_skipped_external_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transactions"))
        .and(body_partial_json(serde_json::json!({
            "transactions": [{"date": "2024-01-05", "amount": "12.50", "payee": "Bakery"}],
            "skip_balance_update": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "transactions": [transaction_json(77, "12.50")],
            "skipped_existing_external_ids": [{
                "request_transactions_index": 1,
                "existing_transaction_id": 5,
                "external_id": "abc"
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let new = NewTransaction::new(date(2024, 1, 5), dec!(12.50)).with_payee("Bakery");
    let response = lunch_money(&mock_server)
        .transactions()
        .insert(InsertTransactionsRequest::new(vec![new]))
        .await
        .unwrap();

    assert_eq!(response.transactions[0].id, 77);
    assert_eq!(response.skipped_existing_external_ids.len(), 1);
    assert_eq!(response.skipped_existing_external_ids[0].existing_transaction_id, 5);
}

#[tokio::test]
async fn test_insert_requires_at_least_one_transaction() {
    let mock_server = MockServer::start().await;

    let result = lunch_money(&mock_server)
        .transactions()
        .insert(InsertTransactionsRequest::new(vec![]))
        .await;

    assert!(matches!(result, Err(LunchMoneyError::Validation { .. })));
}

#[tokio::test]
async fn test_update_sends_only_changed_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/transactions/10"))
        .and(body_json(serde_json::json!({"payee": "Corner Bakery"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(transaction_json(10, "5.00")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let update = TransactionUpdate {
        payee: Some("Corner Bakery".to_string()),
        ..Default::default()
    };
    let transaction = lunch_money(&mock_server)
        .transactions()
        .update(10, update)
        .await
        .unwrap();

    assert_eq!(transaction.id, 10);
}

#[tokio::test]
async fn test_update_with_split_sends_parts_and_options() {
    let mock_server = MockServer::start().await;

    let mut first = transaction_json(201, "30.00");
    first["parent_id"] = serde_json::json!(10);
    let mut second = transaction_json(202, "15.50");
    second["parent_id"] = serde_json::json!(10);
    let mut parent = transaction_json(10, "45.50");
    parent["children"] = serde_json::json!([first, second]);

    Mock::given(method("PUT"))
        .and(path("/transactions/10"))
        .and(body_json(serde_json::json!({
            "split": [
                {"amount": "30.00", "category_id": 7},
                {"amount": "15.50", "notes": "tip"}
            ],
            "debit_as_negative": false,
            "skip_balance_update": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(parent))
        .expect(1)
        .mount(&mock_server)
        .await;

    let update = TransactionUpdate {
        debit_as_negative: Some(false),
        skip_balance_update: Some(false),
        ..TransactionUpdate::split(vec![
            TransactionSplit::new(dec!(30.00)).with_category(7),
            TransactionSplit::new(dec!(15.50)).with_notes("tip"),
        ])
    };
    let transaction = lunch_money(&mock_server)
        .transactions()
        .update(10, update)
        .await
        .unwrap();

    assert_eq!(transaction.child_ids(), vec![201, 202]);
    assert!(transaction.children.iter().all(|c| c.is_split_part()));
}

#[tokio::test]
async fn test_update_rejects_single_part_split() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = lunch_money(&mock_server)
        .transactions()
        .update(
            10,
            TransactionUpdate::split(vec![TransactionSplit::new(dec!(5.00))]),
        )
        .await;

    assert!(matches!(result, Err(LunchMoneyError::Validation { .. })));
}

#[tokio::test]
async fn test_delete_transaction_accepts_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/transactions/10"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    lunch_money(&mock_server)
        .transactions()
        .delete(10)
        .await
        .unwrap();
}
