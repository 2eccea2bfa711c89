//! E2E tests using the mock Lunch Money server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use chrono::NaiveDate;
use lunchmoney::mock_server::{Fixtures, MockServer, MockState};
use lunchmoney::{
    AssetType, AssetUpdate, BudgetUpsert, CryptoUpdate, GroupTransactionsRequest,
    InsertTransactionsRequest, LunchMoney, LunchMoneyClient, LunchMoneyError, NewAsset,
    NewTransaction, Transaction, TransactionListQuery, TransactionSplit, TransactionUpdate,
};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn connect(server: &MockServer) -> LunchMoney {
    LunchMoney::new(LunchMoneyClient::new("test-token", server.url()).unwrap())
}

async fn listed_ids(lm: &LunchMoney) -> Vec<u64> {
    lm.transactions()
        .list_all(&TransactionListQuery::default())
        .await
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect()
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await.unwrap();
    let server2 = MockServer::start().await.unwrap();

    // Both servers should have different URLs
    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await.unwrap();
    let url = server.url().to_string();

    server.shutdown().await;

    // After shutdown, server should not respond
    let client = reqwest::Client::new();
    let result = client.get(format!("{}/health", url)).send().await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_wrong_token_is_unauthorized() {
    let state = MockState::new()
        .with_required_token("right-token")
        .with_transaction(Fixtures::transaction(1, date(2024, 1, 1), 100, "Shop"));
    let server = MockServer::with_state(state).await.unwrap();

    let client = LunchMoneyClient::new("wrong-token", server.url()).unwrap();
    let err = LunchMoney::new(client)
        .transactions()
        .get(1)
        .await
        .unwrap_err();
    assert!(matches!(err, LunchMoneyError::Unauthorized { .. }));

    let client = LunchMoneyClient::new("right-token", server.url()).unwrap();
    let transaction = LunchMoney::new(client).transactions().get(1).await.unwrap();
    assert_eq!(transaction.id, 1);

    server.shutdown().await;
}

// =============================================================================
// Grouping Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_group_hides_children_from_listing() {
    let server = MockServer::start().await.unwrap();
    let lm = connect(&server);

    let group = lm.groups().group([1, 2, 3]).await.unwrap();

    assert!(group.is_group());
    assert_eq!(group.child_ids(), vec![1, 2, 3]);
    assert_eq!(group.amount, dec!(66.50));
    assert_eq!(group.currency, "usd");
    // Date and payee default to the children's
    assert_eq!(group.date, date(2024, 1, 5));
    assert_eq!(group.payee.as_deref(), Some("Trattoria"));

    let ids = listed_ids(&lm).await;
    assert!(!ids.contains(&1));
    assert!(!ids.contains(&2));
    assert!(!ids.contains(&3));
    assert!(ids.contains(&group.id));

    // Children are still addressable and point at their group
    let child = lm.transactions().get(2).await.unwrap();
    assert_eq!(child.group_id, Some(group.id));
    assert!(child.parent_id.is_none());

    server.shutdown().await;
}

#[tokio::test]
async fn test_group_amount_is_sum_of_children() {
    let server = MockServer::start().await.unwrap();
    let lm = connect(&server);

    let group = lm.groups().group([10, 11]).await.unwrap();

    assert_eq!(group.amount, dec!(8.00));
    assert_eq!(group.currency, "usd");
    assert_eq!(group.children_total(), Some(group.amount));

    let fetched = lm.groups().get(group.id).await.unwrap();
    assert_eq!(fetched.amount, dec!(8.00));
    assert_eq!(fetched.child_ids(), vec![10, 11]);

    server.shutdown().await;
}

#[tokio::test]
async fn test_group_mixed_currencies_uses_primary_currency() {
    let server = MockServer::start().await.unwrap();
    let lm = connect(&server);

    let group = lm.groups().group([10, 20]).await.unwrap();

    // 5.00 USD plus 10.00 EUR worth 11.00 USD
    assert_eq!(group.amount, dec!(16.00));
    assert_eq!(group.currency, "usd");
    assert_eq!(group.children_total(), None);

    server.shutdown().await;
}

#[tokio::test]
async fn test_group_with_overrides() {
    let server = MockServer::start().await.unwrap();
    let lm = connect(&server);

    let request = GroupTransactionsRequest::new([10, 11])
        .with_date(date(2024, 1, 31))
        .with_payee("Bakery run")
        .with_notes("weekly");
    let group = lm.groups().group_with(request).await.unwrap();

    assert_eq!(group.date, date(2024, 1, 31));
    assert_eq!(group.payee.as_deref(), Some("Bakery run"));
    assert_eq!(group.notes.as_deref(), Some("weekly"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_ungroup_restores_children() {
    let server = MockServer::start().await.unwrap();
    let lm = connect(&server);

    let group = lm.groups().group([1, 2, 3]).await.unwrap();
    lm.groups().ungroup(group.id).await.unwrap();

    let err = lm.transactions().get(group.id).await.unwrap_err();
    assert!(matches!(err, LunchMoneyError::NotFound { .. }));

    let ids = listed_ids(&lm).await;
    assert!(ids.contains(&1));
    assert!(ids.contains(&2));
    assert!(ids.contains(&3));
    assert!(!ids.contains(&group.id));

    for id in [1, 2, 3] {
        let child: Transaction = lm.transactions().get(id).await.unwrap();
        assert!(child.group_id.is_none());
        assert!(child.parent_id.is_none());
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_regrouping_grouped_transaction_fails() {
    let server = MockServer::start().await.unwrap();
    let lm = connect(&server);

    let group = lm.groups().group([10, 11]).await.unwrap();

    let err = lm.groups().group([11, 1]).await.unwrap_err();
    assert!(matches!(err, LunchMoneyError::Validation { .. }));

    // A group cannot be a member of another group
    let err = lm.groups().group([group.id, 1]).await.unwrap_err();
    assert!(matches!(err, LunchMoneyError::Validation { .. }));

    // Unknown ids are rejected as well
    let err = lm.groups().group([1, 9999]).await.unwrap_err();
    assert!(matches!(err, LunchMoneyError::Validation { .. }));

    server.shutdown().await;
}

#[tokio::test]
async fn test_ungroup_twice_is_not_found() {
    let server = MockServer::start().await.unwrap();
    let lm = connect(&server);

    let group = lm.groups().group([10, 11]).await.unwrap();
    lm.groups().ungroup(group.id).await.unwrap();

    let err = lm.groups().ungroup(group.id).await.unwrap_err();
    assert!(matches!(err, LunchMoneyError::NotFound { .. }));

    // Plain transactions are not groups
    let err = lm.groups().ungroup(10).await.unwrap_err();
    assert!(matches!(err, LunchMoneyError::NotFound { .. }));

    server.shutdown().await;
}

#[tokio::test]
async fn test_grouped_child_cannot_be_deleted() {
    let server = MockServer::start().await.unwrap();
    let lm = connect(&server);

    lm.groups().group([10, 11]).await.unwrap();

    let err = lm.transactions().delete(10).await.unwrap_err();
    assert!(matches!(err, LunchMoneyError::Validation { .. }));

    lm.transactions().delete(1).await.unwrap();
    let err = lm.transactions().get(1).await.unwrap_err();
    assert!(matches!(err, LunchMoneyError::NotFound { .. }));

    server.shutdown().await;
}

#[tokio::test]
async fn test_state_is_visible_to_test() {
    let server = MockServer::start().await.unwrap();
    let lm = connect(&server);

    let group = lm.groups().group([10, 11]).await.unwrap();

    let state = server.state();
    let state = state.read().await;
    assert_eq!(state.transactions[&10].group_id, Some(group.id));

    drop(state);
    server.shutdown().await;
}

// =============================================================================
// Other Resource Workflows
// =============================================================================

#[tokio::test]
async fn test_list_filters_by_date_range() {
    let server = MockServer::start().await.unwrap();
    let lm = connect(&server);

    let query = TransactionListQuery::between(date(2024, 1, 10), date(2024, 1, 11));
    let transactions = lm.transactions().list_all(&query).await.unwrap();

    let ids: Vec<u64> = transactions.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![10, 11]);

    server.shutdown().await;
}

#[tokio::test]
async fn test_create_then_update_asset() {
    let server = MockServer::start().await.unwrap();
    let lm = connect(&server);

    let created = lm
        .assets()
        .create(NewAsset::new(AssetType::Vehicle, "Car", dec!(15000)))
        .await
        .unwrap();
    assert_eq!(created.kind, AssetType::Vehicle);

    let updated = lm
        .assets()
        .update(
            created.id,
            AssetUpdate {
                balance: Some(dec!(14000)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.balance, dec!(14000));

    let assets = lm.assets().list().await.unwrap();
    assert!(assets.iter().any(|a| a.id == created.id && a.name == "Car"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_only_manual_crypto_can_be_updated() {
    let server = MockServer::start().await.unwrap();
    let lm = connect(&server);

    let holdings = lm.crypto().list().await.unwrap();
    let manual = holdings.iter().find(|h| h.is_manual()).unwrap();
    let synced = holdings.iter().find(|h| !h.is_manual()).unwrap();

    let update = CryptoUpdate {
        balance: Some(dec!(0.6)),
        ..Default::default()
    };
    let updated = lm
        .crypto()
        .update(manual.id.unwrap(), update.clone())
        .await
        .unwrap();
    assert_eq!(updated.balance, dec!(0.6));

    let err = lm
        .crypto()
        .update(synced.zabo_account_id.unwrap(), update)
        .await
        .unwrap_err();
    assert!(matches!(err, LunchMoneyError::NotFound { .. }));

    server.shutdown().await;
}

#[tokio::test]
async fn test_budget_upsert_and_remove() {
    let server = MockServer::start().await.unwrap();
    let lm = connect(&server);
    let february = date(2024, 2, 1);

    let group = lm
        .budgets()
        .upsert(BudgetUpsert {
            start_date: february,
            category_id: 201,
            amount: dec!(420),
            currency: None,
        })
        .await
        .unwrap();
    assert!(group.is_none());

    let budgets = lm
        .budgets()
        .summary(date(2024, 1, 1), date(2024, 2, 29))
        .await
        .unwrap();
    let groceries = budgets
        .iter()
        .find(|b| b.category_id == Some(201))
        .unwrap();
    assert_eq!(
        groceries.month(february).unwrap().budget_amount,
        Some(dec!(420))
    );

    assert!(lm.budgets().remove(february, 201).await.unwrap());

    let err = lm.budgets().remove(february, 999).await.unwrap_err();
    assert!(matches!(err, LunchMoneyError::NotFound { .. }));

    server.shutdown().await;
}

#[tokio::test]
async fn test_list_recurring_expenses() {
    let server = MockServer::start().await.unwrap();
    let lm = connect(&server);

    let expenses = lm
        .recurring_expenses()
        .list(&Default::default())
        .await
        .unwrap();

    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].payee, "Streaming Service");

    server.shutdown().await;
}

#[tokio::test]
async fn test_list_plaid_accounts() {
    let server = MockServer::start().await.unwrap();
    let lm = connect(&server);

    let accounts = lm.plaid_accounts().list().await.unwrap();

    let ids: Vec<u64> = accounts.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![501, 502]);
    assert_eq!(accounts[1].kind.as_deref(), Some("credit"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_split_transaction_lists_parts() {
    let server = MockServer::start().await.unwrap();
    let lm = connect(&server);

    let update = TransactionUpdate::split(vec![
        TransactionSplit::new(dec!(30.00)).with_category(7),
        TransactionSplit::new(dec!(15.50)).with_notes("tip"),
    ]);
    let parent = lm.transactions().update(1, update).await.unwrap();

    assert_eq!(parent.children.len(), 2);
    assert_eq!(parent.children_total(), Some(parent.amount));

    let ids = listed_ids(&lm).await;
    assert!(!ids.contains(&1));
    for child in &parent.children {
        assert!(ids.contains(&child.id));
        let fetched = lm.transactions().get(child.id).await.unwrap();
        assert_eq!(fetched.parent_id, Some(1));
        assert_eq!(fetched.payee.as_deref(), Some("Trattoria"));
    }

    // Parts do not add up to the amount
    let bad = TransactionUpdate::split(vec![
        TransactionSplit::new(dec!(1.00)),
        TransactionSplit::new(dec!(1.00)),
    ]);
    let err = lm.transactions().update(2, bad).await.unwrap_err();
    assert!(matches!(err, LunchMoneyError::Validation { .. }));

    server.shutdown().await;
}

#[tokio::test]
async fn test_tags_are_attached_by_id() {
    let server = MockServer::start().await.unwrap();
    let lm = connect(&server);

    let mut new = NewTransaction::new(date(2024, 1, 20), dec!(18.00)).with_payee("Train");
    new.tag_ids = vec![2];
    let response = lm
        .transactions()
        .insert(InsertTransactionsRequest::new(vec![new]))
        .await
        .unwrap();
    assert_eq!(response.transactions[0].tags[0].name, "travel");

    let mut request = GroupTransactionsRequest::new([10, 11]);
    request.tag_ids = vec![1];
    let group = lm.groups().group_with(request).await.unwrap();
    assert_eq!(group.tags[0].name, "dining");

    let mut unknown = NewTransaction::new(date(2024, 1, 21), dec!(1.00));
    unknown.tag_ids = vec![404];
    let err = lm
        .transactions()
        .insert(InsertTransactionsRequest::new(vec![unknown]))
        .await
        .unwrap_err();
    assert!(matches!(err, LunchMoneyError::Validation { .. }));

    server.shutdown().await;
}
