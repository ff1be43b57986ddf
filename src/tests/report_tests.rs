use super::create_test_client;
use super::support::kwargs;
use crate::core::errors::ProxyError;
use crate::core::models::entity::Entity;
use crate::core::models::method::{Kwargs, Method};
use crate::core::models::report::EqualSplitExpense;
use crate::core::policy::CachePolicy;
use crate::core::reports::{
    add_expense_equal_split, expenses_by_month, month_range, monthly_report, split_cents, summarize,
};
use chrono::NaiveDate;
use env_logger;
use serde_json::{Value, json};

fn trip_groups() -> Value {
    json!([
        { "id": 1, "name": "Flat", "members": [] },
        { "id": 2, "name": "Trip", "members": [
            { "id": 10, "first_name": "Ann", "last_name": "Lee" },
            { "id": 11, "first_name": "Bo", "last_name": "Kim" }
        ]}
    ])
}

fn october_expenses() -> Value {
    json!([
        { "id": 1, "group_id": 2, "cost": "30.00", "date": "2025-10-03T10:00:00Z",
          "category": { "id": 12, "name": "Groceries" } },
        { "id": 2, "group_id": 2, "cost": "10.00", "date": "2025-10-31T23:59:59Z",
          "category": { "id": 31, "name": "Taxi" } },
        { "id": 3, "group_id": 2, "cost": "99.00", "date": "2025-11-01T00:00:00Z" },
        { "id": 4, "group_id": 3, "cost": "5.00", "date": "2025-10-05T00:00:00Z" },
        { "id": 5, "group_id": 2, "cost": "1.00" }
    ])
}

fn request(amount: f64, currency: &str, participant: &str) -> EqualSplitExpense {
    EqualSplitExpense {
        group_name: "Trip".to_string(),
        amount,
        currency_code: currency.to_string(),
        participant_name: participant.to_string(),
        description: "Museum".to_string(),
    }
}

#[test]
fn test_month_range() {
    let (start, end) = month_range("2025-10").unwrap();
    assert_eq!(start, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
    assert_eq!(end, NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());

    let (_, end) = month_range("2025-12").unwrap();
    assert_eq!(end, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());

    for bad in ["2025-13", "2025-1", "10-2025", "2025/10", "abc", ""] {
        assert!(
            matches!(month_range(bad), Err(ProxyError::InvalidMonth(_))),
            "{} should be rejected",
            bad
        );
    }
}

#[tokio::test]
async fn test_expenses_by_month_filters_group_and_window() {
    let _ = env_logger::try_init();
    let h = create_test_client(CachePolicy::default());
    h.upstream.respond(Method::ListGroups, trip_groups());
    h.upstream.respond(Method::ListExpenses, october_expenses());

    let expenses = expenses_by_month(&h.client, "Trip", "2025-10").await.unwrap();

    let ids: Vec<i64> = expenses.iter().filter_map(|e| e["id"].as_i64()).collect();
    assert_eq!(ids, vec![1, 2]);

    let sent = h.upstream.last_kwargs(Method::ListExpenses).unwrap();
    assert_eq!(
        sent,
        kwargs(json!({
            "group_id": 2,
            "dated_after": "2025-10-01",
            "dated_before": "2025-11-01",
            "limit": 0
        }))
    );
}

#[tokio::test]
async fn test_unknown_group_is_reported() {
    let _ = env_logger::try_init();
    let h = create_test_client(CachePolicy::default());
    h.upstream.respond(Method::ListGroups, trip_groups());

    let result = expenses_by_month(&h.client, "Holiday", "2025-10").await;

    assert!(matches!(result, Err(ProxyError::GroupNotFound(name)) if name == "Holiday"));
    assert_eq!(h.upstream.call_count(Method::ListExpenses), 0);
}

#[test]
fn test_summarize_by_category() {
    let report = summarize(&[
        json!({ "cost": "30.00", "category": { "name": "Groceries" } }),
        json!({ "cost": 6, "category": "Taxi" }),
        json!({ "cost": "4.00" }),
    ]);

    assert_eq!(report.total, 40.0);
    assert_eq!(report.summary["Groceries"], 30.0);
    assert_eq!(report.summary["Taxi"], 6.0);
    assert_eq!(report.summary["Unknown"], 4.0);
    assert_eq!(report.recommendations.len(), 1);
    assert!(report.recommendations[0].contains("'Groceries'"));
}

#[test]
fn test_summarize_empty_month() {
    let report = summarize(&[]);
    assert!(report.summary.is_empty());
    assert_eq!(report.total, 0.0);
    assert_eq!(
        report.recommendations,
        vec!["No expenses found for the given group and month.".to_string()]
    );
}

#[tokio::test]
async fn test_monthly_report_uses_cached_lists() {
    let _ = env_logger::try_init();
    let h = create_test_client(CachePolicy::default());
    h.upstream.respond(Method::ListGroups, trip_groups());
    h.upstream.respond(Method::ListExpenses, october_expenses());

    let first = monthly_report(&h.client, "Trip", "2025-10").await.unwrap();
    let second = monthly_report(&h.client, "Trip", "2025-10").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.total, 40.0);
    assert_eq!(first.summary.len(), 2);
    assert_eq!(h.upstream.call_count(Method::ListGroups), 1);
    assert_eq!(h.upstream.call_count(Method::ListExpenses), 1);
}

#[test]
fn test_split_cents_gives_odd_cent_to_payer() {
    assert_eq!(split_cents(10.01), (501, 500));
    assert_eq!(split_cents(10.0), (500, 500));
    assert_eq!(split_cents(0.01), (1, 0));
}

#[tokio::test]
async fn test_equal_split_expense_is_created_and_invalidates() {
    let _ = env_logger::try_init();
    let h = create_test_client(CachePolicy::default());
    h.upstream.respond(Method::ListGroups, trip_groups());
    h.upstream.respond(Method::GetCurrentUser, json!({ "id": 10 }));
    h.upstream.respond(Method::CreateExpense, json!([{ "id": 99 }]));

    h.client.call("list_expenses", Kwargs::new()).await.unwrap();
    assert_eq!(h.store.docs(Entity::Expenses).await.len(), 1);

    let created = add_expense_equal_split(&h.client, &request(10.01, "uah", "Bo Kim"))
        .await
        .unwrap();

    assert_eq!(created, json!({ "result": [{ "id": 99 }] }));
    let sent = h.upstream.last_kwargs(Method::CreateExpense).unwrap();
    assert_eq!(sent["cost"], json!("10.01"));
    assert_eq!(sent["currency_code"], json!("UAH"));
    assert_eq!(sent["group_id"], json!(2));
    assert_eq!(sent["users__0__user_id"], json!(10));
    assert_eq!(sent["users__0__paid_share"], json!("10.01"));
    assert_eq!(sent["users__0__owed_share"], json!("5.01"));
    assert_eq!(sent["users__1__user_id"], json!(11));
    assert_eq!(sent["users__1__paid_share"], json!("0.00"));
    assert_eq!(sent["users__1__owed_share"], json!("5.00"));
    assert!(h.store.docs(Entity::Expenses).await.is_empty());
}

#[tokio::test]
async fn test_equal_split_validation() {
    let _ = env_logger::try_init();
    let h = create_test_client(CachePolicy::default());
    h.upstream.respond(Method::ListGroups, trip_groups());
    h.upstream.respond(Method::GetCurrentUser, json!({ "first_name": "Ann" }));

    let result = add_expense_equal_split(&h.client, &request(-1.0, "UAH", "Bo")).await;
    assert!(matches!(result, Err(ProxyError::InvalidInput(field, _)) if field == "amount"));

    let result = add_expense_equal_split(&h.client, &request(5.0, "EURO", "Bo")).await;
    assert!(matches!(result, Err(ProxyError::InvalidInput(field, _)) if field == "currency_code"));

    let result = add_expense_equal_split(&h.client, &request(5.0, "EUR", "Zed")).await;
    assert!(matches!(result, Err(ProxyError::ParticipantNotFound(_))));

    let result = add_expense_equal_split(&h.client, &request(5.0, "EUR", "Bo")).await;
    assert!(matches!(result, Err(ProxyError::CurrentUserUnavailable)));

    assert_eq!(h.upstream.call_count(Method::CreateExpense), 0);
}
