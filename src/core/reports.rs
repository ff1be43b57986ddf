//! Month-level views and helpers built on top of the cached client.

use crate::core::cached_client::{CachedSplitwiseClient, get_user_from_group};
use crate::core::errors::ProxyError;
use crate::core::models::method::{Kwargs, Method};
use crate::core::models::report::{EqualSplitExpense, MonthlyReport};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::store::DocumentStore;
use crate::infrastructure::upstream::UpstreamClient;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, info};
use serde_json::{Value, json};
use std::collections::BTreeMap;

const DOMINANT_SHARE: f64 = 0.5;

/// First day of `month` (YYYY-MM) and first day of the following month.
pub fn month_range(month: &str) -> Result<(NaiveDate, NaiveDate), ProxyError> {
    let invalid = || ProxyError::InvalidMonth(month.to_string());
    let (year, mon) = month.trim().split_once('-').ok_or_else(invalid)?;
    if year.len() != 4 || mon.len() != 2 {
        return Err(invalid());
    }
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let mon: u32 = mon.parse().map_err(|_| invalid())?;
    let start = NaiveDate::from_ymd_opt(year, mon, 1).ok_or_else(invalid)?;
    let end = if start.month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, mon + 1, 1)
    }
    .ok_or_else(invalid)?;
    Ok((start, end))
}

/// Expenses of the named group whose date falls inside `month`.
pub async fn expenses_by_month<U, S, L>(
    client: &CachedSplitwiseClient<U, S, L>,
    group_name: &str,
    month: &str,
) -> Result<Vec<Value>, ProxyError>
where
    U: UpstreamClient,
    S: DocumentStore,
    L: LoggingService,
{
    let (start, end) = month_range(month)?;
    let group = client
        .get_group_by_name(group_name)
        .await?
        .ok_or_else(|| ProxyError::GroupNotFound(group_name.to_string()))?;
    let group_id = group
        .get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| ProxyError::GroupNotFound(group_name.to_string()))?;

    let mut kwargs = Kwargs::new();
    kwargs.insert("group_id".to_string(), json!(group_id));
    kwargs.insert("dated_after".to_string(), json!(start.format("%Y-%m-%d").to_string()));
    kwargs.insert("dated_before".to_string(), json!(end.format("%Y-%m-%d").to_string()));
    kwargs.insert("limit".to_string(), json!(0));
    let expenses = client.call_method(Method::ListExpenses, kwargs).await?;

    let start = start.and_time(NaiveTime::MIN);
    let end = end.and_time(NaiveTime::MIN);
    let matching: Vec<Value> = expenses
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .filter(|exp| exp.get("group_id").and_then(Value::as_i64) == Some(group_id))
        .filter(|exp| expense_date(exp).is_some_and(|d| start <= d && d < end))
        .cloned()
        .collect();
    debug!("{} expenses for group {} in {}", matching.len(), group_id, month);
    Ok(matching)
}

/// Spend per category for a group and month, with a note for every category
/// that takes more than half of the total.
pub async fn monthly_report<U, S, L>(
    client: &CachedSplitwiseClient<U, S, L>,
    group_name: &str,
    month: &str,
) -> Result<MonthlyReport, ProxyError>
where
    U: UpstreamClient,
    S: DocumentStore,
    L: LoggingService,
{
    let expenses = expenses_by_month(client, group_name, month).await?;
    Ok(summarize(&expenses))
}

pub fn summarize(expenses: &[Value]) -> MonthlyReport {
    if expenses.is_empty() {
        return MonthlyReport {
            summary: BTreeMap::new(),
            total: 0.0,
            recommendations: vec!["No expenses found for the given group and month.".to_string()],
        };
    }

    let mut summary: BTreeMap<String, f64> = BTreeMap::new();
    let mut total = 0.0;
    for exp in expenses {
        let cost = exp.get("cost").or_else(|| exp.get("amount")).map_or(0.0, as_amount);
        total += cost;
        *summary.entry(category_name(exp)).or_insert(0.0) += cost;
    }

    let recommendations = summary
        .iter()
        .filter(|(_, cost)| total > 0.0 && **cost / total > DOMINANT_SHARE)
        .map(|(name, _)| {
            format!(
                "Expenses in category '{}' exceed 50% of total amount. Consider reducing spending in this area.",
                name
            )
        })
        .collect();

    MonthlyReport {
        summary,
        total,
        recommendations,
    }
}

/// Creates an expense paid in full by the current user and owed in two halves.
pub async fn add_expense_equal_split<U, S, L>(
    client: &CachedSplitwiseClient<U, S, L>,
    request: &EqualSplitExpense,
) -> Result<Value, ProxyError>
where
    U: UpstreamClient,
    S: DocumentStore,
    L: LoggingService,
{
    if !(request.amount.is_finite() && request.amount > 0.0) {
        return Err(ProxyError::invalid_input("amount", "amount must be positive"));
    }
    let currency = request.currency_code.trim().to_uppercase();
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ProxyError::invalid_input(
            "currency_code",
            "expected a three-letter currency code",
        ));
    }

    let group = client
        .get_group_by_name(&request.group_name)
        .await?
        .ok_or_else(|| ProxyError::GroupNotFound(request.group_name.clone()))?;
    let group_id = group
        .get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| ProxyError::GroupNotFound(request.group_name.clone()))?;
    let participant_id = get_user_from_group(&group, &request.participant_name)
        .and_then(|m| m.get("id").and_then(Value::as_i64))
        .ok_or_else(|| ProxyError::ParticipantNotFound(request.participant_name.clone()))?;
    let me_id = client
        .get_current_user_id()
        .await?
        .ok_or(ProxyError::CurrentUserUnavailable)?;

    let (payer_share, other_share) = split_cents(request.amount);
    let mut kwargs = Kwargs::new();
    kwargs.insert("cost".to_string(), json!(cents(payer_share + other_share)));
    kwargs.insert("description".to_string(), json!(request.description));
    kwargs.insert("group_id".to_string(), json!(group_id));
    kwargs.insert("currency_code".to_string(), json!(currency));
    kwargs.insert("users__0__user_id".to_string(), json!(me_id));
    kwargs.insert("users__0__paid_share".to_string(), json!(cents(payer_share + other_share)));
    kwargs.insert("users__0__owed_share".to_string(), json!(cents(payer_share)));
    kwargs.insert("users__1__user_id".to_string(), json!(participant_id));
    kwargs.insert("users__1__paid_share".to_string(), json!("0.00"));
    kwargs.insert("users__1__owed_share".to_string(), json!(cents(other_share)));

    info!(
        "Creating equal split expense in group {} between {} and {}",
        group_id, me_id, participant_id
    );
    client.call_method(Method::CreateExpense, kwargs).await
}

/// Splits an amount into two cent-exact halves; the odd cent goes to the payer.
pub fn split_cents(amount: f64) -> (i64, i64) {
    let total = (amount * 100.0).round() as i64;
    let other = total / 2;
    (total - other, other)
}

fn cents(value: i64) -> String {
    format!("{}.{:02}", value / 100, value % 100)
}

fn as_amount(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn category_name(exp: &Value) -> String {
    let category = exp.get("category").or_else(|| exp.get("category_id"));
    let name = match category {
        Some(Value::Object(cat)) => cat
            .get("name")
            .or_else(|| cat.get("name_en"))
            .and_then(Value::as_str)
            .map(String::from),
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    name.filter(|n| !n.is_empty()).unwrap_or_else(|| "Unknown".to_string())
}

/// Naive date-time of an expense, from `date` or `created_at`.
fn expense_date(exp: &Value) -> Option<NaiveDateTime> {
    let raw = exp
        .get("date")
        .and_then(Value::as_str)
        .or_else(|| exp.get("created_at").and_then(Value::as_str))?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}
