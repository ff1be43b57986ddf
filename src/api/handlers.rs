use crate::{
    api::models::*,
    core::{
        cached_client::CachedSplitwiseClient,
        errors::ProxyError,
        models::{AppLog, EqualSplitExpense, Kwargs, MonthlyReport},
        reports,
    },
    infrastructure::{
        logging::in_memory::InMemoryLogging,
        store::{DocumentStore, in_memory::InMemoryDocumentStore},
        upstream::splitwise::SplitwiseClient,
    },
};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

pub type AppState = Arc<CachedSplitwiseClient<SplitwiseClient, InMemoryDocumentStore, InMemoryLogging>>;

// Define API routes
pub fn api_routes(client: AppState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health))
        .route("/api/call/{method}", axum::routing::post(call_method))
        .route("/api/logs", axum::routing::get(get_app_logs))
        .route("/api/custom/expenses_by_month", axum::routing::get(expenses_by_month))
        .route("/api/custom/monthly_report", axum::routing::get(monthly_report))
        .route(
            "/api/custom/add_expense_equal_split",
            axum::routing::post(add_expense_equal_split),
        )
        .with_state(client)
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service and cache store status", body = HealthResponse))
)]
pub async fn health(State(client): State<AppState>) -> Json<HealthResponse> {
    let (status, database) = match client.store().ping().await {
        Ok(()) => ("healthy", "connected".to_string()),
        Err(e) => ("degraded", format!("disconnected: {}", e)),
    };
    Json(HealthResponse {
        status: status.to_string(),
        service: "splitproxy".to_string(),
        cache_enabled: client.policy().enabled,
        database,
    })
}

#[utoipa::path(
    post,
    path = "/api/call/{method}",
    params(("method" = String, Path, description = "Splitwise method name, e.g. list_expenses")),
    request_body(content = Object, description = "Keyword arguments of the call"),
    responses(
        (status = 200, description = "Method result", body = Object),
        (status = 404, description = "Unsupported method", body = ErrorResponse),
        (status = 502, description = "Splitwise unavailable and nothing cached", body = ErrorResponse)
    )
)]
pub async fn call_method(
    State(client): State<AppState>,
    Path(method): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let kwargs: Kwargs = if body.iter().all(u8::is_ascii_whitespace) {
        Kwargs::new()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ProxyError::invalid_input("body", format!("expected a JSON object: {}", e)))?
    };
    match client.call(&method, kwargs).await {
        Ok(result) => Ok(Json(result)),
        Err(err) => {
            if err.is_upstream() {
                warn!(%method, error = %err, "upstream call failed");
            }
            Err(err.into())
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses((status = 200, description = "Recent cache and upstream operations", body = [AppLog]))
)]
pub async fn get_app_logs(State(client): State<AppState>) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = client.get_app_logs().await?;
    Ok(Json(logs))
}

#[utoipa::path(
    get,
    path = "/api/custom/expenses_by_month",
    params(MonthQuery),
    responses(
        (status = 200, description = "Expenses of the group in that month", body = [Object]),
        (status = 400, description = "Unknown group or bad month", body = ErrorResponse)
    )
)]
pub async fn expenses_by_month(
    State(client): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let expenses = reports::expenses_by_month(&*client, &query.group_name, &query.month).await?;
    Ok(Json(expenses))
}

#[utoipa::path(
    get,
    path = "/api/custom/monthly_report",
    params(MonthQuery),
    responses(
        (status = 200, description = "Spend per category", body = MonthlyReport),
        (status = 400, description = "Unknown group or bad month", body = ErrorResponse)
    )
)]
pub async fn monthly_report(
    State(client): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthlyReport>, ApiError> {
    let report = reports::monthly_report(&*client, &query.group_name, &query.month).await?;
    Ok(Json(report))
}

#[utoipa::path(
    post,
    path = "/api/custom/add_expense_equal_split",
    request_body = EqualSplitExpense,
    responses(
        (status = 200, description = "Created expense", body = Object),
        (status = 400, description = "Unknown group or participant", body = ErrorResponse)
    )
)]
pub async fn add_expense_equal_split(
    State(client): State<AppState>,
    Json(req): Json<EqualSplitExpense>,
) -> Result<Json<Value>, ApiError> {
    let created = reports::add_expense_equal_split(&*client, &req).await?;
    Ok(Json(created))
}
