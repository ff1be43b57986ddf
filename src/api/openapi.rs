use utoipa::OpenApi;

use crate::{
    api::models::{ErrorResponse, HealthResponse, MonthQuery},
    core::models::{AppLog, Entity, EqualSplitExpense, Method, MonthlyReport},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::health,
        super::handlers::call_method,
        super::handlers::get_app_logs,
        super::handlers::expenses_by_month,
        super::handlers::monthly_report,
        super::handlers::add_expense_equal_split
    ),
    components(schemas(
        MonthQuery,
        HealthResponse,
        ErrorResponse,
        AppLog,
        Entity,
        Method,
        MonthlyReport,
        EqualSplitExpense
    )),
    info(
        title = "Splitwise Proxy API",
        description = "Splitwise calls with per-entity caching",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
