use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MonthlyReport {
    /// Spend per category name.
    pub summary: BTreeMap<String, f64>,
    pub total: f64,
    pub recommendations: Vec<String>,
}

/// An expense paid by the current user and split evenly with one participant.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct EqualSplitExpense {
    pub group_name: String,
    pub amount: f64,
    /// Three-letter currency code, e.g. UAH
    pub currency_code: String,
    /// First name or full name of the other participant
    pub participant_name: String,
    pub description: String,
}
