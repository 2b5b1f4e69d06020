use serde::{Deserialize, Serialize};

use crate::expenses::repo::Expense;

/// Request body for creating an expense. Amount and category are checked in
/// the handler so their absence reports a validation message rather than a
/// deserialization failure.
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateExpenseRequest {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
}

/// Page/limit query on the list endpoint.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}
fn default_limit() -> i64 {
    10
}

/// One page of expenses plus the pagination envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
    pub page: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
