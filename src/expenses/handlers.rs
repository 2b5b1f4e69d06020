use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::ApiError,
    expenses::{
        dto::{CreateExpenseRequest, ExpenseListResponse, MessageResponse, PageQuery},
        repo::Expense,
    },
    state::AppState,
};

pub fn expense_routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", post(create_expense).get(list_expenses))
        .route("/expenses/:id", delete(delete_expense))
}

/// `totalPages` for a count of owned records at the given page size.
pub(crate) fn total_pages(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}

#[instrument(skip(state, payload))]
pub async fn create_expense(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let amount = payload
        .amount
        .ok_or_else(|| ApiError::validation("Amount is required"))?;
    if !amount.is_finite() || amount <= 0.0 {
        warn!(amount, "rejected non-positive amount");
        return Err(ApiError::validation("Amount must be a positive number"));
    }

    let category = payload
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::validation("Category is required"))?;

    let expense = Expense::create(
        &state.db,
        user_id,
        payload.description.as_deref(),
        amount,
        category,
    )
    .await?;

    info!(user_id = %user_id, expense_id = %expense.id, "expense created");
    Ok((StatusCode::CREATED, Json(expense)))
}

#[instrument(skip(state))]
pub async fn list_expenses(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<PageQuery>,
) -> Result<Json<ExpenseListResponse>, ApiError> {
    if q.page < 1 || q.limit < 1 {
        return Err(ApiError::validation("page and limit must be positive"));
    }

    let total = Expense::count_by_user(&state.db, user_id).await?;
    // A page past the end yields an empty slice, not an error.
    let expenses =
        Expense::list_page(&state.db, user_id, q.limit, (q.page - 1) * q.limit).await?;

    Ok(Json(ExpenseListResponse {
        expenses,
        page: q.page,
        total_pages: total_pages(total, q.limit),
    }))
}

#[instrument(skip(state))]
pub async fn delete_expense(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let expense = Expense::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Expense not found"))?;

    if expense.user_id != user_id {
        warn!(user_id = %user_id, expense_id = %id, "delete on foreign expense");
        return Err(ApiError::NotAuthorized);
    }

    Expense::delete_by_id(&state.db, id).await?;

    info!(user_id = %user_id, expense_id = %id, "expense removed");
    Ok(Json(MessageResponse {
        message: "Expense removed".into(),
    }))
}
