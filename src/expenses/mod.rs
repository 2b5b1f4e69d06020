use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod repo;

pub use dto::{CreateExpenseRequest, ExpenseListResponse, MessageResponse, PageQuery};
pub use repo::Expense;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::expense_routes())
}
