//! Read-only aggregates over the currently fetched page of expenses. They
//! are recomputed from scratch on every page change and cover only the
//! visible page, not the full history.

use time::{Date, UtcOffset};

use crate::expenses::Expense;

/// Sum of amounts on the current page, shown as the running total.
pub fn page_total(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// One point of the spending-over-time series.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotal {
    pub date: Date,
    pub total: f64,
}

/// Per-calendar-day sums grouped by each expense's creation date in the
/// given local offset. Days appear in the order they are first encountered
/// in the fetched page, which is what the chart plots.
pub fn daily_totals(expenses: &[Expense], local_offset: UtcOffset) -> Vec<DailyTotal> {
    let mut series: Vec<DailyTotal> = Vec::new();
    for expense in expenses {
        let date = expense.created_at.to_offset(local_offset).date();
        match series.iter_mut().find(|p| p.date == date) {
            Some(point) => point.total += expense.amount,
            None => series.push(DailyTotal {
                date,
                total: expense.amount,
            }),
        }
    }
    series
}

/// Steps the current page by `delta`, clamped to the valid range the way
/// the pager buttons behave.
pub fn step_page(page: i64, delta: i64, total_pages: i64) -> i64 {
    (page + delta).clamp(1, total_pages.max(1))
}
