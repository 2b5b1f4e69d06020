use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Expense record. The owner and creation timestamp are assigned at insert
/// and never change; there is no update operation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: Option<String>,
    pub amount: f64,
    pub category: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Expense {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        description: Option<&str>,
        amount: f64,
        category: &str,
    ) -> anyhow::Result<Expense> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (user_id, description, amount, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, description, amount, category, created_at
            "#,
        )
        .bind(user_id)
        .bind(description)
        .bind(amount)
        .bind(category)
        .fetch_one(db)
        .await?;
        Ok(expense)
    }

    /// One page of the owner's expenses, most recent first.
    pub async fn list_page(
        db: &PgPool,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Expense>> {
        let rows = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, user_id, description, amount, category, created_at
            FROM expenses
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM expenses
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(db)
        .await?;
        Ok(count)
    }

    /// Fetch by id without owner scoping; the handler decides between
    /// not-found and not-authorized.
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Expense>> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, user_id, description, amount, category, created_at
            FROM expenses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(expense)
    }

    /// Returns false when the row was already gone.
    pub async fn delete_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM expenses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn expense_serializes_created_at_as_rfc3339() {
        let expense = Expense {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            description: None,
            amount: 12.5,
            category: "Food".into(),
            created_at: datetime!(2026-03-01 09:30:00 UTC),
        };
        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["created_at"], "2026-03-01T09:30:00Z");
        assert_eq!(json["amount"], 12.5);
    }

    #[test]
    fn expense_roundtrips_through_json() {
        let expense = Expense {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            description: Some("groceries".into()),
            amount: 42.0,
            category: "Food".into(),
            created_at: datetime!(2026-03-01 09:30:00 UTC),
        };
        let json = serde_json::to_string(&expense).unwrap();
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, expense.id);
        assert_eq!(back.description.as_deref(), Some("groceries"));
        assert_eq!(back.created_at, expense.created_at);
    }
}
