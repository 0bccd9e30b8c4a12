//! # Expense Repository
//!
//! Database operations for expenses. Expenses have no relationships;
//! the only wrinkle is that the expense date comes from the form
//! (a calendar date the cost applies to), not the insertion time.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use dukaan_core::Expense;

const SELECT_COLUMNS: &str = "SELECT id, title, category, amount, expense_date FROM expenses";

/// Repository for expense database operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

impl ExpenseRepository {
    /// Creates a new ExpenseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ExpenseRepository { pool }
    }

    /// Inserts a new expense.
    pub async fn insert(
        &self,
        title: &str,
        category: &str,
        amount: f64,
        expense_date: DateTime<Utc>,
    ) -> DbResult<Expense> {
        debug!(title = %title, amount = %amount, "Inserting expense");

        let result = sqlx::query(
            r#"
            INSERT INTO expenses (title, category, amount, expense_date)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(title)
        .bind(category)
        .bind(amount)
        .bind(expense_date)
        .execute(&self.pool)
        .await?;

        Ok(Expense {
            id: result.last_insert_rowid(),
            title: title.to_string(),
            category: category.to_string(),
            amount,
            expense_date,
        })
    }

    /// Lists all expenses, newest first.
    pub async fn list(&self) -> DbResult<Vec<Expense>> {
        let expenses =
            sqlx::query_as::<_, Expense>(&format!("{SELECT_COLUMNS} ORDER BY expense_date DESC"))
                .fetch_all(&self.pool)
                .await?;

        Ok(expenses)
    }

    /// Deletes an expense by id.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting expense");

        let result = sqlx::query("DELETE FROM expenses WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Expense", id.to_string()));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
