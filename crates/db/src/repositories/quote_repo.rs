//! Repository for the `quotes` table.

use sqlx::PgPool;

use orderdesk_core::types::DbId;

use crate::models::quote::{CreateQuote, Quote, UpdateQuote};

/// Column list for `quotes` queries.
const COLUMNS: &str = "id, order_id, quote_number, amount, status, valid_until, notes, \
    created_by, created_at, updated_at";

/// Provides CRUD operations for quotes.
pub struct QuoteRepo;

impl QuoteRepo {
    /// Create a new quote under an order, returning the created row.
    pub async fn create(
        pool: &PgPool,
        order_id: DbId,
        created_by: DbId,
        input: &CreateQuote,
    ) -> Result<Quote, sqlx::Error> {
        let query = format!(
            "INSERT INTO quotes (order_id, quote_number, amount, valid_until, notes, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(order_id)
            .bind(&input.quote_number)
            .bind(input.amount)
            .bind(input.valid_until)
            .bind(&input.notes)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a quote by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quotes WHERE id = $1");
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List quotes for an order, newest-first.
    pub async fn list_for_order(pool: &PgPool, order_id: DbId) -> Result<Vec<Quote>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM quotes WHERE order_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Quote>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuote,
    ) -> Result<Option<Quote>, sqlx::Error> {
        let query = format!(
            "UPDATE quotes SET
                amount = COALESCE($2, amount),
                status = COALESCE($3, status),
                valid_until = COALESCE($4, valid_until),
                notes = COALESCE($5, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .bind(input.amount)
            .bind(&input.status)
            .bind(input.valid_until)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }
}
