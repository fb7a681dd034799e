//! Repository for the `materials` table.

use sqlx::PgPool;

use orderdesk_core::types::DbId;

use crate::models::material::{CreateMaterial, Material};

/// Column list for `materials` queries.
const COLUMNS: &str = "id, order_id, item_name, description, quantity, unit, unit_price, \
    status, purchase_order_id, notes, created_at, updated_at";

/// Provides operations for material line items.
pub struct MaterialRepo;

impl MaterialRepo {
    /// Add a material to an order, returning the created row.
    pub async fn create(
        pool: &PgPool,
        order_id: DbId,
        input: &CreateMaterial,
    ) -> Result<Material, sqlx::Error> {
        let query = format!(
            "INSERT INTO materials
                (order_id, item_name, description, quantity, unit, unit_price,
                 purchase_order_id, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(order_id)
            .bind(&input.item_name)
            .bind(&input.description)
            .bind(input.quantity)
            .bind(&input.unit)
            .bind(input.unit_price)
            .bind(input.purchase_order_id)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// List materials for an order, newest-first.
    pub async fn list_for_order(
        pool: &PgPool,
        order_id: DbId,
    ) -> Result<Vec<Material>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM materials WHERE order_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }
}
