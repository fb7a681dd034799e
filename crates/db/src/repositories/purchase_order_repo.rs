//! Repository for the `purchase_orders` table.

use sqlx::PgPool;

use orderdesk_core::types::DbId;

use crate::models::purchase_order::{CreatePurchaseOrder, PurchaseOrder, UpdatePurchaseOrder};

/// Column list for `purchase_orders` queries.
const COLUMNS: &str = "id, order_id, po_number, supplier_name, issue_date, \
    expected_delivery_date, actual_delivery_date, status, total_amount, notes, created_by, \
    created_at, updated_at";

/// Provides CRUD operations for purchase orders.
pub struct PurchaseOrderRepo;

impl PurchaseOrderRepo {
    /// Create a new purchase order under an order, returning the row.
    pub async fn create(
        pool: &PgPool,
        order_id: DbId,
        created_by: DbId,
        input: &CreatePurchaseOrder,
    ) -> Result<PurchaseOrder, sqlx::Error> {
        let query = format!(
            "INSERT INTO purchase_orders
                (order_id, po_number, supplier_name, issue_date, expected_delivery_date,
                 total_amount, notes, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PurchaseOrder>(&query)
            .bind(order_id)
            .bind(&input.po_number)
            .bind(&input.supplier_name)
            .bind(input.issue_date)
            .bind(input.expected_delivery_date)
            .bind(input.total_amount)
            .bind(&input.notes)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a purchase order by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PurchaseOrder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM purchase_orders WHERE id = $1");
        sqlx::query_as::<_, PurchaseOrder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List purchase orders for an order, newest-first.
    pub async fn list_for_order(
        pool: &PgPool,
        order_id: DbId,
    ) -> Result<Vec<PurchaseOrder>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM purchase_orders WHERE order_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, PurchaseOrder>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePurchaseOrder,
    ) -> Result<Option<PurchaseOrder>, sqlx::Error> {
        let query = format!(
            "UPDATE purchase_orders SET
                supplier_name = COALESCE($2, supplier_name),
                expected_delivery_date = COALESCE($3, expected_delivery_date),
                actual_delivery_date = COALESCE($4, actual_delivery_date),
                status = COALESCE($5, status),
                total_amount = COALESCE($6, total_amount),
                notes = COALESCE($7, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PurchaseOrder>(&query)
            .bind(id)
            .bind(&input.supplier_name)
            .bind(input.expected_delivery_date)
            .bind(input.actual_delivery_date)
            .bind(&input.status)
            .bind(input.total_amount)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }
}
