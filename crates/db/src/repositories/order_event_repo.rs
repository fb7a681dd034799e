//! Repository for the append-only `order_events` table.
//!
//! There are deliberately no update or delete methods: history rows are
//! immutable once written.

use sqlx::PgPool;

use orderdesk_core::events::EventDetail;
use orderdesk_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use orderdesk_core::types::DbId;

use crate::models::order_event::{EventFilter, OrderEvent};

/// Column list for `order_events` queries.
const COLUMNS: &str = "id, order_id, event_type, description, previous_stage, new_stage, \
    metadata, created_by, created_at";

/// Provides append and read operations for the order event log.
pub struct OrderEventRepo;

impl OrderEventRepo {
    /// Append an event built from a typed payload, returning the row.
    pub async fn append(
        pool: &PgPool,
        order_id: DbId,
        detail: &EventDetail,
        created_by: Option<DbId>,
    ) -> Result<OrderEvent, sqlx::Error> {
        let (previous_stage, new_stage) = detail.stage_columns();
        let metadata =
            serde_json::to_value(detail).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        let query = format!(
            "INSERT INTO order_events
                (order_id, event_type, description, previous_stage, new_stage, metadata, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrderEvent>(&query)
            .bind(order_id)
            .bind(detail.event_type())
            .bind(detail.description())
            .bind(previous_stage)
            .bind(new_stage)
            .bind(metadata)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// List events for an order, newest-first.
    ///
    /// Ties on `created_at` (rapid successive inserts) are broken by id so
    /// the ordering is deterministic.
    pub async fn list_for_order(
        pool: &PgPool,
        order_id: DbId,
        filter: &EventFilter,
    ) -> Result<Vec<OrderEvent>, sqlx::Error> {
        let limit = clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(filter.offset);
        let query = format!(
            "SELECT {COLUMNS} FROM order_events
             WHERE order_id = $1
               AND ($2::text IS NULL OR event_type = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, OrderEvent>(&query)
            .bind(order_id)
            .bind(&filter.event_type)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of events recorded for an order.
    pub async fn count_for_order(pool: &PgPool, order_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM order_events WHERE order_id = $1")
            .bind(order_id)
            .fetch_one(pool)
            .await
    }
}
