//! Repository for the `customers` table.

use sqlx::PgPool;

use orderdesk_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use orderdesk_core::types::DbId;

use crate::models::customer::{CreateCustomer, Customer, UpdateCustomer};

/// Column list for `customers` queries.
const COLUMNS: &str = "id, company_name, customer_type, contact_first_name, contact_last_name, \
    email, phone, address, city, state, zip_code, notes, created_at, updated_at";

/// Provides CRUD operations for customers.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Create a new customer, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCustomer) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers
                (company_name, customer_type, contact_first_name, contact_last_name,
                 email, phone, address, city, state, zip_code, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&input.company_name)
            .bind(&input.customer_type)
            .bind(&input.contact_first_name)
            .bind(&input.contact_last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.zip_code)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a customer by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List customers, optionally filtered by type or a name/email search.
    pub async fn list(
        pool: &PgPool,
        customer_type: Option<&str>,
        search: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Customer>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(offset);
        let pattern = search.map(|s| format!("%{s}%"));
        let query = format!(
            "SELECT {COLUMNS} FROM customers
             WHERE ($1::text IS NULL OR customer_type = $1)
               AND ($2::text IS NULL
                    OR company_name ILIKE $2
                    OR email ILIKE $2
                    OR contact_last_name ILIKE $2)
             ORDER BY company_name ASC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(customer_type)
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCustomer,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET
                company_name = COALESCE($2, company_name),
                customer_type = COALESCE($3, customer_type),
                contact_first_name = COALESCE($4, contact_first_name),
                contact_last_name = COALESCE($5, contact_last_name),
                email = COALESCE($6, email),
                phone = COALESCE($7, phone),
                address = COALESCE($8, address),
                city = COALESCE($9, city),
                state = COALESCE($10, state),
                zip_code = COALESCE($11, zip_code),
                notes = COALESCE($12, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(&input.company_name)
            .bind(&input.customer_type)
            .bind(&input.contact_first_name)
            .bind(&input.contact_last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.zip_code)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a customer by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether a customer with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let found: Option<i32> = sqlx::query_scalar("SELECT 1 FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(found.is_some())
    }
}
