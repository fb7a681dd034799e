//! End-to-end tests for the CRM resource endpoints: customers, purchase
//! orders, tasks, and work items.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use sqlx::PgPool;

use common::{build_test_app, request, seed_customer, seed_user};

#[sqlx::test(migrations = "../db/migrations")]
async fn test_customer_crud_roundtrip(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, token) = seed_user(&pool).await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/v1/customers",
        Some(&token),
        Some(json!({
            "company_name": "Granite Works",
            "customer_type": "COMMERCIAL",
            "email": "front@graniteworks.example",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let customer_id = body["data"]["id"].as_i64().unwrap();

    // Malformed email is rejected before touching the database.
    let (status, _) = request(
        &app,
        Method::POST,
        "/api/v1/customers",
        Some(&token),
        Some(json!({
            "company_name": "Bad Email Inc",
            "customer_type": "COMMERCIAL",
            "email": "not-an-email",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown customer type is rejected.
    let (status, _) = request(
        &app,
        Method::POST,
        "/api/v1/customers",
        Some(&token),
        Some(json!({"company_name": "X", "customer_type": "INDUSTRIAL"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = request(
        &app,
        Method::PUT,
        &format!("/api/v1/customers/{customer_id}"),
        Some(&token),
        Some(json!({"phone": "555-0100"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["phone"], "555-0100");
    assert_eq!(body["data"]["company_name"], "Granite Works");

    let (status, _) = request(
        &app,
        Method::DELETE,
        &format!("/api/v1/customers/{customer_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request(
        &app,
        Method::GET,
        &format!("/api/v1/customers/{customer_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_purchase_order_pulls_order_forward(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, token) = seed_user(&pool).await;
    let customer_id = seed_customer(&pool).await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/v1/orders",
        Some(&token),
        Some(json!({
            "order_number": "ORD-4001",
            "workflow_type": "MATERIALS_ONLY",
            "customer_id": customer_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let order_id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = request(
        &app,
        Method::POST,
        &format!("/api/v1/orders/{order_id}/purchase-orders"),
        Some(&token),
        Some(json!({
            "po_number": "PO-88",
            "supplier_name": "Cascade Lumber",
            "issue_date": "2025-03-10",
            "total_amount": 1800.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // The order was sitting at NEW_LEAD; PO creation pulls it to PO_CREATED.
    let (_, body) = request(
        &app,
        Method::GET,
        &format!("/api/v1/orders/{order_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"]["workflow_status"], "PO_CREATED");
    assert_eq!(body["data"]["current_stage"], "PROCUREMENT");
    assert_eq!(body["data"]["purchase_orders"].as_array().unwrap().len(), 1);

    // Both the PO event and the pulled-forward completion are in history.
    let (_, body) = request(
        &app,
        Method::GET,
        &format!("/api/v1/orders/{order_id}/history"),
        Some(&token),
        None,
    )
    .await;
    let types: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["event_type"].as_str().unwrap())
        .collect();
    assert!(types.contains(&"purchase_order_created"));
    assert!(types.contains(&"status_completion"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_task_validation_and_order_event(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, token) = seed_user(&pool).await;
    let customer_id = seed_customer(&pool).await;

    let (_, body) = request(
        &app,
        Method::POST,
        "/api/v1/orders",
        Some(&token),
        Some(json!({
            "order_number": "ORD-4002",
            "workflow_type": "MATERIALS_ONLY",
            "customer_id": customer_id,
        })),
    )
    .await;
    let order_id = body["data"]["id"].as_i64().unwrap();

    // Invalid status is rejected.
    let (status, _) = request(
        &app,
        Method::POST,
        "/api/v1/tasks",
        Some(&token),
        Some(json!({"title": "Call supplier", "status": "open", "priority": "HIGH"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Valid task linked to the order records a task event.
    let (status, _) = request(
        &app,
        Method::POST,
        "/api/v1/tasks",
        Some(&token),
        Some(json!({
            "title": "Call supplier",
            "status": "Open",
            "priority": "HIGH",
            "order_id": order_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = request(
        &app,
        Method::GET,
        &format!("/api/v1/orders/{order_id}/history?event_type=task"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = request(
        &app,
        Method::GET,
        "/api/v1/tasks/statuses",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().contains(&json!("Open")));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_work_item_statuses_and_crud(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, token) = seed_user(&pool).await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/v1/work-items",
        Some(&token),
        Some(json!({
            "description": "Walk-in asking about kitchen remodel",
            "status": "New Lead",
            "priority": "Medium",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let item_id = body["data"]["id"].as_i64().unwrap();
    // entered_by comes from the authenticated user, not the body.
    assert_eq!(body["data"]["entered_by"], "tester");

    let (status, body) = request(
        &app,
        Method::PUT,
        &format!("/api/v1/work-items/{item_id}"),
        Some(&token),
        Some(json!({"status": "Interested"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Interested");

    // Screaming-case status belongs to the workflow table, not work items.
    let (status, _) = request(
        &app,
        Method::PUT,
        &format!("/api/v1/work-items/{item_id}"),
        Some(&token),
        Some(json!({"status": "NEW_LEAD"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
