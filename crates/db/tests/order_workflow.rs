//! Integration tests for the order repository and event log.
//!
//! Exercises the workflow-state write path against a real database:
//! - Seeded workflow columns on creation
//! - Revision-guarded workflow updates (optimistic concurrency)
//! - Append-only event log ordering and filtering

use sqlx::PgPool;

use orderdesk_core::events::EventDetail;
use orderdesk_db::models::customer::CreateCustomer;
use orderdesk_db::models::order::{CreateOrder, OrderFilter, WorkflowState};
use orderdesk_db::models::order_event::EventFilter;
use orderdesk_db::repositories::{CustomerRepo, OrderEventRepo, OrderRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_customer(company: &str) -> CreateCustomer {
    CreateCustomer {
        company_name: company.to_string(),
        customer_type: "RESIDENTIAL".to_string(),
        contact_first_name: None,
        contact_last_name: None,
        email: None,
        phone: None,
        address: None,
        city: None,
        state: None,
        zip_code: None,
        notes: None,
    }
}

fn new_order(order_number: &str, customer_id: i64) -> CreateOrder {
    CreateOrder {
        order_number: order_number.to_string(),
        workflow_type: "MATERIALS_ONLY".to_string(),
        customer_id,
        status: None,
        workflow_status: None,
        notes: None,
        total_amount: None,
        deposit_required: None,
        deposit_amount: None,
        installation_date: None,
    }
}

fn seed_state() -> WorkflowState {
    WorkflowState {
        workflow_status: Some("NEW_LEAD".to_string()),
        current_stage: Some("LEAD_ACQUISITION".to_string()),
        completed_statuses: vec!["NEW_LEAD".to_string()],
        progress_percentage: 9,
    }
}

async fn seed_user(pool: &PgPool) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (username, email, password_hash) \
         VALUES ('tester', 'tester@example.com', 'x') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Test: Order creation seeds workflow columns
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_create_order_seeds_workflow_columns(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let customer = CustomerRepo::create(&pool, &new_customer("Acme Builders"))
        .await
        .unwrap();

    let order = OrderRepo::create(
        &pool,
        user_id,
        &new_order("ORD-1001", customer.id),
        &seed_state(),
    )
    .await
    .unwrap();

    assert_eq!(order.order_number, "ORD-1001");
    assert_eq!(order.status, "ACTIVE");
    assert_eq!(order.workflow_status.as_deref(), Some("NEW_LEAD"));
    assert_eq!(order.current_stage.as_deref(), Some("LEAD_ACQUISITION"));
    assert_eq!(order.completed_statuses, vec!["NEW_LEAD"]);
    assert_eq!(order.progress_percentage, 9);
    assert_eq!(order.revision, 0);
}

// ---------------------------------------------------------------------------
// Test: Revision guard accepts the read revision and bumps it
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_workflow_update_with_current_revision_succeeds(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let customer = CustomerRepo::create(&pool, &new_customer("Acme Builders"))
        .await
        .unwrap();
    let order = OrderRepo::create(
        &pool,
        user_id,
        &new_order("ORD-1002", customer.id),
        &seed_state(),
    )
    .await
    .unwrap();

    let next = WorkflowState {
        workflow_status: Some("QUOTE_REQUESTED".to_string()),
        current_stage: Some("LEAD_ACQUISITION".to_string()),
        completed_statuses: vec!["NEW_LEAD".to_string(), "QUOTE_REQUESTED".to_string()],
        progress_percentage: 18,
    };

    let updated = OrderRepo::update_workflow_state(&pool, order.id, order.revision, &next, None)
        .await
        .unwrap()
        .expect("guarded update with fresh revision must succeed");

    assert_eq!(updated.workflow_status.as_deref(), Some("QUOTE_REQUESTED"));
    assert_eq!(
        updated.completed_statuses,
        vec!["NEW_LEAD", "QUOTE_REQUESTED"]
    );
    assert_eq!(updated.progress_percentage, 18);
    assert_eq!(updated.revision, order.revision + 1);
}

// ---------------------------------------------------------------------------
// Test: A stale revision loses the race and writes nothing
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_workflow_update_with_stale_revision_is_rejected(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let customer = CustomerRepo::create(&pool, &new_customer("Acme Builders"))
        .await
        .unwrap();
    let order = OrderRepo::create(
        &pool,
        user_id,
        &new_order("ORD-1003", customer.id),
        &seed_state(),
    )
    .await
    .unwrap();

    // First writer wins.
    let first = WorkflowState {
        workflow_status: Some("QUOTE_REQUESTED".to_string()),
        current_stage: Some("LEAD_ACQUISITION".to_string()),
        completed_statuses: vec!["NEW_LEAD".to_string(), "QUOTE_REQUESTED".to_string()],
        progress_percentage: 18,
    };
    OrderRepo::update_workflow_state(&pool, order.id, order.revision, &first, None)
        .await
        .unwrap()
        .expect("first write must succeed");

    // Second writer still holds the old revision and must be rejected.
    let second = WorkflowState {
        workflow_status: Some("QUOTE_SENT".to_string()),
        current_stage: Some("QUOTATION".to_string()),
        completed_statuses: vec!["NEW_LEAD".to_string(), "QUOTE_SENT".to_string()],
        progress_percentage: 18,
    };
    let result = OrderRepo::update_workflow_state(&pool, order.id, order.revision, &second, None)
        .await
        .unwrap();
    assert!(result.is_none(), "stale revision must not write");

    // The first writer's completed entry survived.
    let current = OrderRepo::find_by_id(&pool, order.id).await.unwrap().unwrap();
    assert_eq!(
        current.completed_statuses,
        vec!["NEW_LEAD", "QUOTE_REQUESTED"]
    );
}

// ---------------------------------------------------------------------------
// Test: Event log is newest-first with deterministic tiebreak
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_event_log_is_newest_first(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let customer = CustomerRepo::create(&pool, &new_customer("Acme Builders"))
        .await
        .unwrap();
    let order = OrderRepo::create(
        &pool,
        user_id,
        &new_order("ORD-1004", customer.id),
        &seed_state(),
    )
    .await
    .unwrap();

    // Rapid successive inserts can share a timestamp; the id tiebreak keeps
    // the listing deterministic.
    for i in 0..3 {
        OrderEventRepo::append(
            &pool,
            order.id,
            &EventDetail::Note {
                note: format!("note {i}"),
            },
            Some(user_id),
        )
        .await
        .unwrap();
    }

    let events = OrderEventRepo::list_for_order(&pool, order.id, &EventFilter::default())
        .await
        .unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].description, "note 2");
    assert_eq!(events[1].description, "note 1");
    assert_eq!(events[2].description, "note 0");

    let ids: Vec<i64> = events.iter().map(|e| e.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(ids, sorted);
}

// ---------------------------------------------------------------------------
// Test: Event type filter and typed metadata round trip
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_event_filter_and_typed_metadata(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let customer = CustomerRepo::create(&pool, &new_customer("Acme Builders"))
        .await
        .unwrap();
    let order = OrderRepo::create(
        &pool,
        user_id,
        &new_order("ORD-1005", customer.id),
        &seed_state(),
    )
    .await
    .unwrap();

    OrderEventRepo::append(
        &pool,
        order.id,
        &EventDetail::Note {
            note: "called the customer".to_string(),
        },
        Some(user_id),
    )
    .await
    .unwrap();

    let payment = OrderEventRepo::append(
        &pool,
        order.id,
        &EventDetail::Payment {
            amount: 500.0,
            payment_type: "deposit".to_string(),
            payment_method: "check".to_string(),
            reference: Some("1042".to_string()),
        },
        Some(user_id),
    )
    .await
    .unwrap();

    assert_eq!(payment.event_type, "payment");
    assert_eq!(
        payment.description,
        "Deposit payment of $500.00 received via check (Ref: 1042)"
    );

    let metadata = payment.metadata.expect("payment must carry metadata");
    let detail: EventDetail = serde_json::from_value(metadata).unwrap();
    assert_eq!(detail.event_type(), "payment");

    let filter = EventFilter {
        event_type: Some("payment".to_string()),
        limit: None,
        offset: None,
    };
    let payments = OrderEventRepo::list_for_order(&pool, order.id, &filter)
        .await
        .unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].id, payment.id);

    assert_eq!(
        OrderEventRepo::count_for_order(&pool, order.id).await.unwrap(),
        2
    );
}

// ---------------------------------------------------------------------------
// Test: Stage-change events persist the transition columns
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_stage_change_event_columns(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let customer = CustomerRepo::create(&pool, &new_customer("Acme Builders"))
        .await
        .unwrap();
    let order = OrderRepo::create(
        &pool,
        user_id,
        &new_order("ORD-1006", customer.id),
        &seed_state(),
    )
    .await
    .unwrap();

    let event = OrderEventRepo::append(
        &pool,
        order.id,
        &EventDetail::StageChange {
            previous_status: Some("NEW_LEAD".to_string()),
            new_status: "QUOTE_REQUESTED".to_string(),
            notes: None,
        },
        Some(user_id),
    )
    .await
    .unwrap();

    assert_eq!(event.previous_stage.as_deref(), Some("NEW_LEAD"));
    assert_eq!(event.new_stage.as_deref(), Some("QUOTE_REQUESTED"));
}

// ---------------------------------------------------------------------------
// Test: Cancel keeps the row
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_cancel_is_soft(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let customer = CustomerRepo::create(&pool, &new_customer("Acme Builders"))
        .await
        .unwrap();
    let order = OrderRepo::create(
        &pool,
        user_id,
        &new_order("ORD-1007", customer.id),
        &seed_state(),
    )
    .await
    .unwrap();

    let cancelled = OrderRepo::cancel(&pool, order.id).await.unwrap().unwrap();
    assert_eq!(cancelled.status, "CANCELLED");

    // Row still exists and is listable by status.
    let filter = OrderFilter {
        status: Some("CANCELLED".to_string()),
        ..Default::default()
    };
    let listed = OrderRepo::list(&pool, &filter).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, order.id);
}
