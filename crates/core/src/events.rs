//! Typed payloads for the append-only order event log.
//!
//! The event `metadata` column is JSONB, but handlers never build free-form
//! maps: every event carries an [`EventDetail`] variant, so the fields each
//! event type requires are checked at compile time and the rendered
//! description stays consistent across call sites.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Event type tag for order creation.
pub const EVENT_ORDER_CREATED: &str = "order_created";
/// Event type tag for order cancellation.
pub const EVENT_ORDER_CANCELLED: &str = "order_cancelled";
/// Event type tag for completing a workflow status.
pub const EVENT_STATUS_COMPLETION: &str = "status_completion";
/// Event type tag for undoing a status completion.
pub const EVENT_STATUS_REMOVED: &str = "status_removed";
/// Event type tag for a workflow status transition.
pub const EVENT_STAGE_CHANGE: &str = "stage_change";
/// Event type tag for a free-text note.
pub const EVENT_NOTE: &str = "note";
/// Event type tag for a recorded payment.
pub const EVENT_PAYMENT: &str = "payment";
/// Event type tag for a document action.
pub const EVENT_DOCUMENT: &str = "document";
/// Event type tag for a task linkage.
pub const EVENT_TASK: &str = "task";
/// Event type tag for purchase order creation.
pub const EVENT_PURCHASE_ORDER_CREATED: &str = "purchase_order_created";
/// Event type tag for a material line added to an order.
pub const EVENT_MATERIAL_ADDED: &str = "material_added";
/// Event type tag for an accepted quote.
pub const EVENT_QUOTE_ACCEPTED: &str = "quote_accepted";

/// Structured payload of an order event, tagged by event type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventDetail {
    Note {
        note: String,
    },
    StageChange {
        previous_status: Option<String>,
        new_status: String,
        notes: Option<String>,
    },
    StatusCompletion {
        status: String,
        notes: Option<String>,
    },
    StatusRemoved {
        status: String,
        notes: Option<String>,
    },
    Payment {
        amount: f64,
        payment_type: String,
        payment_method: String,
        reference: Option<String>,
    },
    Document {
        document_type: String,
        document_name: String,
        action: String,
        document_id: Option<String>,
    },
    Task {
        task_id: DbId,
        title: String,
    },
    OrderCreated {
        order_number: String,
        initial_status: Option<String>,
    },
    OrderCancelled {
        reason: Option<String>,
    },
    PurchaseOrderCreated {
        po_number: String,
        supplier_name: String,
    },
    MaterialAdded {
        item_name: String,
        quantity: f64,
        unit: String,
    },
    QuoteAccepted {
        quote_number: String,
    },
}

impl EventDetail {
    /// The `event_type` column value for this payload.
    pub fn event_type(&self) -> &'static str {
        match self {
            EventDetail::Note { .. } => EVENT_NOTE,
            EventDetail::StageChange { .. } => EVENT_STAGE_CHANGE,
            EventDetail::StatusCompletion { .. } => EVENT_STATUS_COMPLETION,
            EventDetail::StatusRemoved { .. } => EVENT_STATUS_REMOVED,
            EventDetail::Payment { .. } => EVENT_PAYMENT,
            EventDetail::Document { .. } => EVENT_DOCUMENT,
            EventDetail::Task { .. } => EVENT_TASK,
            EventDetail::OrderCreated { .. } => EVENT_ORDER_CREATED,
            EventDetail::OrderCancelled { .. } => EVENT_ORDER_CANCELLED,
            EventDetail::PurchaseOrderCreated { .. } => EVENT_PURCHASE_ORDER_CREATED,
            EventDetail::MaterialAdded { .. } => EVENT_MATERIAL_ADDED,
            EventDetail::QuoteAccepted { .. } => EVENT_QUOTE_ACCEPTED,
        }
    }

    /// Human-readable description for history views.
    pub fn description(&self) -> String {
        match self {
            EventDetail::Note { note } => note.clone(),
            EventDetail::StageChange {
                previous_status,
                new_status,
                notes,
            } => match (notes, previous_status) {
                (Some(notes), _) if !notes.is_empty() => notes.clone(),
                (_, Some(prev)) => format!("Order moved from {prev} to {new_status}"),
                (_, None) => format!("Order moved to {new_status}"),
            },
            EventDetail::StatusCompletion { status, notes } => match notes {
                Some(notes) if !notes.is_empty() => {
                    format!("Status {status} completed: {notes}")
                }
                _ => format!("Status {status} completed"),
            },
            EventDetail::StatusRemoved { status, notes } => match notes {
                Some(notes) if !notes.is_empty() => {
                    format!("Status {status} removed from completed set: {notes}")
                }
                _ => format!("Status {status} removed from completed set"),
            },
            EventDetail::Payment {
                amount,
                payment_type,
                payment_method,
                reference,
            } => {
                let mut description = format!(
                    "{} payment of ${amount:.2} received via {}",
                    capitalize(payment_type),
                    payment_method.replace('_', " ")
                );
                if let Some(reference) = reference {
                    description.push_str(&format!(" (Ref: {reference})"));
                }
                description
            }
            EventDetail::Document {
                document_type,
                document_name,
                action,
                ..
            } => format!("{document_type} '{document_name}' was {action}"),
            EventDetail::Task { title, .. } => format!("Task created: {title}"),
            EventDetail::OrderCreated { order_number, .. } => {
                format!("Order {order_number} created")
            }
            EventDetail::OrderCancelled { reason } => match reason {
                Some(reason) if !reason.is_empty() => format!("Order cancelled: {reason}"),
                _ => "Order cancelled".to_string(),
            },
            EventDetail::PurchaseOrderCreated {
                po_number,
                supplier_name,
            } => format!("Created PO #{po_number} for {supplier_name}"),
            EventDetail::MaterialAdded {
                item_name,
                quantity,
                unit,
            } => format!("Added material: {quantity} {unit} of {item_name}"),
            EventDetail::QuoteAccepted { quote_number } => {
                format!("Quote {quote_number} accepted")
            }
        }
    }

    /// The stage-transition columns (`previous_stage`, `new_stage`) for
    /// event types that describe one; `(None, None)` for the rest.
    pub fn stage_columns(&self) -> (Option<&str>, Option<&str>) {
        match self {
            EventDetail::StageChange {
                previous_status,
                new_status,
                ..
            } => (previous_status.as_deref(), Some(new_status.as_str())),
            EventDetail::StatusCompletion { status, .. } => (None, Some(status.as_str())),
            EventDetail::StatusRemoved { status, .. } => (Some(status.as_str()), None),
            _ => (None, None),
        }
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_description_formats_amount_and_method() {
        let detail = EventDetail::Payment {
            amount: 1250.5,
            payment_type: "deposit".to_string(),
            payment_method: "credit_card".to_string(),
            reference: Some("CH-1042".to_string()),
        };
        assert_eq!(
            detail.description(),
            "Deposit payment of $1250.50 received via credit card (Ref: CH-1042)"
        );
        assert_eq!(detail.event_type(), EVENT_PAYMENT);
    }

    #[test]
    fn test_document_description() {
        let detail = EventDetail::Document {
            document_type: "Contract".to_string(),
            document_name: "installation-agreement.pdf".to_string(),
            action: "signed".to_string(),
            document_id: None,
        };
        assert_eq!(
            detail.description(),
            "Contract 'installation-agreement.pdf' was signed"
        );
    }

    #[test]
    fn test_stage_change_columns() {
        let detail = EventDetail::StageChange {
            previous_status: Some("NEW_LEAD".to_string()),
            new_status: "QUOTE_REQUESTED".to_string(),
            notes: None,
        };
        assert_eq!(
            detail.stage_columns(),
            (Some("NEW_LEAD"), Some("QUOTE_REQUESTED"))
        );
        assert_eq!(
            detail.description(),
            "Order moved from NEW_LEAD to QUOTE_REQUESTED"
        );
    }

    #[test]
    fn test_detail_roundtrips_through_json() {
        let detail = EventDetail::Payment {
            amount: 300.0,
            payment_type: "final".to_string(),
            payment_method: "check".to_string(),
            reference: None,
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["kind"], "payment");
        let back: EventDetail = serde_json::from_value(json).unwrap();
        assert_eq!(back.event_type(), EVENT_PAYMENT);
    }
}
