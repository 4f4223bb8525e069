use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::DomainError;

/// One entry of a table order.
///
/// `id` references a menu item. Any extra fields the caller sends (name,
/// price, department, ...) are carried through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub id: String,
    pub quantity: i32,
    #[serde(default)]
    pub sent_to_kitchen: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrderLineItem {
    pub fn new(id: impl Into<String>, quantity: i32) -> Self {
        Self {
            id: id.into(),
            quantity,
            sent_to_kitchen: false,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableOrder {
    pub id: i32,
    pub table_id: String,
    pub table_name: String,
    pub items: Vec<OrderLineItem>,
    pub start_time: DateTime<Utc>,
}

pub fn validate_line_items(items: &[OrderLineItem]) -> Result<(), DomainError> {
    if items.is_empty() {
        return Err(DomainError::InvalidInput(
            "At least one item is required".to_string(),
        ));
    }
    for item in items {
        if item.id.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "Item id must not be empty".to_string(),
            ));
        }
        if item.quantity <= 0 {
            return Err(DomainError::InvalidInput(format!(
                "Quantity for item '{}' must be greater than zero",
                item.id
            )));
        }
    }
    Ok(())
}

/// Merge `incoming` into an existing order's lines.
///
/// For each incoming item the first line with the same menu item id decides:
/// a pending line absorbs the quantity, a line already sent to the kitchen is
/// left alone and the item is appended as a new line. Items with no matching
/// line are appended. Lines appended earlier in the same batch take part in
/// the scan.
pub fn merge_line_items(existing: &mut Vec<OrderLineItem>, incoming: Vec<OrderLineItem>) {
    for item in incoming {
        match existing.iter().position(|line| line.id == item.id) {
            Some(idx) if !existing[idx].sent_to_kitchen => {
                let line = &mut existing[idx];
                line.quantity = line.quantity.saturating_add(item.quantity);
            }
            _ => existing.push(item),
        }
    }
}

pub fn mark_all_sent(items: &mut [OrderLineItem]) {
    for item in items {
        item.sent_to_kitchen = true;
    }
}
