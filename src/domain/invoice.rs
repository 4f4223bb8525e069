use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::limits::{check_amount, check_len, check_opt_len, MAX_CODE_LEN, MAX_NAME_LEN};
use super::order::OrderLineItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    #[serde(rename = "dine-in")]
    DineIn,
    #[serde(rename = "takeaway")]
    Takeaway,
}

impl OrderType {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::DineIn => "dine-in",
            OrderType::Takeaway => "takeaway",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dine-in" => Ok(OrderType::DineIn),
            "takeaway" => Ok(OrderType::Takeaway),
            other => Err(DomainError::InvalidInput(format!(
                "Unknown order type '{}'",
                other
            ))),
        }
    }
}

/// A finalized bill. Invoices are never updated once stored.
#[derive(Debug, Clone)]
pub struct Invoice {
    pub id: String,
    pub bill_number: String,
    pub order_type: OrderType,
    pub table_name: Option<String>,
    pub items: Vec<OrderLineItem>,
    pub subtotal: BigDecimal,
    pub tax: BigDecimal,
    pub total: BigDecimal,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub id: Option<String>,
    pub bill_number: String,
    pub order_type: OrderType,
    pub table_name: Option<String>,
    pub items: Vec<OrderLineItem>,
    pub subtotal: BigDecimal,
    pub tax: BigDecimal,
    pub total: BigDecimal,
    pub timestamp: DateTime<Utc>,
}

impl NewInvoice {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.bill_number.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "Bill number is required".to_string(),
            ));
        }
        check_len("Bill number", self.bill_number.trim(), MAX_CODE_LEN)?;
        check_opt_len("Id", self.id.as_deref(), MAX_CODE_LEN)?;
        check_opt_len("Table name", self.table_name.as_deref(), MAX_NAME_LEN)?;
        for (field, amount) in [
            ("subtotal", &self.subtotal),
            ("tax", &self.tax),
            ("total", &self.total),
        ] {
            if *amount < BigDecimal::zero() {
                return Err(DomainError::InvalidInput(format!(
                    "{} must not be negative",
                    field
                )));
            }
            check_amount(field, amount)?;
        }
        Ok(())
    }
}
