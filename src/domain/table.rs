use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Available,
    Occupied,
}

impl TableStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(TableStatus::Available),
            "occupied" => Ok(TableStatus::Occupied),
            other => Err(DomainError::InvalidInput(format!(
                "Unknown table status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub id: String,
    pub name: String,
    pub seats: i32,
    pub category: String,
    pub status: TableStatus,
}

/// Partial update of a table; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct TableChanges {
    pub name: Option<String>,
    pub seats: Option<i32>,
    pub category: Option<String>,
    pub status: Option<TableStatus>,
}

pub fn validate_seats(seats: i32) -> Result<(), DomainError> {
    if seats <= 0 {
        return Err(DomainError::InvalidInput(
            "Seats must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
