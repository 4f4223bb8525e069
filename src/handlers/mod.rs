pub mod catalog;
pub mod exchange;
pub mod frontend;
pub mod invoices;
pub mod orders;
pub mod settings;
pub mod tables;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Plain `{"message": ...}` acknowledgement.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Distinguishes a missing field (`None`) from an explicit `null`
/// (`Some(None)`). Use together with `#[serde(default)]`.
pub(crate) fn double_option<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
