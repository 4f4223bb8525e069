use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::invoice::{Invoice, NewInvoice, OrderType};
use crate::domain::order::OrderLineItem;
use crate::errors::AppError;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub id: String,
    pub bill_number: String,
    #[schema(value_type = String, example = "dine-in")]
    pub order_type: OrderType,
    pub table_name: Option<String>,
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<OrderLineItem>,
    /// Decimal amounts are serialized as strings, e.g. "518.00"
    #[schema(value_type = String)]
    pub subtotal: BigDecimal,
    #[schema(value_type = String)]
    pub tax: BigDecimal,
    #[schema(value_type = String)]
    pub total: BigDecimal,
    pub timestamp: DateTime<Utc>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(i: Invoice) -> Self {
        Self {
            id: i.id,
            bill_number: i.bill_number,
            order_type: i.order_type,
            table_name: i.table_name,
            items: i.items,
            subtotal: i.subtotal,
            tax: i.tax,
            total: i.total,
            timestamp: i.timestamp,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub id: Option<String>,
    pub bill_number: String,
    #[schema(value_type = String, example = "takeaway")]
    pub order_type: OrderType,
    pub table_name: Option<String>,
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<OrderLineItem>,
    /// Accepts a JSON number or a decimal string.
    #[schema(value_type = String)]
    pub subtotal: BigDecimal,
    #[schema(value_type = String)]
    pub tax: BigDecimal,
    #[schema(value_type = String)]
    pub total: BigDecimal,
    /// ISO-8601 with offset, e.g. "2025-01-15T19:30:00Z"
    pub timestamp: DateTime<Utc>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/invoices",
    responses(
        (status = 200, description = "Invoices, newest first", body = [InvoiceResponse]),
    ),
    tag = "invoices"
)]
pub async fn list_invoices(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let invoices = web::block(move || state.invoices.list_invoices()).await??;
    let body: Vec<InvoiceResponse> = invoices.into_iter().map(InvoiceResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// The client computes subtotal, tax and total; they are stored as given.
#[utoipa::path(
    post,
    path = "/api/invoices",
    request_body = CreateInvoiceRequest,
    responses(
        (status = 201, description = "Invoice recorded", body = InvoiceResponse),
        (status = 400, description = "Invalid invoice"),
        (status = 409, description = "Invoice id already used"),
    ),
    tag = "invoices"
)]
pub async fn create_invoice(
    state: web::Data<AppState>,
    body: web::Json<CreateInvoiceRequest>,
) -> Result<HttpResponse, AppError> {
    let b = body.into_inner();
    let invoice = web::block(move || {
        state.invoices.create_invoice(NewInvoice {
            id: b.id,
            bill_number: b.bill_number,
            order_type: b.order_type,
            table_name: b.table_name,
            items: b.items,
            subtotal: b.subtotal,
            tax: b.tax,
            total: b.total,
            timestamp: b.timestamp,
        })
    })
    .await??;
    Ok(HttpResponse::Created().json(InvoiceResponse::from(invoice)))
}
