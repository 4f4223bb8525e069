use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::order::{OrderLineItem, TableOrder};
use crate::errors::AppError;
use crate::handlers::MessageResponse;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableOrderResponse {
    pub id: i32,
    pub table_id: String,
    pub table_name: String,
    /// Line items: `id`, `quantity`, `sentToKitchen` plus any fields the
    /// client attached.
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<OrderLineItem>,
    pub start_time: DateTime<Utc>,
}

impl From<TableOrder> for TableOrderResponse {
    fn from(o: TableOrder) -> Self {
        Self {
            id: o.id,
            table_id: o.table_id,
            table_name: o.table_name,
            items: o.items,
            start_time: o.start_time,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddItemsRequest {
    #[serde(alias = "tableName")]
    pub table_name: String,
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<OrderLineItem>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "All open table orders", body = [TableOrderResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let orders = web::block(move || state.orders.list_orders()).await??;
    let body: Vec<TableOrderResponse> = orders.into_iter().map(TableOrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Answers `null` when the table has no open order.
#[utoipa::path(
    get,
    path = "/api/orders/table/{table_id}",
    params(("table_id" = String, Path, description = "Table id")),
    responses(
        (status = 200, description = "The open order, or null when there is none", body = TableOrderResponse),
    ),
    tag = "orders"
)]
pub async fn get_table_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let table_id = path.into_inner();
    let order = web::block(move || state.orders.get_table_order(&table_id)).await??;
    Ok(HttpResponse::Ok().json(order.map(TableOrderResponse::from)))
}

/// POST /api/orders/table/{table_id}
///
/// Opens an order for the table or merges the items into the open one.
/// Pending lines with the same menu item id have their quantity increased;
/// lines already sent to the kitchen are never touched, so a repeat of a sent
/// item becomes a new line.
#[utoipa::path(
    post,
    path = "/api/orders/table/{table_id}",
    params(("table_id" = String, Path, description = "Table id")),
    request_body = AddItemsRequest,
    responses(
        (status = 200, description = "Updated order", body = TableOrderResponse),
        (status = 400, description = "Empty batch or invalid line"),
        (status = 404, description = "Table not found"),
        (status = 409, description = "Concurrent order creation"),
    ),
    tag = "orders"
)]
pub async fn add_items(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<AddItemsRequest>,
) -> Result<HttpResponse, AppError> {
    let table_id = path.into_inner();
    let body = body.into_inner();
    let order = web::block(move || {
        state
            .orders
            .add_items(&table_id, &body.table_name, body.items)
    })
    .await??;
    Ok(HttpResponse::Ok().json(TableOrderResponse::from(order)))
}

#[utoipa::path(
    post,
    path = "/api/orders/table/{table_id}/sent",
    params(("table_id" = String, Path, description = "Table id")),
    responses(
        (status = 200, description = "All lines marked as sent", body = TableOrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn mark_sent(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let table_id = path.into_inner();
    let order = web::block(move || state.orders.mark_sent(&table_id)).await??;
    Ok(HttpResponse::Ok().json(TableOrderResponse::from(order)))
}

/// Drops the order and frees the table. The invoice is recorded separately
/// through `POST /api/invoices`.
#[utoipa::path(
    post,
    path = "/api/orders/table/{table_id}/complete",
    params(("table_id" = String, Path, description = "Table id")),
    responses(
        (status = 200, description = "Order completed", body = MessageResponse),
    ),
    tag = "orders"
)]
pub async fn complete_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let table_id = path.into_inner();
    web::block(move || state.orders.complete_order(&table_id)).await??;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Order completed successfully")))
}
