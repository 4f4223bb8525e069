use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::table_service::NewTable;
use crate::domain::table::{Table, TableChanges, TableStatus};
use crate::errors::AppError;
use crate::handlers::MessageResponse;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct TableResponse {
    pub id: String,
    pub name: String,
    pub seats: i32,
    pub category: String,
    /// `available` or `occupied`
    #[schema(value_type = String, example = "available")]
    pub status: TableStatus,
}

impl From<Table> for TableResponse {
    fn from(t: Table) -> Self {
        Self {
            id: t.id,
            name: t.name,
            seats: t.seats,
            category: t.category,
            status: t.status,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTableRequest {
    /// Generated when omitted.
    pub id: Option<String>,
    pub name: String,
    pub seats: i32,
    #[serde(default)]
    pub category: String,
    #[schema(value_type = Option<String>)]
    pub status: Option<TableStatus>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTableRequest {
    pub name: Option<String>,
    pub seats: Option<i32>,
    pub category: Option<String>,
    #[schema(value_type = Option<String>)]
    pub status: Option<TableStatus>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/tables",
    responses(
        (status = 200, description = "All tables", body = [TableResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "tables"
)]
pub async fn list_tables(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let tables = web::block(move || state.tables.list_tables()).await??;
    let body: Vec<TableResponse> = tables.into_iter().map(TableResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    post,
    path = "/api/tables",
    request_body = CreateTableRequest,
    responses(
        (status = 201, description = "Table created", body = TableResponse),
        (status = 400, description = "Invalid table"),
        (status = 409, description = "Table id already in use"),
    ),
    tag = "tables"
)]
pub async fn create_table(
    state: web::Data<AppState>,
    body: web::Json<CreateTableRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let table = web::block(move || {
        state.tables.create_table(NewTable {
            id: body.id,
            name: body.name,
            seats: body.seats,
            category: body.category,
            status: body.status,
        })
    })
    .await??;
    Ok(HttpResponse::Created().json(TableResponse::from(table)))
}

#[utoipa::path(
    put,
    path = "/api/tables/{id}",
    params(("id" = String, Path, description = "Table id")),
    request_body = UpdateTableRequest,
    responses(
        (status = 200, description = "Table updated", body = TableResponse),
        (status = 400, description = "Invalid change"),
        (status = 404, description = "Table not found"),
    ),
    tag = "tables"
)]
pub async fn update_table(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateTableRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let table = web::block(move || {
        state.tables.update_table(
            &id,
            TableChanges {
                name: body.name,
                seats: body.seats,
                category: body.category,
                status: body.status,
            },
        )
    })
    .await??;
    Ok(HttpResponse::Ok().json(TableResponse::from(table)))
}

/// Deleting a table also drops its open order.
#[utoipa::path(
    delete,
    path = "/api/tables/{id}",
    params(("id" = String, Path, description = "Table id")),
    responses(
        (status = 200, description = "Table deleted", body = MessageResponse),
        (status = 404, description = "Table not found"),
    ),
    tag = "tables"
)]
pub async fn delete_table(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || state.tables.delete_table(&id)).await??;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Table deleted successfully")))
}
