use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::catalog::{Category, Department, MenuItem, MenuItemChanges, NewMenuItem};
use crate::errors::AppError;
use crate::handlers::{double_option, MessageResponse};
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemResponse {
    pub id: String,
    pub name: String,
    pub product_code: String,
    /// Decimal price as a string, e.g. "259.00"
    #[schema(value_type = String)]
    pub price: BigDecimal,
    pub category: String,
    pub department: String,
    pub description: Option<String>,
}

impl From<MenuItem> for MenuItemResponse {
    fn from(m: MenuItem) -> Self {
        Self {
            id: m.id,
            name: m.name,
            product_code: m.product_code,
            price: m.price,
            category: m.category,
            department: m.department,
            description: m.description,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemRequest {
    pub id: Option<String>,
    pub name: String,
    pub product_code: String,
    #[schema(value_type = String)]
    pub price: BigDecimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub department: String,
    pub description: Option<String>,
}

/// Absent fields are left unchanged; `"description": null` clears it.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItemRequest {
    pub name: Option<String>,
    pub product_code: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<BigDecimal>,
    pub category: Option<String>,
    pub department: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NamedEntityResponse {
    pub id: String,
    pub name: String,
}

impl From<Category> for NamedEntityResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

impl From<Department> for NamedEntityResponse {
    fn from(d: Department) -> Self {
        Self {
            id: d.id,
            name: d.name,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NameRequest {
    pub name: String,
}

// ── Menu items ───────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/menu-items",
    responses((status = 200, description = "Menu items by product code", body = [MenuItemResponse])),
    tag = "catalog"
)]
pub async fn list_menu_items(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let items = web::block(move || state.catalog.list_menu_items()).await??;
    let body: Vec<MenuItemResponse> = items.into_iter().map(MenuItemResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    post,
    path = "/api/menu-items",
    request_body = CreateMenuItemRequest,
    responses(
        (status = 201, description = "Menu item created", body = MenuItemResponse),
        (status = 400, description = "Duplicate product code, unknown category/department or invalid price"),
    ),
    tag = "catalog"
)]
pub async fn create_menu_item(
    state: web::Data<AppState>,
    body: web::Json<CreateMenuItemRequest>,
) -> Result<HttpResponse, AppError> {
    let b = body.into_inner();
    let item = web::block(move || {
        state.catalog.create_menu_item(NewMenuItem {
            id: b.id,
            name: b.name,
            product_code: b.product_code,
            price: b.price,
            category: b.category,
            department: b.department,
            description: b.description,
        })
    })
    .await??;
    Ok(HttpResponse::Created().json(MenuItemResponse::from(item)))
}

#[utoipa::path(
    put,
    path = "/api/menu-items/{id}",
    params(("id" = String, Path, description = "Menu item id")),
    request_body = UpdateMenuItemRequest,
    responses(
        (status = 200, description = "Menu item updated", body = MenuItemResponse),
        (status = 400, description = "Invalid change"),
        (status = 404, description = "Menu item not found"),
    ),
    tag = "catalog"
)]
pub async fn update_menu_item(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateMenuItemRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let b = body.into_inner();
    let item = web::block(move || {
        state.catalog.update_menu_item(
            &id,
            MenuItemChanges {
                name: b.name,
                product_code: b.product_code,
                price: b.price,
                category: b.category,
                department: b.department,
                description: b.description,
            },
        )
    })
    .await??;
    Ok(HttpResponse::Ok().json(MenuItemResponse::from(item)))
}

#[utoipa::path(
    delete,
    path = "/api/menu-items/{id}",
    params(("id" = String, Path, description = "Menu item id")),
    responses(
        (status = 200, description = "Menu item deleted", body = MessageResponse),
        (status = 404, description = "Menu item not found"),
    ),
    tag = "catalog"
)]
pub async fn delete_menu_item(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || state.catalog.delete_menu_item(&id)).await??;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Menu item deleted successfully")))
}

// ── Categories ───────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/categories",
    responses((status = 200, description = "Categories by name", body = [NamedEntityResponse])),
    tag = "catalog"
)]
pub async fn list_categories(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let rows = web::block(move || state.catalog.list_categories()).await??;
    let body: Vec<NamedEntityResponse> = rows.into_iter().map(NamedEntityResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = NameRequest,
    responses(
        (status = 201, description = "Category created", body = NamedEntityResponse),
        (status = 400, description = "Empty or duplicate name"),
    ),
    tag = "catalog"
)]
pub async fn create_category(
    state: web::Data<AppState>,
    body: web::Json<NameRequest>,
) -> Result<HttpResponse, AppError> {
    let name = body.into_inner().name;
    let category = web::block(move || state.catalog.create_category(&name)).await??;
    Ok(HttpResponse::Created().json(NamedEntityResponse::from(category)))
}

/// Renames the category and every menu item filed under the old name.
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    request_body = NameRequest,
    responses(
        (status = 200, description = "Category renamed", body = NamedEntityResponse),
        (status = 400, description = "Empty or duplicate name"),
        (status = 404, description = "Category not found"),
    ),
    tag = "catalog"
)]
pub async fn rename_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<NameRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let name = body.into_inner().name;
    let category = web::block(move || state.catalog.rename_category(&id, &name)).await??;
    Ok(HttpResponse::Ok().json(NamedEntityResponse::from(category)))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 400, description = "Category still used by menu items"),
        (status = 404, description = "Category not found"),
    ),
    tag = "catalog"
)]
pub async fn delete_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || state.catalog.delete_category(&id)).await??;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Category deleted successfully")))
}

// ── Departments ──────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/departments",
    responses((status = 200, description = "Departments by name", body = [NamedEntityResponse])),
    tag = "catalog"
)]
pub async fn list_departments(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let rows = web::block(move || state.catalog.list_departments()).await??;
    let body: Vec<NamedEntityResponse> = rows.into_iter().map(NamedEntityResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    post,
    path = "/api/departments",
    request_body = NameRequest,
    responses(
        (status = 201, description = "Department created", body = NamedEntityResponse),
        (status = 400, description = "Empty or duplicate name"),
    ),
    tag = "catalog"
)]
pub async fn create_department(
    state: web::Data<AppState>,
    body: web::Json<NameRequest>,
) -> Result<HttpResponse, AppError> {
    let name = body.into_inner().name;
    let department = web::block(move || state.catalog.create_department(&name)).await??;
    Ok(HttpResponse::Created().json(NamedEntityResponse::from(department)))
}

#[utoipa::path(
    put,
    path = "/api/departments/{id}",
    params(("id" = String, Path, description = "Department id")),
    request_body = NameRequest,
    responses(
        (status = 200, description = "Department renamed", body = NamedEntityResponse),
        (status = 400, description = "Empty or duplicate name"),
        (status = 404, description = "Department not found"),
    ),
    tag = "catalog"
)]
pub async fn rename_department(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<NameRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let name = body.into_inner().name;
    let department = web::block(move || state.catalog.rename_department(&id, &name)).await??;
    Ok(HttpResponse::Ok().json(NamedEntityResponse::from(department)))
}

#[utoipa::path(
    delete,
    path = "/api/departments/{id}",
    params(("id" = String, Path, description = "Department id")),
    responses(
        (status = 200, description = "Department deleted", body = MessageResponse),
        (status = 400, description = "Department still used by menu items"),
        (status = 404, description = "Department not found"),
    ),
    tag = "catalog"
)]
pub async fn delete_department(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || state.catalog.delete_department(&id)).await??;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Department deleted successfully")))
}
