use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::settings::{
    BillConfig, BillConfigPatch, KotConfig, KotConfigPatch, RestaurantSettings,
    RestaurantSettingsPatch,
};
use crate::errors::AppError;
use crate::handlers::{double_option, MessageResponse};
use crate::AppState;

// ── KOT config ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KotConfigResponse {
    pub print_by_department: bool,
    pub number_of_copies: i32,
    pub selected_printer: Option<String>,
    pub paper_size: Option<String>,
    pub format_type: Option<String>,
}

impl From<KotConfig> for KotConfigResponse {
    fn from(c: KotConfig) -> Self {
        Self {
            print_by_department: c.print_by_department,
            number_of_copies: c.number_of_copies,
            selected_printer: c.selected_printer,
            paper_size: c.paper_size,
            format_type: c.format_type,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KotConfigRequest {
    pub print_by_department: Option<bool>,
    pub number_of_copies: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub selected_printer: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub paper_size: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub format_type: Option<Option<String>>,
}

impl From<KotConfigRequest> for KotConfigPatch {
    fn from(r: KotConfigRequest) -> Self {
        Self {
            print_by_department: r.print_by_department,
            number_of_copies: r.number_of_copies,
            selected_printer: r.selected_printer,
            paper_size: r.paper_size,
            format_type: r.format_type,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/config/kot",
    responses((status = 200, description = "Kitchen order ticket printing", body = KotConfigResponse)),
    tag = "settings"
)]
pub async fn get_kot_config(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let config = web::block(move || state.settings.kot_config()).await??;
    Ok(HttpResponse::Ok().json(KotConfigResponse::from(config)))
}

#[utoipa::path(
    put,
    path = "/api/config/kot",
    request_body = KotConfigRequest,
    responses(
        (status = 200, description = "Updated configuration", body = KotConfigResponse),
        (status = 400, description = "Invalid value"),
    ),
    tag = "settings"
)]
pub async fn update_kot_config(
    state: web::Data<AppState>,
    body: web::Json<KotConfigRequest>,
) -> Result<HttpResponse, AppError> {
    let patch = KotConfigPatch::from(body.into_inner());
    let config = web::block(move || state.settings.update_kot_config(patch)).await??;
    Ok(HttpResponse::Ok().json(KotConfigResponse::from(config)))
}

// ── Bill config ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillConfigResponse {
    pub auto_print_dine_in: bool,
    pub auto_print_takeaway: bool,
    pub number_of_copies: i32,
    pub selected_printer: Option<String>,
    pub paper_size: Option<String>,
    pub format_type: Option<String>,
}

impl From<BillConfig> for BillConfigResponse {
    fn from(c: BillConfig) -> Self {
        Self {
            auto_print_dine_in: c.auto_print_dine_in,
            auto_print_takeaway: c.auto_print_takeaway,
            number_of_copies: c.number_of_copies,
            selected_printer: c.selected_printer,
            paper_size: c.paper_size,
            format_type: c.format_type,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillConfigRequest {
    pub auto_print_dine_in: Option<bool>,
    pub auto_print_takeaway: Option<bool>,
    pub number_of_copies: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub selected_printer: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub paper_size: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub format_type: Option<Option<String>>,
}

impl From<BillConfigRequest> for BillConfigPatch {
    fn from(r: BillConfigRequest) -> Self {
        Self {
            auto_print_dine_in: r.auto_print_dine_in,
            auto_print_takeaway: r.auto_print_takeaway,
            number_of_copies: r.number_of_copies,
            selected_printer: r.selected_printer,
            paper_size: r.paper_size,
            format_type: r.format_type,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/config/bill",
    responses((status = 200, description = "Bill printing", body = BillConfigResponse)),
    tag = "settings"
)]
pub async fn get_bill_config(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let config = web::block(move || state.settings.bill_config()).await??;
    Ok(HttpResponse::Ok().json(BillConfigResponse::from(config)))
}

#[utoipa::path(
    put,
    path = "/api/config/bill",
    request_body = BillConfigRequest,
    responses(
        (status = 200, description = "Updated configuration", body = BillConfigResponse),
        (status = 400, description = "Invalid value"),
    ),
    tag = "settings"
)]
pub async fn update_bill_config(
    state: web::Data<AppState>,
    body: web::Json<BillConfigRequest>,
) -> Result<HttpResponse, AppError> {
    let patch = BillConfigPatch::from(body.into_inner());
    let config = web::block(move || state.settings.update_bill_config(patch)).await??;
    Ok(HttpResponse::Ok().json(BillConfigResponse::from(config)))
}

// ── Restaurant settings ──────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSettingsResponse {
    pub restaurant_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub currency: String,
    /// Percentage as a decimal string, e.g. "5.00"
    #[schema(value_type = String)]
    pub tax_rate: BigDecimal,
}

impl From<RestaurantSettings> for RestaurantSettingsResponse {
    fn from(s: RestaurantSettings) -> Self {
        Self {
            restaurant_name: s.restaurant_name,
            address: s.address,
            phone: s.phone,
            email: s.email,
            currency: s.currency,
            tax_rate: s.tax_rate,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSettingsRequest {
    pub restaurant_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
    pub currency: Option<String>,
    #[schema(value_type = Option<String>)]
    pub tax_rate: Option<BigDecimal>,
}

impl From<RestaurantSettingsRequest> for RestaurantSettingsPatch {
    fn from(r: RestaurantSettingsRequest) -> Self {
        Self {
            restaurant_name: r.restaurant_name,
            address: r.address,
            phone: r.phone,
            email: r.email,
            currency: r.currency,
            tax_rate: r.tax_rate,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/restaurant-settings",
    responses((status = 200, description = "Restaurant profile", body = RestaurantSettingsResponse)),
    tag = "settings"
)]
pub async fn get_restaurant_settings(
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let settings = web::block(move || state.settings.restaurant_settings()).await??;
    Ok(HttpResponse::Ok().json(RestaurantSettingsResponse::from(settings)))
}

#[utoipa::path(
    put,
    path = "/api/restaurant-settings",
    request_body = RestaurantSettingsRequest,
    responses(
        (status = 200, description = "Updated profile", body = RestaurantSettingsResponse),
        (status = 400, description = "Invalid value"),
    ),
    tag = "settings"
)]
pub async fn update_restaurant_settings(
    state: web::Data<AppState>,
    body: web::Json<RestaurantSettingsRequest>,
) -> Result<HttpResponse, AppError> {
    let patch = RestaurantSettingsPatch::from(body.into_inner());
    let settings = web::block(move || state.settings.update_restaurant_settings(patch)).await??;
    Ok(HttpResponse::Ok().json(RestaurantSettingsResponse::from(settings)))
}

// ── Login ────────────────────────────────────────────────────────────────────

/// Placeholder sign-in; any body is accepted.
#[utoipa::path(
    post,
    path = "/api/login",
    responses((status = 200, description = "Always succeeds", body = MessageResponse)),
    tag = "settings"
)]
pub async fn login() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse::new("Login successful"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restaurant_request_accepts_numeric_tax_rate_and_null_fields() {
        let req: RestaurantSettingsRequest =
            serde_json::from_str(r#"{"taxRate": 12.5, "phone": null}"#).unwrap();

        assert_eq!(req.tax_rate, Some("12.5".parse().unwrap()));
        assert_eq!(req.phone, Some(None));
        assert_eq!(req.address, None);
    }

    #[test]
    fn kot_response_is_camel_case() {
        let json = serde_json::to_value(KotConfigResponse::from(KotConfig::default())).unwrap();
        assert_eq!(json["printByDepartment"], false);
        assert_eq!(json["numberOfCopies"], 1);
        assert!(json["selectedPrinter"].is_null());
    }
}
