//! Catalog spreadsheet downloads and upload.

use actix_multipart::Multipart;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use futures::TryStreamExt;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::exchange::ImportStats;
use crate::errors::AppError;
use crate::infrastructure::workbook::{read_catalog_workbook, write_catalog, write_template};
use crate::AppState;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Maximum accepted upload size (10MB)
const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

const ACCEPTED_EXTENSIONS: &[&str] = &["xlsx", "xls"];

/// API schema for [`ImportStats`]. Domain types carry no OpenAPI derives.
#[derive(Debug, Serialize, ToSchema)]
pub struct ImportStatsResponse {
    pub categories_added: u32,
    pub departments_added: u32,
    pub items_added: u32,
    /// One entry per rejected row, e.g. "Row 4: Product code is required"
    pub errors: Vec<String>,
}

impl From<ImportStats> for ImportStatsResponse {
    fn from(s: ImportStats) -> Self {
        Self {
            categories_added: s.categories_added,
            departments_added: s.departments_added,
            items_added: s.items_added,
            errors: s.errors,
        }
    }
}

/// Multipart form accepted by the import endpoint.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ImportUpload {
    /// `.xlsx` or `.xls` workbook, at most 10MB
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportResponse {
    pub success: bool,
    pub message: String,
    pub stats: ImportStatsResponse,
}

fn attachment(bytes: Vec<u8>, filename: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename.to_string())],
        })
        .body(bytes)
}

fn has_accepted_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ACCEPTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Collects the `file` part of the upload. Other parts are ignored.
async fn read_upload(mut payload: Multipart) -> Result<(String, Vec<u8>), AppError> {
    let bad_request = |e: actix_multipart::MultipartError| AppError::BadRequest(e.to_string());

    while let Some(mut field) = payload.try_next().await.map_err(bad_request)? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(bad_request)? {
            if bytes.len() + chunk.len() > MAX_UPLOAD_SIZE {
                return Err(AppError::BadRequest(format!(
                    "File too large. Maximum size is {}MB",
                    MAX_UPLOAD_SIZE / 1024 / 1024
                )));
            }
            bytes.extend_from_slice(&chunk);
        }
        return Ok((filename, bytes));
    }
    Err(AppError::BadRequest("No file provided".to_string()))
}

// ── Handlers ─────────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/menu/export-template",
    responses((status = 200, description = "Empty import template (.xlsx attachment)")),
    tag = "exchange"
)]
pub async fn export_template() -> Result<HttpResponse, AppError> {
    let bytes = web::block(write_template).await??;
    Ok(attachment(bytes, "menu_import_template.xlsx"))
}

#[utoipa::path(
    get,
    path = "/api/menu/export",
    responses((status = 200, description = "Current catalog (.xlsx attachment)")),
    tag = "exchange"
)]
pub async fn export_catalog(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let bytes = web::block(move || {
        let snapshot = state.catalog.export_snapshot()?;
        write_catalog(&snapshot)
    })
    .await??;
    Ok(attachment(bytes, "menu_data_export.xlsx"))
}

/// POST /api/menu/import
///
/// Multipart upload with the workbook in the `file` field. Categories and
/// departments are added first, then menu rows; rejected rows are reported
/// in `stats.errors` while the rest are kept.
#[utoipa::path(
    post,
    path = "/api/menu/import",
    request_body(content = ImportUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Import finished", body = ImportResponse),
        (status = 400, description = "Missing or unreadable file"),
    ),
    tag = "exchange"
)]
pub async fn import_catalog(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let (filename, bytes) = read_upload(payload).await?;
    if filename.is_empty() {
        return Err(AppError::BadRequest("No file selected".to_string()));
    }
    if !has_accepted_extension(&filename) {
        return Err(AppError::BadRequest(
            "Invalid file format. Please upload an Excel file".to_string(),
        ));
    }

    log::info!("Importing catalog from '{}' ({} bytes)", filename, bytes.len());
    let stats = web::block(move || {
        let workbook = read_catalog_workbook(bytes)?;
        state.catalog.import_workbook(&workbook)
    })
    .await??;

    Ok(HttpResponse::Ok().json(ImportResponse {
        success: true,
        message: "Import completed successfully".to_string(),
        stats: stats.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::has_accepted_extension;

    #[test]
    fn accepts_excel_extensions_case_insensitively() {
        assert!(has_accepted_extension("menu.xlsx"));
        assert!(has_accepted_extension("MENU.XLS"));
        assert!(has_accepted_extension("backup.2024.xlsx"));
    }

    #[test]
    fn rejects_other_files() {
        assert!(!has_accepted_extension("menu.csv"));
        assert!(!has_accepted_extension("xlsx"));
        assert!(!has_accepted_extension("menu.xlsx.exe"));
    }
}
