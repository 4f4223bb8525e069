//! The pre-built single page app and the `/api` catch-all.

use std::path::{Path, PathBuf};

use actix_files::{Files, NamedFile};
use actix_web::dev::{fn_service, ServiceRequest, ServiceResponse};
use actix_web::{web, HttpResponse};
use serde_json::json;

pub const INDEX_FILE: &str = "index.html";

/// Unmatched `/api/*` requests.
pub async fn api_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": "API endpoint not found" }))
}

async fn frontend_missing() -> HttpResponse {
    HttpResponse::NotFound().body("Frontend build not found")
}

pub fn has_frontend(static_dir: &Path) -> bool {
    static_dir.join(INDEX_FILE).is_file()
}

/// Serve files from `static_dir`. Paths that match no file get `index.html`
/// so the client-side router can take over. Register after the API scope.
pub fn configure(static_dir: PathBuf) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        if !has_frontend(&static_dir) {
            cfg.default_service(web::to(frontend_missing));
            return;
        }

        let index = static_dir.join(INDEX_FILE);
        cfg.service(
            Files::new("/", &static_dir)
                .index_file(INDEX_FILE)
                .default_handler(fn_service(move |req: ServiceRequest| {
                    let index = index.clone();
                    async move {
                        let (req, _) = req.into_parts();
                        let file = NamedFile::open_async(&index).await?;
                        let res = file.into_response(&req);
                        Ok(ServiceResponse::new(req, res))
                    }
                })),
        );
    }
}
