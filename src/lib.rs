pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod schema;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::catalog_service::CatalogService;
use application::invoice_service::InvoiceService;
use application::order_service::OrderService;
use application::settings_service::SettingsService;
use application::table_service::TableService;
use errors::AppError;
use handlers::{catalog, exchange, frontend, invoices, orders, settings, tables};
use infrastructure::catalog_repo::DieselCatalogRepository;
use infrastructure::invoice_repo::DieselInvoiceRepository;
use infrastructure::order_repo::DieselOrderRepository;
use infrastructure::settings_repo::DieselSettingsRepository;
use infrastructure::table_repo::DieselTableRepository;
use openapi::ApiDoc;

pub use config::AppConfig;
pub use db::{connect_with_retry, create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    if !applied.is_empty() {
        log::info!("Applied {} migration(s)", applied.len());
    }
    Ok(())
}

/// Services shared by every worker.
pub struct AppState {
    pub tables: TableService<DieselTableRepository>,
    pub orders: OrderService<DieselOrderRepository>,
    pub invoices: InvoiceService<DieselInvoiceRepository>,
    pub catalog: CatalogService<DieselCatalogRepository>,
    pub settings: SettingsService<DieselSettingsRepository>,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self {
            tables: TableService::new(DieselTableRepository::new(pool.clone())),
            orders: OrderService::new(DieselOrderRepository::new(pool.clone())),
            invoices: InvoiceService::new(DieselInvoiceRepository::new(pool.clone())),
            catalog: CatalogService::new(DieselCatalogRepository::new(pool.clone())),
            settings: SettingsService::new(DieselSettingsRepository::new(pool)),
        }
    }
}

/// Malformed JSON bodies answer 400 with the usual error shape.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Every `/api` route. Unmatched paths under `/api` get a JSON 404.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::resource("/tables")
                    .route(web::get().to(tables::list_tables))
                    .route(web::post().to(tables::create_table)),
            )
            .service(
                web::resource("/tables/{id}")
                    .route(web::put().to(tables::update_table))
                    .route(web::delete().to(tables::delete_table)),
            )
            .route("/orders", web::get().to(orders::list_orders))
            .service(
                web::resource("/orders/table/{table_id}")
                    .route(web::get().to(orders::get_table_order))
                    .route(web::post().to(orders::add_items)),
            )
            .route("/orders/table/{table_id}/sent", web::post().to(orders::mark_sent))
            .route(
                "/orders/table/{table_id}/complete",
                web::post().to(orders::complete_order),
            )
            .service(
                web::resource("/invoices")
                    .route(web::get().to(invoices::list_invoices))
                    .route(web::post().to(invoices::create_invoice)),
            )
            .service(
                web::resource("/menu-items")
                    .route(web::get().to(catalog::list_menu_items))
                    .route(web::post().to(catalog::create_menu_item)),
            )
            .service(
                web::resource("/menu-items/{id}")
                    .route(web::put().to(catalog::update_menu_item))
                    .route(web::delete().to(catalog::delete_menu_item)),
            )
            .service(
                web::resource("/categories")
                    .route(web::get().to(catalog::list_categories))
                    .route(web::post().to(catalog::create_category)),
            )
            .service(
                web::resource("/categories/{id}")
                    .route(web::put().to(catalog::rename_category))
                    .route(web::delete().to(catalog::delete_category)),
            )
            .service(
                web::resource("/departments")
                    .route(web::get().to(catalog::list_departments))
                    .route(web::post().to(catalog::create_department)),
            )
            .service(
                web::resource("/departments/{id}")
                    .route(web::put().to(catalog::rename_department))
                    .route(web::delete().to(catalog::delete_department)),
            )
            .service(
                web::resource("/config/kot")
                    .route(web::get().to(settings::get_kot_config))
                    .route(web::put().to(settings::update_kot_config)),
            )
            .service(
                web::resource("/config/bill")
                    .route(web::get().to(settings::get_bill_config))
                    .route(web::put().to(settings::update_bill_config)),
            )
            .service(
                web::resource("/restaurant-settings")
                    .route(web::get().to(settings::get_restaurant_settings))
                    .route(web::put().to(settings::update_restaurant_settings)),
            )
            .route("/login", web::post().to(settings::login))
            .route("/menu/export-template", web::get().to(exchange::export_template))
            .route("/menu/export", web::get().to(exchange::export_catalog))
            .route("/menu/import", web::post().to(exchange::import_catalog))
            .default_service(web::to(frontend::api_not_found)),
    );
}

/// Build and return an actix-web `Server` bound to the configured address.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: web::Data<AppState>,
    config: &AppConfig,
) -> std::io::Result<actix_web::dev::Server> {
    let static_dir = config.static_dir.clone();
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(json_config())
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(configure_api)
            .configure(frontend::configure(static_dir.clone()))
    })
    .bind((config.host.clone(), config.port))?
    .run())
}
