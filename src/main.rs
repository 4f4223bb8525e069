use actix_web::web;
use dotenvy::dotenv;
use pos_service::handlers::frontend::has_frontend;
use pos_service::infrastructure::seed::seed_sample_data;
use pos_service::{build_server, connect_with_retry, run_migrations, AppConfig, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let pool = connect_with_retry(
        &config.database_url,
        config.db_connect_retries,
        config.db_retry_delay,
    )
    .map_err(std::io::Error::other)?;
    run_migrations(&pool).map_err(std::io::Error::other)?;

    let state = AppState::new(pool.clone());
    state
        .settings
        .ensure_defaults()
        .map_err(std::io::Error::other)?;
    if config.seed_sample_data {
        seed_sample_data(&pool).map_err(std::io::Error::other)?;
    }

    if !has_frontend(&config.static_dir) {
        log::warn!(
            "No frontend build at {}; only the API will be served",
            config.static_dir.display()
        );
    }

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(web::Data::new(state), &config)?.await
}
