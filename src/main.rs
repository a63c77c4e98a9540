use actix_cors::Cors;
use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use employment_service::{
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    routes::configure_routes,
    settings::AppConfig,
    telemetry::init_tracing,
    AppState
};

fn build_cors(config: &AppConfig) -> Cors {
    let origins = config.cors_origins();
    if origins.iter().any(|o| o == "*") {
        return Cors::permissive();
    }

    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST"])
        .allow_any_header()
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config);
    tracing::info!("Loaded configuration: {:?}", config);

    let pool = create_pool(&config.database_url, config.max_db_connections).await?;
    run_migrations(&pool).await?;

    let app_state = web::Data::new(AppState::new(pool));

    let server_addr = config.server_addr();

    tracing::info!(
        "Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let cors_config = config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(NormalizePath::trim())
            .wrap(build_cors(&cors_config))
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res?,
        _ = shutdown_signal() => {},
    }

    Ok(())
}
