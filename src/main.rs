use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pressgate::{handlers, AppState, CmsService, Config};

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "pressgate"
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pressgate=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    info!("Starting pressgate on {}:{}", config.host, config.port);
    info!("Upstream GraphQL endpoint: {}", config.graphql_url);

    let cms = CmsService::new(&config);
    let server_addr = format!("{}:{}", config.host, config.port);
    let app_state = web::Data::new(AppState { config, cms });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .route("/health", web::get().to(health_check))
            .service(web::scope("/api/wordpress").configure(handlers::configure_post_routes))
            .configure(handlers::configure_page_routes)
    })
    .bind(&server_addr)?
    .run()
    .await
}
