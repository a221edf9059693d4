mod api;
mod config;
mod database;
mod models;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use database::{MongoDB, MongoRecipeStore, RecipeStore};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    log::info!("🚀 Starting Recipe Service...");
    log::info!("📊 Database: {} ({})", config.database.redacted_uri(), config.database.name);

    // Fail-open: o listener sobe mesmo sem banco; o /health mostra o estado
    let mongo = match MongoDB::new(&config.database).await {
        Ok(db) => {
            match db.ping().await {
                Ok(()) => log::info!("✅ Connected to MongoDB"),
                Err(e) => log::warn!("⚠️  MongoDB not reachable yet, serving degraded: {}", e),
            }
            Some(db)
        }
        Err(e) => {
            log::error!("❌ MongoDB client setup failed, data routes will fail: {}", e);
            None
        }
    };

    let store: Arc<dyn RecipeStore> = match mongo.clone() {
        Some(db) => Arc::new(MongoRecipeStore::new(db)),
        None => Arc::new(MongoRecipeStore::unavailable()),
    };
    let store_data = web::Data::from(store);

    let bind_address = config.bind_address();
    log::info!("🌐 Server running on http://{}", bind_address);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
    })
    .shutdown_timeout(30)
    .bind(bind_address)?
    .run()
    .await?;

    if let Some(db) = mongo {
        log::info!("👋 Closing MongoDB client");
        db.client().clone().shutdown().await;
    }

    Ok(())
}
