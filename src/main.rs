mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

#[cfg(test)]
mod test_support;

use actix_web::{middleware::Logger, web, App, HttpServer};
use database::{EmployeeStore, MongoEmployeeStore};
use dotenv::dotenv;
use middleware::{ClientRateLimiter, RateLimit};
use services::{
    cloudinary_service::{CloudinaryClient, ImageHost},
    country_service::CountryClient,
};
use std::{io, sync::Arc, time::Duration};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn startup_error(e: impl std::fmt::Display) -> io::Error {
    io::Error::other(e.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::AppConfig::from_env().map_err(startup_error)?;

    log::info!("🚀 Starting Employee Service ({})...", config.environment);
    if config.is_local() {
        log::info!("🧪 Local mode: {} allowed for CORS", config::LOCAL_DEV_ORIGIN);
    }
    log::info!("🔐 Allowed origins: {:?}", config.allowed_origins);

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&config.database_url)
        .await
        .map_err(startup_error)?;
    log::info!("✅ MongoDB connected successfully");

    let store: Arc<dyn EmployeeStore> = Arc::new(MongoEmployeeStore::new(db));
    let store_data = web::Data::from(store);

    if config.cloudinary.is_none() {
        log::warn!("⚠️  Cloudinary credentials missing: photo uploads will fail");
    }
    let images: Arc<dyn ImageHost> =
        Arc::new(CloudinaryClient::new(config.cloudinary.clone()).map_err(startup_error)?);
    let image_data = web::Data::from(images);

    let countries = web::Data::new(
        CountryClient::new(&config.countries_api_url).map_err(startup_error)?,
    );

    let window = Duration::from_secs(config.rate_limit.window_secs);
    let limiter = Arc::new(
        ClientRateLimiter::new(config.rate_limit.max_requests, window).map_err(startup_error)?,
    );
    let pruned = limiter.clone();
    actix_rt::spawn(async move {
        let mut ticker = actix_rt::time::interval(window);
        loop {
            ticker.tick().await;
            pruned.prune();
            log::debug!("🧹 Rate limiter tracking {} clients", pruned.tracked_clients());
        }
    });
    log::info!(
        "🚦 Rate limit: {} requests per {}s per IP",
        config.rate_limit.max_requests,
        config.rate_limit.window_secs
    );

    let allowed_origins = config.allowed_origins.clone();
    let bind_addr = format!("{}:{}", config.host, config.port);

    log::info!("🌐 Server starting on {}", bind_addr);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_addr);
    log::info!("📄 OpenAPI spec at: http://{}/api-docs/openapi.json", bind_addr);

    // Generate OpenAPI specification
    let openapi = api::swagger::ApiDoc::openapi();

    HttpServer::new(move || {
        App::new()
            .app_data(store_data.clone())
            .app_data(image_data.clone())
            .app_data(countries.clone())
            .wrap(RateLimit::new(limiter.clone()))
            .wrap(middleware::cors(allowed_origins.clone()))
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(api::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_errors_keep_their_message() {
        let err = startup_error(utils::error::AppError::Config("DATABASE_URL must be set".into()));
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(err.to_string(), "Configuration error: DATABASE_URL must be set");
    }
}
