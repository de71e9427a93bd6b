//! Dinedex server binary.
//!
//! Loads configuration, builds the object graph explicitly (every adapter
//! and handler constructed here, no registry), and serves the API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use dinedex::adapters::auth::{BcryptPasswordHasher, JwtTokenService};
use dinedex::adapters::geocoding::{GoogleGeocoder, GoogleGeocoderConfig};
use dinedex::adapters::http::auth::AuthHandlers;
use dinedex::adapters::http::cookies::SessionCookies;
use dinedex::adapters::http::restaurant::RestaurantHandlers;
use dinedex::adapters::http::api_router;
use dinedex::adapters::postgres::{self, PostgresRestaurantRepository, PostgresUserRepository};
use dinedex::adapters::s3::{S3MediaStore, S3MediaStoreConfig};
use dinedex::application::auth::{LoginUserHandler, RefreshSessionHandler, RegisterUserHandler};
use dinedex::application::restaurant::{
    CreateRestaurantHandler, DeleteRestaurantHandler, GetRestaurantHandler,
    ListRestaurantsHandler, UpdateRestaurantHandler,
};
use dinedex::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() {
    let config = AppConfig::load().expect("Failed to load configuration");
    config.validate().expect("Invalid configuration");

    init_tracing(&config);

    let pool = postgres::connect(&config.database)
        .await
        .expect("Failed to connect to database");

    // Adapters
    let tokens = Arc::new(
        JwtTokenService::new(
            &config.auth.access_token_secret,
            &config.auth.refresh_token_secret,
            config.auth.access_ttl_secs,
            config.auth.refresh_ttl_secs,
        )
        .expect("Invalid token service configuration"),
    );
    let hasher = Arc::new(BcryptPasswordHasher::default());
    let users = Arc::new(PostgresUserRepository::new(pool.clone()));
    let restaurants = Arc::new(PostgresRestaurantRepository::new(pool.clone()));
    let geocoder = Arc::new(GoogleGeocoder::new(GoogleGeocoderConfig::new(
        config.geocoding.google_maps_api_key.clone(),
    )));
    let media = Arc::new(S3MediaStore::new({
        let mut storage = S3MediaStoreConfig::new(
            config.storage.region.clone(),
            config.storage.bucket.clone(),
            config.storage.access_key_id.clone(),
            config.storage.secret_access_key.clone(),
        );
        storage.url_ttl_secs = config.storage.url_ttl_secs;
        storage
    }));

    // Use cases
    let auth_handlers = AuthHandlers::new(
        Arc::new(RegisterUserHandler::new(
            users.clone(),
            hasher.clone(),
            tokens.clone(),
        )),
        Arc::new(LoginUserHandler::new(
            users.clone(),
            hasher.clone(),
            tokens.clone(),
        )),
        Arc::new(RefreshSessionHandler::new(users.clone(), tokens.clone())),
        SessionCookies::new(
            config.is_production(),
            config.auth.access_ttl_secs,
            config.auth.refresh_ttl_secs,
        ),
    );
    let restaurant_handlers = RestaurantHandlers::new(
        Arc::new(CreateRestaurantHandler::new(
            restaurants.clone(),
            geocoder.clone(),
            media.clone(),
        )),
        Arc::new(UpdateRestaurantHandler::new(
            restaurants.clone(),
            geocoder.clone(),
            media.clone(),
        )),
        Arc::new(DeleteRestaurantHandler::new(
            restaurants.clone(),
            media.clone(),
        )),
        Arc::new(GetRestaurantHandler::new(restaurants.clone(), media.clone())),
        Arc::new(ListRestaurantsHandler::new(restaurants, media)),
    );

    let app = api_router(auth_handlers, restaurant_handlers, tokens)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config.server));

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    tracing::info!(%addr, "dinedex listening");

    axum::serve(listener, app).await.expect("Server error");
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    if origins.is_empty() {
        return CorsLayer::new();
    }
    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
}
