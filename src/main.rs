//! ESCOtech site
//!
//! Server-rendered marketing site and admin panel for ESCOtech, backed by the
//! company's external REST API.

mod admin;
mod auth;
mod client;
mod config;
mod errors;
mod models;
mod poller;
mod resource;
mod session;
mod site;
mod table;
mod views;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use client::ApiClient;
use config::Config;
use poller::UnreadPoller;
use resource::{Inbox, Projects, ResourceAdmin, Services, Team};

/// Largest accepted admin form body (image uploads).
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<ApiClient>,
    pub config: Arc<Config>,
    pub poller: Arc<UnreadPoller>,
    pub projects: Arc<ResourceAdmin<Projects>>,
    pub team: Arc<ResourceAdmin<Team>>,
    pub services: Arc<ResourceAdmin<Services>>,
    pub inbox: Arc<Inbox>,
}

impl AppState {
    pub fn new(config: Config, api: ApiClient) -> Self {
        Self {
            api: Arc::new(api),
            poller: Arc::new(UnreadPoller::new(config.unread_poll_interval)),
            config: Arc::new(config),
            projects: Arc::new(ResourceAdmin::new()),
            team: Arc::new(ResourceAdmin::new()),
            services: Arc::new(ResourceAdmin::new()),
            inbox: Arc::new(Inbox::new()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ESCOtech site");
    tracing::info!("API URL: {}", config.api_url);
    tracing::info!("Static directory: {:?}", config.static_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    if !config.secure_cookies {
        tracing::warn!("Admin cookies are sent without the Secure flag (ESCOTECH_SECURE_COOKIES)");
    }

    let api = ApiClient::new(config.api_url.clone(), config.http_timeout)?;
    let bind_addr = config.bind_addr;
    let state = AppState::new(config, api);

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(site::home))
        .route("/project/{id}", get(site::project_detail))
        .route("/contact", post(site::contact));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(public_routes)
        .merge(admin::routes(state.clone()))
        .merge(health_routes)
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .fallback(admin::not_found)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
