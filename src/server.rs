use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
};

use crate::{api, config::Config, error, info, openai::OpenAiClient};

/// Shared state handed to every request handler.
pub struct AppState {
    pub config: Config,
    pub openai: OpenAiClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let openai = OpenAiClient::new(&config);
        AppState { config, openai }
    }
}

/// Assembles the application router: the JSON API plus, when the configured
/// static directory exists, the prebuilt front-end bundle with an
/// `index.html` fallback.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(Any);

    let router = Router::new()
        .route("/health", get(api::health))
        .route("/create", post(api::create))
        .with_state(Arc::clone(&state));

    let static_dir = &state.config.static_dir;
    let router = if static_dir.is_dir() {
        let index = static_dir.join("index.html");
        router.fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)))
    } else {
        router
    };

    router.layer(cors)
}

pub async fn start_server(state: Arc<AppState>) {
    let addr = match SocketAddr::from_str(&state.config.server_address) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let app = build_router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };

    info!("Server is running on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
