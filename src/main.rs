use axum::{Router, http::header};
use splitproxy::api::{handlers::api_routes, openapi::ApiDoc};
use splitproxy::config::CONFIG;
use splitproxy::{CachedSplitwiseClient, InMemoryDocumentStore, InMemoryLogging, SplitwiseClient};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter(CONFIG.log_level.as_str()).init();
    info!("Starting with {:?}", *CONFIG);

    // Upstream, cache store and operation log
    let upstream = SplitwiseClient::from_config(&CONFIG)?;
    let store = InMemoryDocumentStore::new();
    let logging = InMemoryLogging::new();
    let client = Arc::new(CachedSplitwiseClient::new(upstream, store, logging, CONFIG.cache));

    // Upstream calls are bounded by their own timeout; leave headroom for fallbacks
    let request_timeout = Duration::from_secs(CONFIG.splitwise_timeout_secs + 5);

    let app = Router::new()
        .merge(api_routes(client))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([http::Method::GET, http::Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = format!("{}:{}", CONFIG.host, CONFIG.port).parse()?;
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
