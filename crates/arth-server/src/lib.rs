//! Arth Web Server
//!
//! Axum-based REST API for the Arth personal finance advisor.
//!
//! Security features:
//! - Restrictive CORS policy
//! - Provider credential read from the environment only, never logged or returned
//! - Sanitized error responses (`{ "error": string }`)

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, warn};

use arth_core::ai::ProviderTransport;
use arth_core::{Advisor, InsightEngine, LedgerStore, ProviderConfig};

mod handlers;

/// Header carrying the current user id (set by the identity provider in front of us)
const USER_ID_HEADER: &str = "x-user-id";

/// User id when no identity header is present
pub const DEFAULT_USER_ID: &str = "local-dev";

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub ledger: Arc<dyn LedgerStore>,
    pub advisor: Advisor,
    pub insights: InsightEngine,
}

/// Get the current user id from request headers
///
/// Returns "local-dev" when the header is missing or empty.
pub fn get_user_id(headers: &axum::http::HeaderMap) -> String {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_USER_ID)
        .to_string()
}

/// Create the application router, wiring the advisor from the environment
pub fn create_router(
    ledger: Arc<dyn LedgerStore>,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> Router {
    let provider_config = ProviderConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load provider config, using defaults");
        ProviderConfig::default()
    });
    create_router_with_advisor(
        ledger,
        Advisor::from_env(&provider_config),
        static_dir,
        config,
    )
}

/// Create the application router with an explicit advisor (for testing)
pub fn create_router_with_advisor(
    ledger: Arc<dyn LedgerStore>,
    advisor: Advisor,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> Router {
    let state = Arc::new(AppState {
        ledger,
        advisor,
        insights: InsightEngine::new(),
    });

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/analytics", get(handlers::get_analytics))
        .route("/upcoming-payments", get(handlers::get_upcoming_payments))
        .route(
            "/chat",
            post(handlers::chat).fallback(handlers::method_not_allowed),
        );

    let allowed_headers = [
        header::CONTENT_TYPE,
        HeaderName::from_static(USER_ID_HEADER),
    ];

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(allowed_headers)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(allowed_headers)
    };

    // CSP: restrict scripts to same-origin, allow inline styles
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; connect-src 'self'; frame-ancestors 'none'",
    );

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    ledger: Arc<dyn LedgerStore>,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let provider_config = ProviderConfig::load()?;
    let advisor = Advisor::from_env(&provider_config);
    check_provider(&advisor);

    let app = create_router_with_advisor(ledger, advisor, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Log provider status at startup (never the key itself)
fn check_provider(advisor: &Advisor) {
    let gateway = advisor.gateway();
    let client = gateway.client();

    if gateway.credential().is_configured() {
        info!(
            "✅ AI provider configured: {} at {} (model: {})",
            client.backend_name(),
            client.host(),
            client.model()
        );
    } else {
        warn!(
            "⚠️  AI provider credential not set (set {} to enable advice); chat requests will fail",
            arth_core::config::API_KEY_ENV
        );
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn new(status: StatusCode, msg: &str) -> Self {
        Self {
            status,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn bad_request(msg: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    }

    pub fn internal(msg: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
