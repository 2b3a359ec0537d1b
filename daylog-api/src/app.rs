/// Application state and router builder
///
/// This module defines the shared application state, the per-request
/// [`AuthContext`], and the function that assembles the Axum router with all
/// routes and middleware.
///
/// # Example
///
/// ```no_run
/// use daylog_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = daylog_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use daylog_shared::auth::{authorization, jwt};
use daylog_shared::models::account::Role;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use uuid::Uuid;

use crate::config::Config;
use crate::error::ApiError;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; cloning is
/// cheap (pool handle + Arc).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Authenticated identity added to request extensions by [`jwt_auth_layer`]
///
/// Handlers extract it with Axum's `Extension` extractor.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Authenticated account ID
    pub user_id: Uuid,

    /// Role carried by the token
    pub role: Role,
}

impl AuthContext {
    fn from_claims(claims: &jwt::Claims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                          # Health check (public)
/// └── /api/
///     ├── /auth/login            POST  # public
///     ├── /admin/                      # JWT + admin role
///     │   ├── /accounts          GET POST
///     │   ├── /accounts/search   GET
///     │   ├── /accounts/:id      PUT DELETE
///     │   ├── /log-heads         GET POST
///     │   └── /log-heads/:id     PUT DELETE
///     ├── /log-heads             GET   # JWT
///     ├── /log-heads/writable    GET
///     ├── /log-heads/:id/contents GET
///     ├── /log-contents          POST
///     ├── /log-contents/:id      PUT DELETE
///     └── /user                  GET PUT
/// ```
///
/// # Middleware Stack
///
/// Applied in order (outermost first): tracing, CORS, then per-group JWT
/// authentication and, for `/api/admin`, the admin-role check.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new().route("/login", post(routes::auth::login));

    // Admin routes (require JWT + admin role)
    let admin_routes = Router::new()
        .route(
            "/accounts",
            get(routes::accounts::list_accounts).post(routes::accounts::create_account),
        )
        .route("/accounts/search", get(routes::accounts::search_accounts))
        .route(
            "/accounts/:id",
            put(routes::accounts::update_account).delete(routes::accounts::delete_account),
        )
        .route(
            "/log-heads",
            get(routes::log_heads::admin_list_log_heads).post(routes::log_heads::create_log_head),
        )
        .route(
            "/log-heads/:id",
            put(routes::log_heads::update_log_head).delete(routes::log_heads::delete_log_head),
        )
        .layer(axum::middleware::from_fn(require_admin_layer))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Member routes (require JWT only)
    let member_routes = Router::new()
        .route("/log-heads", get(routes::log_heads::list_log_heads))
        .route(
            "/log-heads/writable",
            get(routes::log_heads::list_writable_log_heads),
        )
        .route(
            "/log-heads/:id/contents",
            get(routes::log_contents::list_log_contents),
        )
        .route(
            "/log-contents",
            post(routes::log_contents::create_log_content),
        )
        .route(
            "/log-contents/:id",
            put(routes::log_contents::update_log_content)
                .delete(routes::log_contents::delete_log_content),
        )
        .route(
            "/user",
            get(routes::user::get_current_user).put(routes::user::update_current_user),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/admin", admin_routes)
        .merge(member_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Extracts and validates the Bearer token from the Authorization header,
/// then injects an [`AuthContext`] into request extensions.
async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Expected Bearer token".to_string()))?;

    let claims = jwt::validate_token(token, state.jwt_secret())?;

    req.extensions_mut()
        .insert(AuthContext::from_claims(&claims));

    Ok(next.run(req).await)
}

/// Admin-role middleware layer
///
/// Must run after [`jwt_auth_layer`]; rejects members with 403.
async fn require_admin_layer(req: Request, next: Next) -> Result<Response, ApiError> {
    let auth = req
        .extensions()
        .get::<AuthContext>()
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

    authorization::require_admin(auth.role)?;

    Ok(next.run(req).await)
}
