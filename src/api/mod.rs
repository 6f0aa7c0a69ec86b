//! TikTok Analytics REST API
//!
//! HTTP API layer, built with Axum. Every response body is JSON.
//!
//! # Endpoints
//!
//! ## Accounts
//! - `GET /api` - Service banner
//! - `GET /api/accounts` - All tracked account handles
//! - `GET /api/accounts/summary` - Aggregate stats for every account
//! - `GET /api/stats/:account` - Aggregate stats for one account
//!
//! ## Posts
//! - `GET /api/posts/:account?limit=50` - Most recent posts
//! - `GET /api/top-posts/:account?limit=10&sort_by=views` - Ranked posts
//! - `GET /api/daily-views/:account?days=30` - Daily view series
//! - `POST /api/posts` - Upsert post snapshots
//!
//! ## Health
//! - `GET /health/live` - Liveness check
//! - `GET /health/ready` - Readiness check
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tiktok_analytics::api::{serve, AppState};
//! use tiktok_analytics::config::ApiConfig;
//! use tiktok_analytics::storage::PostStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(PostStore::open("./data/posts.db")?);
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::from_store(store, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/", get(routes::accounts::root))
        // Account routes
        .route("/accounts", get(routes::accounts::list_accounts))
        .route("/accounts/summary", get(routes::accounts::account_summaries))
        .route("/stats/:account", get(routes::stats::get_account_stats))
        // Post routes
        .route("/posts", axum::routing::post(routes::posts::ingest_posts))
        .route("/posts/:account", get(routes::posts::list_posts))
        .route("/top-posts/:account", get(routes::top_posts::get_top_posts))
        .route("/daily-views/:account", get(routes::daily_views::get_daily_views));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let body_limit = state.config.max_body_size;

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS restricted to the configured origins; any origin when none are set
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(allowed))
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("TikTok Analytics API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("TikTok Analytics API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{HealthResponse, IngestPostsResponse, RootResponse};
    use crate::api::error::ErrorResponse;
    use crate::storage::{AccountStats, DailyViews, Post, PostStore};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use chrono::{Duration as ChronoDuration, Utc};
    use serde::de::DeserializeOwned;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let store = Arc::new(PostStore::in_memory().unwrap());
        let now = Utc::now();
        store
            .upsert_posts(&[
                Post::new("acme", "7301")
                    .counts(1_500, 80, 4, 2)
                    .created_at(now - ChronoDuration::hours(2)),
                Post::new("acme", "7302")
                    .counts(500, 200, 10, 1)
                    .created_at(now - ChronoDuration::days(3)),
                Post::new("zeta", "9001").counts(42, 1, 0, 0),
            ])
            .unwrap();

        build_router(AppState::from_store(store, ApiConfig::default()))
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = create_test_app();

        assert_eq!(get(app.clone(), "/health/live").await.status(), StatusCode::OK);
        assert_eq!(get(app.clone(), "/health/ready").await.status(), StatusCode::OK);

        let response = get(app, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let health: HealthResponse = read_json(response).await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.total_posts, Some(3));
    }

    #[tokio::test]
    async fn test_root() {
        let response = get(create_test_app(), "/api").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: RootResponse = read_json(response).await;
        assert_eq!(body.message, "TikTok Analytics API");
    }

    #[tokio::test]
    async fn test_list_accounts() {
        let response = get(create_test_app(), "/api/accounts").await;
        assert_eq!(response.status(), StatusCode::OK);
        let accounts: Vec<String> = read_json(response).await;
        assert_eq!(accounts, vec!["acme", "zeta"]);
    }

    #[tokio::test]
    async fn test_account_summaries() {
        let response = get(create_test_app(), "/api/accounts/summary").await;
        let summaries: Vec<AccountStats> = read_json(response).await;
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].username, "acme");
        assert_eq!(summaries[0].total_views, 2_000);
        assert_eq!(summaries[0].avg_views_per_post, 1_000.0);
    }

    #[tokio::test]
    async fn test_stats_found_and_missing() {
        let app = create_test_app();

        let response = get(app.clone(), "/api/stats/acme").await;
        assert_eq!(response.status(), StatusCode::OK);
        let stats: AccountStats = read_json(response).await;
        assert_eq!(stats.total_likes, 280);

        let response = get(app, "/api/stats/nobody").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.error.code, "ACCOUNT_NOT_FOUND");
        assert!(!error.request_id.is_empty());
    }

    #[tokio::test]
    async fn test_daily_views_default_window() {
        let response = get(create_test_app(), "/api/daily-views/acme").await;
        assert_eq!(response.status(), StatusCode::OK);
        let series: Vec<DailyViews> = read_json(response).await;
        assert_eq!(series.len(), 31);
        assert_eq!(series.iter().map(|p| p.views).sum::<u64>(), 2_000);
    }

    #[tokio::test]
    async fn test_daily_views_days_param() {
        let app = create_test_app();

        let response = get(app.clone(), "/api/daily-views/acme?days=7").await;
        let series: Vec<DailyViews> = read_json(response).await;
        assert_eq!(series.len(), 8);

        let response = get(app.clone(), "/api/daily-views/acme?days=0").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = get(app, "/api/daily-views/acme?days=abc").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_top_posts_sorting() {
        let app = create_test_app();

        let response = get(app.clone(), "/api/top-posts/acme").await;
        let posts: Vec<Post> = read_json(response).await;
        assert_eq!(posts[0].post_id, "7301");

        let response = get(app.clone(), "/api/top-posts/acme?limit=1&sort_by=likes").await;
        let posts: Vec<Post> = read_json(response).await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].post_id, "7302");

        let response = get(app, "/api/top-posts/acme?sort_by=followers").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.error.code, "INVALID_SORT_FIELD");
    }

    #[tokio::test]
    async fn test_recent_posts() {
        let response = get(create_test_app(), "/api/posts/acme?limit=1").await;
        assert_eq!(response.status(), StatusCode::OK);
        let posts: Vec<Post> = read_json(response).await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].post_id, "7301");
        assert_eq!(posts[0].username, "acme");
    }

    #[tokio::test]
    async fn test_ingest_posts() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/posts")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        r#"{"posts": [{"account": "newbie", "post_id": "1", "likes": 1, "views": 10, "comments": 0, "shares": 0}]}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: IngestPostsResponse = read_json(response).await;
        assert_eq!(body.accepted, 1);

        let response = get(app, "/api/stats/newbie").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ingest_invalid_json() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/posts")
                    .header("Content-Type", "application/json")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ingest_rejects_negative_counts() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/posts")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        r#"{"posts": [{"username": "acme", "post_id": "1", "likes": -1, "views": 10, "comments": 0, "shares": 0}]}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_cors_layer_accepts_empty_and_invalid_origins() {
        let _ = cors_layer(&[]);
        let _ = cors_layer(&["http://localhost:3000".to_string(), "bad\norigin".to_string()]);
    }
}
