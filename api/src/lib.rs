//! Submission Desk API
//!
//! REST surface over the submission store, query engine and statistics.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      SUBMISSION API                       │
//! │                                                           │
//! │  ┌─────────────────────────────────────────────────────┐  │
//! │  │                      REST API                       │  │
//! │  │   OpenAPI 3 | Swagger UI | CORS | Request Tracing   │  │
//! │  └─────────────────────────────────────────────────────┘  │
//! │                            │                              │
//! │  ┌─────────────────────────────────────────────────────┐  │
//! │  │                 submission-core                     │  │
//! │  │   Use Cases | Query Engine | Statistics | Store     │  │
//! │  └─────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod routes;

use axum::{routing::get, Router};
use chrono::Utc;
use std::sync::Arc;
use submission_core::{
    demo_submissions, InMemorySubmissionRepository, SubmissionService, SubmissionUseCases,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::ApiConfig;
pub use error::ApiError;
pub use models::*;

/// API state
#[derive(Clone)]
pub struct ApiState {
    /// API version
    pub version: String,
    /// Submission use cases
    pub submissions: Arc<dyn SubmissionUseCases>,
    /// Runtime configuration
    pub config: ApiConfig,
}

impl ApiState {
    pub fn new(config: ApiConfig, submissions: Arc<dyn SubmissionUseCases>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").into(),
            submissions,
            config,
        }
    }

    /// In-memory store, seeded with `seed_demo_records` generated records
    pub fn from_config(config: ApiConfig) -> submission_core::Result<Self> {
        let repo = if config.seed_demo_records > 0 {
            let records = demo_submissions(config.seed_demo_records, Utc::now(), &mut rand::thread_rng())?;
            tracing::info!(records = records.len(), "Loaded demo submissions");
            InMemorySubmissionRepository::with_submissions(records)?
        } else {
            InMemorySubmissionRepository::new()
        };

        let service = SubmissionService::new(Arc::new(repo));
        Ok(Self::new(config, Arc::new(service)))
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Submission Desk API",
        version = "0.1.0",
        description = "Submission store, review table queries and dashboard statistics",
        license(name = "Apache-2.0")
    ),
    paths(
        routes::health::health_check,
        routes::submissions::list_submissions,
        routes::submissions::create_submission,
        routes::submissions::get_submission,
        routes::submissions::update_submission,
        routes::submissions::email_exists,
        routes::stats::get_submission_stats,
    ),
    components(
        schemas(ErrorResponse, EmailExistsResponse, routes::health::HealthResponse)
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "submissions", description = "Submission store and review table"),
        (name = "stats", description = "Dashboard statistics")
    )
)]
pub struct ApiDoc;

/// Build the API router
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(state))
}

fn api_routes() -> Router<Arc<ApiState>> {
    Router::new()
        .nest("/submissions", routes::submissions::router())
        .nest("/stats", routes::stats::router())
}
