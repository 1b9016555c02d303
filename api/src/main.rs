//! Re-enrollment API Server
//!
//! Collects re-enrollment requests from students of a preparatory school,
//! assigns each one a group, specialty and workshop within the seat limits,
//! and serves the printable request form.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{header, Method},
    routing::{get, post},
    Json, Router,
};
use sea_orm::{Database, DatabaseConnection};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    PdfFormRenderer, PostgresCatalogRepository, PostgresEnrollmentRepository,
    PostgresStudentRepository,
};
use app::{CatalogService, EnrollmentService, FormService};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub enrollment_service:
        Arc<EnrollmentService<PostgresStudentRepository, PostgresEnrollmentRepository>>,
    pub catalog_service: Arc<CatalogService<PostgresCatalogRepository>>,
    pub form_service: Arc<
        FormService<PostgresStudentRepository, PostgresEnrollmentRepository, PdfFormRenderer>,
    >,
}

impl AppState {
    /// Wire the services over one database connection
    pub fn new(db: DatabaseConnection) -> Self {
        let db = Arc::new(db);
        let student_repo = Arc::new(PostgresStudentRepository::new(Arc::clone(&db)));
        let enrollment_repo = Arc::new(PostgresEnrollmentRepository::new(Arc::clone(&db)));
        let catalog_repo = Arc::new(PostgresCatalogRepository::new(db));

        Self {
            enrollment_service: Arc::new(EnrollmentService::new(
                student_repo.clone(),
                enrollment_repo.clone(),
            )),
            catalog_service: Arc::new(CatalogService::new(catalog_repo)),
            form_service: Arc::new(FormService::new(
                student_repo,
                enrollment_repo,
                Arc::new(PdfFormRenderer::new()),
            )),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router with every endpoint and the shared middleware.
///
/// JSON endpoints go through the CORS layer. The form endpoint answers
/// its own preflight and sets its CORS headers itself.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let api = Router::new()
        .route("/health", get(health))
        .route(
            "/buscar-alumno/:numero_control/",
            get(handlers::buscar_alumno),
        )
        .route(
            "/talleres-disponibles/",
            get(handlers::talleres_disponibles),
        )
        .route(
            "/especialidades-disponibles/",
            get(handlers::especialidades_disponibles),
        )
        .route(
            "/registrar-inscripcion/",
            post(handlers::registrar_inscripcion),
        )
        .route(
            "/consultar-ficha/:numero_control/",
            get(handlers::consultar_ficha),
        )
        .route("/consultar-fichas/", get(handlers::consultar_fichas))
        .layer(cors);

    let forms = Router::new().route(
        "/pdf/:numero_control/",
        get(handlers::generar_pdf).options(handlers::pdf_preflight),
    );

    Router::new()
        .merge(api)
        .merge(forms)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,reenroll_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting re-enrollment API...");

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    let app = router(AppState::new(db));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
