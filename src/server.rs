// http server mode - run healthwise as an api

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::{Diagnoser, DiagnosisResult, Generate, SymptomReport};
use crate::{Error, Rejection};

#[derive(Serialize)]
struct DiagnoseResponse {
    result: DiagnosisResult,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    category: &'static str,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let status = if self.is_user_correctable() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = ErrorResponse {
            error: self.to_string(),
            category: self.category(),
        };

        (status, Json(body)).into_response()
    }
}

pub struct Server;

impl Server {
    pub fn router<G: Generate + 'static>(diagnoser: Diagnoser<G>, cors: CorsLayer) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/diagnose", post(diagnose::<G>))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(Arc::new(diagnoser))
    }

    /// Only `frontend_url` may call us (with credentials) when given, anyone otherwise.
    pub fn cors(frontend_url: Option<&str>) -> Result<CorsLayer, Error> {
        let Some(url) = frontend_url else {
            return Ok(CorsLayer::permissive());
        };

        let origin: HeaderValue = url
            .trim_end_matches('/')
            .parse()
            .map_err(|_| Error::Server(format!("invalid frontend url: {url}")))?;

        Ok(CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true))
    }

    pub async fn run<G: Generate + 'static>(
        diagnoser: Diagnoser<G>,
        host: &str,
        port: u16,
        frontend_url: Option<&str>,
    ) -> Result<(), Error> {
        let app = Self::router(diagnoser, Self::cors(frontend_url)?);

        let addr = format!("{host}:{port}");
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        tracing::info!("server running at http://{addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        tracing::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn diagnose<G: Generate + 'static>(
    State(diagnoser): State<Arc<Diagnoser<G>>>,
    payload: Result<Json<SymptomReport>, JsonRejection>,
) -> Result<Json<DiagnoseResponse>, Rejection> {
    // wrong types, missing symptoms, not json at all: all the same to the client
    let Json(report) = payload.map_err(|e| {
        tracing::debug!(error = %e, "unusable diagnose body");
        Rejection::InvalidInput("Symptoms are required and must be a non-empty string.".to_string())
    })?;

    let result = diagnoser.diagnose(&report).await?;
    Ok(Json(DiagnoseResponse { result }))
}
