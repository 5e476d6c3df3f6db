mod claim_log;

use axum::{
    Router,
    extract::State,
    http::{HeaderValue, Request, StatusCode},
    middleware::{Next, from_fn},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use claim_log::ClaimLog;
use claims_core::{FieldErrors, validate_value};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{Instrument, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Clone)]
struct AppState {
    claim_log: Arc<ClaimLog>,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct ValidationFailedResponse {
    errors: FieldErrors,
}

/// Initialize structured JSON tracing based on environment variables
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "claims_intake_service=debug,claims_core=debug,tower_http=debug".into()
    });

    match log_format.as_str() {
        "pretty" => {
            // Human-readable logging for development
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        _ => {
            // Structured JSON logging for production
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    }
}

/// Middleware to add correlation ID to all requests
async fn correlation_id_middleware(
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let correlation_id = Uuid::new_v4().to_string();

    request.headers_mut().insert(
        "x-correlation-id",
        HeaderValue::from_str(&correlation_id).unwrap(),
    );

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    next.run(request).instrument(span).await
}

#[tokio::main]
async fn main() {
    init_tracing();

    let claim_log = Arc::new(ClaimLog::from_env());
    let app_state = AppState { claim_log };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/submit-claim", post(submit_claim))
        .layer(from_fn(correlation_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();

    info!("Server running on http://0.0.0.0:3000");

    axum::serve(listener, app).await.unwrap();
}

async fn health_check() -> &'static str {
    "OK"
}

/// Accept a claim: re-run the shared validation contract against the raw
/// body, then append the sanitized record to the claims log
async fn submit_claim(State(state): State<AppState>, Json(payload): Json<Value>) -> Response {
    let draft = match validate_value(&payload) {
        Ok(draft) => draft,
        Err(errors) => {
            info!(errors = ?errors, "claim rejected by validation");
            return (
                StatusCode::BAD_REQUEST,
                Json(ValidationFailedResponse { errors }),
            )
                .into_response();
        }
    };

    match state.claim_log.append(&draft).await {
        Ok(()) => {
            info!(
                date = %draft.date,
                category = %draft.category,
                description_length = %draft.description.len(),
                "claim recorded"
            );
            (
                StatusCode::OK,
                Json(MessageResponse {
                    message: "Claim recorded",
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to append claim to log");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse {
                    message: "Internal server error",
                }),
            )
                .into_response()
        }
    }
}
