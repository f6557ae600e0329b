// HTTP surface: the /bfhl classification endpoint, identity lookup, health
// check and the JSON error bodies shared by all of them.

use std::any::Any;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use bfhl_core::{ClassificationResult, ClassifyError, UserInfo};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// `operation_code` reported by `GET /bfhl`.
pub const OPERATION_CODE: u8 = 1;

const ROUTE_NOT_FOUND: &str = "Route not found";

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub identity: Arc<UserInfo>,
}

impl AppState {
    pub fn new(identity: UserInfo) -> Self {
        Self {
            identity: Arc::new(identity),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub is_success: bool,
    pub user_id: String,
    pub email: String,
    pub roll_number: String,
    #[serde(flatten)]
    pub result: ClassificationResult,
}

#[derive(Debug, Serialize)]
pub struct OperationResponse {
    pub operation_code: u8,
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub is_success: bool,
    pub error: String,
}

/// Error type returned by handlers; renders as `{is_success: false, error}`.
#[derive(Debug)]
pub enum ApiError {
    Classify(ClassifyError),
    NotFound,
}

impl From<ClassifyError> for ApiError {
    fn from(err: ClassifyError) -> Self {
        ApiError::Classify(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Classify(err @ ClassifyError::InvalidInput) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ApiError::Classify(err @ ClassifyError::InternalFailure) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, ROUTE_NOT_FOUND.to_string()),
        };
        let body = ErrorBody {
            is_success: false,
            error: message,
        };
        (status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the application router with CORS, request tracing and panic
/// recovery applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/bfhl", get(operation_code).post(classify))
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serve `router(state)` on `listener` until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr()?;
    info!("HTTP server listening on {local_addr}");
    info!("API endpoint: http://{local_addr}/bfhl");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn classify(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!("Rejected /bfhl payload: {rejection}");
            return Err(ClassifyError::InvalidInput.into());
        }
    };

    // `data` must be a field of an object body; anything else is not an array.
    let data = match body {
        Value::Object(mut fields) => fields.remove("data").unwrap_or_default(),
        _ => Value::Null,
    };
    let result = bfhl_core::classify_json(&data).inspect_err(|e| {
        warn!("Rejected /bfhl payload: {e}");
    })?;
    debug!(sum = %result.sum, "classification complete");

    let identity = &state.identity;
    Ok(Json(ClassifyResponse {
        is_success: true,
        user_id: identity.user_id(),
        email: identity.email.clone(),
        roll_number: identity.roll_number.clone(),
        result,
    }))
}

async fn operation_code(State(state): State<AppState>) -> Json<OperationResponse> {
    Json(OperationResponse {
        operation_code: OPERATION_CODE,
        user_id: state.identity.user_id(),
    })
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "message": "BFHL API is running",
        "endpoints": {
            "POST /bfhl": "Main API endpoint",
            "GET /bfhl": "Get operation code",
        }
    }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Converts a handler panic into the generic 500 body. The panic payload is
/// logged, never returned.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    error!("Handler panicked: {detail}");
    ApiError::Classify(ClassifyError::InternalFailure).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn invalid_input_maps_to_bad_request() {
        let response = ApiError::from(ClassifyError::InvalidInput).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["is_success"], false);
        assert_eq!(body["error"], "Invalid input. 'data' field must be an array.");
    }

    #[tokio::test]
    async fn internal_failure_hides_detail() {
        let response = ApiError::from(ClassifyError::InternalFailure).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn panic_payload_is_not_leaked() {
        let response = panic_response(Box::new("secret detail".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["is_success"], false);
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn not_found_body() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], ROUTE_NOT_FOUND);
    }
}
