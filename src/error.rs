use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// The only error a client can observe. Every other failure is either fatal at
/// startup or folded into the diagnostics report.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Unmatched route; rendered with the framework-style "Not Found" detail
    #[error("Not Found")]
    RouteNotFound,
}

impl ApiError {
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound(resource)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(resource) => {
                tracing::debug!("Resource not found: {}", resource);
                StatusCode::NOT_FOUND
            }
            ApiError::RouteNotFound => {
                tracing::debug!("No route matched the request");
                StatusCode::NOT_FOUND
            }
        };

        let body = Json(json!({
            "detail": self.to_string()
        }));

        (status, body).into_response()
    }
}

/// Failures while probing the optional database. These never become HTTP errors;
/// the diagnostics handler turns them into status strings.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("database handle is not initialized")]
    NotInitialized,

    #[error("pool: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("query: {0}")]
    Query(#[from] tokio_postgres::Error),

    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("{0}")]
    Unavailable(String),
}

impl ProbeError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

// Result type alias for convenience
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_renders_detail_body() {
        let response = ApiError::not_found("Language").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "detail": "Language not found" })
        );
    }

    #[tokio::test]
    async fn test_route_not_found_renders_detail_body() {
        let response = ApiError::RouteNotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "detail": "Not Found" }));
    }

    #[test]
    fn test_probe_error_messages() {
        assert_eq!(
            ProbeError::Timeout(Duration::from_secs(5)).to_string(),
            "timed out after 5000ms"
        );
        assert_eq!(
            ProbeError::unavailable("connection refused").to_string(),
            "connection refused"
        );
        assert_eq!(
            ProbeError::NotInitialized.to_string(),
            "database handle is not initialized"
        );
    }
}
