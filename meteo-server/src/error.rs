//! API error handling.
//!
//! Every error renders as a JSON body `{ "error": ... }` with a status code
//! that reflects who is at fault: the caller (400/404), the upstream weather
//! service (502/503), or us (500).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use meteo_core::WeatherError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Upstream weather service error: {0}")]
    Upstream(String),

    #[error("Service temporarily unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        } else {
            tracing::warn!(%status, error = %self, "request rejected");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        match err {
            WeatherError::EmptyCity => Self::BadRequest(err.to_string()),
            WeatherError::CityNotFound(_) => Self::NotFound(err.to_string()),
            WeatherError::RateLimited | WeatherError::ServiceUnavailable(_) => {
                Self::Unavailable(err.to_string())
            }
            WeatherError::RequestFailed(_) | WeatherError::InvalidResponse(_) => {
                Self::Upstream(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Upstream("x".into()).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(ApiError::Unavailable("x".into()).status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn weather_errors_pick_the_right_status() {
        let err: ApiError = WeatherError::CityNotFound("Atlantis".into()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: ApiError = WeatherError::RateLimited.into();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);

        let err: ApiError = WeatherError::RequestFailed("boom".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err: ApiError = WeatherError::EmptyCity.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
