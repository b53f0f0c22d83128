//! Application error type and provider-error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use tracing::error;

use crate::kakao::KakaoError;
use crate::music::MusicError;
use crate::odsay::OdsayError;
use crate::script::ScriptError;

/// Error body returned to clients.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    detail: String,
}

/// Application error type. Each provider error maps to a status code
/// and a stable machine-readable tag.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    tag: &'static str,
    message: String,
}

impl AppError {
    pub fn bad_request(tag: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            tag,
            message: message.into(),
        }
    }

    pub fn not_found(tag: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            tag,
            message: message.into(),
        }
    }

    pub fn unavailable(tag: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            tag,
            message: message.into(),
        }
    }

    pub fn bad_gateway(tag: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            tag,
            message: message.into(),
        }
    }

    pub fn internal(tag: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            tag,
            message: message.into(),
        }
    }
}

impl From<KakaoError> for AppError {
    fn from(e: KakaoError) -> Self {
        match &e {
            KakaoError::NotConfigured => {
                Self::unavailable("geocoder_not_configured", e.to_string())
            }
            KakaoError::NoResult(_) => Self::not_found("place_not_found", e.to_string()),
            KakaoError::Http(_) => Self::bad_gateway("geocode_failed", e.to_string()),
            KakaoError::Json { .. } => Self::internal("geocode_failed", e.to_string()),
        }
    }
}

impl From<OdsayError> for AppError {
    fn from(e: OdsayError) -> Self {
        match &e {
            OdsayError::NotConfigured => {
                Self::unavailable("router_not_configured", e.to_string())
            }
            OdsayError::NoRoute => Self::not_found("route_not_found", e.to_string()),
            OdsayError::Http(_) => Self::bad_gateway("route_search_failed", e.to_string()),
            OdsayError::Api { .. } | OdsayError::Json { .. } => {
                Self::internal("route_search_failed", e.to_string())
            }
        }
    }
}

impl From<MusicError> for AppError {
    fn from(e: MusicError) -> Self {
        match &e {
            MusicError::NotConfigured => {
                Self::unavailable("youtube_api_key_missing", e.to_string())
            }
            MusicError::Http(_) => Self::bad_gateway("music_search_failed", e.to_string()),
            MusicError::Api { .. } | MusicError::Json { .. } => {
                Self::internal("music_search_failed", e.to_string())
            }
        }
    }
}

impl From<ScriptError> for AppError {
    fn from(e: ScriptError) -> Self {
        match &e {
            ScriptError::NotConfigured => Self::unavailable("llm_not_configured", e.to_string()),
            ScriptError::Http(_) => Self::bad_gateway("script_generation_failed", e.to_string()),
            ScriptError::ContentFiltered
            | ScriptError::Api { .. }
            | ScriptError::Json { .. } => {
                Self::internal("script_generation_failed", e.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        error!(status = %self.status, tag = self.tag, "{}", self.message);

        let body = Json(ErrorResponse {
            error: self.tag,
            detail: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_map_to_expected_statuses() {
        let e: AppError = KakaoError::NotConfigured.into();
        assert_eq!(e.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(e.tag, "geocoder_not_configured");

        let e: AppError = KakaoError::NoResult("강남".to_string()).into();
        assert_eq!(e.status, StatusCode::NOT_FOUND);

        let e: AppError = OdsayError::NoRoute.into();
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.tag, "route_not_found");

        let e: AppError = MusicError::NotConfigured.into();
        assert_eq!(e.status, StatusCode::SERVICE_UNAVAILABLE);

        let e: AppError = ScriptError::NotConfigured.into();
        assert_eq!(e.tag, "llm_not_configured");
    }
}
