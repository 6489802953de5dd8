//! Request handlers and the HTTP error mapping.

pub mod items;
pub mod users;

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use shelfmark_core::{defaults, Error};

/// Wrapper giving every core error an HTTP representation.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            Error::MalformedUrl(_)
            | Error::UnsupportedContentType { .. }
            | Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::ItemNotFound(_) | Error::TagNotPresent { .. } | Error::OwnerNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            // The upstream fetch failed, not this service.
            Error::UnreachableResource { .. }
            | Error::AccessDenied { .. }
            | Error::ResolutionFailed { .. }
            | Error::UnknownServerResponse { .. } => StatusCode::BAD_GATEWAY,
            Error::DuplicateResolvedUrl(_)
            | Error::Database(_)
            | Error::Config(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Extract the owner identity from the `X-Later-User-Id` header.
pub fn owner_id(headers: &HeaderMap) -> Result<Uuid, ApiError> {
    headers
        .get(defaults::USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .ok_or_else(|| {
            ApiError(Error::InvalidInput(format!(
                "Missing or invalid {} header",
                defaults::USER_ID_HEADER
            )))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_owner_id_parses_header() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            defaults::USER_ID_HEADER,
            HeaderValue::from_str(&id.to_string()).unwrap(),
        );
        assert_eq!(owner_id(&headers).ok(), Some(id));
    }

    #[test]
    fn test_owner_id_rejects_missing_header() {
        let headers = HeaderMap::new();
        assert!(owner_id(&headers).is_err());
    }

    #[test]
    fn test_owner_id_rejects_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert(defaults::USER_ID_HEADER, HeaderValue::from_static("42"));
        assert!(owner_id(&headers).is_err());
    }
}
