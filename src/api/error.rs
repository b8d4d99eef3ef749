use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::hypermedia::{Control, MasonDocument, ERROR_PROFILE, MASON};
use crate::store::StoreError;

/// Uniform error response: a status code plus a Mason error document
/// carrying the request path, an `@error` block, and a profile control.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    title: &'static str,
    message: String,
    resource_url: String,
}

impl ApiError {
    fn new(
        status: StatusCode,
        title: &'static str,
        message: impl Into<String>,
        resource_url: &str,
    ) -> Self {
        Self {
            status,
            title,
            message: message.into(),
            resource_url: resource_url.to_string(),
        }
    }

    /// 415: a write request without a JSON body.
    pub fn unsupported_media_type(resource_url: &str) -> Self {
        Self::new(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Unsupported media type",
            "Requests must be JSON",
            resource_url,
        )
    }

    /// 400: the body failed schema validation or did not parse.
    pub fn invalid_document(resource_url: &str, message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "Invalid JSON document",
            message,
            resource_url,
        )
    }

    /// 400: a malformed pagination parameter.
    pub fn invalid_query(resource_url: &str, message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "Invalid query parameter",
            message,
            resource_url,
        )
    }

    /// 404: a referenced entity or edge does not exist.
    pub fn not_found(resource_url: &str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found", message, resource_url)
    }

    /// 409: a uniqueness violation on create or rename, or a duplicate edge.
    pub fn conflict(resource_url: &str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "Already exists", message, resource_url)
    }

    /// 500: the storage backend failed.
    pub fn storage(resource_url: &str, error: StoreError) -> Self {
        log::error!("storage failure at {}: {}", resource_url, error);
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            "Unexpected storage failure",
            resource_url,
        )
    }

    #[cfg(test)]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = MasonDocument::new();
        body.insert("resource_url", &self.resource_url);
        body.add_error(self.title, &self.message);
        body.add_control("profile", Control::new(ERROR_PROFILE));

        let payload = serde_json::to_string(&body).unwrap_or_default();
        (self.status, [(header::CONTENT_TYPE, MASON)], payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_document_shape() {
        let error = ApiError::not_found(
            "/api/synsets/n00/",
            "No synset with WordNet ID of 'n00' found",
        );
        assert_eq!(error.status(), StatusCode::NOT_FOUND);

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            MASON
        );
    }
}
