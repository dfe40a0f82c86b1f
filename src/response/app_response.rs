use crate::service::query_builder::ListingPage;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// One rejected input field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub rule: &'static str,
    pub message: String,
}

/// Describes the window a listing returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ListingMeta {
    pub count: usize,
    pub page: Option<ListingPage>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ListingMeta>,
    #[serde(skip)]
    pub status_code: StatusCode,
}

impl<T> DataResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: None,
            status_code: StatusCode::OK,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status_code: StatusCode::CREATED,
            ..Self::ok(data)
        }
    }

    pub fn with_status(mut self, status_code: StatusCode) -> Self {
        self.status_code = status_code;
        self
    }
}

impl<T> DataResponse<Vec<T>> {
    pub fn listing(rows: Vec<T>, page: Option<ListingPage>) -> Self {
        let meta = ListingMeta {
            count: rows.len(),
            page,
        };
        Self {
            meta: Some(meta),
            ..Self::ok(rows)
        }
    }
}

impl<T: Serialize> IntoResponse for DataResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

/// Failure body. `code` is stable for clients to match on, `message` is safe
/// to display and never carries internal detail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
    #[serde(skip)]
    pub status_code: StatusCode,
}

impl ErrorResponse {
    pub fn new(status_code: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            message: message.into(),
            errors: Vec::new(),
            status_code,
        }
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", "Internal server error")
    }

    pub fn with_fields(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_meta_counts_rows() {
        let response = DataResponse::listing(vec![1, 2, 3], Some(ListingPage { limit: 3, offset: 6 }));
        let body = serde_json::to_value(&response).unwrap();

        assert_eq!(body["meta"], json!({ "count": 3, "page": { "limit": 3, "offset": 6 } }));
        assert_eq!(response.status_code, StatusCode::OK);
    }

    #[test]
    fn test_plain_data_has_no_meta() {
        let body = serde_json::to_value(DataResponse::created("x")).unwrap();
        assert_eq!(body, json!({ "success": true, "data": "x" }));
    }

    #[test]
    fn test_error_body_omits_empty_parts() {
        let body = serde_json::to_value(ErrorResponse::internal()).unwrap();
        assert_eq!(
            body,
            json!({ "success": false, "code": "INTERNAL_ERROR", "message": "Internal server error" })
        );
    }

    #[test]
    fn test_field_errors_are_listed() {
        let response = ErrorResponse::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "Validation failed").with_fields(
            vec![FieldError {
                field: "identity".to_string(),
                rule: "INVALID_LENGTH",
                message: "Identity is required".to_string(),
            }],
        );
        let body = serde_json::to_value(&response).unwrap();

        assert_eq!(body["errors"][0]["field"], "identity");
        assert_eq!(body["errors"][0]["rule"], "INVALID_LENGTH");
    }
}
