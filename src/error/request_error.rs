use crate::response::app_response::{ErrorResponse, FieldError};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Error)]
pub enum RequestError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error(transparent)]
    Body(#[from] JsonRejection),
}

impl RequestError {
    /// Per-field failures, ordered by field name.
    pub fn field_errors(&self) -> Vec<FieldError> {
        let RequestError::Invalid(errors) = self else {
            return Vec::new();
        };

        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, failures)| {
                failures.iter().map(move |failure| FieldError {
                    field: field.to_string(),
                    rule: rule_name(&failure.code),
                    message: failure
                        .message
                        .as_ref()
                        .map_or_else(|| "Invalid value".to_string(), |m| m.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        fields
    }
}

fn rule_name(code: &str) -> &'static str {
    match code {
        "length" => "INVALID_LENGTH",
        "range" => "OUT_OF_RANGE",
        "required" => "MISSING",
        _ => "INVALID_VALUE",
    }
}

/// `Json<T>` that also runs the payload's `validator` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedRequest<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedRequest<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = RequestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state).await?;
        payload.validate()?;
        Ok(ValidatedRequest(payload))
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let fields = self.field_errors();
        match self {
            RequestError::Invalid(_) => {
                ErrorResponse::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "Validation failed")
                    .with_fields(fields)
                    .into_response()
            }
            RequestError::Body(rejection) => {
                ErrorResponse::new(rejection.status(), "INVALID_BODY", rejection.body_text()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::credential_dto::LoginDto;

    #[test]
    fn test_field_errors_are_sorted_and_named() {
        let dto = LoginDto {
            identity: String::new(),
            password: String::new(),
        };
        let error = RequestError::from(dto.validate().unwrap_err());
        let fields = error.field_errors();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field, "identity");
        assert_eq!(fields[1].field, "password");
        assert!(fields.iter().all(|f| f.rule == "INVALID_LENGTH"));
    }

    #[test]
    fn test_validation_failure_is_bad_request() {
        let dto = LoginDto {
            identity: String::new(),
            password: "secret".to_string(),
        };
        let response = RequestError::from(dto.validate().unwrap_err()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
