use crate::dto::token_dto::{LogoutRequestDto, LogoutResponseDto, RefreshTokenRequestDto, TokenPair};
use crate::error::{AppError, request_error::ValidatedRequest};
use crate::response::app_response::DataResponse;
use crate::state::auth_state::AuthState;
use axum::extract::State;

pub async fn refresh(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<RefreshTokenRequestDto>,
) -> Result<DataResponse<TokenPair>, AppError> {
    let pair = state.refresh_token_service.refresh(&payload.refresh_token).await?;
    Ok(DataResponse::ok(pair))
}

pub async fn logout(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<LogoutRequestDto>,
) -> Result<DataResponse<LogoutResponseDto>, AppError> {
    state.refresh_token_service.logout(&payload.refresh_token).await?;
    Ok(DataResponse::ok(LogoutResponseDto {
        message: "Logged out".to_string(),
    }))
}
