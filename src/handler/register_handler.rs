use crate::dto::credential_dto::RegisterDto;
use crate::dto::token_dto::TokenPair;
use crate::error::{AppError, request_error::ValidatedRequest};
use crate::response::app_response::DataResponse;
use crate::state::auth_state::AuthState;
use axum::extract::State;
use tracing::info;

pub async fn register(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<RegisterDto>,
) -> Result<DataResponse<TokenPair>, AppError> {
    info!("Registration attempt for identity: {}", payload.identity);

    let pair = state.auth_service.register(payload).await?;
    Ok(DataResponse::created(pair))
}
