use crate::dto::credential_dto::LoginDto;
use crate::dto::token_dto::TokenPair;
use crate::error::{AppError, request_error::ValidatedRequest};
use crate::response::app_response::DataResponse;
use crate::state::auth_state::AuthState;
use axum::extract::State;
use tracing::info;

pub async fn login(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<LoginDto>,
) -> Result<DataResponse<TokenPair>, AppError> {
    info!("Login attempt for identity: {}", payload.identity);

    let pair = state.auth_service.login(&payload.identity, &payload.password).await?;
    Ok(DataResponse::ok(pair))
}
