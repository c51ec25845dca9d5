//! Authentication routes

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{AdminCredentials, AuthUser, CredentialsError},
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Validate admin credentials and issue a JWT
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let credentials = AdminCredentials::load(&state.config.config_path).map_err(|e| match e {
        CredentialsError::NotConfigured => {
            tracing::warn!("Login attempted before admin credentials were set up");
            ApiError::InvalidCredentials
        }
        other => {
            tracing::error!(error = %other, "Failed to load admin credentials");
            ApiError::Internal
        }
    })?;

    if !credentials.verify(&request.username, &request.password) {
        return Err(ApiError::InvalidCredentials);
    }

    let access_token = state.jwt.generate_token(&request.username)?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.jwt.expiry_seconds(),
    }))
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub username: String,
}

/// Current authenticated principal
pub async fn me(Extension(user): Extension<AuthUser>) -> Json<MeResponse> {
    Json(MeResponse {
        username: user.username,
    })
}
