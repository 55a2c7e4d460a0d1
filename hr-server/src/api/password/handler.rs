//! Password recovery handlers

use axum::{Json, extract::State};
use chrono::{Duration, Utc};
use serde::Deserialize;
use shared::{ApiResponse, AppError, ErrorCode};

use crate::db;
use crate::error::ApiResult;
use crate::security_log;
use crate::state::AppState;
use crate::util::{
    check_password_length, generate_reset_token, hash_password, hash_reset_token, normalize_email,
};

/// Same body whether or not the email exists
pub const FORGOT_PASSWORD_MESSAGE: &str = "If the email exists, a reset link has been sent";

const RESET_TOKEN_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// POST /api/password/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> ApiResult<ApiResponse> {
    let email = normalize_email(&req.email);
    if email.is_empty() {
        return Err(AppError::required("email").into());
    }

    tokio::spawn(issue_reset_token(state, email));

    Ok(Json(ApiResponse::message(FORGOT_PASSWORD_MESSAGE)))
}

async fn issue_reset_token(state: AppState, email: String) {
    let user_id = match db::users::find_id_by_email(&state.pool, &email).await {
        Ok(Some(id)) => id,
        Ok(None) => return,
        Err(e) => {
            tracing::error!(error = %e, "Reset token lookup failed");
            return;
        }
    };

    let (raw, digest) = generate_reset_token();
    let expires_at = Utc::now() + Duration::seconds(RESET_TOKEN_TTL_SECS);
    if let Err(e) = db::users::set_reset_token(&state.pool, user_id, &digest, expires_at).await {
        tracing::error!(error = %e, "Failed to store reset token");
        return;
    }
    security_log!("INFO", "password_reset_issued", user_id = user_id.to_string());

    let reset_url = format!("{}/reset-password?token={raw}", state.frontend_url);
    if let Err(e) = state.mailer.send_password_reset(&email, &reset_url).await {
        tracing::warn!(error = %e, "Password reset notification failed");
    }
}

/// POST /api/password/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> ApiResult<ApiResponse> {
    if req.token.is_empty() {
        return Err(AppError::required("token").into());
    }
    check_password_length(&req.new_password)?;

    let digest = hash_reset_token(&req.token);
    let user_id = db::users::find_by_reset_token(&state.pool, &digest)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ResetTokenInvalid))?;

    let password_hash = hash_password(&req.new_password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
    db::users::update_password(&state.pool, user_id, &password_hash).await?;

    security_log!("INFO", "password_reset_completed", user_id = user_id.to_string());
    Ok(Json(ApiResponse::message("Password reset successfully")))
}
