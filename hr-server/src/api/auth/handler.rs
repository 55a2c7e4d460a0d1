//! Authentication handlers

use axum::{Json, extract::State, http::StatusCode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{AppError, Role};
use uuid::Uuid;

use crate::auth::Principal;
use crate::auth::policy::{self, ADMIN_DIRECTOR};
use crate::db;
use crate::db::employees::Employee;
use crate::db::users::{NewProfile, Profile, UserSummary};
use crate::error::{ApiResult, ServiceError};
use crate::security_log;
use crate::state::AppState;
use crate::util::{check_password_length, hash_password, normalize_email, verify_password};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub employee_id: Option<Uuid>,
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub full_name: Option<String>,
    /// Company employee code
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub join_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserSummary,
    pub employee: Option<Employee>,
}

#[derive(Debug, Deserialize)]
pub struct AdminResetRequest {
    pub user_id: Uuid,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminResetResponse {
    pub message: String,
    pub user: UserSummary,
}

fn hash(password: &str) -> Result<String, AppError> {
    hash_password(password).map_err(|e| {
        tracing::error!(error = %e, "Password hashing failed");
        AppError::internal("Failed to hash password")
    })
}

/// Principal creation and admin reset are open to any principal at the
/// route level; the operation itself requires Admin or Director.
fn require_admin_director(principal: &Principal, operation: &str) -> Result<(), AppError> {
    policy::authorize(principal, ADMIN_DIRECTOR).inspect_err(|_| {
        security_log!(
            "WARN",
            "permission_denied",
            user_id = principal.id.to_string(),
            role = principal.role.as_str(),
            operation = operation
        );
    })
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let email = normalize_email(&req.email);
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::validation("Email and password are required").into());
    }

    let creds = db::users::find_credentials(&state.pool, &email).await?;
    let Some(creds) = creds.filter(|c| verify_password(&req.password, &c.password_hash)) else {
        security_log!("WARN", "login_failed", email = email);
        return Err(AppError::invalid_credentials().into());
    };

    let role: Role = creds
        .role
        .parse()
        .map_err(|e| ServiceError::Store(Box::new(e)))?;

    let token = state
        .jwt
        .issue(creds.id, &creds.email, role)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    security_log!("INFO", "login_success", user_id = creds.id.to_string(), role = role.as_str());

    Ok(Json(LoginResponse {
        token,
        user: LoginUser {
            id: creds.id,
            email: creds.email,
            role,
            employee_id: creds.employee_id,
            full_name: creds.full_name,
        },
    }))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ServiceError> {
    require_admin_director(&principal, "register")?;

    let email = normalize_email(&req.email);
    if email.is_empty() {
        return Err(AppError::required("email").into());
    }
    check_password_length(&req.password)?;

    let profile = match (req.full_name, req.employee_id) {
        (Some(full_name), Some(employee_code)) => Some(NewProfile {
            full_name,
            employee_code,
            department: req.department,
            phone: req.phone,
            join_date: req.join_date,
        }),
        (None, None) => None,
        (None, Some(_)) => return Err(AppError::required("full_name").into()),
        (Some(_), None) => return Err(AppError::required("employee_id").into()),
    };

    let password_hash = hash(&req.password)?;
    let (user, employee) =
        match db::users::create(&state.pool, &email, &password_hash, req.role, profile.as_ref())
            .await
        {
            Ok(created) => created,
            Err(e) if db::is_unique_violation(&e) => {
                return Err(AppError::conflict("Email or employee code already exists").into());
            }
            Err(e) => return Err(e.into()),
        };

    security_log!(
        "INFO",
        "principal_created",
        user_id = user.id.to_string(),
        role = user.role.clone(),
        created_by = principal.id.to_string()
    );

    Ok((StatusCode::CREATED, Json(RegisterResponse { user, employee })))
}

/// POST /api/auth/admin/reset-password
pub async fn admin_reset_password(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<AdminResetRequest>,
) -> ApiResult<AdminResetResponse> {
    require_admin_director(&principal, "admin_reset_password")?;
    check_password_length(&req.new_password)?;

    let password_hash = hash(&req.new_password)?;
    let user = db::users::update_password(&state.pool, req.user_id, &password_hash)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    security_log!(
        "INFO",
        "password_reset_by_admin",
        user_id = user.id.to_string(),
        reset_by = principal.id.to_string()
    );

    Ok(Json(AdminResetResponse {
        message: "Password reset successfully".to_string(),
        user,
    }))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, principal: Principal) -> ApiResult<Profile> {
    let profile = db::users::find_profile(&state.pool, principal.id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    Ok(Json(profile))
}
