/// Authentication Routes
///
/// Handles user registration, login, token refresh, and logout.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::{hash_password, SessionLifecycle};
use crate::configuration::JwtSettings;
use crate::error::{AppError, DatabaseError, ErrorContext};
use crate::repository::{NewUser, UserRecord, UserRepository};
use crate::validators::{is_valid_email, is_valid_full_name};

/// User registration request
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// User login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token refresh and logout request
#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Authentication response with access and refresh tokens
#[derive(Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl AuthResponse {
    fn new(access_token: String, refresh_token: String, jwt_config: &JwtSettings) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
            expires_in: jwt_config.access_token_expire_minutes * 60,
        }
    }
}

/// User summary response
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            full_name: user.full_name,
            is_active: user.is_active,
            is_verified: user.is_verified,
        }
    }
}

/// POST /auth/register
///
/// Register a new user with email, password, and an optional name.
/// Returns the created user's summary.
///
/// # Errors
/// - 400: Validation errors (invalid email/name)
/// - 409: Email already registered
/// - 500: Internal server error
pub async fn register(
    form: web::Json<RegisterRequest>,
    users: web::Data<dyn UserRepository>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("user_registration");

    let email = is_valid_email(&form.email)?;
    let full_name = is_valid_full_name(form.full_name.as_deref())?;

    if users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Database(DatabaseError::UniqueConstraintViolation(
            "Email already registered".to_string(),
        )));
    }

    let hashed_password = hash_password(&form.password)?;
    let user = users
        .insert(NewUser {
            email,
            full_name,
            hashed_password,
        })
        .await?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user.id,
        "User registered successfully"
    );

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// POST /auth/login
///
/// Authenticate with email and password.
/// Returns access token and refresh token on success.
///
/// # Errors
/// - 401: Invalid credentials (email not found or wrong password —
///   deliberately the same response for both)
/// - 500: Internal server error
pub async fn login(
    form: web::Json<LoginRequest>,
    sessions: web::Data<SessionLifecycle>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("user_login");

    let pair = sessions.login(&form.email, &form.password).await?;

    tracing::info!(request_id = %context.request_id, "User logged in successfully");

    Ok(HttpResponse::Ok().json(AuthResponse::new(
        pair.access_token,
        pair.refresh_token,
        jwt_config.get_ref(),
    )))
}

/// POST /auth/refresh
///
/// Exchange a refresh token for a new access token. The refresh token
/// is echoed back unchanged; it stays valid until expiry or logout.
///
/// # Errors
/// - 400: Token is not a refresh token
/// - 401: Invalid, expired, or revoked refresh token
/// - 500: Internal server error
pub async fn refresh(
    form: web::Json<RefreshRequest>,
    sessions: web::Data<SessionLifecycle>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("token_refresh");

    let pair = sessions.refresh(&form.refresh_token).await?;

    tracing::info!(request_id = %context.request_id, "Token refreshed successfully");

    Ok(HttpResponse::Ok().json(AuthResponse::new(
        pair.access_token,
        pair.refresh_token,
        jwt_config.get_ref(),
    )))
}

/// POST /auth/logout
///
/// Revoke the session's refresh token. Acks even when the token was
/// never recorded or is already revoked; only a token that fails to
/// decode is rejected.
///
/// # Errors
/// - 401: Token does not decode
/// - 500: Internal server error
pub async fn logout(
    form: web::Json<RefreshRequest>,
    sessions: web::Data<SessionLifecycle>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("user_logout");

    sessions.logout(&form.refresh_token).await?;

    tracing::info!(request_id = %context.request_id, "User logged out");

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "logged out" })))
}
