use axum::{Json, extract::State, http::StatusCode};
use rms_core::AppError;
use rms_models::{
    CreateUserDto, HealthResponse, InfoResponse, LoginRequest, LoginResponse, LogoutResponse,
    UserWithAddresses,
};
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/v1/check",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "Authentication"
)]
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Register as a user
#[utoipa::path(
    post,
    path = "/v1/signup",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Account and addresses created", body = UserWithAddresses),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<UserWithAddresses>), AppError> {
    let user = AuthService::signup(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in and receive a bearer token
#[utoipa::path(
    post,
    path = "/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 201, description = "Session opened", body = LoginResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), AppError> {
    let response = AuthService::login(&state.db, dto, &state.jwt_config).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Revoke the session behind the presented token
#[utoipa::path(
    post,
    path = "/v1/logout",
    responses(
        (status = 200, description = "Session revoked", body = LogoutResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(user_id = %auth.0.user_id))]
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<LogoutResponse>, AppError> {
    AuthService::logout(&state.db, auth.0.session_id).await?;
    Ok(Json(LogoutResponse {
        status: "Logout success".to_string(),
        user_id: auth.0.user_id,
    }))
}

/// Service name and version
#[utoipa::path(
    get,
    path = "/v1/info",
    responses(
        (status = 200, description = "Service information", body = InfoResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn info() -> Json<InfoResponse> {
    Json(InfoResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
