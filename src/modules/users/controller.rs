use axum::{Json, extract::State, http::StatusCode};
use rms_auth::Role;
use rms_core::AppError;
use rms_models::{CreateSubAdminDto, CreateUserDto, UserId, UserWithAddresses};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::{CredentialService, NewCredential};

async fn create_user_for(
    state: &AppState,
    dto: CreateUserDto,
    created_by: UserId,
) -> Result<(StatusCode, Json<UserWithAddresses>), AppError> {
    let credential = NewCredential::from_user_dto(dto, Role::User, Some(created_by));
    let user = CredentialService::register(&state.db, credential).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Create a sub-admin
#[utoipa::path(
    post,
    path = "/v1/admin/create-sub-admin",
    request_body = CreateSubAdminDto,
    responses(
        (status = 201, description = "Sub-admin created", body = UserWithAddresses),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip_all, fields(caller = %auth.0.user_id))]
pub async fn create_sub_admin(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateSubAdminDto>,
) -> Result<(StatusCode, Json<UserWithAddresses>), AppError> {
    let credential = NewCredential::from_sub_admin_dto(dto, auth.0.user_id);
    let sub_admin = CredentialService::register(&state.db, credential).await?;
    Ok((StatusCode::CREATED, Json(sub_admin)))
}

/// List all sub-admins
#[utoipa::path(
    get,
    path = "/v1/admin/get-sub-admins",
    responses(
        (status = 200, description = "Live sub-admins", body = Vec<UserWithAddresses>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip_all)]
pub async fn get_sub_admins(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserWithAddresses>>, AppError> {
    let sub_admins = CredentialService::list(&state.db, Role::SubAdmin, None).await?;
    Ok(Json(sub_admins))
}

/// Create a user with addresses
#[utoipa::path(
    post,
    path = "/v1/admin/create-user",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User and addresses created", body = UserWithAddresses),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip_all, fields(caller = %auth.0.user_id))]
pub async fn admin_create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<UserWithAddresses>), AppError> {
    create_user_for(&state, dto, auth.0.user_id).await
}

/// List all users
#[utoipa::path(
    get,
    path = "/v1/admin/get-users",
    responses(
        (status = 200, description = "Live users with their addresses", body = Vec<UserWithAddresses>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip_all)]
pub async fn admin_get_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserWithAddresses>>, AppError> {
    let users = CredentialService::list(&state.db, Role::User, None).await?;
    Ok(Json(users))
}

/// Create a user with addresses
#[utoipa::path(
    post,
    path = "/v1/sub-admin/create-user",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User and addresses created", body = UserWithAddresses),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a sub-admin", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sub-admin"
)]
#[instrument(skip_all, fields(caller = %auth.0.user_id))]
pub async fn sub_admin_create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<UserWithAddresses>), AppError> {
    create_user_for(&state, dto, auth.0.user_id).await
}

/// List the users created by the calling sub-admin
#[utoipa::path(
    get,
    path = "/v1/sub-admin/get-users",
    responses(
        (status = 200, description = "Users created by the caller", body = Vec<UserWithAddresses>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a sub-admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sub-admin"
)]
#[instrument(skip_all, fields(caller = %auth.0.user_id))]
pub async fn sub_admin_get_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<UserWithAddresses>>, AppError> {
    let users = CredentialService::list(&state.db, Role::User, Some(auth.0.user_id)).await?;
    Ok(Json(users))
}
