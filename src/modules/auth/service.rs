use rms_auth::{Role, create_access_token};
use rms_config::JwtConfig;
use rms_core::{AppError, verify_against_dummy, verify_password};
use rms_models::{CreateUserDto, LoginRequest, LoginResponse, SessionId, UserWithAddresses};
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::users::service::{CredentialService, NewCredential};

use super::session::SessionService;

pub struct AuthService;

impl AuthService {
    /// Self-service registration. The new credential is always a `user` and
    /// is recorded as its own creator.
    #[instrument(skip(db, dto))]
    pub async fn signup(db: &PgPool, dto: CreateUserDto) -> Result<UserWithAddresses, AppError> {
        CredentialService::register(db, NewCredential::from_user_dto(dto, Role::User, None)).await
    }

    /// Verifies credentials, opens a session and mints a token for it.
    ///
    /// An unknown email and a wrong password produce the same error, cost the
    /// same bcrypt verification, and neither creates a session.
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let Some(credential) = CredentialService::lookup_for_login(db, &dto.email).await? else {
            verify_against_dummy(&dto.password);
            return Err(AppError::invalid_credentials());
        };

        if !verify_password(&dto.password, &credential.password)? {
            return Err(AppError::invalid_credentials());
        }

        let session_id = SessionService::create(db, credential.id).await?;
        let token = create_access_token(
            credential.id.into_inner(),
            credential.role,
            session_id.into_inner(),
            jwt_config,
        )?;

        tracing::info!(user_id = %credential.id, session_id = %session_id, "User logged in");

        Ok(LoginResponse {
            status: "Login success".to_string(),
            token,
        })
    }

    #[instrument(skip(db))]
    pub async fn logout(db: &PgPool, session_id: SessionId) -> Result<(), AppError> {
        SessionService::revoke(db, session_id).await
    }
}
