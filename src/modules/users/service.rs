//! Credential store.
//!
//! Reads go straight to the pool. The only write, [`CredentialService::create`],
//! takes a transaction handle so that a `user` credential and its addresses land
//! together or not at all.

use std::collections::HashMap;

use anyhow::Context;
use rms_auth::Role;
use rms_core::errors::conflict_or_database;
use rms_core::{AppError, hash_password};
use rms_db::{Tx, with_transaction};
use rms_models::{
    Address, AddressId, CreateAddressDto, CreateSubAdminDto, CreateUserDto, LoginData, User,
    UserId, UserWithAddresses,
};
use sqlx::PgPool;
use tracing::instrument;

const USER_EXISTS_MESSAGE: &str = "User already exists";

const USER_COLUMNS: &str = "id, name, email, role, created_by, created_at, archived_at";

/// A credential waiting to be written. The password is still plaintext; it is
/// hashed by [`CredentialService::register`] once the email is known to be free.
pub struct NewCredential {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    /// `None` records the credential as its own creator
    pub created_by: Option<UserId>,
    pub addresses: Vec<CreateAddressDto>,
}

impl NewCredential {
    pub fn from_user_dto(dto: CreateUserDto, role: Role, created_by: Option<UserId>) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            password: dto.password,
            role,
            created_by,
            addresses: dto.addresses,
        }
    }

    pub fn from_sub_admin_dto(dto: CreateSubAdminDto, created_by: UserId) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            password: dto.password,
            role: Role::SubAdmin,
            created_by: Some(created_by),
            addresses: Vec::new(),
        }
    }
}

pub struct CredentialService;

impl CredentialService {
    /// True iff a live credential already uses this email.
    #[instrument(skip(db, email))]
    pub async fn exists(db: &PgPool, email: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND archived_at IS NULL)",
        )
        .bind(email)
        .fetch_one(db)
        .await
        .context("Failed to check user existence")?;

        Ok(exists)
    }

    /// Inserts the credential and, for the `user` role, each of its addresses.
    ///
    /// Must run inside [`with_transaction`]; a failing address insert leaves
    /// the whole unit to be rolled back.
    pub async fn create(
        tx: &mut Tx,
        credential: &NewCredential,
        password_hash: &str,
    ) -> Result<UserId, AppError> {
        let user_id = UserId::new();
        let created_by = credential.created_by.unwrap_or(user_id);

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password, role, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user_id)
        .bind(&credential.name)
        .bind(&credential.email)
        .bind(password_hash)
        .bind(credential.role)
        .bind(created_by)
        .execute(&mut **tx)
        .await
        .map_err(|e| conflict_or_database(e, USER_EXISTS_MESSAGE, "Failed to insert user"))?;

        if credential.role == Role::User {
            for address in &credential.addresses {
                sqlx::query(
                    r#"
                    INSERT INTO addresses (id, address, latitude, longitude, user_id)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(AddressId::new())
                .bind(&address.address)
                .bind(address.latitude)
                .bind(address.longitude)
                .bind(user_id)
                .execute(&mut **tx)
                .await
                .context("Failed to insert address")?;
            }
        }

        Ok(user_id)
    }

    /// Rejects a taken email, writes the credential atomically and reads it back.
    #[instrument(skip(db, credential), fields(role = %credential.role))]
    pub async fn register(
        db: &PgPool,
        credential: NewCredential,
    ) -> Result<UserWithAddresses, AppError> {
        if Self::exists(db, &credential.email).await? {
            return Err(AppError::conflict(USER_EXISTS_MESSAGE.to_string()));
        }

        // Only pay for bcrypt once the email is known to be free.
        let password_hash = hash_password(&credential.password)?;

        let user_id = with_transaction(db, "create_user", move |tx| {
            Box::pin(async move { Self::create(tx, &credential, &password_hash).await })
        })
        .await?;

        tracing::info!(user_id = %user_id, "Created user");

        Self::find_with_addresses(db, user_id)
            .await?
            .ok_or_else(|| AppError::internal_error(format!("User {} missing after insert", user_id)))
    }

    /// Never returns archived credentials.
    #[instrument(skip(db, email))]
    pub async fn lookup_for_login(db: &PgPool, email: &str) -> Result<Option<LoginData>, AppError> {
        let data = sqlx::query_as::<_, LoginData>(
            "SELECT id, password, role FROM users WHERE email = $1 AND archived_at IS NULL",
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .context("Failed to look up user for login")?;

        Ok(data)
    }

    #[instrument(skip(db))]
    pub async fn find_with_addresses(
        db: &PgPool,
        user_id: UserId,
    ) -> Result<Option<UserWithAddresses>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND archived_at IS NULL"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user")?;

        match user {
            Some(user) => Ok(Self::attach_addresses(db, vec![user]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Live credentials holding `role`, optionally only those made by `created_by`.
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        role: Role,
        created_by: Option<UserId>,
    ) -> Result<Vec<UserWithAddresses>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS} FROM users
            WHERE role = $1
              AND archived_at IS NULL
              AND ($2::uuid IS NULL OR created_by = $2)
            ORDER BY created_at, id
            "#
        ))
        .bind(role)
        .bind(created_by)
        .fetch_all(db)
        .await
        .context("Failed to list users")?;

        Self::attach_addresses(db, users).await
    }

    #[instrument(skip(db))]
    pub async fn addresses(db: &PgPool, user_id: UserId) -> Result<Vec<Address>, AppError> {
        let addresses = sqlx::query_as::<_, Address>(
            r#"
            SELECT id, address, latitude, longitude, user_id, created_at
            FROM addresses
            WHERE user_id = $1 AND archived_at IS NULL
            ORDER BY created_at, id
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch addresses")?;

        Ok(addresses)
    }

    async fn attach_addresses(
        db: &PgPool,
        users: Vec<User>,
    ) -> Result<Vec<UserWithAddresses>, AppError> {
        let ids: Vec<UserId> = users.iter().map(|u| u.id).collect();

        let addresses = sqlx::query_as::<_, Address>(
            r#"
            SELECT id, address, latitude, longitude, user_id, created_at
            FROM addresses
            WHERE user_id = ANY($1) AND archived_at IS NULL
            ORDER BY created_at, id
            "#,
        )
        .bind(&ids)
        .fetch_all(db)
        .await
        .context("Failed to fetch addresses")?;

        let mut by_user: HashMap<UserId, Vec<Address>> = HashMap::new();
        for address in addresses {
            by_user.entry(address.user_id).or_default().push(address);
        }

        Ok(users
            .into_iter()
            .map(|user| UserWithAddresses {
                addresses: by_user.remove(&user.id).unwrap_or_default(),
                user,
            })
            .collect())
    }
}
