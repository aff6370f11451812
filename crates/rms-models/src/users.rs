//! Credential and user models.

use chrono::{DateTime, Utc};
use rms_auth::Role;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::addresses::{Address, CreateAddressDto};
use crate::ids::UserId;
use crate::validation::validate_name;

/// A credential as exposed over the API. The password hash never leaves the
/// store layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserWithAddresses {
    #[serde(flatten)]
    pub user: User,
    pub addresses: Vec<Address>,
}

/// Row read at login. Only non-archived credentials are ever returned.
#[derive(Debug, Clone, FromRow)]
pub struct LoginData {
    pub id: UserId,
    pub password: String,
    pub role: Role,
}

/// Body for creating a `user` credential, by signup or on behalf of a caller.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(custom(function = "validate_name", message = "Name may only contain letters and spaces"))]
    pub name: String,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(min = 6, max = 15, message = "Password must be 6 to 15 characters"))]
    #[schema(example = "secret123")]
    pub password: String,
    #[serde(default)]
    #[validate(nested)]
    pub addresses: Vec<CreateAddressDto>,
}

/// Body for creating a `sub-admin` credential. Sub-admins carry no addresses.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSubAdminDto {
    #[validate(custom(function = "validate_name", message = "Name may only contain letters and spaces"))]
    pub name: String,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(min = 6, max = 15, message = "Password must be 6 to 15 characters"))]
    pub password: String,
}
