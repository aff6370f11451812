//! # RMS Auth
//!
//! Roles, token claims and the JWT codec for the RMS API.
//!
//! - [`role`]: the closed set of access levels
//! - [`claims`]: the claim bundle carried by a bearer token
//! - [`jwt`]: token minting and verification
//!
//! A token only proves what was true when it was minted. Whether the session
//! it references is still alive is decided per request by the authentication
//! middleware in the application crate.
//!
//! # Example
//!
//! ```ignore
//! use rms_auth::{Role, create_access_token, verify_token};
//! use rms_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, Role::Admin, session_id, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, Role::Admin);
//! ```

pub mod claims;
pub mod jwt;
pub mod role;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{TokenError, create_access_token, create_token_with_ttl, verify_token};
pub use role::{Role, UnknownRole};
