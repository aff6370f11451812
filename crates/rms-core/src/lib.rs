//! # RMS Core
//!
//! Core types and utilities shared across the RMS API crates.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: Password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use rms_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("secret1")?;
//! if !verify_password("secret1", &hash)? {
//!     return Err(AppError::invalid_credentials());
//! }
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{hash_password, verify_against_dummy, verify_password};
