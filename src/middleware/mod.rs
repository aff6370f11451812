//! Request gates.
//!
//! - [`auth`]: the authentication gate. Verifies the bearer token, re-reads the
//!   session it references and attaches a [`auth::RequestIdentity`].
//! - [`role`]: the authorization gate. Compares that identity's role to the one
//!   a route group requires.
//!
//! Both run as `route_layer`s, so unmatched paths still 404 instead of 401.
//!
//! ```ignore
//! Router::new()
//!     .route("/get-users", get(get_users))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//!
//! async fn get_users(AuthUser(identity): AuthUser) -> impl IntoResponse {
//!     // identity.role == Role::Admin here
//! }
//! ```

pub mod auth;
pub mod role;
