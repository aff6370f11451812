//! Feature modules. Each one keeps its store queries in `service.rs`, its HTTP
//! handlers in `controller.rs` and its route table in `router.rs`.

pub mod auth;
pub mod dishes;
pub mod restaurants;
pub mod users;
