pub mod controller;
pub mod distance;
pub mod router;
pub mod service;
