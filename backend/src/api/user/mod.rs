//! User profile endpoints.

pub mod handlers;
pub mod routes;
