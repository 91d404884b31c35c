//! Business logic services shared by the HTTP handlers.

pub mod user_service;
