//! Authentication module for user credentials, tokens and access control.
//!
//! This module provides password hashing, token issuance/verification, the
//! authorization gate for protected routes and the login/registration endpoints.

pub mod credentials;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
pub mod token;
