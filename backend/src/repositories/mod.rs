//! Data access layer over the SQLite pool.

pub mod user_repository;
