//! End-to-end tests that drive the full router over an in-memory database.

mod helpers;
mod test_users;
