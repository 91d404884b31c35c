//! Collection of general utility functions.

pub mod validators;
