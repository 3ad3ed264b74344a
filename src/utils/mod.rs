//! Utility functions and helpers

pub mod helpers;
