// src/utils/mod.rs

//! Utility functions and helpers.

pub mod text;
pub mod url;
