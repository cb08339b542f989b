// src/lib.rs

//! Thread post cleaning and deduplication library

pub mod error;
pub mod models;
pub mod patterns;
pub mod pipeline;
pub mod services;
pub mod utils;
