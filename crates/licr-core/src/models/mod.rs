//! Data models for licence extraction.

pub mod config;
pub mod record;
