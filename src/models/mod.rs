//! Diesel models and configuration structures.

pub mod clothing;
pub mod config;
