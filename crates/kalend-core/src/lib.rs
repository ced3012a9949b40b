//! Shared configuration, constants and error types for the kalend crates.

pub mod config;
pub mod constants;
pub mod error;
