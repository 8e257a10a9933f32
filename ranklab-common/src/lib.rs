//! # RankLab Common Library
//!
//! Shared code for the RankLab listening-test modules:
//! - Error type used across the workspace
//! - Session event types (SessionEvent enum)
//! - Configuration loading and root folder resolution
//! - Timestamp/filename helpers

pub mod config;
pub mod error;
pub mod events;
pub mod time;

pub use config::Settings;
pub use error::{Error, Result};
