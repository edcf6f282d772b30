//! Utility modules for Logo Fetch
//!
//! - `files`: directory management and source image discovery
//! - `http`: HTTP client utilities

pub mod files;
pub mod http;
