//! Admin API
//!
//! HTTP client for the admin REST API and browser download helpers.

pub mod client;
pub mod download;

pub use client::*;
pub use download::save_bytes;
