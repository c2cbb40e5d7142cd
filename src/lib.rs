//! # Check-in Admin
//!
//! Administrative front-end for a visitor check-in system: registration,
//! check-in/check-out dashboards, active/inactive user counts, deactivation
//! actions and a weekly report download.
//!
//! ## Modules
//!
//! The core modules compile for every target, including `wasm32` where the
//! `checkin-ui` crate uses them:
//!
//! - [`models`]: JSON shapes exchanged with the admin REST API
//! - [`validation`]: Registration form constraints
//! - [`datefmt`]: Human-friendly check-in time formatting
//! - [`report`]: Weekly report range and file naming
//! - [`dashboard`]: Dashboard state bookkeeping (refresh, deactivation, checkout)
//! - [`session`]: Session token storage
//! - [`error`]: API error classification and banner messages
//!
//! With the default `client` feature:
//!
//! - [`config`]: TOML + environment configuration
//! - [`client`]: `reqwest` REST client
//! - [`poller`]: Periodic dashboard refresh on tokio
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use checkin_admin::{AdminApi, AdminClient, Config, FileTokenStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default()?;
//!     let tokens = Arc::new(FileTokenStore::new(config.session.token_path()));
//!     let client = AdminClient::new(config.api.clone(), tokens)?;
//!
//!     let dashboard = client.dashboard().await?;
//!     println!("{} active of {}", dashboard.active_users.len(), dashboard.all_users.len());
//!     Ok(())
//! }
//! ```

pub mod dashboard;
pub mod datefmt;
pub mod error;
pub mod models;
pub mod report;
pub mod session;
pub mod validation;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod config;
#[cfg(feature = "client")]
pub mod poller;

pub use dashboard::{
    DashboardState, RefreshKind, RefreshOutcome, UserCounts, DEFAULT_REFRESH_INTERVAL,
    GENERIC_ERROR_MESSAGE, SESSION_OVER_MESSAGE,
};
pub use datefmt::{format_check_in_time, format_date, format_date_at};
pub use error::{ApiError, ApiResult, ErrorContext};
pub use models::{
    DashboardResponse, DeactivateUserRequest, FieldError, MessageResponse, RegisterRequest, User,
    ValidationErrorBody,
};
pub use report::{weekly_report_filename, WeekRange, REPORT_CONTENT_TYPE};
pub use session::{bearer_header, MemoryTokenStore, TokenStore};
pub use validation::{Field, FormErrors, RegisterForm};

#[cfg(feature = "client")]
pub use client::{AdminApi, AdminClient};
#[cfg(feature = "client")]
pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, SessionConfig};
#[cfg(feature = "client")]
pub use poller::{DashboardPoller, PollerHandle};
#[cfg(feature = "client")]
pub use session::FileTokenStore;
