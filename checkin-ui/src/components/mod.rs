//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod header;
pub mod loading;
pub mod toast;

pub use header::Header;
pub use loading::{InlineLoading, Loading};
pub use toast::Toast;
