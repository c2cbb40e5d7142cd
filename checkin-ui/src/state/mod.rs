//! State Management
//!
//! Global application state and browser session storage.

pub mod global;
pub mod session;

pub use global::{provide_global_state, use_global_state, GlobalState};
pub use session::LocalStorageTokenStore;
