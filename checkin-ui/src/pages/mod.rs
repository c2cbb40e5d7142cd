//! Page Components
//!
//! One component per route.

pub mod check_in;
pub mod dashboard;
pub mod home;
pub mod register;

pub use check_in::CheckIn;
pub use dashboard::Dashboard;
pub use home::Home;
pub use register::Register;
