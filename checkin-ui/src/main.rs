//! Check-in Admin Dashboard
//!
//! Administrative front-end for the visitor check-in system, built with
//! Leptos (WASM).
//!
//! # Features
//!
//! - Registration form with client-side validation
//! - Dashboard with registered / active / inactive counts, auto-refreshed
//!   every minute
//! - Per-user deactivation and checkout of all active users
//! - Weekly report download
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the admin REST API over HTTP and keeps the
//! session token in `localStorage`. Models, validation, formatting and the
//! dashboard state transitions come from the `checkin-admin` crate.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
