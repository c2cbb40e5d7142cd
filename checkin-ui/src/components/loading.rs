//! Loading Component
//!
//! Spinner shown while the dashboard performs its first fetch.

use leptos::*;

/// Centered loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="text-center">
            <div class="spinner-border text-primary" role="status">
                <span class="visually-hidden">"Loading..."</span>
            </div>
        </div>
    }
}

/// Inline loading spinner for buttons
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="spinner-border spinner-border-sm me-2" role="status" aria-hidden="true" />
    }
}
