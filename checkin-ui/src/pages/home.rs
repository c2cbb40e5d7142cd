//! Home Page

use leptos::*;
use leptos_router::*;

/// Landing page
#[component]
pub fn Home() -> impl IntoView {
    view! {
        <div class="text-center mx-auto" style="max-width: 480px">
            <h1 class="h2 mb-3">"Check-in Administration"</h1>
            <p class="text-muted">
                "Track who is checked in, deactivate users and download weekly reports."
            </p>
            <div class="d-flex justify-content-center gap-2">
                <A href="/check-in" class="btn btn-primary">"Check in"</A>
                <A href="/register" class="btn btn-outline-primary">"Register"</A>
                <A href="/dashboard" class="btn btn-outline-secondary">"Dashboard"</A>
            </div>
        </div>
    }
}
