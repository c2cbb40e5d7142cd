//! Toast Notification Component
//!
//! Shows success and error messages.

use leptos::*;

use crate::state::use_global_state;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_global_state();

    view! {
        <div class="position-fixed bottom-0 end-0 p-3" style="z-index: 1080">
            {move || {
                state.success.get().map(|msg| view! {
                    <ToastMessage message=msg variant=ToastVariant::Success />
                })
            }}

            {move || {
                state.error.get().map(|msg| view! {
                    <ToastMessage message=msg variant=ToastVariant::Error />
                })
            }}
        </div>
    }
}

#[derive(Clone, Copy)]
enum ToastVariant {
    Success,
    Error,
}

#[component]
fn ToastMessage(
    #[prop(into)]
    message: String,
    variant: ToastVariant,
) -> impl IntoView {
    let class = match variant {
        ToastVariant::Success => "alert alert-success shadow-sm mb-2",
        ToastVariant::Error => "alert alert-danger shadow-sm mb-2",
    };

    view! {
        <div class=class role="alert">{message}</div>
    }
}
