//! Check-in Page
//!
//! Where the administrator points the UI at a backend and stores the
//! session token issued by the check-in flow. Verifying the token loads
//! the dashboard.

use checkin_admin::{RefreshKind, RefreshOutcome, TokenStore};
use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::InlineLoading;
use crate::state::{session, use_global_state, LocalStorageTokenStore};

/// Check-in page component
#[component]
pub fn CheckIn() -> impl IntoView {
    view! {
        <div class="mx-auto" style="max-width: 480px">
            <h1 class="h3 mb-3">"Check in"</h1>
            <ApiSettings />
            <SessionSettings />
            <p class="mt-3 text-center">
                "Need an account? "
                <A href="/register">"Register"</A>
            </p>
        </div>
    }
}

/// Backend URL
#[component]
fn ApiSettings() -> impl IntoView {
    let state = use_global_state();
    let (api_url, set_api_url) = create_signal(api::get_api_base());

    let save_url = move |_| match api::set_api_base(&api_url.get()) {
        Ok(()) => state.show_success("API URL saved"),
        Err(e) => state.show_error(&format!("Failed to save API URL: {}", e)),
    };

    view! {
        <section class="mb-4">
            <label class="form-label" for="api-url">"API URL"</label>
            <div class="input-group">
                <input
                    id="api-url"
                    type="text"
                    class="form-control"
                    prop:value=move || api_url.get()
                    on:input=move |ev| set_api_url.set(event_target_value(&ev))
                />
                <button class="btn btn-outline-secondary" type="button" on:click=save_url>
                    "Save"
                </button>
            </div>
            <div class="form-text">{format!("Default: {}", api::DEFAULT_API_BASE)}</div>
        </section>
    }
}

/// Session token entry and verification
#[component]
fn SessionSettings() -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();

    let (token, set_token) =
        create_signal(LocalStorageTokenStore.get().unwrap_or_default());
    let (verifying, set_verifying) = create_signal(false);

    let state_for_verify = state.clone();
    let verify = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if verifying.get_untracked() {
            return;
        }

        let state = state_for_verify.clone();
        if let Err(e) = LocalStorageTokenStore.set(&token.get_untracked()) {
            state.show_error(&format!("Failed to save token: {}", e));
            return;
        }

        set_verifying.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = api::fetch_dashboard().await;
            let outcome = state.dashboard.try_update(|d| {
                d.apply_refresh(RefreshKind::Auto, result, &LocalStorageTokenStore)
            });

            match outcome {
                Some(RefreshOutcome::Updated) => navigate("/dashboard", Default::default()),
                Some(RefreshOutcome::SessionExpired) => {
                    let _ = set_token.try_set(String::new());
                    state.show_error("That session is not active. Check in again.");
                }
                Some(RefreshOutcome::Failed) => state.show_error("Could not reach the server."),
                None => {}
            }
            let _ = set_verifying.try_set(false);
        });
    };

    let state_for_clear = state.clone();
    let clear = move |_| {
        match LocalStorageTokenStore.clear() {
            Ok(()) => {
                set_token.set(String::new());
                state_for_clear.show_success("Session token cleared");
            }
            Err(e) => state_for_clear.show_error(&format!("Failed to clear token: {}", e)),
        }
    };

    view! {
        <section>
            <form on:submit=verify>
                <label class="form-label" for="session-token">"Session token"</label>
                <input
                    id="session-token"
                    type="password"
                    class="form-control mb-2"
                    autocomplete="off"
                    prop:value=move || token.get()
                    on:input=move |ev| set_token.set(event_target_value(&ev))
                />
                <div class="d-flex gap-2">
                    <button
                        class="btn btn-primary flex-grow-1"
                        type="submit"
                        disabled=move || verifying.get() || token.get().trim().is_empty()
                    >
                        {move || if verifying.get() {
                            view! { <InlineLoading /> "Verifying..." }.into_view()
                        } else {
                            "Continue".into_view()
                        }}
                    </button>
                    <button class="btn btn-outline-danger" type="button" on:click=clear>
                        "Clear"
                    </button>
                </div>
            </form>
            <div class="form-text">
                {format!("Stored in this browser under \"{}\".", session::TOKEN_KEY)}
            </div>
        </section>
    }
}
