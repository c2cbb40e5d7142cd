//! Header Component
//!
//! Fixed navigation bar with the brand, and a greeting plus the checkout
//! action once the administrator is known.

use checkin_admin::ErrorContext;
use leptos::*;
use leptos_router::*;

use crate::api;
use crate::state::{use_global_state, LocalStorageTokenStore};

/// Navigation header component
#[component]
pub fn Header() -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();
    let (checking_out, set_checking_out) = create_signal(false);

    let state_for_checkout = state.clone();
    let check_out = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        if checking_out.get_untracked() {
            return;
        }
        set_checking_out.set(true);

        let state = state_for_checkout.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::deactivate_all_active_users().await {
                Ok(_) => {
                    let mut cleared = Ok(());
                    state
                        .dashboard
                        .update(|d| cleared = d.checkout(&LocalStorageTokenStore));
                    if let Err(e) = cleared {
                        web_sys::console::error_1(
                            &format!("Failed to clear session: {}", e).into(),
                        );
                    }
                    state.show_success("All active users checked out");
                    navigate("/", Default::default());
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Checkout failed: {}", e).into());
                    state.show_error(&e.banner(ErrorContext::Checkout).join(" "));
                }
            }
            set_checking_out.set(false);
        });
    };

    view! {
        <header>
            <nav class="navbar fixed-top bg-white border-bottom border-1">
                <div class="container">
                    <A href="/" class="navbar-brand">"ERL YEC"</A>
                    {move || {
                        state.user().map(|user| {
                            let check_out = check_out.clone();
                            view! {
                                <div class="ms-auto">{format!("Welcome, {}", user.first_name)}</div>
                                <span class="mx-2">"|"</span>
                                <a href="" class="text-danger" on:click=check_out>
                                    {move || if checking_out.get() { "Checking out..." } else { "Check out" }}
                                </a>
                            }
                        })
                    }}
                </div>
            </nav>
        </header>
    }
}
