//! Dashboard Page
//!
//! Registered / active / inactive counts, the active users table with
//! per-user deactivation, and the weekly report download. Fetches on mount
//! with a spinner and refreshes silently every minute while mounted.

use checkin_admin::{
    format_check_in_time, weekly_report_filename, ErrorContext, RefreshKind, User,
    DEFAULT_REFRESH_INTERVAL, REPORT_CONTENT_TYPE,
};
use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{InlineLoading, Loading};
use crate::state::{use_global_state, GlobalState, LocalStorageTokenStore};

fn refresh(state: GlobalState, kind: RefreshKind) {
    spawn_local(async move {
        let started = state.dashboard.try_update(|d| d.begin_refresh(kind));
        if started.is_none() {
            return;
        }

        let result = api::fetch_dashboard().await;
        if let Err(e) = &result {
            web_sys::console::error_1(&format!("Dashboard fetch failed: {}", e).into());
        }

        state
            .dashboard
            .try_update(|d| d.apply_refresh(kind, result, &LocalStorageTokenStore));
    });
}

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_global_state();
    let dashboard = state.dashboard;

    refresh(state.clone(), RefreshKind::Initial);

    let state_for_timer = state.clone();
    let interval = gloo_timers::callback::Interval::new(
        DEFAULT_REFRESH_INTERVAL.as_millis() as u32,
        move || refresh(state_for_timer.clone(), RefreshKind::Auto),
    );
    on_cleanup(move || drop(interval));

    view! {
        {move || dashboard.with(|d| d.error.clone()).map(|error| view! {
            <div class="alert alert-danger mx-auto text-center" style="max-width: 360px">
                <p class="mb-1">{error}</p>
                <A href="/">"Go to Homepage."</A>
            </div>
        })}

        {move || dashboard.with(|d| d.loading).then(|| view! { <Loading /> })}

        {move || dashboard.with(|d| d.notice.clone()).map(|notice| view! {
            <div class="alert alert-warning mx-auto text-center" style="max-width: 300px">
                <p class="mb-1">{notice}</p>
                <A href="/check-in">"Check in"</A>
            </div>
        })}

        {move || dashboard.with(|d| d.shows_panel()).then(|| view! {
            <div class="d-flex h-100 border rounded">
                <Summary />
                <div class="flex-grow-1 p-3">
                    <ActiveUsers />
                </div>
            </div>
        })}
    }
}

/// Sidebar with counts and the report button
#[component]
fn Summary() -> impl IntoView {
    let state = use_global_state();
    let dashboard = state.dashboard;
    let counts = create_memo(move |_| dashboard.with(|d| d.counts()));
    let (generating, set_generating) = create_signal(false);

    let generate_report = move |_| {
        set_generating.set(true);
        let state = state.clone();
        spawn_local(async move {
            match api::fetch_weekly_report().await {
                Ok(bytes) => {
                    let filename = weekly_report_filename(chrono::Local::now().date_naive());
                    match api::save_bytes(&bytes, &filename, REPORT_CONTENT_TYPE) {
                        Ok(_) => state.show_success(&format!("Downloaded {}", filename)),
                        Err(e) => {
                            web_sys::console::error_1(&e.clone().into());
                            state.show_error(ErrorContext::Report.generic_message());
                        }
                    }
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Report failed: {}", e).into());
                    state.show_error(&e.banner(ErrorContext::Report).join(" "));
                }
            }
            set_generating.set(false);
        });
    };

    view! {
        <div
            class="sidebar bg-light rounded-start p-3 d-flex flex-column"
            style="min-width: 240px"
        >
            <div>
                <div class="mb-3">
                    <span class="h1 text-primary">{move || counts.get().registered}</span>
                    <span class="ms-1 text-muted fw-bold">"Registered"</span>
                </div>
                <div class="mb-3">
                    <span class="h3 text-success">{move || counts.get().active}</span>
                    <span class="ms-1 text-muted fw-bold">"Active"</span>
                </div>
                <div>
                    <span class="h5 text-danger">{move || counts.get().inactive}</span>
                    <span class="ms-1 text-muted fw-bold">"Inactive"</span>
                </div>
            </div>
            <div class="mt-auto">
                <button
                    class="btn btn-primary w-100"
                    type="button"
                    on:click=generate_report
                    disabled=move || generating.get()
                >
                    {move || if generating.get() {
                        view! { <InlineLoading /> "Generating..." }.into_view()
                    } else {
                        "Generate weekly report".into_view()
                    }}
                </button>
            </div>
        </div>
    }
}

/// Active users table
#[component]
fn ActiveUsers() -> impl IntoView {
    let state = use_global_state();
    let dashboard = state.dashboard;

    view! {
        {move || {
            let users = dashboard.with(|d| d.active_users.clone());
            if users.is_empty() {
                view! { <p>"No active users are available."</p> }.into_view()
            } else {
                view! {
                    <div class="table-responsive">
                        <table class="table table-hover caption-top">
                            <caption>"Active Users"</caption>
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Check-in time"</th>
                                    <th>"Purpose"</th>
                                    <th />
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || users.clone()
                                    key=|user| user.id.clone()
                                    children=move |user| view! { <ActiveUserRow user=user /> }
                                />
                            </tbody>
                        </table>
                    </div>
                }.into_view()
            }
        }}
    }
}

#[component]
fn ActiveUserRow(user: User) -> impl IntoView {
    let state = use_global_state();
    let (pending, set_pending) = create_signal(false);

    let user_id = user.id.clone();
    let deactivate = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        set_pending.set(true);

        let state = state.clone();
        let user_id = user_id.clone();
        spawn_local(async move {
            match api::deactivate_user(&user_id).await {
                Ok(ack) => {
                    state.dashboard.update(|d| {
                        d.remove_active(&user_id);
                    });
                    if !ack.msg.is_empty() {
                        state.show_success(&ack.msg);
                    }
                }
                Err(e) => {
                    state
                        .dashboard
                        .update(|d| d.record_error(&e, ErrorContext::Deactivate));
                    let _ = set_pending.try_set(false);
                }
            }
        });
    };

    view! {
        <tr>
            <td>{user.display_name()}</td>
            <td>{format_check_in_time(user.check_in_time)}</td>
            <td>{user.purpose_or_empty().to_string()}</td>
            <td>
                <a href="" class="text-danger" on:click=deactivate>
                    {move || if pending.get() { "Deactivating..." } else { "Deactivate" }}
                </a>
            </td>
        </tr>
    }
}
