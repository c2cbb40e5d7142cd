//! Registration Page
//!
//! Account form validated field by field as the user types; the backend's
//! own validation errors are listed above the form.

use checkin_admin::{ErrorContext, Field, FormErrors, RegisterForm};
use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::InlineLoading;
use crate::state::use_global_state;

/// Delay before leaving the page after a successful registration
const REDIRECT_DELAY_MS: u32 = 1500;

/// Registration page component
#[component]
pub fn Register() -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();

    let form = create_rw_signal(RegisterForm::default());
    // Fields the user has edited or submitted; only these show messages
    let touched = create_rw_signal(Vec::<Field>::new());
    let (submitting, set_submitting) = create_signal(false);
    let (server_errors, set_server_errors) = create_signal(Vec::<String>::new());
    let (success, set_success) = create_signal(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        touched.set(Field::ALL.to_vec());
        let request = match form.with_untracked(|f| f.validate()) {
            Ok(request) => request,
            Err(errors) => {
                log_invalid(&errors);
                return;
            }
        };

        set_submitting.set(true);
        set_server_errors.set(Vec::new());
        set_success.set(None);

        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::register(&request).await {
                Ok(ack) => {
                    let _ = set_success.try_set(Some(ack.msg.clone()));
                    if !ack.msg.is_empty() {
                        state.show_success(&ack.msg);
                    }
                    gloo_timers::callback::Timeout::new(REDIRECT_DELAY_MS, move || {
                        navigate("/check-in", Default::default());
                    })
                    .forget();
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Registration failed: {}", e).into());
                    let _ = set_server_errors.try_set(e.banner(ErrorContext::Register));
                }
            }
            let _ = set_submitting.try_set(false);
        });
    };

    view! {
        <div class="mx-auto" style="max-width: 480px">
            <h1 class="h3 mb-3">"Register"</h1>

            {move || {
                let errors = server_errors.get();
                (!errors.is_empty()).then(|| view! {
                    <div class="alert alert-danger">
                        <ul class="mb-0">
                            {errors.into_iter().map(|e| view! { <li>{e}</li> }).collect_view()}
                        </ul>
                    </div>
                })
            }}

            {move || success.get().filter(|m| !m.is_empty()).map(|msg| view! {
                <div class="alert alert-success">{msg}</div>
            })}

            <form on:submit=on_submit novalidate=true>
                {Field::ALL
                    .into_iter()
                    .map(|field| view! { <FormField field=field form=form touched=touched /> })
                    .collect_view()}

                <button
                    class="btn btn-primary w-100"
                    type="submit"
                    disabled=move || submitting.get()
                >
                    {move || if submitting.get() {
                        view! { <InlineLoading /> "Registering..." }.into_view()
                    } else {
                        "Register".into_view()
                    }}
                </button>
            </form>

            <p class="mt-3 text-center">
                "Already have an account? "
                <A href="/check-in">"Check in"</A>
            </p>
        </div>
    }
}

/// A labelled input bound to one form field
#[component]
fn FormField(
    field: Field,
    form: RwSignal<RegisterForm>,
    touched: RwSignal<Vec<Field>>,
) -> impl IntoView {
    let input_type = match field {
        Field::Password | Field::ConfirmPassword => "password",
        _ => "text",
    };
    let error = move || {
        if touched.with(|t| t.contains(&field)) {
            form.with(|f| f.check(field))
        } else {
            None
        }
    };

    view! {
        <div class="mb-3">
            <label class="form-label" for=field.name()>{field.label()}</label>
            <input
                id=field.name()
                name=field.name()
                type=input_type
                class=move || if error().is_some() { "form-control is-invalid" } else { "form-control" }
                prop:value=move || form.with(|f| f.value(field).to_string())
                on:input=move |ev| {
                    form.update(|f| f.set(field, event_target_value(&ev)));
                    touched.update(|t| {
                        if !t.contains(&field) {
                            t.push(field);
                        }
                    });
                }
            />
            {move || error().map(|msg| view! { <div class="invalid-feedback">{msg}</div> })}
        </div>
    }
}

fn log_invalid(errors: &FormErrors) {
    web_sys::console::warn_1(&format!("Registration form invalid:\n{}", errors).into());
}
