//! App Root Component
//!
//! Root layout (Header, routed main content, Footer) and global providers.

use leptos::*;
use leptos_router::*;

use crate::components::{Header, Toast};
use crate::pages::{CheckIn, Dashboard, Home, Register};
use crate::state::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <Router>
            <div class="d-flex flex-column min-vh-100">
                <Header />

                <main class="container my-5 py-3 flex-grow-1">
                    <Routes>
                        <Route path="/" view=Home />
                        <Route path="/dashboard" view=Dashboard />
                        <Route path="/register" view=Register />
                        <Route path="/check-in" view=CheckIn />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Footer />

                <Toast />
            </div>
        </Router>
    }
}

#[component]
fn Footer() -> impl IntoView {
    let year = chrono::Local::now().format("%Y").to_string();

    view! {
        <footer class="border-top py-3 text-center text-muted small">
            {format!("© {} ERL YEC", year)}
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="text-center">
            <h1 class="h3 mb-2">"Page Not Found"</h1>
            <p class="text-muted mb-4">"The page you're looking for doesn't exist."</p>
            <A href="/" class="btn btn-primary">"Go to Homepage"</A>
        </div>
    }
}
