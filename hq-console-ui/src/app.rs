//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::components::{Nav, RequireAuth, Toast};
use crate::pages::{Dashboard, HqClients, LoginPage};
use crate::state::{provide_global_state, use_global_state};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-100 text-gray-900">
                <Routes>
                    <Route path="/login" view=LoginPage />
                    <Route path="/" view=Shell>
                        <Route path="" view=Dashboard />
                        <Route path="admin/hqclients" view=HqClients />
                    </Route>
                    <Route path="/*any" view=NotFound />
                </Routes>

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// Signed-in layout: sidebar plus the nested route
#[component]
fn Shell() -> impl IntoView {
    view! {
        <RequireAuth>
            <div class="flex">
                <Nav />
                <main class="flex-1 px-8 py-8">
                    <Outlet />
                </main>
                <Footer />
            </div>
        </RequireAuth>
    }
}

/// Loading indicator pinned to the bottom edge
#[component]
fn Footer() -> impl IntoView {
    let state = use_global_state();

    view! {
        {move || {
            if state.loading.get() {
                view! {
                    <div class="fixed bottom-0 left-0 right-0 h-1 bg-blue-600 animate-pulse" />
                }.into_view()
            } else {
                view! {}.into_view()
            }
        }}
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-500 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-blue-600 hover:bg-blue-700 text-white rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
