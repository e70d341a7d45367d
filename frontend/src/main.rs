use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes, A};
use leptos_router::path;
use runhub_core::routes;

mod api;
mod auth;
mod layout;
mod notifications;
mod pages;
mod storage;

use auth::AuthGuard;
use layout::{AppLayout, Breadcrumbs};
use notifications::Notifications;
use pages::{ProjectRepositories, Projects, RepositoryDetails, RunDetails, SettingsPage};

#[component]
fn App() -> impl IntoView {
    Notifications::provide();
    Breadcrumbs::provide();

    view! {
        <Router>
            <AuthGuard>
                <AppLayout>
                    <Routes fallback=|| view! { <NotFound /> }.into_any()>
                        <Route path=path!("/") view=|| view! { <Redirect path=routes::PROJECT_LIST /> } />
                        <Route path=path!("/projects") view=Projects />
                        <Route path=path!("/projects/:name/repositories") view=ProjectRepositories />
                        <Route path=path!("/projects/:name/repositories/:repoId") view=RepositoryDetails />
                        <Route path=path!("/projects/:name/repositories/:repoId/runs/:runName") view=RunDetails />
                        <Route path=path!("/settings") view=SettingsPage />
                    </Routes>
                </AppLayout>
            </AuthGuard>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center h-full space-y-4">
            <h1 class="text-4xl font-bold">"404"</h1>
            <p class="text-slate-400">"Page not found"</p>
            <A href=routes::PROJECT_LIST attr:class="text-blue-400 hover:underline">"Back to Projects"</A>
        </div>
    }
}

fn main() {
    let level = if storage::debug_enabled() {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    _ = console_log::init_with_level(level);
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
