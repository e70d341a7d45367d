use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use lucide_leptos::FolderKanban;
use runhub_core::routes::RunRoute;
use runhub_core::breadcrumbs;

use crate::layout::use_breadcrumbs;

#[component]
pub fn Projects() -> impl IntoView {
    use_breadcrumbs(breadcrumbs::project_list);

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold text-white">"Projects"</h1>
            <div class="bg-slate-900 border border-slate-800 rounded-xl p-12 flex flex-col items-center text-center space-y-4">
                <div class="p-4 bg-slate-800 rounded-full text-blue-500">
                    <FolderKanban size=48 />
                </div>
                <p class="text-slate-400 max-w-sm">"Open a run link to inspect and control it here."</p>
            </div>
        </div>
    }
}

#[component]
pub fn ProjectRepositories() -> impl IntoView {
    let params = use_params_map();
    let project = move || {
        params
            .read()
            .get(RunRoute::PROJECT_PARAM)
            .unwrap_or_default()
    };

    use_breadcrumbs(move || breadcrumbs::project_repositories(&project()));

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold text-white">{project}</h1>
            <p class="text-slate-400">"Repositories are read from the fixture file passed to runhub serve --fixtures."</p>
        </div>
    }
}
