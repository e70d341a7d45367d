use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use runhub_core::api::GetProjectRepoRequest;
use runhub_core::breadcrumbs;
use runhub_core::routes::RepoRoute;
use runhub_core::RepoInfo;

use crate::api;
use crate::auth::use_auth;
use crate::layout::use_breadcrumbs;

/// Where a deleted run lands.
#[component]
pub fn RepositoryDetails() -> impl IntoView {
    let params = use_params_map();
    let route = Memo::new(move |_| params.with(|p| RepoRoute::from_params(|k| p.get(k))));
    let auth = use_auth();

    let repo = LocalResource::new(move || {
        let RepoRoute { project, repo_id } = route.get();
        let token = auth.token();
        async move { api::call(&token, &GetProjectRepoRequest { project, repo_id }).await }
    });

    use_breadcrumbs(move || {
        let repo_head = repo.get().and_then(Result::ok);
        breadcrumbs::repository_details(&route.get(), repo_head.as_ref())
    });

    view! {
        <div class="space-y-6">
            <Suspense fallback=|| view! { <div class="h-8 bg-slate-800 rounded w-1/3 animate-pulse"></div> }>
                {move || Suspend::new(async move {
                    match repo.await {
                        Ok(head) => {
                            let (kind, location) = match &head.repo_info {
                                RepoInfo::Remote { repo_host_name, repo_port, .. } => (
                                    "Remote",
                                    match repo_port {
                                        Some(port) => format!("{}:{}", repo_host_name, port),
                                        None => repo_host_name.clone(),
                                    },
                                ),
                                RepoInfo::Local { repo_dir } => ("Local", repo_dir.clone()),
                            };
                            view! {
                                <h1 class="text-3xl font-bold text-white">{head.display_name()}</h1>
                                <div class="bg-slate-900 border border-slate-800 rounded-xl p-6 grid grid-cols-1 md:grid-cols-3 gap-6 text-sm">
                                    <div>
                                        <p class="text-xs font-semibold text-slate-500 uppercase mb-1">"Repository ID"</p>
                                        <p class="font-mono text-slate-200">{head.repo_id.clone()}</p>
                                    </div>
                                    <div>
                                        <p class="text-xs font-semibold text-slate-500 uppercase mb-1">"Type"</p>
                                        <p class="text-slate-200">{kind}</p>
                                    </div>
                                    <div>
                                        <p class="text-xs font-semibold text-slate-500 uppercase mb-1">"Location"</p>
                                        <p class="font-mono text-slate-200 break-all">{location}</p>
                                    </div>
                                </div>
                            }
                            .into_any()
                        }
                        Err(e) => view! {
                            <div class="bg-slate-900 border border-red-900/50 rounded-xl p-6 text-red-300 text-sm">
                                "Could not load repository: " {e.message()}
                            </div>
                        }
                        .into_any(),
                    }
                })}
            </Suspense>
        </div>
    }
}
