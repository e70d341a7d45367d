use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};
use lucide_leptos::{Ban, CircleStop, Trash2};
use runhub_core::actions::{self, ActionOutcome, ActionRequest, ActionState, RunAction};
use runhub_core::api::{GetProjectRepoRequest, GetRunRequest};
use runhub_core::format::format_millis_in;
use runhub_core::routes::RunRoute;
use runhub_core::{breadcrumbs, Run, RunStatus};

use crate::api;
use crate::auth::use_auth;
use crate::layout::use_breadcrumbs;
use crate::notifications::use_notifications;

#[component]
pub fn RunDetails() -> impl IntoView {
    let params = use_params_map();
    let route = Memo::new(move |_| params.with(|p| RunRoute::from_params(|k| p.get(k))));
    let auth = use_auth();
    let notifications = use_notifications();
    let navigate = use_navigate();

    let repo = LocalResource::new(move || {
        let RunRoute {
            project, repo_id, ..
        } = route.get();
        let token = auth.token();
        async move { api::call(&token, &GetProjectRepoRequest { project, repo_id }).await }
    });

    let run = LocalResource::new(move || {
        let RunRoute {
            project,
            repo_id,
            run_name,
        } = route.get();
        let token = auth.token();
        async move {
            api::call(
                &token,
                &GetRunRequest {
                    project,
                    repo_id,
                    run_name,
                },
            )
            .await
        }
    });

    use_breadcrumbs(move || {
        let repo_head = repo.get().and_then(Result::ok);
        breadcrumbs::run_details(&route.get(), repo_head.as_ref())
    });

    let (stopping, set_stopping) = signal(false);
    let (deleting, set_deleting) = signal(false);

    let action_state = move || ActionState {
        status: run.get().and_then(Result::ok).map(|r| r.status()),
        stopping: stopping.get(),
        deleting: deleting.get(),
    };

    let run_action = move |action: RunAction| {
        let route = route.get_untracked();
        let token = auth.token();
        let navigate = navigate.clone();
        let in_flight = if action == RunAction::Delete {
            set_deleting
        } else {
            set_stopping
        };
        in_flight.set(true);
        log::info!("{} {}", action.label(), route.run_name);

        spawn_local(async move {
            let result = match action.request(&route) {
                ActionRequest::Stop(req) => api::call(&token, &req).await.map(|_| ()),
                ActionRequest::Delete(req) => api::call(&token, &req).await.map(|_| ()),
            };
            let _ = in_flight.try_set(false);

            match actions::outcome(action, &route, result) {
                ActionOutcome::Navigate(path) => navigate(&path, Default::default()),
                ActionOutcome::Refetch => run.refetch(),
                ActionOutcome::Notify(message) => notifications.error(message),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between pb-6 border-b border-slate-800">
                <h1 class="text-3xl font-bold text-white">{move || route.get().run_name}</h1>
                <div class="flex space-x-2">
                    {RunAction::ALL
                        .into_iter()
                        .map(|action| {
                            let run_action = run_action.clone();
                            let icon = match action {
                                RunAction::Abort => view! { <Ban size=16 /> }.into_any(),
                                RunAction::Stop => view! { <CircleStop size=16 /> }.into_any(),
                                RunAction::Delete => view! { <Trash2 size=16 /> }.into_any(),
                            };
                            view! {
                                <button
                                    on:click=move |_| run_action(action)
                                    disabled=move || action_state().is_disabled(action)
                                    class="flex items-center space-x-2 px-4 py-2 bg-slate-800 hover:bg-slate-700 rounded-lg text-sm transition-colors border border-slate-700 disabled:opacity-40 disabled:cursor-not-allowed disabled:hover:bg-slate-800"
                                >
                                    {icon}
                                    <span>{action.label()}</span>
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            <Suspense fallback=|| view! {
                <div class="bg-slate-900 border border-slate-800 rounded-xl p-6 animate-pulse space-y-3">
                    <div class="h-4 bg-slate-800 rounded w-1/4"></div>
                    <div class="h-4 bg-slate-800 rounded w-1/2"></div>
                </div>
            }>
                {move || Suspend::new(async move {
                    match run.await {
                        Ok(run) => view! { <RunGeneral run=run /> }.into_any(),
                        Err(e) => view! {
                            <div class="bg-slate-900 border border-red-900/50 rounded-xl p-6 text-red-300 text-sm">
                                "Could not load run: " {e.message()}
                            </div>
                        }
                        .into_any(),
                    }
                })}
            </Suspense>
        </div>
    }
}

#[component]
fn RunGeneral(run: Run) -> impl IntoView {
    let head = run.run_head;
    let job = head.first_job().cloned().unwrap_or_default();
    let submitted = format_millis_in(head.submitted_at, &Local);

    view! {
        <div class="bg-slate-900 border border-slate-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4 text-white">"General"</h2>
            <div class="grid grid-cols-1 md:grid-cols-4 gap-6">
                <Field label="Configuration">{job.configuration_path.unwrap_or_default()}</Field>
                <Field label="Instance">{job.instance_type.unwrap_or_default()}</Field>
                <Field label="Hub user name">{head.hub_user_name.unwrap_or_default()}</Field>
                <Field label="Status"><StatusBadge status=head.status /></Field>
                <Field label="Submitted at">{submitted}</Field>
                {job.error_code.map(|code| view! {
                    <Field label="Error"><span class="text-red-400 font-mono">{code}</span></Field>
                })}
            </div>
        </div>
    }
}

#[component]
fn Field(label: &'static str, children: Children) -> impl IntoView {
    view! {
        <div>
            <p class="text-xs font-semibold text-slate-500 uppercase mb-1">{label}</p>
            <div class="text-sm text-slate-200 break-all">{children()}</div>
        </div>
    }
}

#[component]
pub fn StatusBadge(status: RunStatus) -> impl IntoView {
    let (text, dot) = status.indicator().classes();
    view! {
        <span class=format!("inline-flex items-center space-x-2 {}", text)>
            <span class=format!("w-2 h-2 rounded-full {}", dot)></span>
            <span>{status.label()}</span>
        </span>
    }
}
