//! Application shell: sidebar, breadcrumb bar and the notification stack.

use leptos::prelude::*;
use leptos_router::components::A;
use lucide_leptos::{ChevronRight, FolderKanban, LogOut, Rocket, Settings as SettingsIcon};
use runhub_core::{routes, Breadcrumb};

use crate::auth::use_auth;
use crate::notifications::NotificationStack;

/// Navigation trail of the current page.
#[derive(Clone, Copy)]
pub struct Breadcrumbs(RwSignal<Vec<Breadcrumb>>);

impl Breadcrumbs {
    pub fn provide() {
        provide_context(Self(RwSignal::new(Vec::new())));
    }
}

/// Keep the breadcrumb bar in sync with `crumbs` while the calling page is mounted.
pub fn use_breadcrumbs(crumbs: impl Fn() -> Vec<Breadcrumb> + 'static) {
    let Breadcrumbs(trail) = expect_context::<Breadcrumbs>();
    Effect::new(move |_| trail.set(crumbs()));
    on_cleanup(move || {
        let _ = trail.try_set(Vec::new());
    });
}

#[component]
pub fn AppLayout(children: Children) -> impl IntoView {
    let auth = use_auth();
    let Breadcrumbs(trail) = expect_context::<Breadcrumbs>();
    let user_name = move || auth.user().map(|u| u.user_name).unwrap_or_default();

    view! {
        <div class="flex h-screen bg-slate-950 text-slate-100 font-sans">
            // Sidebar
            <nav class="w-64 border-r border-slate-800 flex flex-col p-4 bg-slate-900/50">
                <div class="flex items-center space-x-3 px-2 py-6 mb-6">
                    <div class="p-2 bg-blue-600 rounded-lg shadow-lg shadow-blue-900/20">
                        <Rocket size=24 />
                    </div>
                    <span class="text-2xl font-bold tracking-tight text-white">"runhub"</span>
                </div>

                <div class="space-y-1">
                    <A href=routes::PROJECT_LIST attr:class="flex items-center space-x-3 px-4 py-3 rounded-xl hover:bg-slate-800 transition-all duration-200 text-slate-400 hover:text-white group">
                        <div class="group-hover:text-blue-400 transition-colors">
                            <FolderKanban size=20 />
                        </div>
                        <span class="font-medium">"Projects"</span>
                    </A>
                </div>

                <div class="mt-auto space-y-1">
                    <A href=routes::SETTINGS attr:class="flex items-center space-x-3 px-4 py-3 rounded-xl hover:bg-slate-800 transition-all duration-200 text-slate-400 hover:text-white group">
                        <div class="group-hover:text-blue-400 transition-colors">
                            <SettingsIcon size=20 />
                        </div>
                        <span class="font-medium">"Settings"</span>
                    </A>
                    <div class="flex items-center justify-between px-4 py-3 border-t border-slate-800 mt-2">
                        <span class="text-sm text-slate-400 truncate">{user_name}</span>
                        <button
                            on:click=move |_| auth.logout()
                            class="text-slate-500 hover:text-red-400 transition-colors"
                            title="Sign out"
                        >
                            <LogOut size=16 />
                        </button>
                    </div>
                </div>
            </nav>

            // Main Content
            <main class="flex-grow overflow-auto p-8 space-y-6">
                <BreadcrumbBar trail=trail />
                {children()}
            </main>

            <NotificationStack />
        </div>
    }
}

#[component]
fn BreadcrumbBar(trail: RwSignal<Vec<Breadcrumb>>) -> impl IntoView {
    view! {
        <ol class="flex items-center flex-wrap text-sm text-slate-500 empty:hidden">
            {move || {
                let crumbs = trail.get();
                let last = crumbs.len().saturating_sub(1);
                crumbs
                    .into_iter()
                    .enumerate()
                    .map(|(i, crumb)| {
                        let item = if i == last {
                            view! { <span class="text-slate-200">{crumb.text}</span> }.into_any()
                        } else {
                            view! {
                                <A href=crumb.href attr:class="hover:text-blue-400 transition-colors">{crumb.text}</A>
                                <span class="mx-2 text-slate-700"><ChevronRight size=14 /></span>
                            }
                            .into_any()
                        };
                        view! { <li class="flex items-center">{item}</li> }
                    })
                    .collect_view()
            }}
        </ol>
    }
}
