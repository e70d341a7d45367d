use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use lucide_leptos::{CircleAlert, X};
use runhub_core::notify::{NotificationKind, NotificationQueue, AUTO_DISMISS_MS};

/// Toast queue shared by every page.
#[derive(Clone, Copy)]
pub struct Notifications(RwSignal<NotificationQueue>);

impl Notifications {
    pub fn provide() -> Self {
        let ctx = Self(RwSignal::new(NotificationQueue::new()));
        provide_context(ctx);
        ctx
    }

    pub fn push(&self, kind: NotificationKind, content: String) {
        let queue = self.0;
        let Some(id) = queue.try_update(|q| q.push(kind, content)) else {
            return;
        };
        Timeout::new(AUTO_DISMISS_MS, move || {
            let _ = queue.try_update(|q| q.dismiss(id));
        })
        .forget();
    }

    pub fn error(&self, content: String) {
        log::warn!("{}", content);
        self.push(NotificationKind::Error, content);
    }

    pub fn dismiss(&self, id: u64) {
        self.0.update(|q| {
            q.dismiss(id);
        });
    }
}

pub fn use_notifications() -> Notifications {
    expect_context::<Notifications>()
}

#[component]
pub fn NotificationStack() -> impl IntoView {
    let notifications = use_notifications();

    view! {
        <div class="fixed top-4 right-4 z-50 w-96 space-y-2">
            <For
                each=move || notifications.0.with(|q| q.items().to_vec())
                key=|n| n.id
                children=move |n| {
                    let (border, text) = match n.kind {
                        NotificationKind::Error => ("border-red-500/40 bg-red-950/80", "text-red-300"),
                        NotificationKind::Success => ("border-emerald-500/40 bg-emerald-950/80", "text-emerald-300"),
                        NotificationKind::Info => ("border-slate-600 bg-slate-900/90", "text-slate-300"),
                    };
                    let id = n.id;
                    view! {
                        <div class=format!("flex items-start space-x-3 p-4 rounded-xl border shadow-2xl backdrop-blur-sm {}", border)>
                            <div class=text>
                                <CircleAlert size=18 />
                            </div>
                            <p class=format!("flex-grow text-sm {}", text)>{n.content}</p>
                            <button
                                class="text-slate-500 hover:text-white transition-colors"
                                on:click=move |_| notifications.dismiss(id)
                            >
                                <X size=14 />
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
