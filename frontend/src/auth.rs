//! Authentication gate around the whole console.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_navigate, use_query_map};
use leptos_router::NavigateOptions;
use lucide_leptos::{KeyRound, LoaderCircle};
use runhub_core::api::GetUserDataRequest;
use runhub_core::auth::{AuthEffects, AuthGate, AuthView, TOKEN_QUERY_PARAM};
use runhub_core::User;

use crate::{api, storage};

#[derive(Clone, Copy)]
pub struct AuthContext {
    gate: RwSignal<AuthGate>,
}

impl AuthContext {
    /// Current token, without subscribing to changes.
    pub fn token(&self) -> String {
        self.gate
            .with_untracked(|g| g.token().map(str::to_string))
            .unwrap_or_default()
    }

    pub fn user(&self) -> Option<User> {
        self.gate.with(|g| g.user().cloned())
    }

    pub fn login(&self, token: &str) {
        let effects = self.gate.try_update(|g| g.login(token)).unwrap_or_default();
        self.apply(effects);
    }

    pub fn logout(&self) {
        log::info!("signing out");
        storage::clear_token();
        self.gate.update(|g| g.logout());
    }

    fn apply(&self, effects: AuthEffects) {
        if let Some(token) = &effects.persist {
            storage::set_token(token);
        }
        if let Some(token) = effects.fetch {
            let gate = self.gate;
            spawn_local(async move {
                match api::call(&token, &GetUserDataRequest {}).await {
                    Ok(user) => {
                        let _ = gate.try_update(|g| g.user_loaded(&token, user));
                    }
                    Err(e) => {
                        let _ = gate.try_update(|g| g.user_failed(&token, e));
                    }
                }
            });
        }
    }
}

pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Renders `children` only once the user is known.
#[component]
pub fn AuthGuard(children: ChildrenFn) -> impl IntoView {
    let ctx = AuthContext {
        gate: RwSignal::new(AuthGate::new(storage::is_available())),
    };
    provide_context(ctx);

    let query = use_query_map();
    let location = use_location();
    let navigate = use_navigate();

    // Runs once: every read below is untracked.
    Effect::new(move |_| {
        let url_token = query.with_untracked(|q| q.get(TOKEN_QUERY_PARAM));
        let stored = storage::token();
        let effects = ctx
            .gate
            .try_update(|g| g.mount(url_token.as_deref(), stored.as_deref()))
            .unwrap_or_default();

        if effects.strip_url {
            let path = location.pathname.get_untracked();
            navigate(
                &path,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
        ctx.apply(effects);
    });

    let view_state = Memo::new(move |_| ctx.gate.with(|g| g.view()));

    move || match view_state.get() {
        AuthView::Loading => view! { <Loading /> }.into_any(),
        AuthView::StorageUnavailable => view! {
            <AuthErrorMessage
                title="Local storage is unavailable"
                text="The console keeps your token in the browser's local storage. Enable it for this site and reload the page.".to_string()
                show_login_form=false
            />
        }
        .into_any(),
        AuthView::InvalidToken(err) => view! {
            <AuthErrorMessage
                title="Invalid token"
                text=format!("The token was rejected ({}). Contact your administrator for a new one.", err)
                show_login_form=true
            />
        }
        .into_any(),
        AuthView::NotLoggedIn => view! {
            <AuthErrorMessage
                title="You are not logged in"
                text="Open the sign-in link from your administrator, or paste your token below.".to_string()
                show_login_form=true
            />
        }
        .into_any(),
        AuthView::Authenticated(_) => children(),
    }
}

#[component]
fn Loading() -> impl IntoView {
    view! {
        <div class="flex h-screen items-center justify-center bg-slate-950 text-slate-400">
            <div class="animate-spin text-blue-500">
                <LoaderCircle size=32 />
            </div>
        </div>
    }
}

#[component]
fn AuthErrorMessage(title: &'static str, text: String, show_login_form: bool) -> impl IntoView {
    let auth = use_auth();
    let (token, set_token) = signal(String::new());

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        auth.login(&token.get_untracked());
    };

    view! {
        <div class="flex h-screen items-center justify-center bg-slate-950 text-slate-100 font-sans p-4">
            <div class="bg-slate-900 border border-slate-800 rounded-2xl w-full max-w-md shadow-2xl p-8 space-y-4">
                <div class="flex items-center space-x-3">
                    <div class="p-2 bg-slate-800 rounded-lg text-blue-400">
                        <KeyRound size=20 />
                    </div>
                    <h1 class="text-xl font-bold text-white">{title}</h1>
                </div>
                <p class="text-sm text-slate-400 leading-relaxed">{text}</p>
                {show_login_form.then(|| view! {
                    <form class="space-y-3 pt-2" on:submit=submit>
                        <input
                            type="password"
                            placeholder="Token"
                            on:input=move |ev| set_token.set(event_target_value(&ev))
                            prop:value=token
                            class="w-full bg-slate-950 border border-slate-800 rounded-lg px-4 py-2 text-white focus:border-blue-500 outline-none"
                        />
                        <button
                            type="submit"
                            disabled=move || token.with(|t| t.trim().is_empty())
                            class="w-full px-6 py-2 bg-blue-600 hover:bg-blue-500 text-white rounded-lg font-medium transition-colors disabled:opacity-50"
                        >
                            "Sign in"
                        </button>
                    </form>
                })}
            </div>
        </div>
    }
}
