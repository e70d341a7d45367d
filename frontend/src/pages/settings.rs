use leptos::prelude::*;
use runhub_core::breadcrumbs;

use crate::layout::use_breadcrumbs;
use crate::storage;

#[component]
pub fn SettingsPage() -> impl IntoView {
    use_breadcrumbs(breadcrumbs::settings);

    let (debug_enabled, set_debug_enabled) = signal(storage::debug_enabled());

    Effect::new(move |_| storage::set_debug_enabled(debug_enabled.get()));

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold text-white">"Settings"</h1>
            <div class="bg-slate-900 border border-slate-800 rounded-2xl p-6 space-y-6">
                <div class="flex items-center justify-between">
                    <div>
                        <h3 class="text-lg font-medium text-white">"Debug Logs"</h3>
                        <p class="text-sm text-slate-400">"Log API requests and auth decisions to the browser console. Requires page reload."</p>
                    </div>
                    <button
                        on:click=move |_| set_debug_enabled.update(|v| *v = !*v)
                        class=move || format!(
                            "w-12 h-6 rounded-full transition-colors relative {}",
                            if debug_enabled.get() { "bg-blue-600" } else { "bg-slate-700" }
                        )
                    >
                        <div class=move || format!(
                            "absolute top-1 left-1 w-4 h-4 bg-white rounded-full transition-transform {}",
                            if debug_enabled.get() { "translate-x-6" } else { "" }
                        )></div>
                    </button>
                </div>
            </div>
        </div>
    }
}
