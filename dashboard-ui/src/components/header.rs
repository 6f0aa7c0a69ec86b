//! Header Component
//!
//! Top bar with the dashboard title and a loading indicator.

use leptos::*;
use leptos_router::*;

use crate::state::global::GlobalState;

/// Dashboard header
#[component]
pub fn Header() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <header class="bg-white border-b border-gray-200 shadow-sm">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"📈"</span>
                        <span class="text-xl font-bold">"TikTok Analytics Dashboard"</span>
                    </A>

                    {move || {
                        if state.loading.get() {
                            view! {
                                <div class="flex items-center space-x-2 text-blue-600 text-sm">
                                    <div class="loading-spinner w-4 h-4" />
                                    <span>"Loading..."</span>
                                </div>
                            }.into_view()
                        } else {
                            view! {}.into_view()
                        }
                    }}
                </div>
            </div>
        </header>
    }
}
