//! Accounts Overview Component
//!
//! Table of every account summary. Clicking a row selects the account.

use leptos::*;

use crate::format::{format_count, format_thousands};
use crate::state::global::AccountStats;

/// Summary table
#[component]
pub fn AccountsOverview(
    #[prop(into)]
    summaries: Signal<Vec<AccountStats>>,
    #[prop(into)]
    selected: Signal<Option<String>>,
    on_select: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl shadow-sm border border-gray-200 overflow-x-auto">
            <table class="min-w-full text-sm">
                <thead class="bg-gray-50 text-gray-500 uppercase text-xs">
                    <tr>
                        <th class="px-4 py-3 text-left">"Account"</th>
                        <th class="px-4 py-3 text-right">"Posts"</th>
                        <th class="px-4 py-3 text-right">"Views"</th>
                        <th class="px-4 py-3 text-right">"Likes"</th>
                        <th class="px-4 py-3 text-right">"Comments"</th>
                        <th class="px-4 py-3 text-right">"Shares"</th>
                        <th class="px-4 py-3 text-right">"Avg Views/Post"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let current = selected.get();
                        summaries.get()
                            .into_iter()
                            .map(|s| {
                                let highlighted = current.as_deref() == Some(s.username.as_str());
                                let account = s.username.clone();
                                view! {
                                    <tr
                                        class=if highlighted {
                                            "border-t border-gray-100 bg-blue-50 cursor-pointer"
                                        } else {
                                            "border-t border-gray-100 hover:bg-gray-50 cursor-pointer"
                                        }
                                        on:click=move |_| on_select.call(account.clone())
                                    >
                                        <td class="px-4 py-3 font-medium">{format!("@{}", s.username)}</td>
                                        <td class="px-4 py-3 text-right">{format_count(s.total_posts)}</td>
                                        <td class="px-4 py-3 text-right">{format_count(s.total_views)}</td>
                                        <td class="px-4 py-3 text-right">{format_count(s.total_likes)}</td>
                                        <td class="px-4 py-3 text-right">{format_count(s.total_comments)}</td>
                                        <td class="px-4 py-3 text-right">{format_count(s.total_shares)}</td>
                                        <td class="px-4 py-3 text-right">{format_thousands(s.avg_views_per_post)}</td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}
