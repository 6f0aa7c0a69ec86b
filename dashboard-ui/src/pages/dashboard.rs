//! Dashboard Page
//!
//! Account picker, accounts overview, and the selected account's stats,
//! daily views and top posts.

use leptos::*;

use crate::api;
use crate::components::{
    AccountSelector, AccountsOverview, CardSkeleton, DailyViewsChart, StatColor, StatsCard,
    TopPostsTable,
};
use crate::format::format_count;
use crate::state::global::{initial_selection, AccountStats, GlobalState};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Fetch accounts and summaries on mount
    let state_for_mount = state.clone();
    create_effect(move |_| {
        let state = state_for_mount.clone();
        spawn_local(async move {
            state.loading.set(true);

            match api::fetch_accounts().await {
                Ok(accounts) => state.accounts.set(accounts),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch accounts: {}", e).into());
                }
            }

            match api::fetch_account_summaries().await {
                Ok(summaries) => {
                    let first = initial_selection(
                        &summaries,
                        state.selected_account.get_untracked().as_deref(),
                    );
                    state.summaries.set(summaries);
                    if let Some(account) = first {
                        state.select_account(account);
                    }
                }
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Failed to fetch account summaries: {}", e).into(),
                    );
                }
            }

            state.loading.set(false);
        });
    });

    // Fetch stats whenever the selection changes
    let state_for_stats = state.clone();
    create_effect(move |_| {
        let Some(requested) = state_for_stats.selected_account.get() else {
            return;
        };

        let state = state_for_stats.clone();
        spawn_local(async move {
            let result = api::fetch_stats(&requested).await;

            if !state.is_current(&requested) {
                return;
            }

            match result {
                Ok(stats) => state.stats.set(Some(stats)),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch stats: {}", e).into());
                }
            }
        });
    });

    let state_for_select = state.clone();
    let on_select = Callback::new(move |account: String| state_for_select.select_account(account));

    let selected = state.selected_account;
    let selected_signal = Signal::derive(move || selected.get());

    view! {
        <div class="space-y-8">
            // Page header
            <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">"Dashboard"</h1>
                    <p class="text-gray-500 mt-1">"Engagement across your tracked TikTok accounts"</p>
                </div>

                <AccountSelector
                    accounts=state.accounts
                    selected=selected_signal
                    on_select=on_select
                />
            </div>

            // Accounts overview
            <section>
                <h2 class="text-lg font-semibold mb-4">"Accounts Overview"</h2>
                <AccountsOverview
                    summaries=state.summaries
                    selected=selected_signal
                    on_select=on_select
                />
            </section>

            <Show
                when=move || selected.get().is_some()
                fallback=|| view! {
                    <div class="text-center text-gray-500 py-12">
                        "Select an account to see its performance."
                    </div>
                }
            >
                <AccountDetails />
            </Show>
        </div>
    }
}

/// Stats, chart and top posts for the selected account
#[component]
fn AccountDetails() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let stats = state.stats;
    let selected = state.selected_account;
    let selected_signal = Signal::derive(move || selected.get());

    let value = move |pick: fn(&AccountStats) -> u64| {
        Signal::derive(move || {
            stats
                .get()
                .as_ref()
                .map(|s| format_count(pick(s)))
                .unwrap_or_default()
        })
    };

    view! {
        <div class="space-y-8">
            <section>
                <h2 class="text-lg font-semibold mb-4">{move || format!("@{}", selected.get().unwrap_or_default())}</h2>
                {move || {
                    if stats.get().is_none() {
                        view! {
                            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                                <CardSkeleton />
                                <CardSkeleton />
                                <CardSkeleton />
                                <CardSkeleton />
                            </div>
                        }.into_view()
                    } else {
                        view! {
                            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                                <StatsCard title="Total Views" value=value(|s| s.total_views) icon="👁" color=StatColor::Blue />
                                <StatsCard title="Total Likes" value=value(|s| s.total_likes) icon="❤" color=StatColor::Red />
                                <StatsCard title="Total Comments" value=value(|s| s.total_comments) icon="💬" color=StatColor::Green />
                                <StatsCard title="Total Shares" value=value(|s| s.total_shares) icon="↗" color=StatColor::Purple />
                            </div>
                        }.into_view()
                    }
                }}
            </section>

            <section class="bg-white rounded-xl shadow-sm border border-gray-200 p-6">
                <h2 class="text-xl font-semibold mb-4">"Daily Views (Last 30 Days)"</h2>
                <DailyViewsChart account=selected_signal />
            </section>

            <section class="bg-white rounded-xl shadow-sm border border-gray-200 p-6">
                <h2 class="text-xl font-semibold mb-4">"Top Posts"</h2>
                <TopPostsTable account=selected_signal />
            </section>
        </div>
    }
}
