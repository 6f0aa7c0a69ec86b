//! Top Posts Table Component
//!
//! The account's ten most viewed posts.

use leptos::*;

use crate::api;
use crate::components::Loading;
use crate::format::{format_compact, format_date_long, post_url, truncate_post_id};
use crate::state::global::{is_current_response, PostView};

const TOP_POSTS_LIMIT: usize = 10;

/// Top posts table for one account
#[component]
pub fn TopPostsTable(
    #[prop(into)]
    account: Signal<Option<String>>,
) -> impl IntoView {
    let posts = create_rw_signal(Vec::<PostView>::new());
    let loading = create_rw_signal(false);

    create_effect(move |_| {
        let Some(requested) = account.get() else {
            posts.set(Vec::new());
            loading.set(false);
            return;
        };

        loading.set(true);
        spawn_local(async move {
            let result = api::fetch_top_posts(&requested, TOP_POSTS_LIMIT, "views").await;

            if !is_current_response(&requested, account.get_untracked().as_deref()) {
                return;
            }

            match result {
                Ok(top) => posts.set(top),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch top posts: {}", e).into());
                }
            }
            loading.set(false);
        });
    });

    view! {
        {move || {
            if loading.get() {
                return view! { <Loading /> }.into_view();
            }

            view! {
                <div class="overflow-x-auto">
                    <table class="min-w-full text-sm">
                        <thead class="bg-gray-50 text-gray-500 uppercase text-xs">
                            <tr>
                                <th class="px-4 py-3 text-left">"Post"</th>
                                <th class="px-4 py-3 text-right">"Views"</th>
                                <th class="px-4 py-3 text-right">"Likes"</th>
                                <th class="px-4 py-3 text-right">"Comments"</th>
                                <th class="px-4 py-3 text-right">"Shares"</th>
                                <th class="px-4 py-3 text-left">"Posted"</th>
                                <th class="px-4 py-3"></th>
                            </tr>
                        </thead>
                        <tbody>
                            {posts.get()
                                .into_iter()
                                .map(|post| view! {
                                    <tr class="border-t border-gray-100">
                                        <td class="px-4 py-3 font-mono" title=post.post_id.clone()>
                                            {truncate_post_id(&post.post_id)}
                                        </td>
                                        <td class="px-4 py-3 text-right">{format_compact(post.views)}</td>
                                        <td class="px-4 py-3 text-right">{format_compact(post.likes)}</td>
                                        <td class="px-4 py-3 text-right">{format_compact(post.comments)}</td>
                                        <td class="px-4 py-3 text-right">{format_compact(post.shares)}</td>
                                        <td class="px-4 py-3">{format_date_long(post.created_at)}</td>
                                        <td class="px-4 py-3 text-right">
                                            <a
                                                href=post_url(&post)
                                                target="_blank"
                                                rel="noopener noreferrer"
                                                class="text-blue-600 hover:underline"
                                            >
                                                "View"
                                            </a>
                                        </td>
                                    </tr>
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                </div>
            }.into_view()
        }}
    }
}
