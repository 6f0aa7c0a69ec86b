//! Loading Component
//!
//! Loading spinners and skeleton states.

use leptos::*;

/// Block loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <div class="loading-spinner w-8 h-8" />
        </div>
    }
}

/// Skeleton loader for stat cards
#[component]
pub fn CardSkeleton() -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl border border-gray-200 p-5 animate-pulse">
            <div class="h-4 bg-gray-200 rounded w-1/3 mb-3" />
            <div class="h-7 bg-gray-200 rounded w-1/2" />
        </div>
    }
}
