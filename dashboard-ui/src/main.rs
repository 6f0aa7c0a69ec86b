//! TikTok Analytics Dashboard
//!
//! Account performance dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Overview table of every tracked account
//! - Per-account engagement totals
//! - 30-day daily views chart
//! - Top posts by views
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It reads everything from the TikTok Analytics REST API.

use leptos::*;

mod api;
mod app;
mod components;
mod format;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
