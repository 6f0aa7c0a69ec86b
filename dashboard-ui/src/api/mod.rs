//! API Layer
//!
//! HTTP calls to the TikTok Analytics REST API.

mod client;

pub use client::*;
