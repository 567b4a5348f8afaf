//! HQ Console Web
//!
//! Franchise admin console built with Leptos (WASM).
//!
//! # Pages
//!
//! - Login with client-side validation
//! - Center dashboard
//! - HQ clients (centers) table with filters, search and pagination
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the HQ REST API over HTTP with the browser's
//! session cookies. Wire types, validation and list state come from the
//! `hq-console` crate.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
