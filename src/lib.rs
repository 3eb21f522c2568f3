#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # FastFood Client
//!
//! > **A headless client for a food-delivery platform.**
//!
//! The crate owns everything a storefront needs between the customer and the backend:
//! a guest cart that survives restarts, typing-time address suggestions, a strict
//! address check before an order is placed, the checkout flow that ends in a payment
//! redirect, and typed clients for the back-office REST services.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### State lives in actors
//! Anything mutable that several callers touch (the guest cart, an autocomplete
//! session) is owned by one Tokio task and changed only through messages. Callers hold
//! cheap cloneable clients. No locks around domain state, no interleaved
//! read-modify-write of the stored cart.
//!
//! ### Outcomes, not exceptions
//! Network trouble is expected. Address lookups return a
//! [`LookupOutcome`](geocoding::LookupOutcome), the final address check a
//! [`GeocodeResult`](geocoding::GeocodeResult), every backend call an
//! [`ApiResponse`](http::ApiResponse), and checkout a
//! [`CheckoutOutcome`](checkout::CheckoutOutcome). Typed errors are reserved for misuse
//! (bad quantities, unknown ids) and plumbing failures.
//!
//! ### Every HTTP consumer is testable offline
//! Geocoding and backend clients talk to an [`HttpTransport`](http::HttpTransport)
//! trait. Production uses reqwest; tests script responses with
//! [`MockTransport`](http::mock::MockTransport).
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic [`StateActor`](framework::StateActor) that drives any
//! [`ActorState`](framework::ActorState): sequential command processing, snapshots,
//! change broadcasts, and a weak [`Mailbox`](framework::Mailbox) for timers that report
//! back. [`framework::mock`] fakes a client without spawning anything.
//!
//! ### 2. The Actors ([`cart_actor`], [`autocomplete_actor`])
//! - **Guest cart**: merge-by-product, persist-then-commit, corrupt data loads empty.
//! - **Autocomplete session**: 500 ms debounce, fencing tokens, selection state.
//!
//! ### 3. The Interface ([`clients`])
//! [`GuestCartClient`](clients::GuestCartClient) and
//! [`AutocompleteClient`](clients::AutocompleteClient) wrap the generic client and map
//! framework errors back to each actor's own error type.
//!
//! ### 4. The Outside World ([`http`], [`geocoding`], [`api`])
//! Transport and envelope, the Nominatim geocoder with suggestion and validation
//! front-ends, and one trait per backend service.
//!
//! ### 5. The Flow ([`checkout`])
//! `CollectingInfo → ValidatingAddress → CreatingOrder → CreatingPayment → Redirecting`.
//!
//! ### 6. The Orchestrator ([`lifecycle`])
//! [`Storefront`](lifecycle::Storefront) wires it all from [`config::Settings`] and
//! shuts it down again. [`lifecycle::setup_tracing`] installs logging.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Guest cart + address lookup demo
//! RUST_LOG=info cargo run -- "123 Nguyễn Huệ"
//!
//! # Point at another backend
//! FASTFOOD__API__BASE_URL=https://api.example.com cargo run
//! ```

pub mod api;
pub mod autocomplete_actor;
pub mod cart_actor;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod framework;
pub mod geocoding;
pub mod http;
pub mod lifecycle;
pub mod model;
