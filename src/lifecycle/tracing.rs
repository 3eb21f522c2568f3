//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `fmt` subscriber filtered by `RUST_LOG`. Module
//! paths are hidden (`with_target(false)`); actors identify themselves with a
//! `state_type` field instead.
//!
//! ```bash
//! # Lifecycle and commits only
//! RUST_LOG=info cargo run
//!
//! # Every command, snapshot and backend request
//! RUST_LOG=debug cargo run
//!
//! # Just the geocoding layer
//! RUST_LOG=fastfood_client::geocoding=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a guest cart session reads like:
//!
//! ```text
//! INFO Actor started state_type="GuestCart"
//! INFO Committed state_type="GuestCart" revision=1
//! INFO Committed state_type="GuestCart" revision=2
//! INFO Shutdown state_type="GuestCart" revision=2
//! ```
//!
//! Client methods carry `#[instrument]`, so failures show the call they belong to:
//!
//! ```text
//! WARN update_quantity{cart_item_id="local_1731660000000_p1" quantity=0}: Command failed ...
//! ```

/// Install the global subscriber. Call once, at program start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
