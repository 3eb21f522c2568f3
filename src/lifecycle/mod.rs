//! Runtime orchestration and lifecycle management.
//!
//! - [`Storefront`]: starts the cart actor, builds the HTTP clients, opens autocomplete
//!   sessions, and shuts everything down again.
//! - [`setup_tracing`]: initializes the tracing/logging infrastructure.

pub mod storefront;
pub mod tracing;

pub use self::storefront::*;
pub use self::tracing::*;
