//! # Checkout
//!
//! Turns a filled [`CheckoutForm`], the cart lines, and the picked address into either a
//! payment redirect or a reason to stay on the form. See [`CheckoutOrchestrator`].

mod error;
mod form;
mod orchestrator;
mod state;

pub use error::CheckoutError;
pub use form::{CheckoutForm, FormError, ShippingMethod};
pub use orchestrator::{CheckoutOrchestrator, CheckoutRequest};
pub use state::{CheckoutOutcome, CheckoutReport, CheckoutStage};
