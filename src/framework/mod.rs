//! Generic actor framework for single-owner state.
//!
//! # Main Components
//!
//! - [`ActorState`] - Trait that a piece of state implements to be owned by an actor
//! - [`StateActor`] - Generic actor task that applies commands sequentially
//! - [`StateClient`] - Cloneable handle for snapshot/ask/tell and change subscription
//! - [`Mailbox`] - Weak self-handle for background tasks
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;

pub use core::*;
