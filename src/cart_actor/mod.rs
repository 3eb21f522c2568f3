//! Guest cart: a serialized store over one storage key.
//!
//! All reads and writes go through a single [`StateActor`], so concurrent callers never
//! interleave a read-modify-write of the stored JSON.

mod commands;
pub mod error;
mod state;
pub mod storage;

pub use commands::*;
pub use error::*;
pub use state::*;
pub use storage::{CartStorage, JsonFileStorage, MemoryStorage};

use crate::clients::GuestCartClient;
use crate::framework::{StateActor, StateChanged};

/// Published after every successful cart mutation.
pub type CartUpdated = StateChanged;

/// Creates a new guest cart actor and its client.
///
/// The storage backend is injected later through `actor.run(storage)`.
pub fn new(storage_key: &str, buffer_size: usize) -> (StateActor<GuestCart>, GuestCartClient) {
    let (actor, generic_client) = StateActor::new(GuestCart::new(storage_key), buffer_size);
    (actor, GuestCartClient::new(generic_client))
}
