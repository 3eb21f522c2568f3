//! Address autocomplete: one actor per open address form.

mod commands;
pub mod error;
mod state;

pub use commands::*;
pub use error::*;
pub use state::*;

use crate::clients::AutocompleteClient;
use crate::framework::StateActor;

/// Creates a new autocomplete session actor and its client.
///
/// Run it with a [`SessionContext`] carrying the suggestion client and debounce delay.
pub fn new(buffer_size: usize) -> (StateActor<AutocompleteSession>, AutocompleteClient) {
    let (actor, generic_client) = StateActor::new(AutocompleteSession::new(), buffer_size);
    (actor, AutocompleteClient::new(generic_client))
}
