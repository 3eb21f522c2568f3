//! Messages understood by an autocomplete session.

use crate::geocoding::{LookupOutcome, SelectedAddress};

#[derive(Debug, Clone)]
pub enum AutocompleteCommand {
    /// The street field changed.
    Input(String),
    /// Ward and city appended to subsequent queries.
    SetContext {
        ward: Option<String>,
        city: Option<String>,
    },
    /// Pick a suggestion by its provider id.
    Select(u64),
    /// A debounced lookup finished. Sent by the session's own timer task.
    Completed { token: u64, outcome: LookupOutcome },
    /// Forget text, suggestions and selection. The ward/city context is kept.
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AutocompleteOutput {
    /// A lookup was scheduled under this token.
    Scheduled { token: u64 },
    /// Input too short: suggestions cleared, nothing scheduled.
    Cleared,
    ContextChanged,
    Selected(SelectedAddress),
    /// A lookup result was applied.
    Applied { token: u64, count: usize },
    /// A lookup result arrived after a newer token was issued and was dropped.
    Ignored { token: u64 },
    Reset,
}
