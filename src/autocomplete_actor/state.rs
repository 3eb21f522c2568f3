//! [`ActorState`] implementation for one address autocomplete session.

use super::commands::{AutocompleteCommand, AutocompleteOutput};
use super::error::AutocompleteError;
use crate::framework::{ActorState, Mailbox};
use crate::geocoding::{AddressQuery, AddressSuggestion, AddressSuggestionClient, SelectedAddress};
use async_trait::async_trait;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Dependencies of a session.
#[derive(Clone)]
pub struct SessionContext {
    pub suggestions: AddressSuggestionClient,
    pub debounce: Duration,
}

/// What a form would render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionView {
    pub text: String,
    pub ward: Option<String>,
    pub city: Option<String>,
    pub suggestions: Vec<AddressSuggestion>,
    pub selected: Option<SelectedAddress>,
    pub loading: bool,
    /// Failure reason of the last applied lookup.
    pub notice: Option<String>,
}

/// Debounced, fenced address lookups for one form.
///
/// Each keystroke aborts the pending timer and issues a new token. A finished lookup
/// is only applied if its token is still the latest, so a slow response can never
/// overwrite the results of a newer query.
#[derive(Default)]
pub struct AutocompleteSession {
    view: SessionView,
    latest_token: u64,
    pending: Option<JoinHandle<()>>,
}

impl AutocompleteSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn query(&self) -> AddressQuery {
        AddressQuery {
            street: self.view.text.clone(),
            ward: self.view.ward.clone(),
            city: self.view.city.clone(),
        }
    }

    /// Abort the pending timer and move to a fresh token.
    fn invalidate(&mut self) -> u64 {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.latest_token += 1;
        self.view.loading = false;
        self.latest_token
    }

    fn schedule(&mut self, token: u64, ctx: &SessionContext, mailbox: &Mailbox<Self>) {
        let client = ctx.suggestions.clone();
        let debounce = ctx.debounce;
        let query = self.query();
        let mailbox = mailbox.clone();
        self.view.loading = true;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let outcome = client.suggest(&query).await;
            if !mailbox.tell(AutocompleteCommand::Completed { token, outcome }).await {
                debug!(token, "Session gone, dropping lookup result");
            }
        }));
    }
}

#[async_trait]
impl ActorState for AutocompleteSession {
    type Command = AutocompleteCommand;
    type Output = AutocompleteOutput;
    type Snapshot = SessionView;
    type Context = SessionContext;
    type Error = AutocompleteError;

    async fn handle_command(
        &mut self,
        command: AutocompleteCommand,
        ctx: &SessionContext,
        mailbox: &Mailbox<Self>,
    ) -> Result<AutocompleteOutput, AutocompleteError> {
        match command {
            AutocompleteCommand::Input(text) => {
                self.view.selected = None;
                let token = self.invalidate();
                self.view.text = text;
                if !ctx.suggestions.accepts(&self.query()) {
                    self.view.suggestions.clear();
                    self.view.notice = None;
                    return Ok(AutocompleteOutput::Cleared);
                }
                self.schedule(token, ctx, mailbox);
                Ok(AutocompleteOutput::Scheduled { token })
            }

            AutocompleteCommand::SetContext { ward, city } => {
                if ward != self.view.ward || city != self.view.city {
                    // The picked suggestion belongs to the old ward/city.
                    self.view.selected = None;
                }
                self.view.ward = ward;
                self.view.city = city;
                Ok(AutocompleteOutput::ContextChanged)
            }

            AutocompleteCommand::Select(place_id) => {
                let suggestion = self
                    .view
                    .suggestions
                    .iter()
                    .find(|s| s.place_id == place_id)
                    .cloned()
                    .ok_or(AutocompleteError::UnknownSuggestion(place_id))?;
                self.invalidate();
                let selected = SelectedAddress::from(suggestion);
                info!(place_id, street = %selected.street, "Address selected");
                self.view.text = selected.street.clone();
                self.view.suggestions.clear();
                self.view.notice = None;
                self.view.selected = Some(selected.clone());
                Ok(AutocompleteOutput::Selected(selected))
            }

            AutocompleteCommand::Completed { token, outcome } => {
                if token != self.latest_token {
                    debug!(token, latest = self.latest_token, "Stale lookup discarded");
                    return Ok(AutocompleteOutput::Ignored { token });
                }
                self.pending = None;
                self.view.loading = false;
                self.view.notice = outcome.failure_reason().map(str::to_string);
                self.view.suggestions = outcome.into_suggestions();
                Ok(AutocompleteOutput::Applied {
                    token,
                    count: self.view.suggestions.len(),
                })
            }

            AutocompleteCommand::Clear => {
                self.invalidate();
                self.view = SessionView {
                    ward: self.view.ward.take(),
                    city: self.view.city.take(),
                    ..SessionView::default()
                };
                Ok(AutocompleteOutput::Reset)
            }
        }
    }

    fn snapshot(&self) -> SessionView {
        self.view.clone()
    }

    fn notifies(&self, output: &AutocompleteOutput) -> bool {
        !matches!(output, AutocompleteOutput::Ignored { .. })
    }

    async fn on_stop(&mut self, _ctx: &SessionContext) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::geocoding::testing::StubGeocoder;
    use crate::geocoding::LookupOutcome;
    use std::sync::Arc;

    fn context() -> SessionContext {
        let stub = Arc::new(StubGeocoder::with_results(vec![]));
        SessionContext {
            suggestions: AddressSuggestionClient::new(stub, &Settings::default().geocoder),
            debounce: Duration::from_millis(500),
        }
    }

    async fn run(session: &mut AutocompleteSession, command: AutocompleteCommand) -> AutocompleteOutput {
        session
            .handle_command(command, &context(), &Mailbox::detached())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_stale_completion_is_ignored() {
        let mut session = AutocompleteSession::new();
        run(&mut session, AutocompleteCommand::Input("12 Lê".into())).await;
        run(&mut session, AutocompleteCommand::Input("12 Lê Lợi".into())).await;

        let stale = LookupOutcome::Found(vec![StubGeocoder::suggestion(1, "12 Lê Thánh Tôn")]);
        let output = run(&mut session, AutocompleteCommand::Completed { token: 1, outcome: stale }).await;

        assert_eq!(output, AutocompleteOutput::Ignored { token: 1 });
        assert!(session.snapshot().suggestions.is_empty());
        assert!(session.snapshot().loading);
        assert!(!session.notifies(&output));
    }

    #[tokio::test]
    async fn test_failed_lookup_sets_notice() {
        let mut session = AutocompleteSession::new();
        let AutocompleteOutput::Scheduled { token } =
            run(&mut session, AutocompleteCommand::Input("123 Nguyễn Huệ".into())).await
        else {
            panic!("lookup not scheduled");
        };

        run(
            &mut session,
            AutocompleteCommand::Completed {
                token,
                outcome: LookupOutcome::Failed("timed out".into()),
            },
        )
        .await;

        let view = session.snapshot();
        assert!(!view.loading);
        assert!(view.suggestions.is_empty());
        assert_eq!(view.notice.as_deref(), Some("timed out"));
    }

    #[tokio::test]
    async fn test_select_unknown_place() {
        let mut session = AutocompleteSession::new();
        let result = session
            .handle_command(AutocompleteCommand::Select(42), &context(), &Mailbox::detached())
            .await;
        assert_eq!(result, Err(AutocompleteError::UnknownSuggestion(42)));
    }

    #[tokio::test]
    async fn test_context_change_drops_selection() {
        let mut session = AutocompleteSession::new();
        let context = |ward: &str| AutocompleteCommand::SetContext {
            ward: Some(ward.into()),
            city: Some("Hồ Chí Minh".into()),
        };
        run(&mut session, context("Bến Nghé")).await;
        let token = session.latest_token;
        let found = LookupOutcome::Found(vec![StubGeocoder::suggestion(3, "12 Lê Lợi, Bến Nghé")]);
        run(&mut session, AutocompleteCommand::Completed { token, outcome: found }).await;
        run(&mut session, AutocompleteCommand::Select(3)).await;

        run(&mut session, context("Bến Nghé")).await;
        assert!(session.snapshot().selected.is_some());

        run(&mut session, context("Bến Thành")).await;
        let view = session.snapshot();
        assert_eq!(view.selected, None);
        assert_eq!(view.ward.as_deref(), Some("Bến Thành"));
    }

    #[tokio::test]
    async fn test_clear_keeps_context() {
        let mut session = AutocompleteSession::new();
        run(
            &mut session,
            AutocompleteCommand::SetContext {
                ward: Some("Bến Nghé".into()),
                city: Some("Hồ Chí Minh".into()),
            },
        )
        .await;
        run(&mut session, AutocompleteCommand::Input("12 Lê Lợi".into())).await;
        run(&mut session, AutocompleteCommand::Clear).await;

        let view = session.snapshot();
        assert_eq!(view.text, "");
        assert!(!view.loading);
        assert_eq!(view.ward.as_deref(), Some("Bến Nghé"));
    }
}
