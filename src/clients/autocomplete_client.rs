use crate::autocomplete_actor::{
    AutocompleteCommand, AutocompleteError, AutocompleteOutput, AutocompleteSession, SessionView,
};
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, StateClient};
use crate::geocoding::SelectedAddress;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for one autocomplete session. Dropping every clone ends the session.
#[derive(Clone)]
pub struct AutocompleteClient {
    inner: StateClient<AutocompleteSession>,
}

impl AutocompleteClient {
    pub fn new(inner: StateClient<AutocompleteSession>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<AutocompleteSession> for AutocompleteClient {
    type Error = AutocompleteError;

    fn inner(&self) -> &StateClient<AutocompleteSession> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into_state_error::<AutocompleteError>()
            .unwrap_or_else(|other| AutocompleteError::ActorCommunicationError(other.to_string()))
    }
}

impl AutocompleteClient {
    async fn send(&self, command: AutocompleteCommand) -> Result<AutocompleteOutput, AutocompleteError> {
        self.inner.ask(command).await.map_err(Self::map_error)
    }

    /// Report a keystroke. Clears any selection.
    #[instrument(skip(self))]
    pub async fn input(&self, text: &str) -> Result<AutocompleteOutput, AutocompleteError> {
        debug!("Sending request");
        self.send(AutocompleteCommand::Input(text.to_string())).await
    }

    #[instrument(skip(self))]
    pub async fn set_context(
        &self,
        ward: Option<&str>,
        city: Option<&str>,
    ) -> Result<(), AutocompleteError> {
        self.send(AutocompleteCommand::SetContext {
            ward: ward.map(str::to_string),
            city: city.map(str::to_string),
        })
        .await
        .map(|_| ())
    }

    #[instrument(skip(self))]
    pub async fn select(&self, place_id: u64) -> Result<SelectedAddress, AutocompleteError> {
        debug!("Sending request");
        match self.send(AutocompleteCommand::Select(place_id)).await? {
            AutocompleteOutput::Selected(selected) => Ok(selected),
            other => Err(AutocompleteError::ActorCommunicationError(format!(
                "unexpected reply: {other:?}"
            ))),
        }
    }

    pub async fn clear(&self) -> Result<(), AutocompleteError> {
        self.send(AutocompleteCommand::Clear).await.map(|_| ())
    }

    pub async fn view(&self) -> Result<SessionView, AutocompleteError> {
        self.snapshot().await
    }

    pub async fn selected(&self) -> Result<Option<SelectedAddress>, AutocompleteError> {
        Ok(self.snapshot().await?.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockStateClient;

    #[tokio::test]
    async fn test_select_unknown_is_typed_error() {
        let mut mock = MockStateClient::<AutocompleteSession>::new();
        mock.expect_ask().return_err(FrameworkError::StateError(Box::new(
            AutocompleteError::UnknownSuggestion(7),
        )));

        let client = AutocompleteClient::new(mock.client());
        assert_eq!(client.select(7).await, Err(AutocompleteError::UnknownSuggestion(7)));
        mock.verify();
    }

    #[tokio::test]
    async fn test_input_is_forwarded() {
        let mut mock = MockStateClient::<AutocompleteSession>::new();
        mock.expect_ask().return_ok(AutocompleteOutput::Scheduled { token: 1 });

        let client = AutocompleteClient::new(mock.client());
        let output = client.input("123 Nguyen Hue").await.unwrap();

        assert_eq!(output, AutocompleteOutput::Scheduled { token: 1 });
        assert_eq!(mock.received_commands(), vec![r#"Input("123 Nguyen Hue")"#.to_string()]);
    }
}
