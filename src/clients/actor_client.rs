use crate::framework::{ActorState, FrameworkError, StateChanged, StateClient};
use async_trait::async_trait;
use tokio::sync::broadcast;

/// Trait for state-specific clients to inherit the common read operations.
///
/// Implementors only provide access to the inner [`StateClient`] and an error mapping;
/// `snapshot` and `subscribe` come for free.
#[async_trait]
pub trait ActorClient<S: ActorState>: Send + Sync {
    /// The state-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic StateClient.
    fn inner(&self) -> &StateClient<S>;

    /// Map framework errors to the specific error type.
    ///
    /// Implementations should recover their own error from
    /// [`FrameworkError::StateError`] via [`FrameworkError::into_state_error`].
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Current read-only view of the state.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<S::Snapshot, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().snapshot().await.map_err(Self::map_error)
    }

    /// Change notifications, one per committed command.
    fn subscribe(&self) -> broadcast::Receiver<StateChanged> {
        self.inner().subscribe()
    }
}
