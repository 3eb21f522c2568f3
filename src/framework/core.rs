//! # Core Actor Framework
//!
//! This module defines the generic building blocks for the stateful parts of the client.
//!
//! ## Key Types
//!
//! - [`ActorState`]: The trait a piece of owned state implements to be driven by an actor.
//! - [`StateActor`]: The generic actor task that owns the state and applies commands in order.
//! - [`StateClient`]: The cloneable handle used to query and mutate the state.
//! - [`Mailbox`]: A weak self-handle that lets background tasks report back to their actor.
//! - [`FrameworkError`]: Plumbing errors (e.g., ActorClosed) and wrapped state errors.

use async_trait::async_trait;
use std::fmt::Debug;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

/// Capacity of the change-notification channel. Slow subscribers observe `Lagged`
/// and should re-read a snapshot.
const EVENT_CAPACITY: usize = 64;

// =============================================================================
// 1. THE ABSTRACTION (State with Hooks and Commands)
// =============================================================================

/// Trait implemented by any state that must be mutated through a single owner.
///
/// # Architecture Note
/// The guest cart and the address autocomplete session both hold state that several
/// callers touch concurrently. Instead of a lock, the state is moved into a [`StateActor`]
/// task and every mutation travels as a `Command` message, so mutations are applied one
/// at a time in arrival order.
///
/// Associated types keep each actor's protocol closed: a cart actor only accepts cart
/// commands and only answers with cart outputs.
///
/// # Provided Methods (Hooks)
/// - [`ActorState::on_start`] runs once before the first message (e.g., load from storage).
/// - [`ActorState::notifies`] decides whether a successful command publishes a change event.
/// - [`ActorState::on_stop`] runs once after the last client is dropped.
#[async_trait]
pub trait ActorState: Sized + Send + 'static {
    /// Mutation or query message understood by this state.
    type Command: Send + Debug;

    /// Result of a successfully applied command.
    type Output: Send + Debug;

    /// Read-only view handed out to callers.
    type Snapshot: Clone + Send + Debug;

    /// Runtime dependencies injected at `run()` time. Use `()` if none.
    type Context: Send + Sync;

    /// The state-specific error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Called once when the actor loop starts.
    async fn on_start(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply one command. The `mailbox` can be cloned into spawned tasks that need to
    /// send follow-up commands to this same actor.
    async fn handle_command(
        &mut self,
        command: Self::Command,
        ctx: &Self::Context,
        mailbox: &Mailbox<Self>,
    ) -> Result<Self::Output, Self::Error>;

    /// Produce the view returned by [`StateClient::snapshot`].
    fn snapshot(&self) -> Self::Snapshot;

    /// Whether `output` represents a visible change worth broadcasting.
    fn notifies(&self, _output: &Self::Output) -> bool {
        true
    }

    /// Called once when the actor loop ends.
    async fn on_stop(&mut self, _ctx: &Self::Context) {}
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("State error: {0}")]
    StateError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recover the concrete state error carried by [`FrameworkError::StateError`].
    ///
    /// Returns `Err(self)` for plumbing errors or when the boxed error is of another type.
    pub fn into_state_error<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::StateError(inner) => match inner.downcast::<E>() {
                Ok(concrete) => Ok(*concrete),
                Err(other) => Err(FrameworkError::StateError(other)),
            },
            other => Err(other),
        }
    }
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Notification published after every committed change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChanged {
    /// Monotonic revision of the state, starting at 1 for the first change.
    pub revision: u64,
}

/// Internal message type sent to the actor.
///
/// - **Snapshot**: read the current view.
/// - **Ask**: apply a command and wait for its output.
/// - **Tell**: apply a command without waiting (fire-and-forget, used by timers).
pub enum StateRequest<S: ActorState> {
    Snapshot {
        respond_to: Response<S::Snapshot>,
    },
    Ask {
        command: S::Command,
        respond_to: Response<S::Output>,
    },
    Tell {
        command: S::Command,
    },
}

/// Weak handle to an actor's own queue.
///
/// Holding a `Mailbox` does not keep the actor alive: once every [`StateClient`] is
/// dropped the actor shuts down and [`Mailbox::tell`] starts returning `false`.
pub struct Mailbox<S: ActorState> {
    sender: mpsc::WeakSender<StateRequest<S>>,
}

impl<S: ActorState> Clone for Mailbox<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<S: ActorState> Mailbox<S> {
    /// A mailbox connected to nothing, for driving `handle_command` directly in tests.
    pub fn detached() -> Self {
        let (sender, _receiver) = mpsc::channel(1);
        Self {
            sender: sender.downgrade(),
        }
    }

    /// Enqueue a command for the owning actor. Returns `false` if the actor is gone.
    pub async fn tell(&self, command: S::Command) -> bool {
        match self.sender.upgrade() {
            Some(sender) => sender.send(StateRequest::Tell { command }).await.is_ok(),
            None => false,
        }
    }
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that owns one [`ActorState`].
///
/// **Concurrency Model**:
/// The state lives inside the actor task and is only touched from its message loop,
/// so no `Mutex` is needed. Callers never see a half-applied command.
pub struct StateActor<S: ActorState> {
    receiver: mpsc::Receiver<StateRequest<S>>,
    mailbox: Mailbox<S>,
    events: broadcast::Sender<StateChanged>,
    state: S,
    revision: u64,
}

impl<S: ActorState> StateActor<S> {
    /// Creates the actor (server half) and its client.
    ///
    /// `buffer_size` bounds the request queue; senders wait when it is full.
    pub fn new(state: S, buffer_size: usize) -> (Self, StateClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let actor = Self {
            receiver,
            mailbox: Mailbox {
                sender: sender.downgrade(),
            },
            events: events.clone(),
            state,
            revision: 0,
        };
        (actor, StateClient::new(sender, events))
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// # Context Injection
    /// `context` is handed to every hook, so dependencies (storage backends, geocoders)
    /// can be created after the actor itself.
    pub async fn run(mut self, context: S::Context) {
        let state_type = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(state_type, "Actor started");

        if let Err(e) = self.state.on_start(&context).await {
            warn!(state_type, error = %e, "on_start failed");
        }

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StateRequest::Snapshot { respond_to } => {
                    debug!(state_type, revision = self.revision, "Snapshot");
                    let _ = respond_to.send(Ok(self.state.snapshot()));
                }
                StateRequest::Ask {
                    command,
                    respond_to,
                } => {
                    let result = self.apply(state_type, command, &context).await;
                    let _ = respond_to.send(result);
                }
                StateRequest::Tell { command } => {
                    // Failures are already logged by apply and nobody is waiting.
                    let _ = self.apply(state_type, command, &context).await;
                }
            }
        }

        self.state.on_stop(&context).await;
        info!(state_type, revision = self.revision, "Shutdown");
    }

    async fn apply(
        &mut self,
        state_type: &str,
        command: S::Command,
        context: &S::Context,
    ) -> Result<S::Output, FrameworkError> {
        debug!(state_type, ?command, "Command");
        match self
            .state
            .handle_command(command, context, &self.mailbox)
            .await
        {
            Ok(output) => {
                if self.state.notifies(&output) {
                    self.revision += 1;
                    // No subscribers is fine.
                    let _ = self.events.send(StateChanged {
                        revision: self.revision,
                    });
                    info!(state_type, revision = self.revision, "Committed");
                } else {
                    debug!(state_type, ?output, "No visible change");
                }
                Ok(output)
            }
            Err(e) => {
                warn!(state_type, error = %e, "Command failed");
                Err(FrameworkError::StateError(Box::new(e)))
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a [`StateActor`].
///
/// Holds only channel senders, so cloning is cheap.
pub struct StateClient<S: ActorState> {
    sender: mpsc::Sender<StateRequest<S>>,
    events: broadcast::Sender<StateChanged>,
}

impl<S: ActorState> Clone for StateClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            events: self.events.clone(),
        }
    }
}

impl<S: ActorState> StateClient<S> {
    pub fn new(
        sender: mpsc::Sender<StateRequest<S>>,
        events: broadcast::Sender<StateChanged>,
    ) -> Self {
        Self { sender, events }
    }

    pub async fn snapshot(&self) -> Result<S::Snapshot, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StateRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn ask(&self, command: S::Command) -> Result<S::Output, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StateRequest::Ask {
                command,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn tell(&self, command: S::Command) -> Result<(), FrameworkError> {
        self.sender
            .send(StateRequest::Tell { command })
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }

    /// Subscribe to change notifications published after each committed command.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChanged> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- A tiny counter state ---

    #[derive(Debug, Default)]
    struct Counter {
        value: i64,
        started: bool,
    }

    #[derive(Debug)]
    enum CounterCommand {
        Add(i64),
        Peek,
        AddLater(i64),
    }

    #[derive(Debug, thiserror::Error, PartialEq)]
    enum CounterError {
        #[error("negative total")]
        Negative,
    }

    #[async_trait]
    impl ActorState for Counter {
        type Command = CounterCommand;
        type Output = i64;
        type Snapshot = i64;
        type Context = ();
        type Error = CounterError;

        async fn on_start(&mut self, _ctx: &()) -> Result<(), CounterError> {
            self.started = true;
            Ok(())
        }

        async fn handle_command(
            &mut self,
            command: CounterCommand,
            _ctx: &(),
            mailbox: &Mailbox<Self>,
        ) -> Result<i64, CounterError> {
            match command {
                CounterCommand::Add(n) if self.value + n < 0 => Err(CounterError::Negative),
                CounterCommand::Add(n) => {
                    self.value += n;
                    Ok(self.value)
                }
                CounterCommand::Peek => Ok(self.value),
                CounterCommand::AddLater(n) => {
                    let mailbox = mailbox.clone();
                    tokio::spawn(async move {
                        mailbox.tell(CounterCommand::Add(n)).await;
                    });
                    Ok(self.value)
                }
            }
        }

        fn snapshot(&self) -> i64 {
            self.value
        }

        fn notifies(&self, _output: &i64) -> bool {
            self.started
        }
    }

    #[tokio::test]
    async fn test_commands_are_applied_in_order() {
        let (actor, client) = StateActor::new(Counter::default(), 10);
        let handle = tokio::spawn(actor.run(()));

        assert_eq!(client.ask(CounterCommand::Add(2)).await.unwrap(), 2);
        assert_eq!(client.ask(CounterCommand::Add(3)).await.unwrap(), 5);
        assert_eq!(client.snapshot().await.unwrap(), 5);

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_state_error_is_recoverable_by_type() {
        let (actor, client) = StateActor::new(Counter::default(), 10);
        tokio::spawn(actor.run(()));

        let err = client.ask(CounterCommand::Add(-1)).await.unwrap_err();
        let concrete = err.into_state_error::<CounterError>().unwrap();
        assert_eq!(concrete, CounterError::Negative);
        assert_eq!(client.snapshot().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_changes_are_broadcast_with_increasing_revision() {
        let (actor, client) = StateActor::new(Counter::default(), 10);
        tokio::spawn(actor.run(()));
        let mut events = client.subscribe();

        client.ask(CounterCommand::Add(1)).await.unwrap();
        client.ask(CounterCommand::Peek).await.unwrap();

        assert_eq!(events.recv().await.unwrap(), StateChanged { revision: 1 });
        assert_eq!(events.recv().await.unwrap(), StateChanged { revision: 2 });
    }

    #[tokio::test]
    async fn test_mailbox_feeds_back_into_actor() {
        let (actor, client) = StateActor::new(Counter::default(), 10);
        tokio::spawn(actor.run(()));
        let mut events = client.subscribe();

        client.ask(CounterCommand::AddLater(7)).await.unwrap();
        events.recv().await.unwrap();
        events.recv().await.unwrap();

        assert_eq!(client.snapshot().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_detached_mailbox_reports_closed() {
        let mailbox = Mailbox::<Counter>::detached();
        assert!(!mailbox.tell(CounterCommand::Peek).await);
    }

    #[tokio::test]
    async fn test_client_after_shutdown_reports_closed() {
        let (actor, client) = StateActor::new(Counter::default(), 10);
        drop(actor);
        let err = client.snapshot().await.unwrap_err();
        assert!(matches!(err, FrameworkError::ActorClosed));
    }
}
