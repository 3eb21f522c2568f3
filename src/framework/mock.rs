//! # Mock Framework
//!
//! [`MockStateClient<S>`] hands out a real [`StateClient<S>`] whose requests are answered
//! from a queue of expectations instead of a running [`StateActor`](super::StateActor).
//! Use it to test code that wraps a client (e.g. `GuestCartClient`) without spawning the
//! actor or touching storage.
//!
//! | Feature | MockStateClient | Real Actor |
//! |---------|-----------------|------------|
//! | **State** | None (scripted answers) | Real state and storage |
//! | **Error Injection** | `return_err` | Requires reproducing the failure |
//! | **Use Case** | Logic *around* the client | The state itself or full flows |
//!
//! ```rust
//! use fastfood_client::cart_actor::{CartCommand, CartOutput, GuestCart};
//! use fastfood_client::framework::mock::MockStateClient;
//! use fastfood_client::framework::FrameworkError;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStateClient::<GuestCart>::new();
//!     mock.expect_ask().return_ok(CartOutput::Cleared);
//!     mock.expect_snapshot().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert!(client.ask(CartCommand::Clear).await.is_ok());
//!     assert!(client.snapshot().await.is_err());
//!     mock.verify();
//! }
//! ```
//!
//! For lower-level assertions on the exact command sent, use [`create_mock_client`] and the
//! `expect_*` helpers, which hand you the request and its responder.

use super::core::{ActorState, FrameworkError, StateClient, StateRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{broadcast, mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<S: ActorState> {
    Snapshot {
        response: Result<S::Snapshot, FrameworkError>,
    },
    Ask {
        response: Result<S::Output, FrameworkError>,
    },
    Tell,
}

type Queue<S> = Arc<Mutex<VecDeque<Expectation<S>>>>;

fn lock<S: ActorState>(queue: &Queue<S>) -> MutexGuard<'_, VecDeque<Expectation<S>>> {
    queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A mock client with expectation tracking for fluent testing.
pub struct MockStateClient<S: ActorState> {
    client: StateClient<S>,
    expectations: Queue<S>,
    received: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: ActorState> Default for MockStateClient<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ActorState> MockStateClient<S> {
    /// Creates a new mock client with no expectations. Must be called inside a runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StateRequest<S>>(100);
        let (events, _) = broadcast::channel(16);
        let expectations: Queue<S> = Arc::new(Mutex::new(VecDeque::new()));
        let received = Arc::new(Mutex::new(Vec::new()));

        let queue = expectations.clone();
        let log = received.clone();
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (
                        StateRequest::Snapshot { respond_to },
                        Some(Expectation::Snapshot { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StateRequest::Ask {
                            command,
                            respond_to,
                        },
                        Some(Expectation::Ask { response }),
                    ) => {
                        record(&log, &command);
                        let _ = respond_to.send(response);
                    }
                    (StateRequest::Tell { command }, Some(Expectation::Tell)) => {
                        record(&log, &command);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: StateClient::new(sender, events),
            expectations,
            received,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StateClient<S> {
        self.client.clone()
    }

    /// Expects a `snapshot` request.
    pub fn expect_snapshot(&mut self) -> SnapshotExpectationBuilder<S> {
        SnapshotExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `ask` request.
    pub fn expect_ask(&mut self) -> AskExpectationBuilder<S> {
        AskExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `tell` request.
    pub fn expect_tell(&mut self) {
        lock(&self.expectations).push_back(Expectation::Tell);
    }

    /// `Debug` renderings of every command received so far, in order.
    pub fn received_commands(&self) -> Vec<String> {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

fn record<C: std::fmt::Debug>(log: &Arc<Mutex<Vec<String>>>, command: &C) {
    log.lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .push(format!("{:?}", command));
}

/// Builder for `snapshot` expectations.
pub struct SnapshotExpectationBuilder<S: ActorState> {
    expectations: Queue<S>,
}

impl<S: ActorState> SnapshotExpectationBuilder<S> {
    pub fn return_ok(self, snapshot: S::Snapshot) {
        lock(&self.expectations).push_back(Expectation::Snapshot {
            response: Ok(snapshot),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::Snapshot {
            response: Err(error),
        });
    }
}

/// Builder for `ask` expectations.
pub struct AskExpectationBuilder<S: ActorState> {
    expectations: Queue<S>,
}

impl<S: ActorState> AskExpectationBuilder<S> {
    pub fn return_ok(self, output: S::Output) {
        lock(&self.expectations).push_back(Expectation::Ask {
            response: Ok(output),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::Ask {
            response: Err(error),
        });
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client whose requests land on a receiver you control.
pub fn create_mock_client<S: ActorState>(
    buffer_size: usize,
) -> (StateClient<S>, mpsc::Receiver<StateRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (events, _) = broadcast::channel(16);
    (StateClient::new(sender, events), receiver)
}

/// Helper to take the next request if it is an `ask`.
pub async fn expect_ask<S: ActorState>(
    receiver: &mut mpsc::Receiver<StateRequest<S>>,
) -> Option<(
    S::Command,
    oneshot::Sender<Result<S::Output, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(StateRequest::Ask {
            command,
            respond_to,
        }) => Some((command, respond_to)),
        _ => None,
    }
}

/// Helper to take the next request if it is a `snapshot`.
pub async fn expect_snapshot<S: ActorState>(
    receiver: &mut mpsc::Receiver<StateRequest<S>>,
) -> Option<oneshot::Sender<Result<S::Snapshot, FrameworkError>>> {
    match receiver.recv().await {
        Some(StateRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}
