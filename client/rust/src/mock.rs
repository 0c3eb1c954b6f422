//! In-memory bus for testing.
//!
//! `MockBus` stands in for both the bus daemon and the receiving service: it
//! can refuse connections, reject calls, delay replies, and records every call
//! that reaches the service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::config::RemoteObject;
use crate::error::TransportError;
use crate::signal::Signal;
use crate::traits::{BusConnection, BusConnector};

/// D-Bus error name used for rejected calls.
pub const INVALID_ARGS_ERROR: &str = "org.freedesktop.DBus.Error.InvalidArgs";

/// A method call received by the mock service.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub service: String,
    pub path: String,
    pub interface: String,
    pub method: String,
    pub signal: Signal,
}

#[derive(Debug, Default)]
struct MockState {
    invocations: Vec<Invocation>,
    connections: usize,
    unreachable: bool,
    reject_empty_names: bool,
    reject_all: Option<String>,
    call_delay: Option<Duration>,
    connect_delay: Option<Duration>,
}

/// Mock bus for testing.
///
/// Clones share state, so a test keeps one handle for assertions and hands
/// another to the publisher.
#[derive(Debug, Clone, Default)]
pub struct MockBus {
    state: Arc<RwLock<MockState>>,
}

impl MockBus {
    /// A reachable bus whose service accepts every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// A bus that refuses every connection.
    pub fn unreachable() -> Self {
        Self::with_state(MockState {
            unreachable: true,
            ..Default::default()
        })
    }

    /// A service that rejects calls carrying an empty signal name.
    pub fn rejecting_empty_names() -> Self {
        Self::with_state(MockState {
            reject_empty_names: true,
            ..Default::default()
        })
    }

    fn with_state(state: MockState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    pub async fn set_unreachable(&self, unreachable: bool) {
        self.state.write().await.unreachable = unreachable;
    }

    pub async fn set_reject_empty_names(&self, reject: bool) {
        self.state.write().await.reject_empty_names = reject;
    }

    /// Reject every call with `message`, or stop rejecting with `None`.
    pub async fn set_reject_all(&self, message: Option<String>) {
        self.state.write().await.reject_all = message;
    }

    /// Delay each reply by `delay`.
    pub async fn set_call_delay(&self, delay: Option<Duration>) {
        self.state.write().await.call_delay = delay;
    }

    /// Delay each connection handshake by `delay`.
    pub async fn set_connect_delay(&self, delay: Option<Duration>) {
        self.state.write().await.connect_delay = delay;
    }

    /// Calls that reached the service, accepted or rejected.
    pub async fn invocations(&self) -> Vec<Invocation> {
        self.state.read().await.invocations.clone()
    }

    /// Connections opened so far.
    pub async fn connection_count(&self) -> usize {
        self.state.read().await.connections
    }
}

#[async_trait]
impl BusConnector for MockBus {
    type Connection = MockConnection;

    async fn connect(&self) -> Result<MockConnection, TransportError> {
        let delay = self.state.read().await.connect_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.write().await;
        if state.unreachable {
            return Err(TransportError::Unavailable(
                "mock bus endpoint is not reachable".to_string(),
            ));
        }
        state.connections += 1;
        Ok(MockConnection {
            state: Arc::clone(&self.state),
        })
    }
}

/// Connection handed out by [`MockBus`].
#[derive(Debug)]
pub struct MockConnection {
    state: Arc<RwLock<MockState>>,
}

#[async_trait]
impl BusConnection for MockConnection {
    async fn call_signal_method(
        &self,
        target: &RemoteObject,
        method: &str,
        signal: &Signal,
    ) -> Result<(), TransportError> {
        let delay = self.state.read().await.call_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.write().await;
        state.invocations.push(Invocation {
            service: target.service().to_string(),
            path: target.path().to_string(),
            interface: target.interface().to_string(),
            method: method.to_string(),
            signal: signal.clone(),
        });

        if let Some(message) = &state.reject_all {
            return Err(TransportError::Remote {
                name: INVALID_ARGS_ERROR.to_string(),
                message: message.clone(),
            });
        }
        if state.reject_empty_names && signal.name().is_empty() {
            return Err(TransportError::Remote {
                name: INVALID_ARGS_ERROR.to_string(),
                message: "signal name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
