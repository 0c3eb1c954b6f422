//! Transport and publisher traits.
//!
//! `BusConnector`/`BusConnection` separate the publisher from the bus
//! library; the D-Bus implementation lives in [`crate::client`] and an
//! in-memory one in [`crate::mock`]. `SignalPublisher` is the seam hosting
//! applications depend on.

use async_trait::async_trait;

use crate::config::RemoteObject;
use crate::error::{Result, TransportError};
use crate::signal::Signal;

/// Opens connections to a message bus.
#[async_trait]
pub trait BusConnector: Send + Sync {
    /// Connection type produced by this connector.
    type Connection: BusConnection;

    /// Open a new connection. Each publish call opens its own.
    async fn connect(&self) -> std::result::Result<Self::Connection, TransportError>;
}

/// An open bus connection.
#[async_trait]
pub trait BusConnection: Send + Sync {
    /// Invoke `method` on `target` with `(signal.name, signal.value)` and wait
    /// for the method return. The reply body is ignored.
    async fn call_signal_method(
        &self,
        target: &RemoteObject,
        method: &str,
        signal: &Signal,
    ) -> std::result::Result<(), TransportError>;
}

/// Trait for signal publishing.
///
/// Implement this trait to create mock publishers for testing or
/// alternative transport implementations.
#[async_trait]
pub trait SignalPublisher: Send + Sync {
    /// Publish one named measurement.
    async fn publish(&self, signal_name: &str, value: f64) -> Result<()>;
}
