//! D-Bus transport and the signal publisher.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, warn};
use zbus::connection::Builder;

use crate::config::{BusConfig, BusType, ConfigError, PublisherConfig, RemoteObject};
use crate::error::{PublishError, Result, TransportError};
use crate::signal::Signal;
use crate::traits::{self, BusConnection, BusConnector};

// ============================================================================
// D-Bus transport
// ============================================================================

/// Connector for a real D-Bus message bus, backed by `zbus`.
#[derive(Debug, Clone, Default)]
pub struct DbusConnector {
    bus: BusConfig,
}

impl DbusConnector {
    /// Create a connector for the given bus selection.
    pub fn new(bus: BusConfig) -> std::result::Result<Self, ConfigError> {
        bus.validate()?;
        Ok(Self { bus })
    }

    /// Connector for the system bus.
    pub fn system() -> Self {
        Self::default()
    }

    /// The bus this connector targets.
    pub fn bus(&self) -> &BusConfig {
        &self.bus
    }

    fn builder(&self) -> zbus::Result<Builder<'static>> {
        match self.bus.bus_type {
            BusType::System => Builder::system(),
            BusType::Session => Builder::session(),
            BusType::Address => {
                Builder::address(self.bus.address.as_deref().unwrap_or_default())
            }
        }
    }
}

#[async_trait]
impl BusConnector for DbusConnector {
    type Connection = DbusConnection;

    async fn connect(&self) -> std::result::Result<DbusConnection, TransportError> {
        let inner = self.builder()?.build().await?;
        debug!(
            bus = ?self.bus.bus_type,
            unique_name = ?inner.unique_name().map(|n| n.to_string()),
            "Connected to message bus"
        );
        Ok(DbusConnection { inner })
    }
}

/// An open D-Bus connection. Closed when dropped.
#[derive(Debug)]
pub struct DbusConnection {
    inner: zbus::Connection,
}

#[async_trait]
impl BusConnection for DbusConnection {
    async fn call_signal_method(
        &self,
        target: &RemoteObject,
        method: &str,
        signal: &Signal,
    ) -> std::result::Result<(), TransportError> {
        self.inner
            .call_method(
                Some(target.service()),
                target.path(),
                Some(target.interface()),
                method,
                &signal.as_body(),
            )
            .await?;
        Ok(())
    }
}

// ============================================================================
// Publisher
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
            budget,
        }
    }

    fn at(at: Instant) -> Self {
        Self {
            at,
            budget: at.saturating_duration_since(Instant::now()),
        }
    }
}

async fn bounded<T, F>(
    deadline: Option<Deadline>,
    fut: F,
) -> std::result::Result<T, TransportError>
where
    F: Future<Output = std::result::Result<T, TransportError>>,
{
    match deadline {
        Some(d) => tokio::time::timeout_at(d.at, fut)
            .await
            .unwrap_or_else(|_| Err(TransportError::Timeout(d.budget))),
        None => fut.await,
    }
}

/// Publishes named measurements by calling a method on a remote bus object.
///
/// Every call opens its own connection, makes a single attempt and drops the
/// connection afterwards. Nothing is retried, batched or cached.
///
/// A successful result means the bus delivered a method return for the call.
/// Whether the remote service did anything with the signal is not observable
/// from here.
#[derive(Debug)]
pub struct Publisher<C = DbusConnector> {
    connector: C,
    target: RemoteObject,
    method: String,
    call_timeout: Option<Duration>,
}

impl Publisher<DbusConnector> {
    /// Build a D-Bus publisher from configuration.
    pub fn from_config(
        bus: &BusConfig,
        config: &PublisherConfig,
    ) -> std::result::Result<Self, ConfigError> {
        Self::new(DbusConnector::new(bus.clone())?, config)
    }
}

impl<C: BusConnector> Publisher<C> {
    /// Create a publisher over any transport. Names are validated here.
    pub fn new(connector: C, config: &PublisherConfig) -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            connector,
            target: config.remote_object()?,
            method: config.validated_method()?,
            call_timeout: config.call_timeout(),
        })
    }

    pub fn target(&self) -> &RemoteObject {
        &self.target
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Bound on one publish, connect included.
    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Publish `signal_name = value` to the remote service.
    pub async fn publish(&self, signal_name: &str, value: f64) -> Result<()> {
        self.publish_signal(&Signal::new(signal_name, value)).await
    }

    /// Publish an already constructed signal.
    pub async fn publish_signal(&self, signal: &Signal) -> Result<()> {
        self.send(signal, None).await
    }

    /// Publish with a caller deadline covering both connect and call.
    ///
    /// The deadline replaces the configured call timeout for this call.
    pub async fn publish_until(
        &self,
        signal_name: &str,
        value: f64,
        deadline: Instant,
    ) -> Result<()> {
        self.send(&Signal::new(signal_name, value), Some(Deadline::at(deadline)))
            .await
    }

    async fn send(&self, signal: &Signal, deadline: Option<Deadline>) -> Result<()> {
        // The configured timeout bounds connect and call together.
        let overall = deadline.or_else(|| self.call_timeout.map(Deadline::after));
        debug!(
            service = self.target.service(),
            path = self.target.path(),
            signal = signal.name(),
            value = signal.value(),
            "Publishing signal"
        );

        let connection = bounded(overall, self.connector.connect())
            .await
            .map_err(|e| {
                warn!(service = self.target.service(), error = %e, "Bus connection failed");
                PublishError::ConnectionFailed(e)
            })?;

        bounded(
            overall,
            connection.call_signal_method(&self.target, &self.method, signal),
        )
        .await
        .map_err(|e| {
            warn!(
                service = self.target.service(),
                method = %self.method,
                signal = signal.name(),
                error = %e,
                "Signal call failed"
            );
            PublishError::CallFailed(e)
        })?;

        debug!(signal = signal.name(), "Signal delivered");
        Ok(())
    }
}

#[async_trait]
impl<C: BusConnector> traits::SignalPublisher for Publisher<C> {
    async fn publish(&self, signal_name: &str, value: f64) -> Result<()> {
        Publisher::publish(self, signal_name, value).await
    }
}
