//! Rust client for publishing hardware vehicle signals over D-Bus.
//!
//! A [`Publisher`] connects to a message bus, addresses a remote object by
//! service name and object path, and invokes a single method with a signal
//! name and a `f64` value. By default it calls
//! `com.vss_lib.VehicleSignals.EmitHardwareSignal` on the system bus.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use vss_client::{BusConfig, Publisher, PublisherConfig};
//!
//! async fn example() -> vss_client::Result<()> {
//!     let publisher = Publisher::from_config(&BusConfig::default(), &PublisherConfig::default())
//!         .expect("default addressing is valid");
//!
//!     publisher.publish("Speed", 80.0).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Mocking for Tests
//!
//! Build a publisher over [`mock::MockBus`] to exercise the publish path
//! without a bus daemon, or implement [`traits::SignalPublisher`] directly:
//!
//! ```rust,ignore
//! use vss_client::mock::MockBus;
//! use vss_client::{Publisher, PublisherConfig};
//!
//! let bus = MockBus::rejecting_empty_names();
//! let publisher = Publisher::new(bus.clone(), &PublisherConfig::default())?;
//! assert!(publisher.publish("", 0.0).await.is_err());
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod mock;
pub mod signal;
pub mod traits;

// Re-export main types at crate root
pub use client::{DbusConnection, DbusConnector, Publisher};
pub use config::{
    BusConfig, BusType, ConfigError, PublisherConfig, RemoteObject, DEFAULT_CALL_TIMEOUT_MS,
    DEFAULT_INTERFACE_NAME, DEFAULT_METHOD_NAME, DEFAULT_OBJECT_PATH, DEFAULT_SERVICE_NAME,
};
pub use error::{ErrorKind, PublishError, Result, TransportError};
pub use signal::Signal;
pub use traits::{BusConnection, BusConnector, SignalPublisher};
