//! Publisher and bus configuration types.
//!
//! Defaults reproduce the addressing of the reference `vss-lib` service, so a
//! default-configured publisher talks to `com.vss_lib.VehicleSignals` on the
//! system bus.

use std::time::Duration;

use serde::Deserialize;
use zbus::names::{BusName, InterfaceName, MemberName};
use zbus::zvariant::ObjectPath;

/// Default well-known bus name of the signal service.
pub const DEFAULT_SERVICE_NAME: &str = "com.vss_lib.VehicleSignals";
/// Default object path exposing the signal interface.
pub const DEFAULT_OBJECT_PATH: &str = "/com/vss_lib/VehicleSignals";
/// Default interface declaring the signal method.
pub const DEFAULT_INTERFACE_NAME: &str = "com.vss_lib.VehicleSignals";
/// Default remote method, signature `(sd) -> ()`.
pub const DEFAULT_METHOD_NAME: &str = "EmitHardwareSignal";
/// Default call timeout in milliseconds.
pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 5000;

/// Errors raised while validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid service name '{name}': {reason}")]
    InvalidServiceName { name: String, reason: String },

    #[error("invalid object path '{path}': {reason}")]
    InvalidObjectPath { path: String, reason: String },

    #[error("invalid interface name '{name}': {reason}")]
    InvalidInterfaceName { name: String, reason: String },

    #[error("invalid method name '{name}': {reason}")]
    InvalidMethodName { name: String, reason: String },

    #[error("bus type 'address' requires a non-empty address")]
    MissingBusAddress,
}

// ============================================================================
// Bus selection
// ============================================================================

/// Bus type discriminator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusType {
    /// The system bus (honours `DBUS_SYSTEM_BUS_ADDRESS`).
    #[default]
    System,
    /// The session bus of the current user.
    Session,
    /// An explicit D-Bus address, e.g. `unix:path=/run/dbus/system_bus_socket`.
    Address,
}

/// Which message bus to connect to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Bus type discriminator.
    #[serde(rename = "type")]
    pub bus_type: BusType,
    /// D-Bus address, used when `type` is `address`.
    pub address: Option<String>,
}

impl BusConfig {
    /// Connect to an explicit D-Bus address.
    pub fn address(address: impl Into<String>) -> Self {
        Self {
            bus_type: BusType::Address,
            address: Some(address.into()),
        }
    }

    /// Connect to the session bus.
    pub fn session() -> Self {
        Self {
            bus_type: BusType::Session,
            address: None,
        }
    }

    /// Check that an address is present when one is required.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bus_type == BusType::Address
            && self.address.as_deref().map_or(true, |a| a.trim().is_empty())
        {
            return Err(ConfigError::MissingBusAddress);
        }
        Ok(())
    }
}

// ============================================================================
// Remote addressing
// ============================================================================

/// Publisher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PublisherConfig {
    /// Well-known bus name the service registers under.
    pub service_name: String,
    /// Object path of the signal object.
    pub object_path: String,
    /// Interface declaring the method.
    pub interface_name: String,
    /// Method invoked with `(signal_name, value)`.
    pub method_name: String,
    /// Deadline for a single call in milliseconds. `0` leaves the bound to the transport.
    pub call_timeout_ms: u64,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            object_path: DEFAULT_OBJECT_PATH.to_string(),
            interface_name: DEFAULT_INTERFACE_NAME.to_string(),
            method_name: DEFAULT_METHOD_NAME.to_string(),
            call_timeout_ms: DEFAULT_CALL_TIMEOUT_MS,
        }
    }
}

impl PublisherConfig {
    /// Call timeout, or `None` when the transport default applies.
    pub fn call_timeout(&self) -> Option<Duration> {
        (self.call_timeout_ms > 0).then(|| Duration::from_millis(self.call_timeout_ms))
    }

    /// Resolve the remote object this configuration addresses.
    pub fn remote_object(&self) -> Result<RemoteObject, ConfigError> {
        RemoteObject::new(&self.service_name, &self.object_path, &self.interface_name)
    }

    /// Validate the method name against D-Bus member naming rules.
    pub fn validated_method(&self) -> Result<String, ConfigError> {
        MemberName::try_from(self.method_name.as_str()).map_err(|e| {
            ConfigError::InvalidMethodName {
                name: self.method_name.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(self.method_name.clone())
    }
}

/// Handle to a remote object: service, object path and interface.
///
/// Built locally from configuration; holding one means the names are valid
/// D-Bus names, so addressing a call cannot fail on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteObject {
    service: String,
    path: String,
    interface: String,
}

impl RemoteObject {
    /// Validate and combine the three names.
    pub fn new(service: &str, path: &str, interface: &str) -> Result<Self, ConfigError> {
        BusName::try_from(service).map_err(|e| ConfigError::InvalidServiceName {
            name: service.to_string(),
            reason: e.to_string(),
        })?;
        ObjectPath::try_from(path).map_err(|e| ConfigError::InvalidObjectPath {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        InterfaceName::try_from(interface).map_err(|e| ConfigError::InvalidInterfaceName {
            name: interface.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            service: service.to_string(),
            path: path.to_string(),
            interface: interface.to_string(),
        })
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }
}
