//! Error types for the vss client library.

use std::time::Duration;

/// Result type for publish operations.
pub type Result<T> = std::result::Result<T, PublishError>;

/// Phase of a publish call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The bus endpoint could not be reached or the handshake failed.
    ConnectionFailed,
    /// The remote method invocation failed.
    CallFailed,
}

/// Diagnostic reported by the bus transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Error raised by the D-Bus library.
    #[error(transparent)]
    Dbus(zbus::Error),

    /// The remote side answered with a D-Bus error reply.
    #[error("{name}: {message}")]
    Remote { name: String, message: String },

    /// No reply arrived before the call deadline.
    #[error("no reply within {0:?}")]
    Timeout(Duration),

    /// No bus endpoint is available.
    #[error("bus unavailable: {0}")]
    Unavailable(String),
}

impl From<zbus::Error> for TransportError {
    fn from(err: zbus::Error) -> Self {
        match err {
            zbus::Error::MethodError(name, message, _) => TransportError::Remote {
                name: name.to_string(),
                message: message.unwrap_or_default(),
            },
            other => TransportError::Dbus(other),
        }
    }
}

/// Errors that can occur while publishing a signal.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Failed to connect to the bus. No method call was attempted.
    #[error("connection failed: {0}")]
    ConnectionFailed(#[source] TransportError),

    /// The remote method call failed.
    #[error("call failed: {0}")]
    CallFailed(#[source] TransportError),
}

impl PublishError {
    /// Returns which phase of the publish failed.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PublishError::ConnectionFailed(_) => ErrorKind::ConnectionFailed,
            PublishError::CallFailed(_) => ErrorKind::CallFailed,
        }
    }

    /// Returns the underlying transport diagnostic.
    pub fn transport(&self) -> &TransportError {
        match self {
            PublishError::ConnectionFailed(e) | PublishError::CallFailed(e) => e,
        }
    }

    /// Returns the diagnostic message without the phase prefix.
    pub fn message(&self) -> String {
        self.transport().to_string()
    }

    /// Returns true if the bus could not be reached.
    pub fn is_connection_error(&self) -> bool {
        self.kind() == ErrorKind::ConnectionFailed
    }

    /// Returns true if the remote service rejected the call.
    pub fn is_remote_rejection(&self) -> bool {
        matches!(
            self,
            PublishError::CallFailed(TransportError::Remote { .. })
        )
    }

    /// Returns true if the call ran past its deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self.transport(), TransportError::Timeout(_))
    }

    /// Returns the D-Bus error name of a remote rejection.
    pub fn remote_error_name(&self) -> Option<&str> {
        match self.transport() {
            TransportError::Remote { name, .. } => Some(name),
            _ => None,
        }
    }
}
