//! Signal values passed to the remote service.

use std::fmt;

/// A named measurement, e.g. `Speed = 80.0`.
///
/// Neither the name nor the value is validated locally; the remote service
/// decides what it accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    name: String,
    value: f64,
}

impl Signal {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Method call body, D-Bus signature `(sd)`.
    pub fn as_body(&self) -> (&str, f64) {
        (self.name.as_str(), self.value)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}
