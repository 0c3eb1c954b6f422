//! Utility functions.
//!
//! Shared initialization helpers for vss-lib binaries.

pub mod bootstrap;
