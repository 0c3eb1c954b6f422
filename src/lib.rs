//! vss-lib - hardware signal publishing
//!
//! Application layer around [`vss_client`]: layered configuration loading,
//! tracing bootstrap and the `vss-send-signal` entry point.

pub mod config;
pub mod utils;
