//! Step definition modules for Cucumber feature tests.

pub mod error_handling;
pub mod publisher;
