//! Shared test utilities for the panel driver
//!
//! Provides panel tree fixtures used by the integration tests.
