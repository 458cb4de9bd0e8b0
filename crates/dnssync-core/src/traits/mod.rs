//! Core traits for the dnssync system
//!
//! This module defines the abstract interfaces that all providers must follow.
//!
//! - [`RecordProvider`]: List, append, set and delete records in a zone
//! - [`RecordProviderFactory`]: Build a provider from configuration

pub mod record_provider;

pub use record_provider::{RecordProvider, RecordProviderFactory};
