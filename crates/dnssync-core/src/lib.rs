// # dnssync-core
//
// Core library for provider-agnostic DNS record synchronization.
//
// ## Architecture Overview
//
// This library provides the pieces every provider crate builds on:
// - **Record / Rr**: Canonical record model and its textual codec
// - **RecordProvider**: Trait for listing, appending, setting and deleting records
// - **Context**: Caller-supplied cancellation and deadlines for network calls
// - **ProviderRegistry**: Plugin-based registry for record providers
// - **Error**: Shared error taxonomy (zone lookup, translation, transport, cancellation)
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Provider wire formats stay in provider crates
// 2. **Stateless Providers**: Every call re-reads provider state, nothing is cached
// 3. **Plugin-Based**: Providers are registered dynamically, no hard-coded if-else
// 4. **Library-First**: All functionality can be used as a library
// 5. **Caller-Owned Policy**: No internal retries; cancellation always wins

pub mod config;
pub mod context;
pub mod error;
pub mod record;
pub mod registry;
pub mod traits;

// Re-export core types for convenience
pub use config::ProviderConfig;
pub use context::Context;
pub use error::{Error, Result};
pub use record::{Record, RecordData, Rr};
pub use registry::ProviderRegistry;
pub use traits::{RecordProvider, RecordProviderFactory};
