// # Record Provider Trait
//
// Defines the interface for managing the records of a DNS zone through a
// provider API.
//
// ## Implementations
//
// - Tecnocratica (Neodigit / Virtualname): `dnssync-provider-tecnocratica` crate
//
// ## Usage
//
// ```rust,ignore
// use dnssync_core::{Context, RecordProvider};
// use dnssync_core::record::Rr;
// use std::time::Duration;
//
// let provider = /* RecordProvider implementation */;
// let ctx = Context::with_timeout(Duration::from_secs(60));
//
// let wanted = Rr::new("www.example.com.", "A", "192.0.2.1", Duration::from_secs(300)).parse()?;
// provider.set_records(&ctx, "example.com", &[wanted]).await?;
// ```

use crate::context::Context;
use crate::error::Result;
use crate::record::Record;
use async_trait::async_trait;

/// Trait for DNS provider implementations
///
/// Names passed in and returned are canonical record names; each provider
/// converts them to and from its own wire representation.
///
/// # Statelessness
///
/// Implementations re-read the zone and its records on every call. Nothing is
/// cached between calls, and no retries are performed: a failed network call
/// is returned to the caller, who owns retry policy.
///
/// # Partial effects
///
/// Mutating operations issue one provider call per record change. If a call
/// fails, the operation stops and returns the error; changes already applied
/// are **not** rolled back. Callers retrying after an error should expect
/// some of their records to already be in place.
///
/// # Cancellation
///
/// Every network call honours the supplied [`Context`]. Cancellation aborts
/// the remaining calls and is reported as `Error::Cancelled` or
/// `Error::DeadlineExceeded`, never as a provider error.
#[async_trait]
pub trait RecordProvider: Send + Sync {
    /// List all records in the zone.
    ///
    /// Records the canonical codec cannot represent are skipped.
    async fn get_records(&self, ctx: &Context, zone: &str) -> Result<Vec<Record>>;

    /// Create each record, returning them as stored by the provider.
    async fn append_records(
        &self,
        ctx: &Context,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>>;

    /// Make the zone hold exactly `records` for each `(name, type)` pair
    /// present in the input.
    ///
    /// Records under other `(name, type)` pairs are untouched. Returns the
    /// records that were written.
    async fn set_records(
        &self,
        ctx: &Context,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>>;

    /// Delete matching records, returning the records that were removed.
    async fn delete_records(
        &self,
        ctx: &Context,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing record providers from configuration
pub trait RecordProviderFactory: Send + Sync {
    /// Create a RecordProvider instance from configuration
    fn create(
        &self,
        config: &crate::config::ProviderConfig,
    ) -> Result<Box<dyn RecordProvider>>;
}
