// # Tecnocratica DNS Provider
//
// This crate provides a record provider for the DNS API of the Tecnocratica
// control panel. The same backend is sold under two brands, Neodigit and
// Virtualname, which differ only in API base URL.
//
// ## Layout
//
// - `client`: HTTP transport (`PanelClient`), one request per call
// - `api`: the `PanelApi` seam between transport and logic
// - `convert`: canonical record <-> panel record translation (pure)
// - `zone`: zone name -> panel zone id lookup
// - `reconcile`: list / append / set / delete on top of the above
//
// ## Behaviour
//
// - ✅ Zone and records are read fresh on every operation (no caching)
// - ✅ Exact set replacement per `(name, type)` with stable record ids
// - ✅ Every network call honours the caller's `Context`
// - ❌ NO retry logic (a failed call is returned to the caller)
// - ❌ NO rollback (changes applied before a failure stay applied)
// - ❌ NO background tasks
//
// ## Security Requirements
//
// - API token NEVER appears in logs
// - Provider MUST fail fast if token is empty

pub mod api;
pub mod client;
pub mod convert;
pub mod models;
pub mod reconcile;
pub mod zone;

pub use api::PanelApi;
pub use client::{DEFAULT_BASE_URL, PanelClient};
pub use models::{PanelRecord, Zone};

use async_trait::async_trait;
use dnssync_core::config::ProviderConfig;
use dnssync_core::{Context, Error, Record, RecordProvider, RecordProviderFactory, Result};

/// Record provider for Tecnocratica-hosted zones
///
/// Generic over the panel API so the reconciliation logic can run against any
/// [`PanelApi`]; production code uses the default [`PanelClient`].
#[derive(Debug)]
pub struct TecnocraticaProvider<A = PanelClient> {
    api: A,
}

impl TecnocraticaProvider<PanelClient> {
    /// Create a provider talking to `api_url`, or [`DEFAULT_BASE_URL`]
    ///
    /// # Security
    ///
    /// The API token will NEVER be logged or displayed in error messages.
    pub fn new(api_token: impl Into<String>, api_url: Option<&str>) -> Result<Self> {
        Ok(Self::with_api(PanelClient::new(api_token, api_url)?))
    }
}

impl<A: PanelApi> TecnocraticaProvider<A> {
    /// Create a provider on top of an existing panel API implementation
    pub fn with_api(api: A) -> Self {
        Self { api }
    }

    /// The underlying panel API
    pub fn api(&self) -> &A {
        &self.api
    }
}

#[async_trait]
impl<A: PanelApi> RecordProvider for TecnocraticaProvider<A> {
    async fn get_records(&self, ctx: &Context, zone: &str) -> Result<Vec<Record>> {
        tracing::debug!("Listing records of zone {}", zone);
        reconcile::list_records(&self.api, ctx, zone).await
    }

    async fn append_records(
        &self,
        ctx: &Context,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>> {
        tracing::debug!("Appending {} record(s) to zone {}", records.len(), zone);
        reconcile::append_records(&self.api, ctx, zone, records).await
    }

    async fn set_records(
        &self,
        ctx: &Context,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>> {
        tracing::debug!("Setting {} record(s) in zone {}", records.len(), zone);
        reconcile::set_records(&self.api, ctx, zone, records).await
    }

    async fn delete_records(
        &self,
        ctx: &Context,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>> {
        tracing::debug!("Deleting {} record(s) from zone {}", records.len(), zone);
        reconcile::delete_records(&self.api, ctx, zone, records).await
    }

    fn provider_name(&self) -> &'static str {
        "tecnocratica"
    }
}

/// Factory for creating Tecnocratica providers
pub struct TecnocraticaFactory;

impl RecordProviderFactory for TecnocraticaFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn RecordProvider>> {
        match config {
            ProviderConfig::Tecnocratica { api_token, api_url } => {
                if api_token.is_empty() {
                    return Err(Error::config("Tecnocratica API token is required"));
                }

                Ok(Box::new(TecnocraticaProvider::new(
                    api_token.clone(),
                    api_url.as_deref(),
                )?))
            }
            ProviderConfig::Custom { .. } => {
                Err(Error::config("Invalid config for Tecnocratica provider"))
            }
        }
    }
}

/// Register the Tecnocratica provider with a registry
///
/// # Example
///
/// ```rust
/// use dnssync_core::ProviderRegistry;
///
/// let registry = ProviderRegistry::new();
/// dnssync_provider_tecnocratica::register(&registry);
/// assert!(registry.has_provider("tecnocratica"));
/// ```
pub fn register(registry: &dnssync_core::ProviderRegistry) {
    registry.register_provider("tecnocratica", Box::new(TecnocraticaFactory));
}
