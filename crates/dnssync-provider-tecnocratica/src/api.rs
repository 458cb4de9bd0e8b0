//! Control-panel API seam
//!
//! The zone resolver and the reconciler only talk to the provider through
//! [`PanelApi`]. [`PanelClient`](crate::client::PanelClient) is the HTTP
//! implementation; tests substitute an in-memory panel.

use crate::models::{PanelRecord, Zone};
use async_trait::async_trait;
use dnssync_core::{Context, Result};

/// The five control-panel calls the provider needs
///
/// Every call must honour `ctx` and fail with the context's cancellation
/// error once it is done.
#[async_trait]
pub trait PanelApi: Send + Sync {
    /// List every zone visible to the token
    async fn list_zones(&self, ctx: &Context) -> Result<Vec<Zone>>;

    /// List the records of a zone, optionally restricted to one type
    async fn list_records(
        &self,
        ctx: &Context,
        zone_id: u64,
        type_filter: Option<&str>,
    ) -> Result<Vec<PanelRecord>>;

    /// Create a record; the response carries the assigned id
    async fn create_record(
        &self,
        ctx: &Context,
        zone_id: u64,
        record: &PanelRecord,
    ) -> Result<PanelRecord>;

    /// Replace the record `record_id` with `record`
    async fn update_record(
        &self,
        ctx: &Context,
        zone_id: u64,
        record_id: u64,
        record: &PanelRecord,
    ) -> Result<PanelRecord>;

    /// Delete the record `record_id`
    async fn delete_record(&self, ctx: &Context, zone_id: u64, record_id: u64) -> Result<()>;
}
