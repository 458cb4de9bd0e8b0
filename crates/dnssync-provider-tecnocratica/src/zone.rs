//! Zone name to panel zone id resolution
//!
//! Zones are looked up fresh on every operation; nothing is cached.

use crate::api::PanelApi;
use crate::models::Zone;
use dnssync_core::{Context, Error, Result};

/// Find the id of `zone` among the zones visible to the account.
///
/// Names are compared exactly after removing one trailing dot from each
/// side: no case folding, no partial matches. The first match wins.
pub async fn resolve_zone_id<A>(api: &A, ctx: &Context, zone: &str) -> Result<u64>
where
    A: PanelApi + ?Sized,
{
    tracing::debug!("Looking up zone ID for zone: {}", zone);

    let zones = api.list_zones(ctx).await?;
    let zone_id = find_zone(&zones, zone)
        .map(|z| z.id)
        .ok_or_else(|| Error::zone_not_found(zone))?;

    tracing::debug!("Found zone ID: {}", zone_id);
    Ok(zone_id)
}

fn find_zone<'a>(zones: &'a [Zone], zone: &str) -> Option<&'a Zone> {
    let wanted = normalize(zone);
    zones.iter().find(|z| normalize(&z.name) == wanted)
}

fn normalize(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}
