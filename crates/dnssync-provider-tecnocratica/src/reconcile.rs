// # Record reconciliation
//
// The four provider operations, built on the zone resolver, the record
// translator and the panel API:
//
// - `list_records`: best-effort listing, untranslatable records are skipped
// - `append_records`: one create per input record
// - `set_records`: make each input `(name, type)` pair hold exactly the input
//   records, reusing existing record ids where possible
// - `delete_records`: delete by `(name, type, content)`, falling back to the
//   first `(name, type)` match
//
// Each operation resolves the zone and reads current records itself; calls are
// issued strictly one after another. A failing call aborts the operation and
// nothing already applied is undone.

use crate::api::PanelApi;
use crate::convert::{to_canonical, to_panel};
use crate::models::PanelRecord;
use crate::zone::resolve_zone_id;
use dnssync_core::{Context, Error, Record, Result};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Records are grouped by zone-relative name and type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub name: String,
    pub rtype: String,
}

impl RecordKey {
    pub fn of(record: &PanelRecord) -> Self {
        Self {
            name: record.name.clone(),
            rtype: record.rtype.clone(),
        }
    }

    fn matches(&self, record: &PanelRecord) -> bool {
        record.name == self.name && record.rtype == self.rtype
    }
}

/// One panel call planned by [`plan_set`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Overwrite an existing record, keeping its id
    Update { id: u64, record: PanelRecord },
    /// Create a new record
    Create(PanelRecord),
    /// Remove a surplus existing record
    Delete(PanelRecord),
}

/// Compute the changes that make `existing` hold exactly `desired` for every
/// `(name, type)` key present in `desired`.
///
/// Keys are visited in order of first appearance in `desired`. Within a key,
/// desired and existing records are paired by position (existing records in
/// provider order): paired slots are updated, extra desired records are
/// created, and extra existing records are deleted, in that order. Records
/// under keys absent from `desired` are never touched.
pub fn plan_set(existing: &[PanelRecord], desired: Vec<PanelRecord>) -> Vec<Change> {
    let mut buckets: IndexMap<RecordKey, Vec<PanelRecord>> = IndexMap::new();
    for record in desired {
        buckets.entry(RecordKey::of(&record)).or_default().push(record);
    }

    let mut changes = Vec::new();
    for (key, wanted) in buckets {
        let current: Vec<&PanelRecord> = existing.iter().filter(|r| key.matches(r)).collect();
        let paired = wanted.len().min(current.len());

        let mut wanted = wanted.into_iter();
        for (slot, record) in current.iter().zip(wanted.by_ref()) {
            changes.push(Change::Update {
                id: slot.id,
                record,
            });
        }
        changes.extend(wanted.map(Change::Create));
        changes.extend(
            current
                .iter()
                .skip(paired)
                .map(|surplus| Change::Delete((*surplus).clone())),
        );
    }

    changes
}

/// Pick the existing records that deleting `targets` removes, in order.
///
/// A target deletes every record with the same name, type and content. When
/// no such record exists it deletes the first record with the same name and
/// type instead. No record is picked twice.
pub fn plan_delete(existing: &[PanelRecord], targets: &[PanelRecord]) -> Vec<PanelRecord> {
    let mut picked: HashSet<u64> = HashSet::new();
    let mut doomed = Vec::new();

    for target in targets {
        let key = RecordKey::of(target);
        let exact: Vec<&PanelRecord> = existing
            .iter()
            .filter(|r| key.matches(r) && r.content == target.content)
            .collect();

        let chosen: Vec<&PanelRecord> = if exact.is_empty() {
            existing
                .iter()
                .find(|r| key.matches(r) && !picked.contains(&r.id))
                .into_iter()
                .collect()
        } else {
            exact
        };

        if chosen.is_empty() {
            tracing::debug!(
                "No existing record matches {} {} {:?}",
                target.name,
                target.rtype,
                target.content
            );
        }

        for record in chosen {
            if picked.insert(record.id) {
                doomed.push(record.clone());
            }
        }
    }

    doomed
}

fn convert_returned(zone: &str, record: &PanelRecord, what: &str) -> Result<Record> {
    to_canonical(zone, record)
        .map_err(|e| Error::translation(format!("failed to convert {} record {}", what, record.id), e))
}

/// List all records of `zone`, skipping those that cannot be translated
pub async fn list_records<A>(api: &A, ctx: &Context, zone: &str) -> Result<Vec<Record>>
where
    A: PanelApi + ?Sized,
{
    let zone_id = resolve_zone_id(api, ctx, zone).await?;
    let records = api.list_records(ctx, zone_id, None).await?;
    let total = records.len();

    let listed: Vec<Record> = records
        .iter()
        .filter_map(|record| match to_canonical(zone, record) {
            Ok(canonical) => Some(canonical),
            Err(e) => {
                tracing::warn!(
                    "Skipping record {} ({} {}) in zone {}: {}",
                    record.id,
                    record.name,
                    record.rtype,
                    zone,
                    e
                );
                None
            }
        })
        .collect();

    tracing::info!(
        "Listed {} record(s) in zone {} ({} skipped)",
        listed.len(),
        zone,
        total - listed.len()
    );
    Ok(listed)
}

/// Create every record in `records`
pub async fn append_records<A>(
    api: &A,
    ctx: &Context,
    zone: &str,
    records: &[Record],
) -> Result<Vec<Record>>
where
    A: PanelApi + ?Sized,
{
    let zone_id = resolve_zone_id(api, ctx, zone).await?;

    let mut appended = Vec::with_capacity(records.len());
    for record in records {
        let wanted = to_panel(zone, record);
        tracing::debug!("Creating {} {} in zone {}", wanted.name, wanted.rtype, zone);

        let created = api
            .create_record(ctx, zone_id, &wanted)
            .await
            .map_err(|e| e.context("failed to create record"))?;

        appended.push(convert_returned(zone, &created, "created")?);
    }

    tracing::info!("Appended {} record(s) to zone {}", appended.len(), zone);
    Ok(appended)
}

/// Replace the records of every `(name, type)` pair present in `records`
pub async fn set_records<A>(
    api: &A,
    ctx: &Context,
    zone: &str,
    records: &[Record],
) -> Result<Vec<Record>>
where
    A: PanelApi + ?Sized,
{
    let zone_id = resolve_zone_id(api, ctx, zone).await?;
    let existing = api.list_records(ctx, zone_id, None).await?;

    let desired: Vec<PanelRecord> = records.iter().map(|r| to_panel(zone, r)).collect();
    let plan = plan_set(&existing, desired);

    let (mut updated, mut created, mut deleted) = (0usize, 0usize, 0usize);
    let mut written = Vec::new();

    for change in plan {
        match change {
            Change::Update { id, record } => {
                tracing::debug!("Updating record {} ({} {})", id, record.name, record.rtype);
                let result = api
                    .update_record(ctx, zone_id, id, &record)
                    .await
                    .map_err(|e| e.context(format!("failed to update record {}", id)))?;
                written.push(convert_returned(zone, &result, "updated")?);
                updated += 1;
            }
            Change::Create(record) => {
                tracing::debug!("Creating {} {}", record.name, record.rtype);
                let result = api
                    .create_record(ctx, zone_id, &record)
                    .await
                    .map_err(|e| e.context("failed to create record"))?;
                written.push(convert_returned(zone, &result, "created")?);
                created += 1;
            }
            Change::Delete(record) => {
                tracing::debug!("Deleting surplus record {} ({} {})", record.id, record.name, record.rtype);
                api.delete_record(ctx, zone_id, record.id)
                    .await
                    .map_err(|e| e.context(format!("failed to delete extra record {}", record.id)))?;
                deleted += 1;
            }
        }
    }

    tracing::info!(
        "Set records in zone {}: {} updated, {} created, {} deleted",
        zone,
        updated,
        created,
        deleted
    );
    Ok(written)
}

/// Delete the records matching `records`
pub async fn delete_records<A>(
    api: &A,
    ctx: &Context,
    zone: &str,
    records: &[Record],
) -> Result<Vec<Record>>
where
    A: PanelApi + ?Sized,
{
    let zone_id = resolve_zone_id(api, ctx, zone).await?;
    let existing = api.list_records(ctx, zone_id, None).await?;

    let targets: Vec<PanelRecord> = records.iter().map(|r| to_panel(zone, r)).collect();

    let mut removed = Vec::new();
    for record in plan_delete(&existing, &targets) {
        tracing::debug!("Deleting record {} ({} {})", record.id, record.name, record.rtype);
        api.delete_record(ctx, zone_id, record.id)
            .await
            .map_err(|e| e.context(format!("failed to delete record {}", record.id)))?;
        removed.push(convert_returned(zone, &record, "deleted")?);
    }

    tracing::info!("Deleted {} record(s) from zone {}", removed.len(), zone);
    Ok(removed)
}
