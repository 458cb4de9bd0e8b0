//! Conversion between canonical records and panel records
//!
//! Pure functions, no I/O. Canonical names are fully qualified (or relative
//! to the zone); the panel stores zone-relative labels with `@` for the apex,
//! keeps MX/SRV priority in its own field, and stores TXT content unquoted.

use crate::models::PanelRecord;
use dnssync_core::{Record, Result, Rr};
use std::time::Duration;

/// Apex marker used by the panel
pub const APEX: &str = "@";

/// Stand-in owner name for SRV records the panel returns at the apex.
///
/// SRV names must start with `_service._proto`, so an apex SRV record could
/// not be represented otherwise. The substitution is lossy: writing such a
/// record back stores it under this label instead of the apex.
pub const SRV_APEX_PLACEHOLDER: &str = "_service._tcp";

/// Convert a canonical record into the panel's flat representation.
pub fn to_panel(zone: &str, record: &Record) -> PanelRecord {
    let rr = record.rr();

    let (content, priority) = match rr.rtype.as_str() {
        "TXT" => (rr.data.trim_matches('"').to_string(), 0),
        // "priority target"
        "MX" => split_priority(&rr.data, 2),
        // "priority weight port target"
        "SRV" => split_priority(&rr.data, 4),
        _ => (rr.data.clone(), 0),
    };

    PanelRecord {
        id: 0,
        name: relative_name(zone, &rr.name),
        rtype: rr.rtype,
        content,
        // Truncated to whole seconds
        ttl: u32::try_from(rr.ttl.as_secs()).unwrap_or(u32::MAX),
        priority,
    }
}

/// Split the leading priority off `data` when it has at least `min_fields`
/// fields; otherwise keep `data` as content with priority 0.
fn split_priority(data: &str, min_fields: usize) -> (String, u16) {
    let fields: Vec<&str> = data.split_whitespace().collect();
    match fields.split_first() {
        Some((priority, rest)) if fields.len() >= min_fields => {
            (rest.join(" "), priority.parse().unwrap_or_default())
        }
        _ => (data.to_string(), 0),
    }
}

/// Convert a panel record back into a canonical record.
///
/// Fails with the codec's error when the reconstructed tuple is not a valid
/// record.
pub fn to_canonical(zone: &str, record: &PanelRecord) -> Result<Record> {
    let data = match record.rtype.as_str() {
        "TXT" => record.content.trim_matches('"').to_string(),
        "MX" | "SRV" => format!("{} {}", record.priority, record.content),
        _ => record.content.clone(),
    };

    let name = if record.rtype == "SRV" && (record.name.is_empty() || record.name == APEX) {
        SRV_APEX_PLACEHOLDER
    } else {
        record.name.as_str()
    };

    Rr::new(
        absolute_name(zone, name),
        record.rtype.clone(),
        data,
        Duration::from_secs(u64::from(record.ttl)),
    )
    .parse()
}

/// Zone-relative label for `name`, with `@` for the apex.
pub fn relative_name(zone: &str, name: &str) -> String {
    let bare_zone = zone.strip_suffix('.').unwrap_or(zone);
    let bare_name = name.strip_suffix('.').unwrap_or(name);

    let relative = bare_name
        .strip_suffix(bare_zone)
        .and_then(|prefix| prefix.strip_suffix('.'))
        .unwrap_or(name);
    let bare_relative = relative.strip_suffix('.').unwrap_or(relative);

    if relative.is_empty() || relative == APEX || bare_relative == bare_zone {
        APEX.to_string()
    } else {
        relative.to_string()
    }
}

/// Fully qualified name (with trailing dot) for a panel name.
pub fn absolute_name(zone: &str, name: &str) -> String {
    let bare_zone = zone.strip_suffix('.').unwrap_or(zone);
    let bare_name = name.strip_suffix('.').unwrap_or(name);

    if name.is_empty() || name == APEX || bare_name == bare_zone {
        format!("{}.", bare_zone)
    } else if bare_name.ends_with(&format!(".{}", bare_zone)) {
        // Already qualified by the panel
        format!("{}.", bare_name)
    } else {
        format!("{}.{}.", name, bare_zone)
    }
}
