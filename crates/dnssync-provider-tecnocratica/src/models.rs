//! Wire models of the Tecnocratica control-panel DNS API

use serde::{Deserialize, Deserializer, Serialize};

/// DNS zone as listed by `GET dns/zones`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: u64,
    pub name: String,
}

/// Flat record representation used by the API
///
/// For MX and SRV the priority lives in `priority` and `content` holds the
/// remainder (`target` for MX, `weight port target` for SRV). TXT content is
/// stored unquoted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelRecord {
    /// Provider-assigned identity, zero before creation
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub id: u64,
    /// Zone-relative name, or "@" for the apex
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type")]
    pub rtype: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ttl: u32,
    /// Meaningful for MX and SRV only
    #[serde(rename = "prio", alias = "priority", default, deserialize_with = "null_as_default")]
    pub priority: u16,
}

/// The panel sends `null` for unset fields; read it as the zero value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_zero(id: &u64) -> bool {
    *id == 0
}

/// Request envelope for create and update calls
#[derive(Debug, Serialize)]
pub(crate) struct RecordRequest<'a> {
    pub record: &'a PanelRecord,
}
