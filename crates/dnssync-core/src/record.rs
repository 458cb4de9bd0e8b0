// # Canonical DNS records
//
// Provider-agnostic record model shared by every provider crate.
//
// A record travels in two shapes:
//
// - [`Rr`]: the textual `(name, type, data, ttl)` tuple, as found in zone
//   files and provider APIs
// - [`Record`]: a validated record whose payload is typed per record type
//
// `Rr::parse` validates the tuple into a `Record`, and `Record::rr` renders it
// back. For every typed variant `record.rr().parse()` yields the same record.
//
// ## Usage
//
// ```rust
// use dnssync_core::record::{RecordData, Rr};
// use std::time::Duration;
//
// let rr = Rr::new("example.com.", "MX", "10 mail.example.com.", Duration::from_secs(3600));
// let record = rr.parse().unwrap();
//
// assert!(matches!(record.data, RecordData::Mx { preference: 10, .. }));
// assert_eq!(record.rr(), rr);
// ```

use crate::error::{Error, Result};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::time::Duration;

/// Textual resource record: name, type, data and TTL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rr {
    /// Owner name, relative or fully qualified
    pub name: String,
    /// Record type mnemonic (e.g. "A", "MX")
    pub rtype: String,
    /// Type-dependent payload in presentation format
    pub data: String,
    /// Time-to-live
    pub ttl: Duration,
}

impl Rr {
    /// Create a new textual record
    pub fn new(
        name: impl Into<String>,
        rtype: impl Into<String>,
        data: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            rtype: rtype.into(),
            data: data.into(),
            ttl,
        }
    }

    /// Validate this tuple into a typed [`Record`]
    ///
    /// Unknown record types are accepted as [`RecordData::Other`] without
    /// inspecting their payload.
    pub fn parse(&self) -> Result<Record> {
        let data = match self.rtype.to_ascii_uppercase().as_str() {
            "A" => {
                let ip: Ipv4Addr = self.data.trim().parse().map_err(|e| {
                    Error::invalid_record(format!("A record {}: {}: {}", self.name, self.data, e))
                })?;
                RecordData::Address(IpAddr::V4(ip))
            }
            "AAAA" => {
                let ip: Ipv6Addr = self.data.trim().parse().map_err(|e| {
                    Error::invalid_record(format!("AAAA record {}: {}: {}", self.name, self.data, e))
                })?;
                RecordData::Address(IpAddr::V6(ip))
            }
            "CNAME" => RecordData::Cname {
                target: self.target("CNAME")?,
            },
            "NS" => RecordData::Ns {
                target: self.target("NS")?,
            },
            "TXT" => RecordData::Txt {
                text: self.data.clone(),
            },
            "MX" => {
                let fields: Vec<&str> = self.data.split_whitespace().collect();
                let [preference, target] = fields.as_slice() else {
                    return Err(Error::invalid_record(format!(
                        "MX record {}: expected \"<preference> <target>\", got {:?}",
                        self.name, self.data
                    )));
                };
                RecordData::Mx {
                    preference: parse_u16("MX preference", preference)?,
                    target: (*target).to_string(),
                }
            }
            "SRV" => {
                validate_srv_name(&self.name)?;
                let fields: Vec<&str> = self.data.split_whitespace().collect();
                let [priority, weight, port, target] = fields.as_slice() else {
                    return Err(Error::invalid_record(format!(
                        "SRV record {}: expected \"<priority> <weight> <port> <target>\", got {:?}",
                        self.name, self.data
                    )));
                };
                RecordData::Srv {
                    priority: parse_u16("SRV priority", priority)?,
                    weight: parse_u16("SRV weight", weight)?,
                    port: parse_u16("SRV port", port)?,
                    target: (*target).to_string(),
                }
            }
            _ => RecordData::Other {
                rtype: self.rtype.clone(),
                data: self.data.clone(),
            },
        };

        Ok(Record {
            name: self.name.clone(),
            ttl: self.ttl,
            data,
        })
    }

    fn target(&self, rtype: &str) -> Result<String> {
        let target = self.data.trim();
        if target.is_empty() {
            return Err(Error::invalid_record(format!(
                "{} record {}: empty target",
                rtype, self.name
            )));
        }
        Ok(target.to_string())
    }
}

impl fmt::Display for Rr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.name,
            self.ttl.as_secs(),
            self.rtype,
            self.data
        )
    }
}

/// Parses the `Display` form: `name ttl type data...`
///
/// The data part is everything after the type, so TXT text and multi-field
/// payloads keep their inner spacing.
impl FromStr for Rr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || {
            Error::invalid_record(format!(
                "expected \"<name> <ttl> <type> <data>\", got {:?}",
                s
            ))
        };

        let (name, rest) = next_token(s).ok_or_else(malformed)?;
        let (ttl, rest) = next_token(rest).ok_or_else(malformed)?;
        let (rtype, data) = next_token(rest).ok_or_else(malformed)?;
        let data = data.trim();
        if data.is_empty() {
            return Err(malformed());
        }

        let ttl: u64 = ttl
            .parse()
            .map_err(|e| Error::invalid_record(format!("invalid TTL {:?}: {}", ttl, e)))?;

        Ok(Self::new(name, rtype, data, Duration::from_secs(ttl)))
    }
}

fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(idx) => Some((&s[..idx], &s[idx..])),
        None => Some((s, "")),
    }
}

fn parse_u16(what: &str, value: &str) -> Result<u16> {
    value
        .parse()
        .map_err(|e| Error::invalid_record(format!("invalid {} {:?}: {}", what, value, e)))
}

/// SRV owner names must start with `_service._proto`
fn validate_srv_name(name: &str) -> Result<()> {
    let mut labels = name.split('.');
    let service = labels.next().unwrap_or_default();
    let proto = labels.next().unwrap_or_default();

    let valid = |label: &str| label.len() > 1 && label.starts_with('_');
    if valid(service) && valid(proto) {
        Ok(())
    } else {
        Err(Error::invalid_record(format!(
            "SRV record name {:?} must start with _service._proto",
            name
        )))
    }
}

/// Typed payload of a [`Record`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordData {
    /// A or AAAA, depending on the address family
    Address(IpAddr),
    /// Canonical name
    Cname { target: String },
    /// Name server delegation
    Ns { target: String },
    /// Free-form text, stored without surrounding quotes
    Txt { text: String },
    /// Mail exchanger
    Mx { preference: u16, target: String },
    /// Service locator
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },
    /// Any other record type, kept opaque
    Other { rtype: String, data: String },
}

/// Validated, provider-agnostic DNS record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    /// Owner name, relative or fully qualified
    pub name: String,
    /// Time-to-live
    pub ttl: Duration,
    /// Typed payload
    pub data: RecordData,
}

impl Record {
    /// Owner name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Time-to-live
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Record type mnemonic
    pub fn rtype(&self) -> &str {
        match &self.data {
            RecordData::Address(IpAddr::V4(_)) => "A",
            RecordData::Address(IpAddr::V6(_)) => "AAAA",
            RecordData::Cname { .. } => "CNAME",
            RecordData::Ns { .. } => "NS",
            RecordData::Txt { .. } => "TXT",
            RecordData::Mx { .. } => "MX",
            RecordData::Srv { .. } => "SRV",
            RecordData::Other { rtype, .. } => rtype,
        }
    }

    /// Render this record back to its textual tuple
    pub fn rr(&self) -> Rr {
        let data = match &self.data {
            RecordData::Address(ip) => ip.to_string(),
            RecordData::Cname { target } | RecordData::Ns { target } => target.clone(),
            RecordData::Txt { text } => text.clone(),
            RecordData::Mx { preference, target } => format!("{} {}", preference, target),
            RecordData::Srv {
                priority,
                weight,
                port,
                target,
            } => format!("{} {} {} {}", priority, weight, port, target),
            RecordData::Other { data, .. } => data.clone(),
        };

        Rr::new(self.name.clone(), self.rtype(), data, self.ttl)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.rr().fmt(f)
    }
}
