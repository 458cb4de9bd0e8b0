//! Test doubles and common utilities for provider contract tests
//!
//! `FakePanel` is an in-memory control panel that records every call, so the
//! tests can assert on the exact sequence of provider operations.

#![allow(dead_code)]

use async_trait::async_trait;
use dnssync_core::{Context, Error, Record, Result, Rr};
use dnssync_provider_tecnocratica::{PanelApi, PanelRecord, Zone};
use std::sync::Mutex;
use std::time::Duration;

/// One call received by the fake panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListZones,
    ListRecords { zone_id: u64 },
    Create { zone_id: u64, record: PanelRecord },
    Update { zone_id: u64, record_id: u64, record: PanelRecord },
    Delete { zone_id: u64, record_id: u64 },
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Call::Create { .. } | Call::Update { .. } | Call::Delete { .. })
    }
}

#[derive(Default)]
struct PanelState {
    /// (zone_id, record) in provider order
    records: Vec<(u64, PanelRecord)>,
    next_id: u64,
    calls: Vec<Call>,
    /// Fail the n-th mutation (1-based) with a 500
    fail_mutation: Option<usize>,
    /// Cancel this context while serving the given call (1-based)
    cancel_during: Option<(usize, Context)>,
}

/// In-memory control panel
pub struct FakePanel {
    zones: Vec<Zone>,
    state: Mutex<PanelState>,
}

impl FakePanel {
    /// A panel hosting `example.com` (id 1) and `example.org` (id 2)
    pub fn new() -> Self {
        Self {
            zones: vec![
                Zone {
                    id: 1,
                    name: "example.com".to_string(),
                },
                Zone {
                    id: 2,
                    name: "example.org.".to_string(),
                },
            ],
            state: Mutex::new(PanelState {
                next_id: 100,
                ..Default::default()
            }),
        }
    }

    /// Seed a record into a zone, returning its id
    pub fn seed(&self, zone_id: u64, name: &str, rtype: &str, content: &str, priority: u16) -> u64 {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.records.push((
            zone_id,
            PanelRecord {
                id,
                name: name.to_string(),
                rtype: rtype.to_string(),
                content: content.to_string(),
                ttl: 3600,
                priority,
            },
        ));
        id
    }

    /// Make the n-th mutating call (1-based) fail with status 500
    pub fn fail_mutation(&self, n: usize) {
        self.state.lock().unwrap().fail_mutation = Some(n);
    }

    /// Cancel `ctx` while serving call number `call` (1-based).
    ///
    /// That call still completes; every later call sees the cancellation.
    pub fn cancel_during(&self, call: usize, ctx: &Context) {
        self.state.lock().unwrap().cancel_during = Some((call, ctx.clone()));
    }

    /// Every call received so far
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Only the create/update/delete calls
    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    /// Current records of a zone, in provider order
    pub fn records(&self, zone_id: u64) -> Vec<PanelRecord> {
        self.state
            .lock()
            .unwrap()
            .records
            .iter()
            .filter(|(z, _)| *z == zone_id)
            .map(|(_, r)| r.clone())
            .collect()
    }

    /// Log a call and decide whether it fails
    fn serve(&self, call: Call) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let mutation = call.is_mutation();
        state.calls.push(call);

        let served = state.calls.len();
        if let Some((call, ctx)) = &state.cancel_during {
            if served == *call {
                ctx.cancel();
            }
        }

        if mutation {
            let count = state.calls.iter().filter(|c| c.is_mutation()).count();
            if state.fail_mutation == Some(count) {
                return Err(Error::Status {
                    method: "POST".to_string(),
                    url: "http://panel.test/dns/zones".to_string(),
                    status: 500,
                    body: "{\"error\":\"internal server error\"}".to_string(),
                });
            }
        }
        Ok(())
    }

    fn not_found(record_id: u64) -> Error {
        Error::Status {
            method: "PUT".to_string(),
            url: format!("http://panel.test/dns/zones/records/{}", record_id),
            status: 404,
            body: "{\"error\":\"record not found\"}".to_string(),
        }
    }
}

#[async_trait]
impl PanelApi for FakePanel {
    async fn list_zones(&self, ctx: &Context) -> Result<Vec<Zone>> {
        ctx.run(async {
            self.serve(Call::ListZones)?;
            Ok(self.zones.clone())
        })
        .await
    }

    async fn list_records(
        &self,
        ctx: &Context,
        zone_id: u64,
        type_filter: Option<&str>,
    ) -> Result<Vec<PanelRecord>> {
        ctx.run(async {
            self.serve(Call::ListRecords { zone_id })?;
            Ok(self
                .records(zone_id)
                .into_iter()
                .filter(|r| type_filter.is_none_or(|t| r.rtype == t))
                .collect())
        })
        .await
    }

    async fn create_record(
        &self,
        ctx: &Context,
        zone_id: u64,
        record: &PanelRecord,
    ) -> Result<PanelRecord> {
        ctx.run(async {
            self.serve(Call::Create {
                zone_id,
                record: record.clone(),
            })?;

            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let stored = PanelRecord {
                id: state.next_id,
                ..record.clone()
            };
            state.records.push((zone_id, stored.clone()));
            Ok(stored)
        })
        .await
    }

    async fn update_record(
        &self,
        ctx: &Context,
        zone_id: u64,
        record_id: u64,
        record: &PanelRecord,
    ) -> Result<PanelRecord> {
        ctx.run(async {
            self.serve(Call::Update {
                zone_id,
                record_id,
                record: record.clone(),
            })?;

            let mut state = self.state.lock().unwrap();
            let slot = state
                .records
                .iter_mut()
                .find(|(z, r)| *z == zone_id && r.id == record_id)
                .ok_or_else(|| Self::not_found(record_id))?;
            slot.1 = PanelRecord {
                id: record_id,
                ..record.clone()
            };
            Ok(slot.1.clone())
        })
        .await
    }

    async fn delete_record(&self, ctx: &Context, zone_id: u64, record_id: u64) -> Result<()> {
        ctx.run(async {
            self.serve(Call::Delete { zone_id, record_id })?;

            let mut state = self.state.lock().unwrap();
            let before = state.records.len();
            state
                .records
                .retain(|(z, r)| !(*z == zone_id && r.id == record_id));
            if state.records.len() == before {
                return Err(Self::not_found(record_id));
            }
            Ok(())
        })
        .await
    }
}

/// Parse a canonical record, panicking on invalid input
pub fn record(name: &str, rtype: &str, data: &str) -> Record {
    Rr::new(name, rtype, data, Duration::from_secs(3600))
        .parse()
        .unwrap()
}

/// Data of a record as rendered by the codec
pub fn data_of(record: &Record) -> String {
    record.rr().data
}
