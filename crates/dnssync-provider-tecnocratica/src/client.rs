// # Tecnocratica control-panel HTTP client
//
// Thin transport over the DNS endpoints of the control-panel API:
//
// - List Zones:     GET    `dns/zones`
// - List Records:   GET    `dns/zones/:zone_id/records[?type=T]`
// - Create Record:  POST   `dns/zones/:zone_id/records`            `{"record": {...}}`
// - Update Record:  PUT    `dns/zones/:zone_id/records/:record_id` `{"record": {...}}`
// - Delete Record:  DELETE `dns/zones/:zone_id/records/:record_id`
//
// Every request carries the `X-TCpanel-Token` header and asks for JSON.
// Non-2xx answers become `Error::Status` with the response body attached.
// No retries: a failed call is returned as is.
//
// ## Security
//
// - API token NEVER appears in logs, errors or Debug output
// - Client construction fails fast if the token is empty

use crate::api::PanelApi;
use crate::models::{PanelRecord, RecordRequest, Zone};
use async_trait::async_trait;
use dnssync_core::{Context, Error, Result};
use reqwest::Method;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Default API base URL (Neodigit deployment)
pub const DEFAULT_BASE_URL: &str = "https://api.neodigit.net/v1";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Authentication header expected by the control panel
const TOKEN_HEADER: &str = "X-TCpanel-Token";

const USER_AGENT: &str = concat!("dnssync-tecnocratica/", env!("CARGO_PKG_VERSION"));

/// HTTP client for one control-panel account
pub struct PanelClient {
    /// Control-panel API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// API base URL, e.g. `https://api.neodigit.net/v1`
    base_url: Url,

    http: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for PanelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelClient")
            .field("api_token", &"<REDACTED>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// Status line and body of a successful response
struct RawResponse {
    status: u16,
    body: String,
}

impl PanelClient {
    /// Create a client for `api_url`, or [`DEFAULT_BASE_URL`] when `None`
    ///
    /// Fails with `Error::Config` if the token is empty or the URL cannot be
    /// used as a base for endpoint paths.
    pub fn new(api_token: impl Into<String>, api_url: Option<&str>) -> Result<Self> {
        let raw_url = api_url.unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(raw_url)
            .map_err(|e| Error::config(format!("invalid API URL {:?}: {}", raw_url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        Self::with_client(http, api_token, base_url)
    }

    /// Create a client around a pre-built `reqwest::Client`
    ///
    /// Applies the same token and base URL checks as [`PanelClient::new`].
    pub fn with_client(
        http: reqwest::Client,
        api_token: impl Into<String>,
        base_url: Url,
    ) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::config("Tecnocratica API token cannot be empty"));
        }
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "invalid API URL {:?}: not a hierarchical URL",
                base_url.as_str()
            )));
        }

        Ok(Self {
            api_token,
            base_url,
            http,
        })
    }

    /// The API base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::config(format!(
                    "invalid API URL {:?}: not a hierarchical URL",
                    self.base_url.as_str()
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn records_endpoint(&self, zone_id: u64, record_id: Option<u64>) -> Result<Url> {
        let zone_id = zone_id.to_string();
        match record_id {
            Some(record_id) => {
                let record_id = record_id.to_string();
                self.endpoint(&["dns", "zones", &zone_id, "records", &record_id])
            }
            None => self.endpoint(&["dns", "zones", &zone_id, "records"]),
        }
    }

    /// Send one request and return the body of a 2xx response
    async fn execute(
        &self,
        ctx: &Context,
        method: Method,
        url: Url,
        payload: Option<&PanelRecord>,
    ) -> Result<RawResponse> {
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(TOKEN_HEADER, &self.api_token)
            .header(ACCEPT, "application/json");
        if let Some(record) = payload {
            // Also sets Content-Type: application/json
            request = request.json(&RecordRequest { record });
        }

        let transport_error = |e: reqwest::Error| Error::Transport {
            method: method.to_string(),
            url: url.to_string(),
            message: e.to_string(),
        };

        ctx.run(async {
            let response = request.send().await.map_err(transport_error)?;
            let status = response.status();
            let body = response.text().await.map_err(transport_error)?;

            if !status.is_success() {
                tracing::warn!(
                    "{} {} failed with status {} ({})",
                    method,
                    url,
                    status.as_u16(),
                    status_hint(status.as_u16())
                );
                return Err(Error::Status {
                    method: method.to_string(),
                    url: url.to_string(),
                    status: status.as_u16(),
                    body,
                });
            }

            Ok(RawResponse {
                status: status.as_u16(),
                body,
            })
        })
        .await
    }

    /// Send one request and decode its JSON body
    async fn execute_json<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        method: Method,
        url: Url,
        payload: Option<&PanelRecord>,
    ) -> Result<T> {
        let response = self
            .execute(ctx, method.clone(), url.clone(), payload)
            .await?;

        serde_json::from_str(&response.body).map_err(|e| Error::Decode {
            method: method.to_string(),
            url: url.to_string(),
            status: response.status,
            body: response.body.clone(),
            message: e.to_string(),
        })
    }
}

/// Short diagnosis of a failing status code, for logs
fn status_hint(status: u16) -> &'static str {
    match status {
        401 | 403 => "authentication failed: invalid API token or insufficient permissions",
        404 => "not found",
        409 => "conflict",
        422 => "rejected record data",
        429 => "rate limit exceeded",
        500..=599 => "server error",
        _ => "unexpected status",
    }
}

#[async_trait]
impl PanelApi for PanelClient {
    async fn list_zones(&self, ctx: &Context) -> Result<Vec<Zone>> {
        let url = self.endpoint(&["dns", "zones"])?;
        self.execute_json(ctx, Method::GET, url, None).await
    }

    async fn list_records(
        &self,
        ctx: &Context,
        zone_id: u64,
        type_filter: Option<&str>,
    ) -> Result<Vec<PanelRecord>> {
        let mut url = self.records_endpoint(zone_id, None)?;
        if let Some(rtype) = type_filter.filter(|t| !t.is_empty()) {
            url.query_pairs_mut().append_pair("type", rtype);
        }
        self.execute_json(ctx, Method::GET, url, None).await
    }

    async fn create_record(
        &self,
        ctx: &Context,
        zone_id: u64,
        record: &PanelRecord,
    ) -> Result<PanelRecord> {
        let url = self.records_endpoint(zone_id, None)?;
        self.execute_json(ctx, Method::POST, url, Some(record)).await
    }

    async fn update_record(
        &self,
        ctx: &Context,
        zone_id: u64,
        record_id: u64,
        record: &PanelRecord,
    ) -> Result<PanelRecord> {
        let url = self.records_endpoint(zone_id, Some(record_id))?;
        self.execute_json(ctx, Method::PUT, url, Some(record)).await
    }

    async fn delete_record(&self, ctx: &Context, zone_id: u64, record_id: u64) -> Result<()> {
        let url = self.records_endpoint(zone_id, Some(record_id))?;
        self.execute(ctx, Method::DELETE, url, None).await?;
        Ok(())
    }
}
