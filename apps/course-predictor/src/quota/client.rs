use std::time::{Duration, Instant};

use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::{FetchError, QuotaSource, COURSE_QUERY_PARAM, QUOTAS_PATH};

/// Body of `GET /get_quotas`. A missing or null `quotas` key means the
/// course has no quotas.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct QuotaListResponse {
    #[serde(default)]
    pub quotas: Option<Vec<String>>,
}

impl QuotaListResponse {
    pub fn into_quotas(self) -> Vec<String> {
        self.quotas.unwrap_or_default()
    }
}

pub struct HttpQuotaSource {
    http_client: Client,
    endpoint: Url,
}

impl HttpQuotaSource {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        use anyhow::Context;

        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build quota endpoint client")?;

        let endpoint = Url::parse(&format!("{}{}", base_url.trim_end_matches('/'), QUOTAS_PATH))
            .with_context(|| format!("Invalid quota endpoint base url: {}", base_url))?;

        Ok(Self {
            http_client,
            endpoint,
        })
    }

    /// Full request URL for `course`, with the course URL-encoded.
    pub fn quotas_url(&self, course: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair(COURSE_QUERY_PARAM, course);
        // Form encoding writes spaces as `+`; a literal `+` is already `%2B`.
        let query = url.query().map(|q| q.replace('+', "%20"));
        url.set_query(query.as_deref());
        url
    }

    #[instrument(skip(self), fields(course = %course))]
    async fn request_quotas(&self, course: &str) -> Result<Vec<String>, FetchError> {
        let url = self.quotas_url(course);
        debug!("Requesting quotas from {}", url);

        let start = Instant::now();
        let response = self.http_client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_string());
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let quotas = parse_quota_body(&body)?;

        info!(
            count = quotas.len(),
            latency_ms = start.elapsed().as_millis(),
            "Quota list loaded"
        );
        Ok(quotas)
    }
}

impl QuotaSource for HttpQuotaSource {
    async fn fetch_quotas(&self, course: &str) -> Result<Vec<String>, FetchError> {
        self.request_quotas(course).await
    }
}

/// Validates the response shape: an object whose optional `quotas` key
/// holds an ordered list of strings.
pub(crate) fn parse_quota_body(body: &[u8]) -> Result<Vec<String>, FetchError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(FetchError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }

    let response: QuotaListResponse = serde_json::from_value(value)?;
    Ok(response.into_quotas())
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
