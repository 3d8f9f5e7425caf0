use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::ChunkTranslator;

const GTX_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// A hung request must not stall a whole worker group.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Primary translation provider: the public `gtx` endpoint.
///
/// The response body is a loosely-typed nested array; see
/// [`parse_gtx_response`] for the shape we rely on.
pub struct GtxClient {
    http: Client,
    endpoint: String,
}

impl GtxClient {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(GTX_ENDPOINT.to_string())
    }

    /// Builds a client against a non-default endpoint.
    pub fn with_endpoint(endpoint: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, endpoint })
    }
}

impl ChunkTranslator for GtxClient {
    async fn translate_chunk(&self, text: &str, src: &str, dest: &str) -> Result<String> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", src),
                ("tl", dest),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to reach translation endpoint: {}", self.endpoint))?;

        if !response.status().is_success() {
            bail!(
                "Translation endpoint returned status {}",
                response.status()
            );
        }

        let body = response
            .text()
            .await
            .context("Failed to read translation response body")?;

        parse_gtx_response(&body)
    }
}

/// Extracts the translated text from a gtx response.
///
/// The body looks like `[[["Bonjour","Hello",null,null,1],...],null,"en"]`:
/// the first top-level entry is a list of `[translated, original, ...]`
/// segment pairs. Null and boolean tokens elsewhere in the payload are
/// tolerated by parsing into a dynamic value and picking only string
/// segments.
fn parse_gtx_response(body: &str) -> Result<String> {
    let value: Value =
        serde_json::from_str(body.trim()).context("Malformed translation response")?;

    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .context("Unexpected translation response shape")?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        bail!("Translation response contained no segments");
    }

    Ok(translated)
}
