use anyhow::{Context, Result, anyhow, bail};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use super::{ChunkTranslator, GtxClient};

const MYMEMORY_ENDPOINT: &str = "https://api.mymemory.translated.net/get";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Secondary translation provider, used only when the primary path fails.
pub struct MyMemoryClient {
    http: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: MyMemoryData,
    /// The API reports this as either a number or a numeric string.
    #[serde(rename = "responseStatus")]
    response_status: Value,
}

#[derive(Debug, Deserialize)]
struct MyMemoryData {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl MyMemoryClient {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(MYMEMORY_ENDPOINT.to_string())
    }

    pub fn with_endpoint(endpoint: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, endpoint })
    }
}

impl ChunkTranslator for MyMemoryClient {
    async fn translate_chunk(&self, text: &str, src: &str, dest: &str) -> Result<String> {
        let langpair = format!("{src}|{dest}");
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("q", text), ("langpair", &langpair)])
            .send()
            .await
            .with_context(|| format!("Failed to reach fallback endpoint: {}", self.endpoint))?;

        if !response.status().is_success() {
            bail!("Fallback endpoint returned status {}", response.status());
        }

        let payload: MyMemoryResponse = response
            .json()
            .await
            .context("Malformed fallback response")?;

        let status = response_status(&payload.response_status);
        if status != 200 {
            bail!("Fallback provider reported status {status}");
        }
        if payload.response_data.translated_text.is_empty() {
            bail!("Fallback provider returned an empty translation");
        }

        Ok(payload.response_data.translated_text)
    }
}

fn response_status(value: &Value) -> i64 {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
        .unwrap_or(0)
}

/// Tries the primary provider and falls back to the secondary per chunk.
///
/// One chain instance is constructed at startup and shared by all worker
/// tasks; the error is surfaced to the caller only when both providers fail,
/// at which point the caller degrades to the original text.
pub struct FallbackChain<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackChain<P, S> {
    pub const fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P: ChunkTranslator, S: ChunkTranslator> ChunkTranslator for FallbackChain<P, S> {
    async fn translate_chunk(&self, text: &str, src: &str, dest: &str) -> Result<String> {
        match self.primary.translate_chunk(text, src, dest).await {
            Ok(translated) => Ok(translated),
            Err(primary_err) => {
                crate::warn!(
                    "{} primary provider failed ({primary_err:#}), trying fallback",
                    crate::ui::Style::warning("Warning:")
                );
                self.secondary
                    .translate_chunk(text, src, dest)
                    .await
                    .map_err(|fallback_err| {
                        anyhow!("both providers failed: {primary_err:#}; {fallback_err:#}")
                    })
            }
        }
    }
}

/// The provider chain used by the CLI.
pub type ProviderChain = FallbackChain<GtxClient, MyMemoryClient>;

/// Builds the default gtx-then-MyMemory chain.
pub fn default_chain() -> Result<ProviderChain> {
    Ok(FallbackChain::new(GtxClient::new()?, MyMemoryClient::new()?))
}
