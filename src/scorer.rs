//! Client side of the external scoring service.
//!
//! The ranking itself happens remotely; this module only ships the collected
//! metrics and turns the reply into either ranked banks or a user-facing
//! error.

use std::time::Duration;

use anyhow::{Context, Result as AnyResult};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{RankerError, Result};
use crate::models::{BankMetrics, RankedBank};

/// Default origin of the scoring service.
pub const DEFAULT_SCORER_URL: &str = "http://127.0.0.1:5000";
/// Path of the ranking endpoint below the origin.
const CALCULATE_PATH: &str = "/calculate";
/// Shown when an error reply carries no usable message.
const GENERIC_FAILURE: &str = "Something went wrong.";

/// Anything that can rank a batch of banks. Implemented over HTTP for the
/// real service and by fakes in tests.
pub trait Scorer: Send + Sync {
    fn calculate(&self, banks: &[BankMetrics]) -> Result<Vec<RankedBank>>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Scorer reached with a blocking `POST /calculate`.
pub struct HttpScorer {
    client: Client,
    endpoint: String,
}

impl HttpScorer {
    pub fn new(base_url: &str) -> AnyResult<Self> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint_for(base_url),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Scorer for HttpScorer {
    fn calculate(&self, banks: &[BankMetrics]) -> Result<Vec<RankedBank>> {
        info!(endpoint = %self.endpoint, banks = banks.len(), "requesting ranking");
        let response = self
            .client
            .post(&self.endpoint)
            .json(banks)
            .send()
            .map_err(|err| RankerError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|err| RankerError::Transport(err.to_string()))?;

        if !status.is_success() {
            let message = remote_message(&body);
            warn!(%status, %message, "scorer rejected request");
            return Err(RankerError::Remote(message));
        }

        let ranked: Vec<RankedBank> = serde_json::from_str(&body)
            .map_err(|err| RankerError::Transport(format!("invalid response from scorer: {err}")))?;
        debug!(results = ranked.len(), "scorer replied");
        Ok(ranked)
    }
}

/// Join the origin with the ranking path, ignoring trailing slashes.
fn endpoint_for(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), CALCULATE_PATH)
}

/// Pull the `error` string out of a failure body, falling back to a generic
/// message when it is missing, blank, or not JSON at all.
fn remote_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}
