//! REST reader against an Aptos fullnode.

use capy_api::client::LedgerReader;
use capy_api::error::CapyError;
use capy_api::payload::ViewRequest;
use serde_json::Value;

/// Confirmation polling: ~30 seconds at one-second intervals.
const TX_POLL_ATTEMPTS: u32 = 30;
const TX_POLL_INTERVAL_MS: u32 = 1_000;

pub struct RestLedger {
    http: reqwest::Client,
    base: String,
}

impl RestLedger {
    pub fn new(base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_string(),
        }
    }
}

impl LedgerReader for RestLedger {
    async fn view(&self, request: &ViewRequest) -> Result<Vec<Value>, CapyError> {
        let url = format!("{}/v1/view", self.base);
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| CapyError::Rpc(format!("{}: {e}", request.function)))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            // Views surface contract aborts (e.g. the init precondition)
            // in the error body; everything else is a plain RPC failure.
            return Err(match CapyError::classify(body) {
                CapyError::Transaction(message) => CapyError::Rpc(message),
                classified => classified,
            });
        }
        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| CapyError::Decode(format!("{}: {e}", request.function)))
    }

    async fn wait_for_transaction(&self, hash: &str) -> Result<(), CapyError> {
        let url = format!("{}/v1/transactions/by_hash/{hash}", self.base);
        for _ in 0..TX_POLL_ATTEMPTS {
            let response = self
                .http
                .get(&url)
                .send()
                .await
                .map_err(|e| CapyError::Rpc(e.to_string()))?;

            // Not yet indexed; keep polling.
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                sleep_ms(TX_POLL_INTERVAL_MS).await;
                continue;
            }

            let body: Value = response
                .json()
                .await
                .map_err(|e| CapyError::Decode(e.to_string()))?;

            if body.get("type").and_then(Value::as_str) == Some("pending_transaction") {
                sleep_ms(TX_POLL_INTERVAL_MS).await;
                continue;
            }

            return if body.get("success").and_then(Value::as_bool).unwrap_or(false) {
                Ok(())
            } else {
                let status = body
                    .get("vm_status")
                    .and_then(Value::as_str)
                    .unwrap_or("transaction failed");
                Err(CapyError::classify(status))
            };
        }
        Err(CapyError::Timeout(hash.to_string()))
    }

    async fn has_resource(&self, address: &str, resource_type: &str) -> Result<bool, CapyError> {
        let url = format!("{}/v1/accounts/{address}/resource/{resource_type}", self.base);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| CapyError::Rpc(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if response.status().is_success() {
            return Ok(true);
        }
        let body = response.text().await.unwrap_or_default();
        Err(CapyError::Rpc(body))
    }
}

pub(crate) async fn sleep_ms(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}
