// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client implementing [`PushSender`] against the FCM legacy API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use herdlink_config::model::PushConfig;
use herdlink_core::types::{
    AdapterType, DeliveryReport, HealthStatus, MessageEnvelope, TargetOutcome,
};
use herdlink_core::{Adapter, HerdlinkError, PushSender};

use crate::types::{FcmMessage, FcmNotification, FcmResponse};

/// Push sender backed by the FCM legacy HTTP endpoint.
///
/// One POST per send; no retries -- a failed delivery is terminal for that
/// message instance, and the triggering domain event is never re-queued.
pub struct FcmSender {
    client: reqwest::Client,
    api_url: String,
    server_key: Option<String>,
}

impl FcmSender {
    /// Create a sender from the push configuration.
    pub fn new(config: &PushConfig) -> Result<Self, HerdlinkError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HerdlinkError::Delivery {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            server_key: config.server_key.clone(),
        })
    }

    fn server_key(&self) -> Result<&str, HerdlinkError> {
        self.server_key
            .as_deref()
            .ok_or_else(|| HerdlinkError::Delivery {
                message: "push server key not configured".to_string(),
                source: None,
            })
    }

    /// POST one message and parse the downstream response.
    async fn post_message(&self, message: &FcmMessage<'_>) -> Result<FcmResponse, HerdlinkError> {
        let key = self.server_key()?;

        let response = self
            .client
            .post(&self.api_url)
            .header("authorization", format!("key={key}"))
            .json(message)
            .send()
            .await
            .map_err(|e| HerdlinkError::Delivery {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "push endpoint response received");
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(HerdlinkError::Delivery {
                message: format!("push endpoint returned {status}: {body}"),
                source: None,
            });
        }

        serde_json::from_str(&body).map_err(|e| HerdlinkError::Delivery {
            message: format!("malformed push endpoint response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[async_trait]
impl Adapter for FcmSender {
    fn name(&self) -> &str {
        "fcm"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Sender
    }

    async fn health_check(&self) -> Result<HealthStatus, HerdlinkError> {
        // There is no cheap downstream ping; a missing credential is the
        // only local failure mode worth reporting.
        match self.server_key {
            Some(_) => Ok(HealthStatus::Healthy),
            None => Ok(HealthStatus::Unhealthy(
                "push server key not configured".to_string(),
            )),
        }
    }

    async fn shutdown(&self) -> Result<(), HerdlinkError> {
        Ok(())
    }
}

#[async_trait]
impl PushSender for FcmSender {
    async fn send_multicast(
        &self,
        envelope: &MessageEnvelope,
        tokens: &[String],
    ) -> Result<DeliveryReport, HerdlinkError> {
        let message = FcmMessage {
            to: None,
            registration_ids: Some(tokens),
            notification: FcmNotification {
                title: &envelope.title,
                body: &envelope.body,
            },
            data: &envelope.data,
        };
        let response = self.post_message(&message).await?;

        if response.results.len() != tokens.len() {
            return Err(HerdlinkError::Delivery {
                message: format!(
                    "push endpoint returned {} results for {} tokens",
                    response.results.len(),
                    tokens.len()
                ),
                source: None,
            });
        }

        // Counts come from the downstream response; per-token outcomes map
        // positionally onto the token list.
        let outcomes = tokens
            .iter()
            .zip(response.results.iter())
            .map(|(token, result)| TargetOutcome {
                token: token.clone(),
                ok: result.error.is_none(),
                error_reason: result.error.clone(),
            })
            .collect();
        Ok(DeliveryReport {
            success_count: response.success,
            failure_count: response.failure,
            outcomes,
        })
    }

    async fn send_single(
        &self,
        envelope: &MessageEnvelope,
        token: &str,
    ) -> Result<TargetOutcome, HerdlinkError> {
        let message = FcmMessage {
            to: Some(token),
            registration_ids: None,
            notification: FcmNotification {
                title: &envelope.title,
                body: &envelope.body,
            },
            data: &envelope.data,
        };
        let response = self.post_message(&message).await?;

        let error = response.results.first().and_then(|r| r.error.clone());
        Ok(TargetOutcome {
            token: token.to_string(),
            ok: response.success > 0 && error.is_none(),
            error_reason: error,
        })
    }
}
