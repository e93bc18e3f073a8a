// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the FCM legacy HTTP API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Request body for a downstream send.
///
/// Exactly one of `to` (single token) or `registration_ids` (multicast) is
/// set per request.
#[derive(Debug, Serialize)]
pub struct FcmMessage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_ids: Option<&'a [String]>,
    pub notification: FcmNotification<'a>,
    pub data: &'a BTreeMap<String, String>,
}

/// The visible notification part of a message.
#[derive(Debug, Serialize)]
pub struct FcmNotification<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

/// Downstream response for a send.
#[derive(Debug, Deserialize)]
pub struct FcmResponse {
    pub success: u32,
    pub failure: u32,
    #[serde(default)]
    pub results: Vec<FcmResult>,
}

/// One entry of the `results` array, positionally aligned with the token
/// list of the request.
#[derive(Debug, Deserialize)]
pub struct FcmResult {
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
