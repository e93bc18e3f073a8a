// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the notification endpoints.
//!
//! Required fields are modeled as defaulted strings and validated by hand
//! so a missing field surfaces as a 400 with a named-field message instead
//! of a deserialization rejection.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use herdlink_core::types::{collections, Role};
use herdlink_core::HerdlinkError;
use herdlink_notify::envelope;

use crate::auth;
use crate::error::ApiError;
use crate::server::GatewayState;

/// Request body for POST /notify-farmers-new-alert.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerAlertRequest {
    #[serde(default)]
    pub alert_type: String,
    #[serde(default)]
    pub alert_message: String,
    #[serde(default)]
    pub created_by_name: Option<String>,
}

/// Request body for POST /notify-vets-new-request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VetRequestRequest {
    #[serde(default)]
    pub farmer_name: String,
    #[serde(default)]
    pub animal_type: String,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
}

/// Request body for POST /notify-farmer-treatment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerTreatmentRequest {
    #[serde(default)]
    pub vet_name: String,
    #[serde(default)]
    pub animal_type: String,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub treatment: Option<String>,
}

/// Request body for POST /validate-admin-code.
#[derive(Debug, Deserialize)]
pub struct ValidateCodeRequest {
    #[serde(default)]
    pub code: String,
}

/// Request body for POST /store-user-token.
#[derive(Debug, Deserialize)]
pub struct StoreTokenRequest {
    #[serde(rename = "fcmToken", default)]
    pub fcm_token: String,
}

/// Response body carrying delivery counts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResponse {
    pub success_count: u32,
    pub failure_count: u32,
}

/// Response body for POST /notify-farmer-treatment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentDispatchResponse {
    pub success: bool,
    pub success_count: u32,
    pub failure_count: u32,
}

/// Response body for POST /validate-admin-code.
#[derive(Debug, Serialize)]
pub struct ValidateCodeResponse {
    pub valid: bool,
}

/// Response body for POST /store-user-token.
#[derive(Debug, Serialize)]
pub struct StoreTokenResponse {
    pub success: bool,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

fn require(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(HerdlinkError::InvalidArgument(format!("{field} is required")).into());
    }
    Ok(())
}

/// POST /notify-farmers-new-alert
///
/// Broadcasts an alert to every farmer with a delivery token.
pub async fn notify_farmers_new_alert(
    State(state): State<GatewayState>,
    Json(body): Json<FarmerAlertRequest>,
) -> Result<Json<DispatchResponse>, ApiError> {
    require(&body.alert_type, "alertType")?;
    require(&body.alert_message, "alertMessage")?;

    let tokens = state.resolver.resolve_by_role(Role::Farmer).await?;
    let report = state
        .dispatcher
        .dispatch_to_set(
            &envelope::farmers_alert(
                &body.alert_type,
                &body.alert_message,
                body.created_by_name.as_deref(),
            ),
            &tokens,
        )
        .await?;
    Ok(Json(DispatchResponse {
        success_count: report.success_count,
        failure_count: report.failure_count,
    }))
}

/// POST /notify-vets-new-request
///
/// Broadcasts a new treatment request to every veterinarian.
pub async fn notify_vets_new_request(
    State(state): State<GatewayState>,
    Json(body): Json<VetRequestRequest>,
) -> Result<Json<DispatchResponse>, ApiError> {
    require(&body.farmer_name, "farmerName")?;
    require(&body.animal_type, "animalType")?;

    let tokens = state.resolver.resolve_by_role(Role::Veterinarian).await?;
    let report = state
        .dispatcher
        .dispatch_to_set(
            &envelope::vets_new_request(
                &body.farmer_name,
                &body.animal_type,
                body.symptoms.as_deref(),
                body.urgency.as_deref(),
            ),
            &tokens,
        )
        .await?;
    Ok(Json(DispatchResponse {
        success_count: report.success_count,
        failure_count: report.failure_count,
    }))
}

/// POST /notify-farmer-treatment
///
/// Broadcasts a treatment update to the farmer role.
pub async fn notify_farmer_treatment(
    State(state): State<GatewayState>,
    Json(body): Json<FarmerTreatmentRequest>,
) -> Result<Json<TreatmentDispatchResponse>, ApiError> {
    require(&body.vet_name, "vetName")?;
    require(&body.animal_type, "animalType")?;

    let tokens = state.resolver.resolve_by_role(Role::Farmer).await?;
    let report = state
        .dispatcher
        .dispatch_to_set(
            &envelope::farmer_treatment(
                &body.vet_name,
                &body.animal_type,
                body.diagnosis.as_deref(),
                body.treatment.as_deref(),
            ),
            &tokens,
        )
        .await?;
    Ok(Json(TreatmentDispatchResponse {
        success: true,
        success_count: report.success_count,
        failure_count: report.failure_count,
    }))
}

/// POST /validate-admin-code
///
/// Exact, case-sensitive equality against the one configured code. No side
/// effects and no auth -- a documented weakness of the upstream system,
/// preserved as-is.
pub async fn validate_admin_code(
    State(state): State<GatewayState>,
    Json(body): Json<ValidateCodeRequest>,
) -> Json<ValidateCodeResponse> {
    let valid = state
        .admin_code
        .as_deref()
        .is_some_and(|code| code == body.code);
    Json(ValidateCodeResponse { valid })
}

/// POST /store-user-token
///
/// Registers (or refreshes) the caller's delivery token. Requires a caller
/// identity; repeated calls with the same token are a no-op overwrite.
pub async fn store_user_token(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(body): Json<StoreTokenRequest>,
) -> Result<Json<StoreTokenResponse>, ApiError> {
    let identity = auth::authenticate(&state.store, &headers).await?;
    require(&body.fcm_token, "fcmToken")?;

    let now = chrono::Utc::now().to_rfc3339();
    state
        .store
        .upsert_merge(
            collections::USERS,
            &identity.user_id,
            serde_json::json!({
                "deliveryToken": body.fcm_token,
                "deliveryTokenUpdatedAt": now,
            }),
        )
        .await?;
    info!(user = %identity.user_id, "delivery token registered");
    Ok(Json(StoreTokenResponse { success: true }))
}

/// OPTIONS pre-flight on any POST route: 204, empty body.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
