// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Envelope composition for domain events.
//!
//! Pure data assembly: titles and bodies are interpolated from the
//! triggering event's fields, and the data map always carries `entityId`,
//! `entityType`, and `route` so the receiving client can route a
//! tap-through without an additional fetch.

use herdlink_core::types::{Alert, MessageEnvelope, TreatmentReport, TreatmentRequest};

/// Envelope for a newly created treatment request, addressed to
/// veterinarians.
pub fn new_request(request: &TreatmentRequest) -> MessageEnvelope {
    let body = if request.category.is_empty() {
        format!("A farmer needs help with a {}", request.animal_type)
    } else {
        format!(
            "A farmer needs help with a {} ({})",
            request.animal_type, request.category
        )
    };
    MessageEnvelope::new("New treatment request", body)
        .with_data("entityId", &request.id)
        .with_data("entityType", "vetRequest")
        .with_data("route", format!("/requests/{}", request.id))
}

/// Envelope for a freshly written treatment report, addressed to the farmer.
pub fn report_available(report: &TreatmentReport) -> MessageEnvelope {
    let body = if report.diagnosis.is_empty() {
        format!("A treatment report for your {} is ready", report.animal_type)
    } else {
        format!(
            "A treatment report for your {} is ready: {}",
            report.animal_type, report.diagnosis
        )
    };
    MessageEnvelope::new("Treatment report available", body)
        .with_data("entityId", &report.id)
        .with_data("entityType", "vetReport")
        .with_data("route", format!("/reports/{}", report.id))
}

/// Envelope for a request that just transitioned to completed, addressed to
/// the farmer.
pub fn treatment_completed(request: &TreatmentRequest) -> MessageEnvelope {
    MessageEnvelope::new(
        "Treatment completed",
        format!("Treatment for your {} has been completed", request.animal_type),
    )
    .with_data("entityId", &request.id)
    .with_data("entityType", "vetRequest")
    .with_data("route", format!("/requests/{}", request.id))
}

/// Envelope for a newly created alert, addressed to its user.
pub fn new_alert(alert: &Alert) -> MessageEnvelope {
    MessageEnvelope::new(format!("New {} alert", alert.kind), alert.message.clone())
        .with_data("entityId", &alert.id)
        .with_data("entityType", "alert")
        .with_data("route", "/alerts")
}

/// Broadcast envelope for the farmers-new-alert endpoint.
pub fn farmers_alert(
    alert_type: &str,
    alert_message: &str,
    created_by: Option<&str>,
) -> MessageEnvelope {
    let body = match created_by {
        Some(name) if !name.is_empty() => format!("{alert_message} ({name})"),
        _ => alert_message.to_string(),
    };
    MessageEnvelope::new(format!("New {alert_type} alert"), body)
        .with_data("entityType", "alert")
        .with_data("route", "/alerts")
}

/// Broadcast envelope for the vets-new-request endpoint.
pub fn vets_new_request(
    farmer_name: &str,
    animal_type: &str,
    symptoms: Option<&str>,
    urgency: Option<&str>,
) -> MessageEnvelope {
    let mut body = format!("{farmer_name} needs help with a {animal_type}");
    if let Some(symptoms) = symptoms.filter(|s| !s.is_empty()) {
        body.push_str(&format!(": {symptoms}"));
    }
    if let Some(urgency) = urgency.filter(|u| !u.is_empty()) {
        body.push_str(&format!(" [{urgency}]"));
    }
    MessageEnvelope::new("New treatment request", body)
        .with_data("entityType", "vetRequest")
        .with_data("route", "/requests")
}

/// Broadcast envelope for the farmer-treatment endpoint.
pub fn farmer_treatment(
    vet_name: &str,
    animal_type: &str,
    diagnosis: Option<&str>,
    treatment: Option<&str>,
) -> MessageEnvelope {
    let mut body = format!("{vet_name} treated your {animal_type}");
    if let Some(diagnosis) = diagnosis.filter(|d| !d.is_empty()) {
        body.push_str(&format!(". Diagnosis: {diagnosis}"));
    }
    if let Some(treatment) = treatment.filter(|t| !t.is_empty()) {
        body.push_str(&format!(". Treatment: {treatment}"));
    }
    MessageEnvelope::new("Treatment update", body)
        .with_data("entityType", "vetReport")
        .with_data("route", "/reports")
}

#[cfg(test)]
mod tests {
    use super::*;
    use herdlink_core::types::{AlertKind, RequestStatus};

    fn request() -> TreatmentRequest {
        TreatmentRequest {
            id: "r1".to_string(),
            farmer_id: "f1".to_string(),
            animal_type: "Cow".to_string(),
            category: "illness".to_string(),
            status: RequestStatus::Pending,
        }
    }

    #[test]
    fn new_request_envelope_carries_deep_link() {
        let env = new_request(&request());
        assert_eq!(env.title, "New treatment request");
        assert!(env.body.contains("Cow"));
        assert!(env.body.contains("illness"));
        assert_eq!(env.data.get("entityId").map(String::as_str), Some("r1"));
        assert_eq!(env.data.get("entityType").map(String::as_str), Some("vetRequest"));
        assert_eq!(env.data.get("route").map(String::as_str), Some("/requests/r1"));
    }

    #[test]
    fn new_request_without_category_omits_parenthetical() {
        let mut req = request();
        req.category = String::new();
        let env = new_request(&req);
        assert_eq!(env.body, "A farmer needs help with a Cow");
    }

    #[test]
    fn treatment_completed_envelope() {
        let env = treatment_completed(&request());
        assert_eq!(env.title, "Treatment completed");
        assert_eq!(env.data.get("route").map(String::as_str), Some("/requests/r1"));
    }

    #[test]
    fn alert_envelope_uses_kind_in_title() {
        let alert = Alert {
            id: "a1".to_string(),
            user_id: "u1".to_string(),
            kind: AlertKind::Warning,
            message: "vaccinate before monsoon".to_string(),
            created_at: String::new(),
        };
        let env = new_alert(&alert);
        assert_eq!(env.title, "New warning alert");
        assert_eq!(env.body, "vaccinate before monsoon");
        assert_eq!(env.data.get("route").map(String::as_str), Some("/alerts"));
    }

    #[test]
    fn vets_new_request_appends_optional_fields() {
        let env = vets_new_request("Asha", "Goat", Some("limping"), Some("high"));
        assert_eq!(env.body, "Asha needs help with a Goat: limping [high]");

        let env = vets_new_request("Asha", "Goat", None, None);
        assert_eq!(env.body, "Asha needs help with a Goat");
    }

    #[test]
    fn farmers_alert_appends_author() {
        let env = farmers_alert("weather", "storm approaching", Some("District Office"));
        assert_eq!(env.title, "New weather alert");
        assert_eq!(env.body, "storm approaching (District Office)");
    }
}
