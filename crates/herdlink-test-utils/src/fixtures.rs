// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document body fixtures matching the stored camelCase shapes.

use serde_json::{json, Value};

/// A user document body. `token` of `None` produces a user with no
/// delivery token (valid, not eligible for push delivery).
pub fn user(id: &str, role: &str, token: Option<&str>) -> Value {
    let mut body = json!({"id": id, "role": role});
    if let Some(token) = token {
        body["deliveryToken"] = json!(token);
    }
    body
}

/// A user document body carrying a gateway API key.
pub fn user_with_api_key(id: &str, role: &str, token: Option<&str>, api_key: &str) -> Value {
    let mut body = user(id, role, token);
    body["apiKey"] = json!(api_key);
    body
}

/// A treatment request document body.
pub fn treatment_request(
    id: &str,
    farmer_id: &str,
    animal_type: &str,
    category: &str,
    status: &str,
) -> Value {
    json!({
        "id": id,
        "farmerId": farmer_id,
        "animalType": animal_type,
        "category": category,
        "status": status,
    })
}

/// A treatment report document body.
pub fn treatment_report(
    id: &str,
    farmer_id: &str,
    animal_type: &str,
    diagnosis: &str,
    treatment: &str,
) -> Value {
    json!({
        "id": id,
        "farmerId": farmer_id,
        "animalType": animal_type,
        "diagnosis": diagnosis,
        "treatment": treatment,
        "createdAt": "2026-03-01T08:00:00Z",
    })
}

/// An alert document body.
pub fn alert(id: &str, user_id: &str, kind: &str, message: &str) -> Value {
    json!({
        "id": id,
        "userId": user_id,
        "type": kind,
        "message": message,
        "createdAt": "2026-03-01T08:00:00Z",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use herdlink_core::types::{Alert, Document, TreatmentRequest, User};

    #[test]
    fn user_fixture_decodes() {
        let doc = Document::new("u1", user("u1", "farmer", Some("tokA")));
        let user: User = doc.decode().unwrap();
        assert_eq!(user.delivery_token.as_deref(), Some("tokA"));
    }

    #[test]
    fn tokenless_user_fixture_decodes() {
        let doc = Document::new("u2", user("u2", "veterinarian", None));
        let user: User = doc.decode().unwrap();
        assert!(user.delivery_token.is_none());
    }

    #[test]
    fn request_fixture_decodes() {
        let doc = Document::new(
            "r1",
            treatment_request("r1", "f1", "Cow", "illness", "pending"),
        );
        let req: TreatmentRequest = doc.decode().unwrap();
        assert_eq!(req.farmer_id, "f1");
        assert_eq!(req.animal_type, "Cow");
    }

    #[test]
    fn alert_fixture_decodes() {
        let doc = Document::new("a1", alert("a1", "u1", "warning", "vaccinate now"));
        let alert: Alert = doc.decode().unwrap();
        assert_eq!(alert.user_id, "u1");
    }
}
