// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The four domain triggers.
//!
//! Each handler decodes the event document, resolves its recipients, and
//! dispatches the matching envelope. Delivery problems and missing users
//! are logged and absorbed here -- the notification layer is best-effort
//! and a failed delivery must never abort the event pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use herdlink_core::types::{
    collections, Alert, DocumentEvent, EventKind, RequestStatus, Role, TreatmentReport,
    TreatmentRequest,
};
use herdlink_core::HerdlinkError;
use herdlink_notify::{envelope, NotificationDispatcher, RecipientResolver};

use crate::engine::{TriggerEngine, TriggerHandler};

/// Register the standard trigger table: the four domain reactions bound to
/// their collections and event kinds.
pub fn register_defaults(
    engine: &mut TriggerEngine,
    resolver: Arc<RecipientResolver>,
    dispatcher: Arc<NotificationDispatcher>,
) {
    engine.register(
        collections::VET_REQUESTS,
        EventKind::Created,
        Arc::new(RequestCreated {
            resolver: resolver.clone(),
            dispatcher: dispatcher.clone(),
        }),
    );
    engine.register(
        collections::VET_REPORTS,
        EventKind::Created,
        Arc::new(ReportCreated {
            resolver: resolver.clone(),
            dispatcher: dispatcher.clone(),
        }),
    );
    engine.register(
        collections::VET_REQUESTS,
        EventKind::Updated,
        Arc::new(RequestCompleted {
            resolver: resolver.clone(),
            dispatcher: dispatcher.clone(),
        }),
    );
    engine.register(
        collections::ALERTS,
        EventKind::Created,
        Arc::new(AlertCreated { resolver, dispatcher }),
    );
}

/// Resolve a farmer/user token, absorbing the skip cases.
///
/// Returns `Ok(None)` (and logs) when the user is missing or has no token;
/// only store failures propagate.
async fn resolve_target(
    resolver: &RecipientResolver,
    user_id: &str,
) -> Result<Option<String>, HerdlinkError> {
    match resolver.resolve_by_user(user_id).await {
        Ok(Some(token)) => Ok(Some(token)),
        Ok(None) => {
            debug!(user = user_id, "recipient has no delivery token, skipping");
            Ok(None)
        }
        Err(HerdlinkError::NotFound { .. }) => {
            warn!(user = user_id, "recipient not found, skipping notification");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// New treatment request -> notify all veterinarians.
pub struct RequestCreated {
    resolver: Arc<RecipientResolver>,
    dispatcher: Arc<NotificationDispatcher>,
}

#[async_trait]
impl TriggerHandler for RequestCreated {
    fn name(&self) -> &'static str {
        "request-created"
    }

    async fn handle(&self, event: &DocumentEvent) -> Result<(), HerdlinkError> {
        let request: TreatmentRequest = event.doc.decode()?;
        let tokens = self.resolver.resolve_by_role(Role::Veterinarian).await?;
        let report = self
            .dispatcher
            .dispatch_to_set(&envelope::new_request(&request), &tokens)
            .await?;
        info!(
            request = %request.id,
            success = report.success_count,
            failure = report.failure_count,
            "veterinarians notified of new request"
        );
        Ok(())
    }
}

/// New treatment report -> notify the farmer it references.
pub struct ReportCreated {
    resolver: Arc<RecipientResolver>,
    dispatcher: Arc<NotificationDispatcher>,
}

#[async_trait]
impl TriggerHandler for ReportCreated {
    fn name(&self) -> &'static str {
        "report-created"
    }

    async fn handle(&self, event: &DocumentEvent) -> Result<(), HerdlinkError> {
        let report: TreatmentReport = event.doc.decode()?;
        let Some(token) = resolve_target(&self.resolver, &report.farmer_id).await? else {
            return Ok(());
        };
        if let Err(e) = self
            .dispatcher
            .dispatch_to_one(&envelope::report_available(&report), &token)
            .await
        {
            warn!(report = %report.id, error = %e, "report notification delivery failed");
        }
        Ok(())
    }
}

/// Request update -> notify the farmer, but only on the transition INTO
/// completed.
///
/// Edge-triggered, not level-triggered: repeated writes that keep the
/// status at completed must not re-dispatch.
pub struct RequestCompleted {
    resolver: Arc<RecipientResolver>,
    dispatcher: Arc<NotificationDispatcher>,
}

#[async_trait]
impl TriggerHandler for RequestCompleted {
    fn name(&self) -> &'static str {
        "request-completed"
    }

    async fn handle(&self, event: &DocumentEvent) -> Result<(), HerdlinkError> {
        let request: TreatmentRequest = event.doc.decode()?;
        if request.status != RequestStatus::Completed {
            return Ok(());
        }
        let was_completed = event
            .before
            .as_ref()
            .and_then(|doc| doc.decode::<TreatmentRequest>().ok())
            .is_some_and(|prev| prev.status == RequestStatus::Completed);
        if was_completed {
            debug!(request = %request.id, "already completed, no re-dispatch");
            return Ok(());
        }

        let Some(token) = resolve_target(&self.resolver, &request.farmer_id).await? else {
            return Ok(());
        };
        if let Err(e) = self
            .dispatcher
            .dispatch_to_one(&envelope::treatment_completed(&request), &token)
            .await
        {
            warn!(request = %request.id, error = %e, "completion notification delivery failed");
        } else {
            info!(request = %request.id, farmer = %request.farmer_id, "farmer notified of completed treatment");
        }
        Ok(())
    }
}

/// New alert -> notify the user it is addressed to.
pub struct AlertCreated {
    resolver: Arc<RecipientResolver>,
    dispatcher: Arc<NotificationDispatcher>,
}

#[async_trait]
impl TriggerHandler for AlertCreated {
    fn name(&self) -> &'static str {
        "alert-created"
    }

    async fn handle(&self, event: &DocumentEvent) -> Result<(), HerdlinkError> {
        let alert: Alert = event.doc.decode()?;
        let Some(token) = resolve_target(&self.resolver, &alert.user_id).await? else {
            return Ok(());
        };
        if let Err(e) = self
            .dispatcher
            .dispatch_to_one(&envelope::new_alert(&alert), &token)
            .await
        {
            warn!(alert = %alert.id, error = %e, "alert notification delivery failed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herdlink_core::types::Document;
    use herdlink_core::DocumentStore;
    use herdlink_test_utils::{fixtures, MemoryStore, MockSender};

    struct Harness {
        sender: Arc<MockSender>,
        engine: TriggerEngine,
    }

    async fn harness(users: &[serde_json::Value]) -> Harness {
        let store = Arc::new(MemoryStore::new());
        for body in users {
            let id = body["id"].as_str().unwrap().to_string();
            store
                .upsert_merge(collections::USERS, &id, body.clone())
                .await
                .unwrap();
        }
        let sender = Arc::new(MockSender::new());
        let resolver = Arc::new(RecipientResolver::new(store.clone() as Arc<dyn DocumentStore>));
        let dispatcher = Arc::new(NotificationDispatcher::new(
            sender.clone() as Arc<dyn herdlink_core::PushSender>
        ));
        let mut engine = TriggerEngine::new();
        register_defaults(&mut engine, resolver, dispatcher);
        Harness { sender, engine }
    }

    fn created(collection: &str, body: serde_json::Value) -> DocumentEvent {
        let id = body["id"].as_str().unwrap().to_string();
        DocumentEvent {
            collection: collection.to_string(),
            kind: EventKind::Created,
            doc: Document::new(id, body),
            before: None,
        }
    }

    fn updated(
        collection: &str,
        before: serde_json::Value,
        after: serde_json::Value,
    ) -> DocumentEvent {
        let id = after["id"].as_str().unwrap().to_string();
        DocumentEvent {
            collection: collection.to_string(),
            kind: EventKind::Updated,
            doc: Document::new(id.clone(), after),
            before: Some(Document::new(id, before)),
        }
    }

    #[tokio::test]
    async fn request_created_notifies_tokened_vets_only() {
        let h = harness(&[
            fixtures::user("v1", "veterinarian", Some("tokA")),
            fixtures::user("v2", "veterinarian", None),
            fixtures::user("f1", "farmer", Some("tokF")),
        ])
        .await;

        let event = created(
            collections::VET_REQUESTS,
            fixtures::treatment_request("r1", "f1", "Cow", "illness", "pending"),
        );
        assert_eq!(h.engine.dispatch_event(&event).await, 1);

        let sent = h.sender.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].tokens, vec!["tokA".to_string()]);
        assert_eq!(sent[0].envelope.title, "New treatment request");
    }

    #[tokio::test]
    async fn request_created_with_no_vets_sends_nothing() {
        let h = harness(&[fixtures::user("f1", "farmer", Some("tokF"))]).await;

        let event = created(
            collections::VET_REQUESTS,
            fixtures::treatment_request("r1", "f1", "Cow", "illness", "pending"),
        );
        h.engine.dispatch_event(&event).await;
        assert_eq!(h.sender.call_count().await, 0);
    }

    #[tokio::test]
    async fn report_created_notifies_farmer() {
        let h = harness(&[fixtures::user("f1", "farmer", Some("tokF"))]).await;

        let event = created(
            collections::VET_REPORTS,
            fixtures::treatment_report("rep1", "f1", "Cow", "mastitis", "antibiotics"),
        );
        h.engine.dispatch_event(&event).await;

        let sent = h.sender.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].tokens, vec!["tokF".to_string()]);
        assert_eq!(
            sent[0].envelope.data.get("entityType").map(String::as_str),
            Some("vetReport")
        );
    }

    #[tokio::test]
    async fn report_for_missing_farmer_is_absorbed() {
        let h = harness(&[]).await;

        let event = created(
            collections::VET_REPORTS,
            fixtures::treatment_report("rep1", "ghost", "Cow", "", ""),
        );
        // Handler completes; nothing is sent.
        assert_eq!(h.engine.dispatch_event(&event).await, 1);
        assert_eq!(h.sender.call_count().await, 0);
    }

    #[tokio::test]
    async fn transition_to_completed_dispatches_exactly_once() {
        let h = harness(&[fixtures::user("f1", "farmer", Some("tokF"))]).await;

        let event = updated(
            collections::VET_REQUESTS,
            fixtures::treatment_request("r1", "f1", "Cow", "illness", "in_progress"),
            fixtures::treatment_request("r1", "f1", "Cow", "illness", "completed"),
        );
        h.engine.dispatch_event(&event).await;

        let sent = h.sender.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].envelope.title, "Treatment completed");
    }

    #[tokio::test]
    async fn repeated_completed_writes_do_not_redispatch() {
        let h = harness(&[fixtures::user("f1", "farmer", Some("tokF"))]).await;

        let event = updated(
            collections::VET_REQUESTS,
            fixtures::treatment_request("r1", "f1", "Cow", "illness", "completed"),
            fixtures::treatment_request("r1", "f1", "Cow", "illness", "completed"),
        );
        h.engine.dispatch_event(&event).await;
        assert_eq!(h.sender.call_count().await, 0, "edge-triggered, not level-triggered");
    }

    #[tokio::test]
    async fn update_to_non_completed_status_is_ignored() {
        let h = harness(&[fixtures::user("f1", "farmer", Some("tokF"))]).await;

        let event = updated(
            collections::VET_REQUESTS,
            fixtures::treatment_request("r1", "f1", "Cow", "illness", "pending"),
            fixtures::treatment_request("r1", "f1", "Cow", "illness", "in_progress"),
        );
        h.engine.dispatch_event(&event).await;
        assert_eq!(h.sender.call_count().await, 0);
    }

    #[tokio::test]
    async fn alert_created_notifies_addressed_user() {
        let h = harness(&[
            fixtures::user("f1", "farmer", Some("tokF")),
            fixtures::user("f2", "farmer", Some("tokG")),
        ])
        .await;

        let event = created(
            collections::ALERTS,
            fixtures::alert("a1", "f1", "warning", "vaccinate before monsoon"),
        );
        h.engine.dispatch_event(&event).await;

        let sent = h.sender.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].tokens, vec!["tokF".to_string()], "only the addressed user");
    }

    #[tokio::test]
    async fn failed_delivery_does_not_fail_the_trigger() {
        let h = harness(&[fixtures::user("f1", "farmer", Some("tokStale"))]).await;
        h.sender.fail_token("tokStale").await;

        let event = created(
            collections::ALERTS,
            fixtures::alert("a1", "f1", "info", "message"),
        );
        // The handler absorbs the delivery failure; dispatch_event reports
        // one clean invocation either way.
        assert_eq!(h.engine.dispatch_event(&event).await, 1);
        assert_eq!(h.sender.call_count().await, 1);
    }
}
