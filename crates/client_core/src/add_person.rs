//! Person creation form controller.
//!
//! Holds the draft while the form is open, posts it on submit and, after a
//! short pause that keeps the success message visible, collapses the form and
//! broadcasts [`PeopleEvent::PersonAdded`].

use std::{sync::Arc, time::Duration};

use shared::{
    domain::{PersonDraft, PersonField},
    error::ValidationError,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};

use crate::{
    client::PeopleApi,
    status::{StatusMessage, PERSON_ADDED, PERSON_ADD_FAILED},
    PeopleEvent,
};

pub const DEFAULT_COLLAPSE_DELAY: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormVisibility {
    Collapsed,
    Expanded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    Invalid(ValidationError),
    AlreadySubmitting,
    NotEditing,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub visibility: FormVisibility,
    pub draft: PersonDraft,
    pub submitting: bool,
    pub message: Option<StatusMessage>,
}

struct FormState {
    visibility: FormVisibility,
    draft: PersonDraft,
    submitting: bool,
    message: Option<StatusMessage>,
}

pub struct AddPersonController {
    api: Arc<dyn PeopleApi>,
    collapse_delay: Duration,
    inner: Mutex<FormState>,
    events: broadcast::Sender<PeopleEvent>,
}

impl AddPersonController {
    pub fn new(api: Arc<dyn PeopleApi>) -> Arc<Self> {
        Self::with_collapse_delay(api, DEFAULT_COLLAPSE_DELAY)
    }

    pub fn with_collapse_delay(api: Arc<dyn PeopleApi>, collapse_delay: Duration) -> Arc<Self> {
        let (events, _) = broadcast::channel(16);
        Arc::new(Self {
            api,
            collapse_delay,
            inner: Mutex::new(FormState {
                visibility: FormVisibility::Collapsed,
                draft: PersonDraft::default(),
                submitting: false,
                message: None,
            }),
            events,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PeopleEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> FormSnapshot {
        let inner = self.inner.lock().await;
        FormSnapshot {
            visibility: inner.visibility,
            draft: inner.draft.clone(),
            submitting: inner.submitting,
            message: inner.message.clone(),
        }
    }

    /// Opens the form with an empty draft. Already open forms keep their draft.
    pub async fn show(&self) {
        let mut inner = self.inner.lock().await;
        if inner.visibility == FormVisibility::Expanded {
            return;
        }
        inner.visibility = FormVisibility::Expanded;
        inner.draft.clear();
        debug!("add person form expanded");
    }

    /// Returns `false` when the form is collapsed and the edit was dropped.
    pub async fn set_field(&self, field: PersonField, value: impl Into<String>) -> bool {
        let mut inner = self.inner.lock().await;
        if inner.visibility == FormVisibility::Collapsed {
            debug!(%field, "ignoring field edit on collapsed form");
            return false;
        }
        inner.draft.set(field, value);
        true
    }

    pub async fn cancel(&self) {
        let mut inner = self.inner.lock().await;
        inner.visibility = FormVisibility::Collapsed;
        debug!("add person form cancelled");
    }

    pub async fn submit(self: &Arc<Self>) -> SubmitOutcome {
        let draft = {
            let mut inner = self.inner.lock().await;
            if inner.visibility == FormVisibility::Collapsed {
                return SubmitOutcome::NotEditing;
            }
            if inner.submitting {
                return SubmitOutcome::AlreadySubmitting;
            }
            if let Err(err) = inner.draft.validate() {
                warn!(error = %err, "add person form is incomplete");
                return SubmitOutcome::Invalid(err);
            }
            inner.submitting = true;
            inner.message = None;
            inner.draft.clone()
        };

        let result = self.api.create_person(&draft).await;

        let mut inner = self.inner.lock().await;
        inner.submitting = false;
        match result {
            Ok(()) => {
                info!(email = %draft.email, "person added");
                inner.message = Some(StatusMessage::success(PERSON_ADDED));
                inner.draft.clear();
                drop(inner);
                self.schedule_collapse();
                SubmitOutcome::Submitted
            }
            Err(err) => {
                error!(error = %err, "failed to add person");
                inner.message = Some(StatusMessage::error(PERSON_ADD_FAILED));
                SubmitOutcome::Failed
            }
        }
    }

    fn schedule_collapse(self: &Arc<Self>) {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(controller.collapse_delay).await;
            {
                let mut inner = controller.inner.lock().await;
                inner.visibility = FormVisibility::Collapsed;
                inner.message = None;
            }
            if controller.events.send(PeopleEvent::PersonAdded).is_err() {
                debug!("person added with no subscribers");
            }
        });
    }
}

#[cfg(test)]
#[path = "tests/add_person_tests.rs"]
mod tests;
