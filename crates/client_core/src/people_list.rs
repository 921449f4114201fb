//! Person list controller: fetches the collection and applies update/delete
//! against individual records.

use std::sync::Arc;

use shared::{
    domain::{Person, PersonId},
    error::ValidationError,
};
use tracing::{debug, error, info, warn};

use crate::{
    client::PeopleApi,
    interaction::PersonInteraction,
    status::{
        StatusMessage, FIELDS_REQUIRED, PEOPLE_FETCH_FAILED, PERSON_DELETED,
        PERSON_DELETE_FAILED, PERSON_UPDATED, PERSON_UPDATE_FAILED,
    },
    PeopleEvent,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Ready,
    ReadyEmpty,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchPhase {
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
    NotFound,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    Rejected(ValidationError),
    Failed,
}

pub struct PeopleListController {
    api: Arc<dyn PeopleApi>,
    interaction: Arc<dyn PersonInteraction>,
    people: Vec<Person>,
    phase: FetchPhase,
    message: Option<StatusMessage>,
}

impl PeopleListController {
    pub fn new(api: Arc<dyn PeopleApi>, interaction: Arc<dyn PersonInteraction>) -> Self {
        Self {
            api,
            interaction,
            people: Vec::new(),
            phase: FetchPhase::Loading,
            message: None,
        }
    }

    pub fn state(&self) -> ListState {
        match self.phase {
            FetchPhase::Loading => ListState::Loading,
            FetchPhase::Failed => ListState::Error,
            FetchPhase::Loaded if self.people.is_empty() => ListState::ReadyEmpty,
            FetchPhase::Loaded => ListState::Ready,
        }
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn find(&self, id: PersonId) -> Option<&Person> {
        self.people.iter().find(|person| person.id == id)
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    /// Re-fetches the whole collection, bypassing any cache. On failure the
    /// current list is kept and an error message is set; nothing is retried.
    pub async fn refresh(&mut self) -> ListState {
        self.phase = FetchPhase::Loading;
        match self.api.list_people().await {
            Ok(people) => {
                debug!(count = people.len(), "people list loaded");
                self.people = people;
                self.phase = FetchPhase::Loaded;
            }
            Err(err) => {
                error!(error = %err, "failed to fetch people");
                self.message = Some(StatusMessage::new(PEOPLE_FETCH_FAILED));
                self.phase = FetchPhase::Failed;
            }
        }
        self.state()
    }

    /// Removes the person only after the backend confirms the delete.
    pub async fn delete(&mut self, id: PersonId) -> DeleteOutcome {
        let Some(person) = self.find(id).cloned() else {
            warn!(person_id = %id, "delete requested for unknown person");
            return DeleteOutcome::NotFound;
        };

        if !self.interaction.confirm_delete(&person).await {
            debug!(person_id = %id, "delete declined");
            return DeleteOutcome::Declined;
        }

        match self.api.delete_person(id).await {
            Ok(()) => {
                info!(person_id = %id, "person deleted");
                self.people.retain(|person| person.id != id);
                self.message = Some(StatusMessage::success(PERSON_DELETED));
                DeleteOutcome::Deleted
            }
            Err(err) => {
                error!(person_id = %id, error = %err, "failed to delete person");
                self.message = Some(StatusMessage::error(PERSON_DELETE_FAILED));
                DeleteOutcome::Failed
            }
        }
    }

    /// Sends the edited record and then re-fetches the list. The local entry
    /// is never patched, so what is shown is always what the backend holds.
    pub async fn update(&mut self, person: &Person) -> UpdateOutcome {
        let edit = self.interaction.request_edit(person).await;
        let updated = match edit.into_person(person.id) {
            Ok(updated) => updated,
            Err(err) => {
                warn!(person_id = %person.id, error = %err, "update rejected");
                self.interaction.alert(FIELDS_REQUIRED).await;
                return UpdateOutcome::Rejected(err);
            }
        };

        match self.api.update_person(&updated).await {
            Ok(()) => {
                info!(person_id = %person.id, "person updated");
                self.message = Some(StatusMessage::success(PERSON_UPDATED));
                self.refresh().await;
                UpdateOutcome::Updated
            }
            Err(err) => {
                error!(person_id = %person.id, error = %err, "failed to update person");
                self.message = Some(StatusMessage::error(PERSON_UPDATE_FAILED));
                UpdateOutcome::Failed
            }
        }
    }

    pub async fn handle_event(&mut self, event: &PeopleEvent) {
        match event {
            PeopleEvent::PersonAdded => {
                self.refresh().await;
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/people_list_tests.rs"]
mod tests;
