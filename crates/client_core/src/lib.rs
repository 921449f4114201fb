pub mod add_person;
pub mod api_url;
pub mod client;
pub mod error;
pub mod interaction;
pub mod people_list;
pub mod status;

pub use add_person::{AddPersonController, FormSnapshot, FormVisibility, SubmitOutcome};
pub use api_url::ApiUrlResolver;
pub use client::{PeopleApi, PeopleClient};
pub use error::ClientError;
pub use interaction::{PersonEdit, PersonInteraction};
pub use people_list::{DeleteOutcome, ListState, PeopleListController, UpdateOutcome};
pub use status::{StatusKind, StatusMessage};

/// Completed operations that other controllers react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeopleEvent {
    PersonAdded,
}

#[cfg(test)]
#[path = "tests/mock_backend.rs"]
mod mock_backend;
