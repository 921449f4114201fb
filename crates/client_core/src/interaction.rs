//! User-facing decisions the controllers need before touching the backend.

use async_trait::async_trait;
use shared::{
    domain::{Person, PersonField, PersonId},
    error::ValidationError,
};

#[async_trait]
pub trait PersonInteraction: Send + Sync {
    /// Asked before a delete is sent. `false` cancels it.
    async fn confirm_delete(&self, person: &Person) -> bool;

    /// Collects replacement values for `person`, seeded with its current ones.
    async fn request_edit(&self, person: &Person) -> PersonEdit;

    /// Blocking notice shown when an edit is rejected.
    async fn alert(&self, message: &str);
}

/// Answer to an edit request. `None` means the user cancelled that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonEdit {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl PersonEdit {
    /// An edit that keeps every current value.
    pub fn unchanged(person: &Person) -> Self {
        Self {
            first_name: Some(person.first_name.clone()),
            last_name: Some(person.last_name.clone()),
            email: Some(person.email.clone()),
            phone_number: Some(person.phone_number.clone()),
        }
    }

    pub fn set(&mut self, field: PersonField, value: Option<String>) {
        match field {
            PersonField::FirstName => self.first_name = value,
            PersonField::LastName => self.last_name = value,
            PersonField::Email => self.email = value,
            PersonField::PhoneNumber => self.phone_number = value,
        }
    }

    /// Builds the full replacement record for `id`. Any missing or empty
    /// required field rejects the whole edit; a cancelled phone number is sent
    /// empty.
    pub fn into_person(self, id: PersonId) -> Result<Person, ValidationError> {
        let first_name = required(self.first_name, PersonField::FirstName)?;
        let last_name = required(self.last_name, PersonField::LastName)?;
        let email = required(self.email, PersonField::Email)?;
        Ok(Person {
            id,
            first_name,
            last_name,
            email,
            phone_number: self.phone_number.unwrap_or_default(),
        })
    }
}

fn required(value: Option<String>, field: PersonField) -> Result<String, ValidationError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ValidationError::MissingField(field)),
    }
}
