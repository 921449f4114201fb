use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Server-assigned identifier of a person. The client never mints one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub i64);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PersonId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(PersonId)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone_number: String,
}

impl Person {
    pub fn field(&self, field: PersonField) -> &str {
        match field {
            PersonField::FirstName => &self.first_name,
            PersonField::LastName => &self.last_name,
            PersonField::Email => &self.email,
            PersonField::PhoneNumber => &self.phone_number,
        }
    }
}

/// Unsaved form state for a person being created. Serializes to the create
/// request body, which never carries an `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone_number: String,
}

impl PersonDraft {
    pub fn get(&self, field: PersonField) -> &str {
        match field {
            PersonField::FirstName => &self.first_name,
            PersonField::LastName => &self.last_name,
            PersonField::Email => &self.email,
            PersonField::PhoneNumber => &self.phone_number,
        }
    }

    pub fn set(&mut self, field: PersonField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PersonField::FirstName => self.first_name = value,
            PersonField::LastName => self.last_name = value,
            PersonField::Email => self.email = value,
            PersonField::PhoneNumber => self.phone_number = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Checks the required fields in form order. Phone number may be empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        PersonField::REQUIRED
            .into_iter()
            .find(|field| self.get(*field).is_empty())
            .map_or(Ok(()), |field| Err(ValidationError::MissingField(field)))
    }

    pub fn into_person(self, id: PersonId) -> Person {
        Person {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonField {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
}

impl PersonField {
    pub const ALL: [PersonField; 4] = [
        PersonField::FirstName,
        PersonField::LastName,
        PersonField::Email,
        PersonField::PhoneNumber,
    ];

    pub const REQUIRED: [PersonField; 3] = [
        PersonField::FirstName,
        PersonField::LastName,
        PersonField::Email,
    ];

    /// JSON key used on the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            PersonField::FirstName => "firstName",
            PersonField::LastName => "lastName",
            PersonField::Email => "email",
            PersonField::PhoneNumber => "phoneNumber",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PersonField::FirstName => "First Name",
            PersonField::LastName => "Last Name",
            PersonField::Email => "Email",
            PersonField::PhoneNumber => "Phone Number",
        }
    }

    pub fn is_required(self) -> bool {
        self != PersonField::PhoneNumber
    }
}

impl fmt::Display for PersonField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for PersonField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "firstname" => Ok(PersonField::FirstName),
            "lastname" => Ok(PersonField::LastName),
            "email" => Ok(PersonField::Email),
            "phonenumber" | "phone" => Ok(PersonField::PhoneNumber),
            _ => Err(ValidationError::UnknownField(s.to_string())),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
