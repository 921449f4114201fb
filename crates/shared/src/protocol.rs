//! REST contract of the people backend.
//!
//! The paths are not uniform: create goes to `/Add` while list and update share
//! the collection root, and delete is keyed as `/{id}` directly under the root.
//! That is how the backend exposes them and the client follows it as-is.

use crate::domain::PersonId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    List,
    Create,
    Update,
    Delete(PersonId),
}

impl Endpoint {
    pub fn method(self) -> HttpMethod {
        match self {
            Endpoint::List => HttpMethod::Get,
            Endpoint::Create => HttpMethod::Post,
            Endpoint::Update => HttpMethod::Put,
            Endpoint::Delete(_) => HttpMethod::Delete,
        }
    }

    /// Path fragment relative to the backend base address.
    pub fn path(self) -> String {
        match self {
            Endpoint::List | Endpoint::Update => String::new(),
            Endpoint::Create => "/Add".to_string(),
            Endpoint::Delete(id) => id.to_string(),
        }
    }

    pub fn operation(self) -> &'static str {
        match self {
            Endpoint::List => "list people",
            Endpoint::Create => "create person",
            Endpoint::Update => "update person",
            Endpoint::Delete(_) => "delete person",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_paths_and_methods() {
        assert_eq!(Endpoint::List.method(), HttpMethod::Get);
        assert_eq!(Endpoint::List.path(), "");
        assert_eq!(Endpoint::Create.method(), HttpMethod::Post);
        assert_eq!(Endpoint::Create.path(), "/Add");
        assert_eq!(Endpoint::Update.method(), HttpMethod::Put);
        assert_eq!(Endpoint::Update.path(), "");
        assert_eq!(Endpoint::Delete(PersonId(42)).method(), HttpMethod::Delete);
        assert_eq!(Endpoint::Delete(PersonId(42)).path(), "42");
    }
}
