//! In-process people backend for tests. Records every request it receives and
//! can be told to fail or stall per HTTP method.

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::State,
    http::{header::CACHE_CONTROL, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::Value;
use shared::domain::{Person, PersonDraft, PersonId};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    api_url::ApiUrlResolver,
    client::{PeopleApi, PeopleClient},
    interaction::{PersonEdit, PersonInteraction},
};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub cache_control: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct BackendState {
    people: Vec<Person>,
    next_id: i64,
    requests: Vec<RecordedRequest>,
    failures: HashMap<String, StatusCode>,
    delays: HashMap<String, Duration>,
    raw_list_body: Option<String>,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<BackendState>>,
}

impl MockBackend {
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }

    pub async fn requests_with_method(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests()
            .await
            .into_iter()
            .filter(|request| request.method == method)
            .collect()
    }

    pub async fn people(&self) -> Vec<Person> {
        self.state.lock().await.people.clone()
    }

    pub async fn set_people(&self, people: Vec<Person>) {
        let mut state = self.state.lock().await;
        state.next_id = people.iter().map(|p| p.id.0).max().unwrap_or(0);
        state.people = people;
    }

    pub async fn fail(&self, method: &str, status: StatusCode) {
        self.state
            .lock()
            .await
            .failures
            .insert(method.to_string(), status);
    }

    pub async fn stall(&self, method: &str, delay: Duration) {
        self.state
            .lock()
            .await
            .delays
            .insert(method.to_string(), delay);
    }

    pub async fn set_raw_list_body(&self, body: &str) {
        self.state.lock().await.raw_list_body = Some(body.to_string());
    }
}

async fn handle(
    State(backend): State<MockBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body = serde_json::from_slice::<Value>(&body).ok();
    let delay = {
        let mut state = backend.state.lock().await;
        state.requests.push(RecordedRequest {
            method: method.to_string(),
            path: uri.path().to_string(),
            cache_control: headers
                .get(CACHE_CONTROL)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
            body: body.clone(),
        });
        state.delays.get(method.as_str()).copied()
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let mut state = backend.state.lock().await;
    if let Some(status) = state.failures.get(method.as_str()) {
        return (*status).into_response();
    }

    match (method.as_str(), uri.path()) {
        ("GET", "/") => match &state.raw_list_body {
            Some(raw) => raw.clone().into_response(),
            None => Json(state.people.clone()).into_response(),
        },
        ("POST", "/Add") => {
            let Some(draft) = body.and_then(|v| serde_json::from_value::<PersonDraft>(v).ok())
            else {
                return StatusCode::BAD_REQUEST.into_response();
            };
            state.next_id += 1;
            let id = PersonId(state.next_id);
            state.people.push(draft.into_person(id));
            StatusCode::CREATED.into_response()
        }
        ("PUT", "/") => {
            let Some(person) = body.and_then(|v| serde_json::from_value::<Person>(v).ok()) else {
                return StatusCode::BAD_REQUEST.into_response();
            };
            match state.people.iter_mut().find(|p| p.id == person.id) {
                Some(existing) => {
                    *existing = person;
                    StatusCode::OK.into_response()
                }
                None => StatusCode::NOT_FOUND.into_response(),
            }
        }
        ("DELETE", path) => {
            let Ok(id) = path.trim_start_matches('/').parse::<PersonId>() else {
                return StatusCode::BAD_REQUEST.into_response();
            };
            let before = state.people.len();
            state.people.retain(|p| p.id != id);
            if state.people.len() == before {
                StatusCode::NOT_FOUND.into_response()
            } else {
                StatusCode::OK.into_response()
            }
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn spawn_backend(people: Vec<Person>) -> (String, MockBackend) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend addr");
    let backend = MockBackend::default();
    backend.set_people(people).await;
    let app = Router::new()
        .fallback(handle)
        .with_state(backend.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), backend)
}

pub fn client_for(base_url: &str) -> Arc<dyn PeopleApi> {
    Arc::new(PeopleClient::new(ApiUrlResolver::new(base_url)))
}

pub fn person(id: i64, first_name: &str, last_name: &str) -> Person {
    Person {
        id: PersonId(id),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!("{}@example.com", first_name.to_ascii_lowercase()),
        phone_number: String::new(),
    }
}

/// Interaction that answers from a fixed script and records what it was asked.
pub struct ScriptedInteraction {
    confirm: bool,
    edit: Option<PersonEdit>,
    pub confirmations: Mutex<Vec<PersonId>>,
    pub alerts: Mutex<Vec<String>>,
}

impl ScriptedInteraction {
    pub fn confirming(confirm: bool) -> Arc<Self> {
        Arc::new(Self {
            confirm,
            edit: None,
            confirmations: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
        })
    }

    pub fn editing(edit: PersonEdit) -> Arc<Self> {
        Arc::new(Self {
            confirm: true,
            edit: Some(edit),
            confirmations: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl PersonInteraction for ScriptedInteraction {
    async fn confirm_delete(&self, person: &Person) -> bool {
        self.confirmations.lock().await.push(person.id);
        self.confirm
    }

    async fn request_edit(&self, person: &Person) -> PersonEdit {
        self.edit
            .clone()
            .unwrap_or_else(|| PersonEdit::unchanged(person))
    }

    async fn alert(&self, message: &str) {
        self.alerts.lock().await.push(message.to_string());
    }
}
