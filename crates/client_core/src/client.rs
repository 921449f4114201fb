use async_trait::async_trait;
use reqwest::{
    header::{CACHE_CONTROL, PRAGMA},
    Client, Method, RequestBuilder, Response,
};
use shared::{
    domain::{Person, PersonDraft, PersonId},
    protocol::{Endpoint, HttpMethod},
};
use tracing::debug;

use crate::{api_url::ApiUrlResolver, error::ClientError};

#[async_trait]
pub trait PeopleApi: Send + Sync {
    async fn list_people(&self) -> Result<Vec<Person>, ClientError>;
    async fn create_person(&self, draft: &PersonDraft) -> Result<(), ClientError>;
    async fn update_person(&self, person: &Person) -> Result<(), ClientError>;
    async fn delete_person(&self, id: PersonId) -> Result<(), ClientError>;
}

/// HTTP implementation of [`PeopleApi`] against the people backend.
pub struct PeopleClient {
    http: Client,
    urls: ApiUrlResolver,
    debug_urls: bool,
}

impl PeopleClient {
    pub fn new(urls: ApiUrlResolver) -> Self {
        Self::with_http_client(Client::new(), urls)
    }

    pub fn with_http_client(http: Client, urls: ApiUrlResolver) -> Self {
        Self {
            http,
            urls,
            debug_urls: false,
        }
    }

    pub fn with_debug_urls(mut self, debug_urls: bool) -> Self {
        self.debug_urls = debug_urls;
        self
    }

    pub fn urls(&self) -> &ApiUrlResolver {
        &self.urls
    }

    fn request(&self, endpoint: Endpoint) -> (String, RequestBuilder) {
        let url = self
            .urls
            .resolve_with_debug(&endpoint.path(), self.debug_urls);
        let method = match endpoint.method() {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        };
        let builder = self.http.request(method, url.as_str());
        (url, builder)
    }

    async fn send(
        endpoint: Endpoint,
        url: &str,
        request: RequestBuilder,
    ) -> Result<Response, ClientError> {
        let operation = endpoint.operation();
        debug!(
            method = endpoint.method().as_str(),
            url, "sending backend request"
        );
        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                operation,
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                operation,
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl PeopleApi for PeopleClient {
    async fn list_people(&self) -> Result<Vec<Person>, ClientError> {
        let endpoint = Endpoint::List;
        let (url, request) = self.request(endpoint);
        let request = request
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache");
        let response = Self::send(endpoint, &url, request).await?;
        response
            .json::<Vec<Person>>()
            .await
            .map_err(|source| ClientError::Decode {
                operation: endpoint.operation(),
                url,
                source,
            })
    }

    async fn create_person(&self, draft: &PersonDraft) -> Result<(), ClientError> {
        let endpoint = Endpoint::Create;
        let (url, request) = self.request(endpoint);
        Self::send(endpoint, &url, request.json(draft)).await?;
        Ok(())
    }

    async fn update_person(&self, person: &Person) -> Result<(), ClientError> {
        let endpoint = Endpoint::Update;
        let (url, request) = self.request(endpoint);
        Self::send(endpoint, &url, request.json(person)).await?;
        Ok(())
    }

    async fn delete_person(&self, id: PersonId) -> Result<(), ClientError> {
        let endpoint = Endpoint::Delete(id);
        let (url, request) = self.request(endpoint);
        Self::send(endpoint, &url, request).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
