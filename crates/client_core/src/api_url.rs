use tracing::info;

/// Builds absolute backend URLs from path fragments.
///
/// The base address is injected once at construction. An empty base is
/// accepted and still concatenated; the resulting request failure is left to
/// the caller to surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiUrlResolver {
    base_url: String,
}

impl ApiUrlResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn resolve(&self, path: &str) -> String {
        self.resolve_with_debug(path, false)
    }

    pub fn resolve_with_debug(&self, path: &str, debug: bool) -> String {
        let api_url = if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        };

        if debug {
            info!(api_url = %api_url, "resolved backend api url");
        }

        api_url
    }
}

#[cfg(test)]
#[path = "tests/api_url_tests.rs"]
mod tests;
