//! HTTP client for the poems manifest.
//!
//! The manifest lives at `<base>/poems/poems.json`. The base is a site root
//! such as `https://example.org/verse/`; a base without a trailing slash is
//! treated as a directory so `https://example.org/verse` resolves the same way.

use url::Url;

use crate::manifest::{self, ManifestDocument, ManifestError};

/// Path of the manifest relative to the site base
const MANIFEST_PATH: &str = "poems/poems.json";

/// Directory holding the poem files, relative to the site base
const POEMS_DIR: &str = "poems/";

/// User agent for manifest requests
const USER_AGENT: &str = concat!("Poemshelf/", env!("CARGO_PKG_VERSION"));

/// Manifest client bound to one site base
#[derive(Clone)]
pub struct ManifestClient {
    client: reqwest::Client,
    base: Url,
}

impl ManifestClient {
    /// Create a client for the given site base URL
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base = parse_base(base_url)?;
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Absolute URL of the manifest
    pub fn manifest_url(&self) -> Result<Url, url::ParseError> {
        self.base.join(MANIFEST_PATH)
    }

    /// Absolute URL of a single poem file listed in the manifest
    pub fn poem_url(&self, filename: &str) -> Result<Url, url::ParseError> {
        self.base.join(POEMS_DIR)?.join(filename)
    }

    /// Fetch, parse and validate the manifest.
    ///
    /// Makes exactly one request. Redirects are followed by reqwest's default
    /// policy; no retries.
    pub async fn fetch_manifest(&self) -> Result<ManifestDocument, ManifestError> {
        let start = std::time::Instant::now();
        let url = self.manifest_url().map_err(ManifestError::transport)?;

        tracing::debug!("Fetching manifest from {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(ManifestError::transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Manifest request failed with status {}", status);
            return Err(ManifestError::status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(ManifestError::transport)?;
        let document = manifest::parse_manifest(&body)?;

        tracing::info!(
            "Fetched {} poems in {:.1}s",
            document.poems.len(),
            start.elapsed().as_secs_f32()
        );

        Ok(document)
    }
}

/// Parse a site base URL, making sure it ends in a slash so joins stay inside it
fn parse_base(base_url: &str) -> anyhow::Result<Url> {
    let mut base = Url::parse(base_url.trim())
        .map_err(|e| anyhow::anyhow!("Invalid base URL '{}': {}", base_url, e))?;

    if base.cannot_be_a_base() {
        anyhow::bail!("Base URL cannot hold relative paths: {}", base_url);
    }

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_manifest_url_from_root() {
        let client = ManifestClient::new("https://example.org").unwrap();
        assert_eq!(
            client.manifest_url().unwrap().as_str(),
            "https://example.org/poems/poems.json"
        );
    }

    #[test]
    fn test_manifest_url_from_subdirectory() {
        let with_slash = ManifestClient::new("https://example.org/verse/").unwrap();
        let without_slash = ManifestClient::new("https://example.org/verse").unwrap();

        assert_eq!(
            with_slash.manifest_url().unwrap().as_str(),
            "https://example.org/verse/poems/poems.json"
        );
        assert_eq!(
            with_slash.manifest_url().unwrap(),
            without_slash.manifest_url().unwrap()
        );
    }

    #[test]
    fn test_poem_url() {
        let client = ManifestClient::new("https://example.org/verse/").unwrap();
        assert_eq!(
            client.poem_url("dawn chorus.md").unwrap().as_str(),
            "https://example.org/verse/poems/dawn%20chorus.md"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(ManifestClient::new("not a url").is_err());
        assert!(ManifestClient::new("mailto:someone@example.org").is_err());
    }

    #[tokio::test]
    async fn test_fetch_manifest_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/poems/poems.json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"poems":[{"filename":"a.md","tags":["x"]}],"lastUpdated":"2025-01-02"}"#,
                "application/json",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = ManifestClient::new(&server.uri()).unwrap();
        let doc = client.fetch_manifest().await.unwrap();

        assert_eq!(doc.poems.len(), 1);
        assert_eq!(doc.poems[0].filename, "a.md");
        assert_eq!(doc.last_updated.as_deref(), Some("2025-01-02"));
    }

    #[tokio::test]
    async fn test_fetch_manifest_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/poems/poems.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = ManifestClient::new(&server.uri()).unwrap();
        let err = client.fetch_manifest().await.unwrap_err();

        assert!(matches!(err, ManifestError::Fetch { status: Some(404), .. }));
        assert_eq!(err.to_string(), "Failed to fetch poems.json (404)");
    }

    #[tokio::test]
    async fn test_fetch_manifest_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/poems/poems.json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
            .mount(&server)
            .await;

        let client = ManifestClient::new(&server.uri()).unwrap();
        let err = client.fetch_manifest().await.unwrap_err();

        assert!(matches!(err, ManifestError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_manifest_transport_error() {
        // Nothing listens on port 9 (discard) in the test environment
        let client = ManifestClient::new("http://127.0.0.1:9/").unwrap();
        let err = client.fetch_manifest().await.unwrap_err();

        assert!(matches!(err, ManifestError::Fetch { status: None, .. }));
        assert!(err.to_string().starts_with("Failed to fetch poems.json"));
    }
}
