//! reqwest-backed [`RegistrySource`] for the ORCID public API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use super::http_client::{HttpSettings, build_registry_http_client};
use super::{FetchError, RegistrySource, Resource};

/// Reads `person` and `works` resources from the ORCID registry.
///
/// Requests go to `{base_url}/{identifier}/{resource}` with
/// `Accept: application/json`. The identifier is inserted verbatim; no
/// format validation is done, so malformed identifiers simply come back as
/// non-success statuses.
pub struct OrcidClient {
    client: Client,
    base_url: String,
}

impl OrcidClient {
    /// Creates a client from explicit connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if HTTP client construction fails.
    #[tracing::instrument(skip_all, fields(base_url = %settings.base_url))]
    pub fn new(settings: &HttpSettings) -> Result<Self, FetchError> {
        let client = build_registry_http_client(settings)?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client with a custom base URL and default settings otherwise
    /// (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if HTTP client construction fails.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::new(&HttpSettings::with_base_url(base_url))
    }

    /// Returns the normalized base URL (no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the request URL for one identifier and resource.
    #[must_use]
    pub fn resource_url(&self, identifier: &str, resource: Resource) -> String {
        format!("{}/{}/{}", self.base_url, identifier, resource.path_segment())
    }
}

impl std::fmt::Debug for OrcidClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrcidClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RegistrySource for OrcidClient {
    #[tracing::instrument(skip_all, fields(orcid = %identifier, resource = %resource))]
    async fn fetch(&self, identifier: &str, resource: Resource) -> Result<Value, FetchError> {
        let url = self.resource_url(identifier, resource);
        debug!(api_url = %url, "Calling ORCID API");

        let response = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(error = %e, "ORCID API request failed");
                return Err(FetchError::transport(identifier, resource, &e.to_string()));
            }
        };

        // Only 200 carries data; other 2xx answers are treated as no data
        let status = response.status();
        if status != StatusCode::OK {
            debug!(status = status.as_u16(), "ORCID API returned non-200 status");
            return Err(FetchError::status(identifier, resource, status.as_u16()));
        }

        match response.json::<Value>().await {
            Ok(body) => Ok(body),
            Err(e) => {
                warn!(error = %e, "Failed to parse ORCID response JSON");
                Err(FetchError::parse(identifier, resource, &e.to_string()))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::socket_guard::start_mock_server_or_skip;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    const ORCID: &str = "0000-0001-2345-6789";

    #[test]
    fn test_orcid_client_strips_trailing_slash_from_base_url() {
        let client = OrcidClient::with_base_url("https://pub.orcid.org/v3.0/").unwrap();
        assert_eq!(client.base_url(), "https://pub.orcid.org/v3.0");
    }

    #[test]
    fn test_orcid_client_resource_url_uses_identifier_verbatim() {
        let client = OrcidClient::with_base_url("https://pub.orcid.org/v3.0").unwrap();
        assert_eq!(
            client.resource_url(ORCID, Resource::Person),
            "https://pub.orcid.org/v3.0/0000-0001-2345-6789/person"
        );
        assert_eq!(
            client.resource_url("not-an-orcid", Resource::Works),
            "https://pub.orcid.org/v3.0/not-an-orcid/works"
        );
    }

    #[test]
    fn test_orcid_client_debug_shows_base_url() {
        let client = OrcidClient::with_base_url("http://localhost:1").unwrap();
        let rendered = format!("{client:?}");
        assert!(rendered.contains("http://localhost:1"));
    }

    #[tokio::test]
    async fn test_orcid_client_fetch_person_success() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path(format!("/{ORCID}/person")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": {"given-names": {"value": "Ana"}}
            })))
            .mount(&mock_server)
            .await;

        let client = OrcidClient::with_base_url(mock_server.uri()).unwrap();
        let body = client.fetch(ORCID, Resource::Person).await.unwrap();
        assert_eq!(body["name"]["given-names"]["value"], "Ana");
    }

    #[tokio::test]
    async fn test_orcid_client_sends_json_accept_header() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path(format!("/{ORCID}/works")))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"group": []})))
            .mount(&mock_server)
            .await;

        let client = OrcidClient::with_base_url(mock_server.uri()).unwrap();
        // Without the Accept header wiremock answers 404 and fetch fails.
        let result = client.fetch(ORCID, Resource::Works).await;
        assert!(result.is_ok(), "should send Accept: application/json");
    }

    #[tokio::test]
    async fn test_orcid_client_sends_tool_user_agent() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(header(
                "user-agent",
                crate::user_agent::default_registry_user_agent(),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let client = OrcidClient::with_base_url(mock_server.uri()).unwrap();
        assert!(client.fetch(ORCID, Resource::Person).await.is_ok());
    }

    #[tokio::test]
    async fn test_orcid_client_non_success_status_is_status_error() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = OrcidClient::with_base_url(mock_server.uri()).unwrap();
        match client.fetch(ORCID, Resource::Person).await {
            Err(FetchError::Status { status, resource, .. }) => {
                assert_eq!(status, 404);
                assert_eq!(resource, Resource::Person);
            }
            other => panic!("Expected FetchError::Status, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_orcid_client_server_error_is_status_error() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = OrcidClient::with_base_url(mock_server.uri()).unwrap();
        let err = client.fetch(ORCID, Resource::Works).await.unwrap_err();
        assert!(err.to_string().contains("503"), "got: {err}");
    }

    #[tokio::test]
    async fn test_orcid_client_non_200_success_status_is_status_error() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(203).set_body_json(serde_json::json!({
                "name": {"given-names": {"value": "Ana"}}
            })))
            .mount(&mock_server)
            .await;

        let client = OrcidClient::with_base_url(mock_server.uri()).unwrap();
        match client.fetch(ORCID, Resource::Person).await {
            Err(FetchError::Status { status, .. }) => assert_eq!(status, 203),
            other => panic!("Expected FetchError::Status, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_orcid_client_malformed_body_is_parse_error() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html>not json</html>")
                    .insert_header("content-type", "application/json"),
            )
            .mount(&mock_server)
            .await;

        let client = OrcidClient::with_base_url(mock_server.uri()).unwrap();
        let err = client.fetch(ORCID, Resource::Works).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn test_orcid_client_unreachable_host_is_transport_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let client = OrcidClient::with_base_url("http://127.0.0.1:9").unwrap();
        let err = client.fetch(ORCID, Resource::Person).await.unwrap_err();
        assert!(err.is_transport(), "got: {err:?}");
    }
}
