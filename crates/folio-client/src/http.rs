//! HTTP implementation of [`CatalogApi`].

use crate::api::{ApiFuture, CatalogApi};
use crate::error::{ClientError, Result};
use folio_config::FolioConfig;
use folio_core::{Page, Project, ProjectQuery, User};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

const PROJECTS_PATH: &str = "projects";
const PROFILE_PATH: &str = "user/me";

/// Envelope flag and message present on every response.
#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default = "default_true")]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct ListEnvelope<T> {
    data: Vec<T>,
    page: u32,
    limit: u32,
    total: u64,
}

#[derive(Debug, Deserialize)]
struct ItemEnvelope<T> {
    data: T,
}

/// Catalog client speaking the public JSON API over HTTP.
#[derive(Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base: String,
    timeout: Duration,
}

impl std::fmt::Debug for HttpCatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalogClient")
            .field("client", &"reqwest::Client")
            .field("base", &self.base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HttpCatalogClient {
    /// Create a client from resolved configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: &FolioConfig) -> Result<Self> {
        Self::with_base(config.api_base(), config.timeout)
    }

    /// Create a client for an explicit API base such as
    /// `http://localhost:3001/api/v1/public`.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn with_base(base: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .user_agent(format!("folio/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::InvalidConfig {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base: base.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// API base every endpoint is resolved against.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    /// List projects.
    ///
    /// # Errors
    /// Returns `Network` or `Server` errors; never retries.
    pub async fn get_projects(&self, query: &ProjectQuery) -> Result<Page<Project>> {
        let url = self.endpoint(PROJECTS_PATH);
        let body = self.get(&url, Some(query)).await?;
        let envelope: ListEnvelope<Project> = parse(&url, &body)?;

        debug!(
            url = %url,
            page = envelope.page,
            limit = envelope.limit,
            total = envelope.total,
            count = envelope.data.len(),
            "fetched project page"
        );

        Ok(Page {
            data: envelope.data,
            page: envelope.page,
            limit: envelope.limit,
            total: envelope.total,
        })
    }

    /// Fetch the profile record.
    ///
    /// # Errors
    /// Returns `Network` or `Server` errors; never retries.
    pub async fn get_profile(&self) -> Result<User> {
        let url = self.endpoint(PROFILE_PATH);
        let body = self.get(&url, None).await?;
        let envelope: ItemEnvelope<User> = parse(&url, &body)?;
        Ok(envelope.data)
    }

    async fn get(&self, url: &str, query: Option<&ProjectQuery>) -> Result<Vec<u8>> {
        let mut request = self.client.get(url);
        if let Some(query) = query {
            request = request.query(query);
        }

        debug!(url = %url, ?query, "GET request starting");

        let response = request.send().await.map_err(|e| {
            warn!(url = %url, error = %e, "network error");
            ClientError::network(url, e)
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::network(url, e))?;

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| reason(status));
            warn!(url = %url, status = status.as_u16(), message = %message, "api error");
            return Err(ClientError::Server {
                url: url.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let flag: Status = parse(url, &body)?;
        if !flag.success {
            let message = flag
                .message
                .unwrap_or_else(|| "request was not successful".to_string());
            warn!(url = %url, message = %message, "api reported failure");
            return Err(ClientError::Server {
                url: url.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        Ok(body.to_vec())
    }
}

impl CatalogApi for HttpCatalogClient {
    fn fetch_page<'a>(&'a self, query: &'a ProjectQuery) -> ApiFuture<'a, Page<Project>> {
        Box::pin(self.get_projects(query))
    }

    fn fetch_profile(&self) -> ApiFuture<'_, User> {
        Box::pin(self.get_profile())
    }
}

fn parse<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T> {
    sonic_rs::from_slice(body).map_err(|e| ClientError::ParseError {
        source: url.to_string(),
        message: e.to_string(),
    })
}

fn error_message(body: &[u8]) -> Option<String> {
    sonic_rs::from_slice::<Status>(body)
        .ok()
        .and_then(|s| s.message)
        .filter(|m| !m.is_empty())
}

fn reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::ProjectType;
    use mockito::{Matcher, Server};

    const PREFIX: &str = "/api/v1/public";

    fn client(server: &Server) -> HttpCatalogClient {
        HttpCatalogClient::with_base(format!("{}{PREFIX}", server.url()), Duration::from_secs(5))
            .unwrap()
    }

    fn project_json(id: &str, featured: bool) -> String {
        format!(
            r#"{{"id":"{id}","title":"Project {id}","slug":"p-{id}","description":"<p>x</p>",
            "type":"WEB","tags":[],"stacks":[],"isFeatured":{featured},"isVisible":true,
            "link":null,"partner":null,"cover":null,"gallery":[]}}"#
        )
    }

    #[tokio::test]
    async fn sends_query_and_parses_page() {
        let mut server = Server::new_async().await;
        let body = format!(
            r#"{{"success":true,"data":[{},{}],"page":2,"limit":2,"total":9}}"#,
            project_json("a", false),
            project_json("b", false)
        );
        let mock = server
            .mock("GET", "/api/v1/public/projects")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("isVisible".into(), "true".into()),
                Matcher::UrlEncoded("isFeatured".into(), "false".into()),
                Matcher::UrlEncoded("type".into(), "APP".into()),
                Matcher::UrlEncoded("page".into(), "2".into()),
                Matcher::UrlEncoded("limit".into(), "2".into()),
            ]))
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let query = ProjectQuery::visible(false, Some(ProjectType::App)).paged(2, 2);
        let page = client(&server).fetch_page(&query).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.page, 2);
        assert_eq!(page.total, 9);
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].id.as_str(), "a");
    }

    #[tokio::test]
    async fn error_status_becomes_server_error_with_message() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/v1/public/projects")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(r#"{"success":false,"message":"database unavailable"}"#)
            .create_async()
            .await;

        let err = client(&server)
            .fetch_page(&ProjectQuery::default())
            .await
            .unwrap_err();

        match err {
            ClientError::Server {
                status, message, ..
            } => {
                assert_eq!(status, 500);
                assert_eq!(message, "database unavailable");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unsuccessful_envelope_is_a_server_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/v1/public/projects")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"success":false,"message":"invalid type"}"#)
            .create_async()
            .await;

        let err = client(&server)
            .fetch_page(&ProjectQuery::default())
            .await
            .unwrap_err();
        assert!(err.is_server());
        assert!(err.to_string().contains("invalid type"));
    }

    #[tokio::test]
    async fn status_without_body_uses_reason() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/v1/public/user/me")
            .with_status(404)
            .create_async()
            .await;

        let err = client(&server).fetch_profile().await.unwrap_err();
        assert!(err.to_string().contains("Not Found"));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let client =
            HttpCatalogClient::with_base("http://127.0.0.1:9/api", Duration::from_secs(2)).unwrap();
        let err = client.fetch_page(&ProjectQuery::default()).await.unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn parses_profile() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/v1/public/user/me")
            .with_status(200)
            .with_body(
                r#"{"success":true,"data":{"id":"u1","email":"a@b.c","name":"Ada",
                "title":"Engineer","bio":"","avatar":null,"socials":[],"experiences":[]}}"#,
            )
            .create_async()
            .await;

        let user = client(&server).fetch_profile().await.unwrap();
        assert_eq!(user.name, "Ada");
    }

    #[test]
    fn base_trims_trailing_slash() {
        let client =
            HttpCatalogClient::with_base("http://host/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base(), "http://host/api");
        assert_eq!(client.endpoint("projects"), "http://host/api/projects");
    }
}
