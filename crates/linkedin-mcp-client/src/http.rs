//! JSON-over-HTTP client for a LinkedIn REST bridge.
//!
//! The bridge exposes one endpoint per capability:
//!
//! | capability  | request                                   |
//! |-------------|-------------------------------------------|
//! | login       | `POST /auth/login` -> `{"token": ...}`    |
//! | profile     | `GET /profiles/{id or me}`                |
//! | posts       | `GET /profiles/{id or me}/posts?limit=`   |
//! | jobs        | `GET /jobs?keywords=&limit=[&location=]`  |
//! | job         | `GET /jobs/{id}`                          |
//! | people      | `GET /people?keywords=&limit=`            |
//! | connections | `GET /profiles/{urn}/connections?limit=`  |

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use linkedin_mcp_core::{Connector, CredentialConfig, JobSearchParams, RemoteClient, RemoteError};
use reqwest::{Client, Response, StatusCode, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const OWN_PROFILE: &str = "me";

/// Shared HTTP plumbing for the connector and its clients.
#[derive(Debug, Clone)]
struct Api {
    http: Client,
    base_url: Url,
}

impl Api {
    fn url(&self, segments: &[&str]) -> Result<Url, RemoteError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RemoteError::Other(format!("Invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| RemoteError::Parse(e.to_string()))
}

fn network_error(e: &reqwest::Error) -> RemoteError {
    RemoteError::Network(e.to_string())
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// Logs in against the REST bridge.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    api: Api,
}

impl HttpConnector {
    /// Create a connector with the default request timeout.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, RemoteError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a connector with a custom request timeout.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be built.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| RemoteError::Other(format!("Invalid base URL {base_url}: {e}")))?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Other(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            api: Api { http, base_url },
        })
    }

    /// Base URL of the bridge.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.api.base_url
    }
}

#[async_trait]
impl Connector for HttpConnector {
    async fn login(
        &self,
        credentials: &CredentialConfig,
    ) -> Result<Arc<dyn RemoteClient>, RemoteError> {
        let url = self.api.url(&["auth", "login"])?;
        tracing::debug!(%url, identity = credentials.identity(), "Logging in");

        let response = self
            .api
            .http
            .post(url)
            .json(&LoginRequest {
                email: credentials.identity(),
                password: credentials.secret(),
            })
            .send()
            .await
            .map_err(|e| network_error(&e))?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::LoginRejected(body));
        }

        let LoginResponse { token } = decode(response).await?;
        Ok(Arc::new(HttpClient {
            api: self.api.clone(),
            token,
        }))
    }
}

/// Authenticated bridge client.
#[derive(Debug, Clone)]
pub struct HttpClient {
    api: Api,
    token: String,
}

impl HttpClient {
    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, RemoteError> {
        let url = self.api.url(segments)?;
        tracing::debug!(%url, ?query, "GET");

        let response = self
            .api
            .http
            .get(url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(|e| network_error(&e))?;

        decode(response).await
    }

    async fn get_list(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Vec<Value>, RemoteError> {
        let items: Option<Vec<Value>> = self.get(segments, query).await?;
        Ok(items.unwrap_or_default())
    }
}

#[async_trait]
impl RemoteClient for HttpClient {
    async fn get_profile(&self, profile_id: Option<&str>) -> Result<Value, RemoteError> {
        self.get(&["profiles", profile_id.unwrap_or(OWN_PROFILE)], &[])
            .await
    }

    async fn get_profile_posts(
        &self,
        profile_id: Option<&str>,
        post_count: u32,
    ) -> Result<Vec<Value>, RemoteError> {
        self.get_list(
            &["profiles", profile_id.unwrap_or(OWN_PROFILE), "posts"],
            &[("limit", post_count.to_string())],
        )
        .await
    }

    async fn search_jobs(&self, params: &JobSearchParams) -> Result<Vec<Value>, RemoteError> {
        let mut query = vec![
            ("keywords", params.keywords.clone()),
            ("limit", params.limit.to_string()),
        ];
        if let Some(location) = &params.location {
            query.push(("location", location.clone()));
        }
        self.get_list(&["jobs"], &query).await
    }

    async fn get_job(&self, job_id: &str) -> Result<Value, RemoteError> {
        self.get(&["jobs", job_id], &[]).await
    }

    async fn search_people(&self, keywords: &str, limit: u32) -> Result<Vec<Value>, RemoteError> {
        self.get_list(
            &["people"],
            &[("keywords", keywords.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    async fn get_profile_connections(
        &self,
        urn_id: &str,
        limit: u32,
    ) -> Result<Vec<Value>, RemoteError> {
        self.get_list(
            &["profiles", urn_id, "connections"],
            &[("limit", limit.to_string())],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path, query_param, query_param_is_missing},
    };

    use super::*;

    async fn logged_in(server: &MockServer) -> Arc<dyn RemoteClient> {
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({ "email": "me@example.com", "password": "pw" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok" })))
            .mount(server)
            .await;

        let connector = HttpConnector::new(&server.uri()).unwrap();
        connector
            .login(&CredentialConfig::new("me@example.com", "pw"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_own_profile_uses_bearer_token() {
        let server = MockServer::start().await;
        let client = logged_in(&server).await;

        Mock::given(method("GET"))
            .and(path("/profiles/me"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "entityUrn": "urn:li:fs_profile:ABC123" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let profile = client.get_profile(None).await.unwrap();
        assert_eq!(profile["entityUrn"], "urn:li:fs_profile:ABC123");
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
            .mount(&server)
            .await;

        let connector = HttpConnector::new(&server.uri()).unwrap();
        let result = connector
            .login(&CredentialConfig::new("me@example.com", "wrong"))
            .await;

        assert!(matches!(
            result,
            Err(RemoteError::LoginRejected(body)) if body == "bad credentials"
        ));
    }

    #[tokio::test]
    async fn test_search_jobs_without_location() {
        let server = MockServer::start().await;
        let client = logged_in(&server).await;

        Mock::given(method("GET"))
            .and(path("/jobs"))
            .and(query_param("keywords", "python developer"))
            .and(query_param("limit", "5"))
            .and(query_param_is_missing("location"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }, { "id": 2 }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let jobs = client
            .search_jobs(&JobSearchParams::new("python developer", None, 5))
            .await
            .unwrap();
        assert_eq!(jobs.len(), 2);
    }

    #[tokio::test]
    async fn test_search_jobs_with_location() {
        let server = MockServer::start().await;
        let client = logged_in(&server).await;

        Mock::given(method("GET"))
            .and(path("/jobs"))
            .and(query_param("location", "San Francisco"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let jobs = client
            .search_jobs(&JobSearchParams::new(
                "rust",
                Some("San Francisco".to_string()),
                25,
            ))
            .await
            .unwrap();
        assert!(jobs.is_empty());
    }

    #[tokio::test]
    async fn test_null_list_is_empty() {
        let server = MockServer::start().await;
        let client = logged_in(&server).await;

        Mock::given(method("GET"))
            .and(path("/profiles/ABC123/connections"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
            .mount(&server)
            .await;

        let connections = client.get_profile_connections("ABC123", 10).await.unwrap();
        assert!(connections.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        let client = logged_in(&server).await;

        Mock::given(method("GET"))
            .and(path("/jobs/42"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such job"))
            .mount(&server)
            .await;

        let err = client.get_job("42").await.unwrap_err();
        assert_eq!(
            err,
            RemoteError::Status {
                status: 404,
                body: "no such job".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_bridge_is_network_error() {
        let connector =
            HttpConnector::with_timeout("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let result = connector
            .login(&CredentialConfig::new("me@example.com", "pw"))
            .await;
        assert!(matches!(result, Err(RemoteError::Network(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(HttpConnector::new("not a url").is_err());
    }

    #[test]
    fn test_url_keeps_base_path() {
        let connector = HttpConnector::new("http://localhost:8000/api/").unwrap();
        let url = connector.api.url(&["profiles", "me"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/profiles/me");
    }
}
