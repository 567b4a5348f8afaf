//! HQ REST API Client
//!
//! HTTP client for the HQ API. Requests carry the session cookies the way a
//! browser does with `credentials: "include"`.

use async_trait::async_trait;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::dto::*;
use super::error::{ApiError, ApiResult};
use super::ConsoleApi;
use crate::config::ApiConfig;

/// HQ API client
pub struct ConsoleClient {
    http: HttpClient,
    base_url: String,
    cookies: RwLock<Vec<String>>,
}

impl ConsoleClient {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cookies: RwLock::new(Vec::new()),
        })
    }

    /// Start from cookies of an earlier login
    pub fn with_cookies(self, cookies: Vec<String>) -> Self {
        Self {
            cookies: RwLock::new(cookies),
            ..self
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Cookies currently held, for persisting the session
    pub async fn cookies(&self) -> Vec<String> {
        self.cookies.read().await.clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn execute(&self, builder: RequestBuilder, method: &str, path: &str) -> ApiResult<Response> {
        let request_id = Uuid::new_v4().to_string();
        let mut builder = builder.header("x-request-id", &request_id);

        {
            let cookies = self.cookies.read().await;
            if !cookies.is_empty() {
                builder = builder.header(COOKIE, cookies.join("; "));
            }
        }

        let started = Instant::now();
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(
                request_id = %request_id,
                method,
                path,
                error = %e,
                "API request failed"
            );
            ApiError::from(e)
        })?;

        let status = response.status();
        tracing::debug!(
            request_id = %request_id,
            method,
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "API request"
        );

        if status.is_success() {
            Ok(response)
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(ApiError::from_response(status.as_u16(), &text))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.execute(self.http.get(self.url(path)), "GET", path).await?;
        decode(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .execute(self.http.post(self.url(path)).json(body), "POST", path)
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(ApiError::from)
}

/// `Set-Cookie` values reduced to the `name=value` part
fn session_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(|pair| pair.trim().to_string())
        .filter(|pair| pair.contains('='))
        .collect()
}

#[async_trait]
impl ConsoleApi for ConsoleClient {
    async fn login(&self, request: &LoginRequest) -> ApiResult<GenericResponse> {
        let path = "auth/login";
        let response = self
            .execute(self.http.post(self.url(path)).json(request), "POST", path)
            .await?;

        let cookies = session_cookies(&response);
        if !cookies.is_empty() {
            *self.cookies.write().await = cookies;
        }

        let reply: GenericResponse = decode(response).await?;
        tracing::info!(email = %request.email, "logged in");
        Ok(reply)
    }

    async fn logout(&self) -> ApiResult<()> {
        let path = "auth/logout";
        let result = self.execute(self.http.get(self.url(path)), "GET", path).await;
        self.cookies.write().await.clear();
        result.map(|_| ())
    }

    async fn me(&self) -> ApiResult<User> {
        let envelope: Envelope<UserData> = self.get_json("users/me").await?;
        Ok(envelope.data.user)
    }

    async fn add_client(&self, input: &NewClientInput) -> ApiResult<GenericResponse> {
        self.post_json("clients", input).await
    }

    async fn get_clients(&self) -> ApiResult<Vec<Client>> {
        let envelope: Envelope<Vec<Client>> = self.get_json("clients").await?;
        Ok(envelope.data)
    }

    async fn filter_clients(&self, filter: &ClientFilter) -> ApiResult<ClientPage> {
        let path = format!("clients/filter?{}", filter.to_query());
        let envelope: Envelope<ClientPage> = self.get_json(&path).await?;
        Ok(envelope.data)
    }

    async fn add_center(&self, input: &NewCenterInput) -> ApiResult<GenericResponse> {
        self.post_json("centers", input).await
    }

    async fn filter_centers(&self, filter: &CenterFilter) -> ApiResult<CenterPage> {
        let path = format!("centers/filter?{}", filter.to_query());
        let envelope: Envelope<CenterPage> = self.get_json(&path).await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/api/".to_string(),
            request_timeout_secs: 5,
        };
        let client = ConsoleClient::new(&config).unwrap();

        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(client.url("/clients"), "http://localhost:8000/api/clients");
        assert_eq!(
            client.url("centers/filter?page=0"),
            "http://localhost:8000/api/centers/filter?page=0"
        );
    }

    #[tokio::test]
    async fn test_restored_cookies() {
        let client = ConsoleClient::new(&ApiConfig::default())
            .unwrap()
            .with_cookies(vec!["access_token=t".to_string()]);
        assert_eq!(client.cookies().await, vec!["access_token=t"]);
    }
}
