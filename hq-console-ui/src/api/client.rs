//! HTTP API Client
//!
//! Functions for communicating with the HQ REST API. Every request is sent
//! with `credentials: include` so the session cookie travels along.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::RequestCredentials;

use hq_console::api::{
    ApiError, CenterFilter, CenterPage, Envelope, GenericResponse, LoginRequest, NewCenterInput,
    User,
};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

const API_URL_KEY: &str = "hq_console_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, url);
        }
    }
}

fn url(path: &str) -> String {
    format!("{}/{}", get_api_base(), path)
}

fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
    builder.credentials(RequestCredentials::Include)
}

async fn check(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    Err(ApiError::from_response(status, &text))
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = with_credentials(Request::get(&url(path)))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    check(response)
        .await?
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let response = with_credentials(Request::post(&url(path)))
        .json(body)
        .map_err(|e| ApiError::InvalidInput(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    check(response)
        .await?
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

// ============ API Functions ============

/// Sign in; the browser stores the session cookie
pub async fn login(request: &LoginRequest) -> Result<GenericResponse, ApiError> {
    post_json("auth/login", request).await
}

pub async fn logout() -> Result<(), ApiError> {
    let response = with_credentials(Request::get(&url("auth/logout")))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check(response).await.map(|_| ())
}

/// Fetch the signed-in user
pub async fn fetch_me() -> Result<User, ApiError> {
    #[derive(serde::Deserialize)]
    struct UserData {
        user: User,
    }

    let envelope: Envelope<UserData> = get_json("users/me").await?;
    Ok(envelope.data.user)
}

/// Fetch one page of the HQ clients (centers) table
pub async fn filter_centers(filter: &CenterFilter) -> Result<CenterPage, ApiError> {
    let envelope: Envelope<CenterPage> =
        get_json(&format!("centers/filter?{}", filter.to_query())).await?;
    Ok(envelope.data)
}

/// Create a new center
pub async fn add_center(input: &NewCenterInput) -> Result<GenericResponse, ApiError> {
    post_json("centers", input).await
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_api_base_drops_trailing_slash() {
        set_api_base("http://hq.example/api/");
        assert_eq!(get_api_base(), "http://hq.example/api");
        assert_eq!(url("users/me"), "http://hq.example/api/users/me");
    }
}
