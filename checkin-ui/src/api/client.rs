//! HTTP API Client
//!
//! Functions for communicating with the admin REST API. Every request
//! carries the session token from `localStorage` as a bearer token.

use checkin_admin::{
    bearer_header, ApiError, ApiResult, DashboardResponse, DeactivateUserRequest,
    MessageResponse, RegisterRequest,
};
use gloo_net::http::{Request, RequestBuilder, Response};

use crate::state::session::{self, LocalStorageTokenStore, API_URL_KEY};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api/admin";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = session::get_item(API_URL_KEY)
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) -> ApiResult<()> {
    session::set_item(API_URL_KEY, url.trim())
}

fn endpoint(path: &str) -> String {
    format!("{}/{}", get_api_base(), path)
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match bearer_header(&LocalStorageTokenStore) {
        Some(value) => builder.header("Authorization", &value),
        None => builder,
    }
}

async fn check(response: Response) -> ApiResult<Response> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_response(status, &body))
}

async fn message(response: Response) -> ApiResult<MessageResponse> {
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    if body.trim().is_empty() {
        return Ok(MessageResponse::default());
    }
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn network(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

/// Fetch the signed-in user and the active / all user lists
pub async fn fetch_dashboard() -> ApiResult<DashboardResponse> {
    let response = authorized(Request::get(&endpoint("dashboard")))
        .send()
        .await
        .map_err(network)?;

    check(response)
        .await?
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Deactivate a single user
pub async fn deactivate_user(user_id: &str) -> ApiResult<MessageResponse> {
    let request = authorized(Request::post(&endpoint("deactivate-user")))
        .json(&DeactivateUserRequest {
            user_id: user_id.to_string(),
        })
        .map_err(|e| ApiError::Decode(format!("Request build error: {}", e)))?;

    let response = request.send().await.map_err(network)?;
    message(check(response).await?).await
}

/// Deactivate every active user
pub async fn deactivate_all_active_users() -> ApiResult<MessageResponse> {
    let response = authorized(Request::post(&endpoint("deactivate-all-active-users")))
        .send()
        .await
        .map_err(network)?;

    message(check(response).await?).await
}

/// Download the weekly report spreadsheet
pub async fn fetch_weekly_report() -> ApiResult<Vec<u8>> {
    let response = authorized(Request::get(&endpoint("generate-weekly-report")))
        .send()
        .await
        .map_err(network)?;

    check(response).await?.binary().await.map_err(network)
}

/// Register a new account
pub async fn register(request: &RegisterRequest) -> ApiResult<MessageResponse> {
    let request = authorized(Request::post(&endpoint("register")))
        .json(request)
        .map_err(|e| ApiError::Decode(format!("Request build error: {}", e)))?;

    let response = request.send().await.map_err(network)?;
    message(check(response).await?).await
}
