//! Admin REST API Client
//!
//! HTTP client for the check-in backend's admin API. Every request carries
//! the session token from the configured [`TokenStore`] as a bearer token.
//! Failures are reported once; there is no retry or backoff.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{DashboardResponse, DeactivateUserRequest, MessageResponse, RegisterRequest};
use crate::session::{bearer_header, TokenStore};

/// Operations the admin front-end performs against the backend
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// `GET dashboard`
    async fn dashboard(&self) -> ApiResult<DashboardResponse>;

    /// `POST deactivate-user`
    async fn deactivate_user(&self, user_id: &str) -> ApiResult<MessageResponse>;

    /// `POST deactivate-all-active-users`
    async fn deactivate_all_active_users(&self) -> ApiResult<MessageResponse>;

    /// `GET generate-weekly-report`, the spreadsheet bytes
    async fn weekly_report(&self) -> ApiResult<Vec<u8>>;

    /// `POST register`
    async fn register(&self, request: &RegisterRequest) -> ApiResult<MessageResponse>;
}

/// `reqwest` implementation of [`AdminApi`]
pub struct AdminClient {
    client: Client,
    config: ApiConfig,
    tokens: Arc<dyn TokenStore>,
}

impl AdminClient {
    /// Create a new client with the given configuration
    pub fn new(config: ApiConfig, tokens: Arc<dyn TokenStore>) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            tokens,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!("Sending {} {} (request {})", method, url, request_id);

        let mut builder = self
            .client
            .request(method, url)
            .header("X-Request-Id", request_id);

        if let Some(value) = bearer_header(self.tokens.as_ref()) {
            builder = builder.header(reqwest::header::AUTHORIZATION, value);
        }

        builder
    }

    async fn execute(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!("Request failed: {}", e);
            if e.is_timeout() {
                ApiError::Network("Request timeout".to_string())
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_response(status.as_u16(), &body);
        tracing::warn!(status = status.as_u16(), "API error: {}", error);
        Err(error)
    }

    async fn json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Acknowledgements may come back with an empty body
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
}

#[async_trait]
impl AdminApi for AdminClient {
    async fn dashboard(&self) -> ApiResult<DashboardResponse> {
        let response = self.execute(self.request(Method::GET, "dashboard")).await?;
        Self::json(response).await
    }

    async fn deactivate_user(&self, user_id: &str) -> ApiResult<MessageResponse> {
        let body = DeactivateUserRequest {
            user_id: user_id.to_string(),
        };
        let response = self
            .execute(self.request(Method::POST, "deactivate-user").json(&body))
            .await?;
        tracing::info!(user_id, "User deactivated");
        Self::message(response).await
    }

    async fn deactivate_all_active_users(&self) -> ApiResult<MessageResponse> {
        let response = self
            .execute(self.request(Method::POST, "deactivate-all-active-users"))
            .await?;
        tracing::info!("All active users deactivated");
        Self::message(response).await
    }

    async fn weekly_report(&self) -> ApiResult<Vec<u8>> {
        let response = self
            .execute(self.request(Method::GET, "generate-weekly-report"))
            .await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        tracing::info!(size = bytes.len(), "Weekly report downloaded");
        Ok(bytes.to_vec())
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<MessageResponse> {
        let response = self
            .execute(self.request(Method::POST, "register").json(request))
            .await?;
        tracing::info!(username = %request.username, "User registered");
        Self::message(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldError;
    use crate::session::MemoryTokenStore;
    use axum::{
        extract::State,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::{get, post},
        Json, Router,
    };
    use std::sync::Mutex;

    #[derive(Default)]
    struct Backend {
        auth_headers: Mutex<Vec<Option<String>>>,
        deactivated: Mutex<Vec<String>>,
    }

    impl Backend {
        fn record(&self, headers: &HeaderMap) {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            self.auth_headers.lock().unwrap().push(auth);
        }
    }

    type Shared = Arc<Backend>;

    async fn dashboard(State(backend): State<Shared>, headers: HeaderMap) -> impl IntoResponse {
        backend.record(&headers);
        if headers.get("authorization").is_none() {
            return Json(serde_json::json!({ "user": null }));
        }
        Json(serde_json::json!({
            "user": { "_id": "admin", "firstName": "Ada" },
            "activeUsers": [{ "_id": "u1", "fullName": "Grace Hopper", "purpose": "Tour" }],
            "allUsers": [{ "_id": "u1" }, { "_id": "u2" }]
        }))
    }

    async fn deactivate_user(
        State(backend): State<Shared>,
        headers: HeaderMap,
        Json(body): Json<DeactivateUserRequest>,
    ) -> impl IntoResponse {
        backend.record(&headers);
        backend.deactivated.lock().unwrap().push(body.user_id);
        Json(serde_json::json!({ "msg": "User deactivated" }))
    }

    async fn deactivate_all(State(backend): State<Shared>, headers: HeaderMap) -> StatusCode {
        backend.record(&headers);
        StatusCode::NO_CONTENT
    }

    async fn report() -> impl IntoResponse {
        (
            [("content-type", crate::report::REPORT_CONTENT_TYPE)],
            vec![0x50u8, 0x4b, 0x03, 0x04],
        )
    }

    async fn register(Json(body): Json<RegisterRequest>) -> impl IntoResponse {
        if body.username == "taken" {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "errors": [{ "msg": "Username already exists", "path": "username" }]
                })),
            );
        }
        (
            StatusCode::CREATED,
            Json(serde_json::json!({ "msg": "Registration successful" })),
        )
    }

    async fn spawn_backend() -> (String, Shared) {
        let backend: Shared = Arc::new(Backend::default());
        let app = Router::new()
            .route("/api/admin/dashboard", get(dashboard))
            .route("/api/admin/deactivate-user", post(deactivate_user))
            .route("/api/admin/deactivate-all-active-users", post(deactivate_all))
            .route("/api/admin/generate-weekly-report", get(report))
            .route("/api/admin/register", post(register))
            .with_state(Arc::clone(&backend));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/api/admin/", addr), backend)
    }

    fn client(base_url: &str, tokens: Arc<dyn TokenStore>) -> AdminClient {
        AdminClient::new(ApiConfig::new(base_url), tokens).unwrap()
    }

    #[tokio::test]
    async fn test_dashboard_sends_bearer_token() {
        let (url, backend) = spawn_backend().await;
        let client = client(&url, Arc::new(MemoryTokenStore::with_token("secret")));

        let dashboard = client.dashboard().await.unwrap();
        assert_eq!(dashboard.user.unwrap().first_name, "Ada");
        assert_eq!(dashboard.active_users.len(), 1);
        assert_eq!(dashboard.all_users.len(), 2);

        let headers = backend.auth_headers.lock().unwrap().clone();
        assert_eq!(headers, vec![Some("Bearer secret".to_string())]);
    }

    #[tokio::test]
    async fn test_no_token_no_header() {
        let (url, backend) = spawn_backend().await;
        let client = client(&url, Arc::new(MemoryTokenStore::new()));

        let dashboard = client.dashboard().await.unwrap();
        assert!(dashboard.user.is_none());
        assert_eq!(backend.auth_headers.lock().unwrap().clone(), vec![None]);
    }

    #[tokio::test]
    async fn test_deactivate_endpoints() {
        let (url, backend) = spawn_backend().await;
        let client = client(&url, Arc::new(MemoryTokenStore::with_token("t")));

        let ack = client.deactivate_user("u1").await.unwrap();
        assert_eq!(ack.msg, "User deactivated");
        assert_eq!(backend.deactivated.lock().unwrap().clone(), vec!["u1"]);

        let ack = client.deactivate_all_active_users().await.unwrap();
        assert!(ack.msg.is_empty());
    }

    #[tokio::test]
    async fn test_weekly_report_bytes() {
        let (url, _backend) = spawn_backend().await;
        let client = client(&url, Arc::new(MemoryTokenStore::with_token("t")));

        let bytes = client.weekly_report().await.unwrap();
        assert_eq!(bytes, vec![0x50, 0x4b, 0x03, 0x04]);
    }

    #[tokio::test]
    async fn test_register_validation_errors() {
        let (url, _backend) = spawn_backend().await;
        let client = client(&url, Arc::new(MemoryTokenStore::new()));

        let mut request = RegisterRequest {
            first_name: "Ada".to_string(),
            middle_name: None,
            last_name: "Lovelace".to_string(),
            username: "ada".to_string(),
            password: "Secret123".to_string(),
            confirm_password: "Secret123".to_string(),
        };
        assert_eq!(
            client.register(&request).await.unwrap().msg,
            "Registration successful"
        );

        request.username = "taken".to_string();
        let err = client.register(&request).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Validation(vec![FieldError {
                msg: "Username already exists".to_string(),
                path: Some("username".to_string()),
            }])
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client(
            &format!("http://{}/api/admin", addr),
            Arc::new(MemoryTokenStore::new()),
        );
        let err = client.dashboard().await.unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_unknown_route_is_status_error() {
        let (url, _backend) = spawn_backend().await;
        let client = client(&format!("{}missing/", url), Arc::new(MemoryTokenStore::new()));

        match client.dashboard().await {
            Err(ApiError::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
