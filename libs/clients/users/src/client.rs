use axum_helpers::ErrorResponse;
use domain_users::{CreateUser, MessageResponse, UpdateUser, User};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::loading::LoadingTracker;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid form: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::Validation(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT.as_u16())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Typed client for the `/users` API.
///
/// Every call is reported to the shared [`LoadingTracker`].
#[derive(Debug, Clone)]
pub struct UsersClient {
    http: Client,
    base_url: String,
    loading: Arc<LoadingTracker>,
}

impl UsersClient {
    /// API root used by local development setups.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8080/api";

    /// `base_url` is the API root, e.g. `http://localhost:8080/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_loading(base_url, Arc::new(LoadingTracker::new()))
    }

    pub fn with_loading(base_url: impl Into<String>, loading: Arc<LoadingTracker>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            loading,
        }
    }

    pub fn loading(&self) -> &Arc<LoadingTracker> {
        &self.loading
    }

    fn url(&self, path: &str) -> String {
        format!("{}/users{}", self.base_url, path)
    }

    pub async fn list_users(&self) -> ClientResult<Vec<User>> {
        self.send(self.http.get(self.url("")), "Loading users...")
            .await
    }

    pub async fn get_user(&self, id: i32) -> ClientResult<User> {
        self.send(
            self.http.get(self.url(&format!("/{}", id))),
            "Loading user details...",
        )
        .await
    }

    pub async fn create_user(&self, user: &CreateUser) -> ClientResult<User> {
        self.send(self.http.post(self.url("")).json(user), "Creating user...")
            .await
    }

    pub async fn update_user(&self, id: i32, user: &UpdateUser) -> ClientResult<User> {
        self.send(
            self.http.patch(self.url(&format!("/{}", id))).json(user),
            "Updating user...",
        )
        .await
    }

    pub async fn delete_user(&self, id: i32) -> ClientResult<()> {
        let _: MessageResponse = self
            .send(
                self.http.delete(self.url(&format!("/{}", id))),
                "Deleting user...",
            )
            .await?;
        Ok(())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        message: &str,
    ) -> ClientResult<T> {
        let _loading = self.loading.begin(message);
        let response = request.send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    // Fall back to the reason phrase when the body is not an ErrorResponse.
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };
    debug!(status = status.as_u16(), %message, "API request failed");

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
