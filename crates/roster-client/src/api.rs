//! HTTP client for the `/user` API.

use async_trait::async_trait;
use reqwest::{Client, Response};
use roster_core::{ApiResponse, NewUser, RosterError, RosterResult, User, UserId};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default API location, matching the server's default port.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/user";

/// A successful reply: the payload plus the server's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply<T> {
    pub value: T,
    pub message: String,
}

/// The five calls the console issues.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserApi: Send + Sync {
    /// `GET /user`
    async fn list(&self) -> RosterResult<Reply<Vec<User>>>;

    /// `GET /user/:id`
    async fn get(&self, id: UserId) -> RosterResult<Reply<User>>;

    /// `POST /user`
    async fn create(&self, user: &NewUser) -> RosterResult<Reply<()>>;

    /// `PATCH /user/:id` with the whole edited record.
    async fn update(&self, user: &User) -> RosterResult<Reply<User>>;

    /// `DELETE /user/:id`
    async fn delete(&self, id: UserId) -> RosterResult<Reply<()>>;
}

/// reqwest-backed [`UserApi`].
#[derive(Debug, Clone)]
pub struct UserApiClient {
    client: Client,
    base_url: String,
}

impl UserApiClient {
    /// Creates a client for the API rooted at `base_url` (e.g. `http://host:3000/user`).
    pub fn new(base_url: &str) -> RosterResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RosterError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, base_url))
    }

    /// Creates a client around a preconfigured reqwest client.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, id: Option<UserId>) -> String {
        match id {
            Some(id) => format!("{}/{}", self.base_url, id),
            None => self.base_url.clone(),
        }
    }
}

#[async_trait]
impl UserApi for UserApiClient {
    async fn list(&self) -> RosterResult<Reply<Vec<User>>> {
        debug!("HTTP ListUsers");

        let response = self.client.get(self.url(None)).send().await.map_err(transport)?;
        let body: ApiResponse<Vec<User>> = handle_response(response).await?;
        payload(body.user, body.message, "user")
    }

    async fn get(&self, id: UserId) -> RosterResult<Reply<User>> {
        debug!("HTTP GetUser: {}", id);

        let response = self
            .client
            .get(self.url(Some(id)))
            .send()
            .await
            .map_err(transport)?;
        let body: ApiResponse<User> = handle_response(response).await?;
        payload(body.user, body.message, "user")
    }

    async fn create(&self, user: &NewUser) -> RosterResult<Reply<()>> {
        debug!("HTTP CreateUser: {}", user.email);

        let response = self
            .client
            .post(self.url(None))
            .json(user)
            .send()
            .await
            .map_err(transport)?;
        let body: ApiResponse<serde_json::Value> = handle_response(response).await?;
        Ok(Reply {
            value: (),
            message: body.message,
        })
    }

    async fn update(&self, user: &User) -> RosterResult<Reply<User>> {
        debug!("HTTP UpdateUser: {}", user.id);

        let response = self
            .client
            .patch(self.url(Some(user.id)))
            .json(user)
            .send()
            .await
            .map_err(transport)?;
        let body: ApiResponse<User> = handle_response(response).await?;
        payload(body.data, body.message, "data")
    }

    async fn delete(&self, id: UserId) -> RosterResult<Reply<()>> {
        debug!("HTTP DeleteUser: {}", id);

        let response = self
            .client
            .delete(self.url(Some(id)))
            .send()
            .await
            .map_err(transport)?;
        let body: ApiResponse<serde_json::Value> = handle_response(response).await?;
        Ok(Reply {
            value: (),
            message: body.message,
        })
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> RosterResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(map_http_error(status.as_u16(), &body));
    }

    response
        .json()
        .await
        .map_err(|e| RosterError::Transport(format!("JSON parse error: {}", e)))
}

/// Non-2xx responses keep their status and, when present, the envelope message.
fn map_http_error(status: u16, body: &str) -> RosterError {
    let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
        .map(|envelope| envelope.message)
        .unwrap_or_else(|_| body.to_string());

    RosterError::Remote { status, message }
}

fn payload<T>(value: Option<T>, message: String, field: &str) -> RosterResult<Reply<T>> {
    value
        .map(|value| Reply { value, message })
        .ok_or_else(|| RosterError::Transport(format!("Response is missing `{}`", field)))
}

fn transport(err: reqwest::Error) -> RosterError {
    RosterError::Transport(err.to_string())
}
