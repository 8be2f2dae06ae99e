//! REST API client for the upstream ESCOtech API.
//!
//! One async function per resource operation. Every successful body is
//! unwrapped through [`ApiEnvelope`]; every non-2xx status becomes
//! [`AppError::Api`] carrying the server's message or a per-operation default.

mod multipart;

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::errors::AppError;
use crate::models::{
    ApiEnvelope, ContactRequest, Credentials, ErrorBody, Id, LoginPayload, LoginResponse, Message,
    Project, ProjectDraft, ReadStatusUpdate, Service, ServiceDraft, TeamDraft, TeamMember, User,
};
use crate::session::AuthToken;

/// HTTP client for the upstream REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    api_url: String,
}

impl ApiClient {
    /// Create a client for the API rooted at `api_url` (e.g. `http://host:5000/api`).
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    // ==================== PUBLIC ====================

    /// GET /projects
    pub async fn fetch_projects(&self) -> Result<Vec<Project>, AppError> {
        let request = self.client.get(self.url("/projects"));
        Self::send(request, "Failed to fetch projects").await
    }

    /// GET /projects/{id}
    pub async fn fetch_project(&self, id: Id) -> Result<Project, AppError> {
        let request = self.client.get(self.url(&format!("/projects/{}", id)));
        Self::send(request, "Failed to fetch project").await
    }

    /// GET /team
    pub async fn fetch_team_members(&self) -> Result<Vec<TeamMember>, AppError> {
        let request = self.client.get(self.url("/team"));
        Self::send(request, "Failed to fetch team members").await
    }

    /// GET /services
    pub async fn fetch_services(&self) -> Result<Vec<Service>, AppError> {
        let request = self.client.get(self.url("/services"));
        Self::send(request, "Failed to fetch services").await
    }

    /// POST /contact
    pub async fn submit_contact_form(&self, form: &ContactRequest) -> Result<(), AppError> {
        let request = self.client.post(self.url("/contact")).json(form);
        Self::send_empty(request, "Failed to send message. Please try again.").await
    }

    // ==================== AUTH ====================

    /// POST /auth/login
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AppError> {
        let request = self.client.post(self.url("/auth/login")).json(credentials);
        let payload: LoginPayload = Self::send(request, "Login failed").await?;
        Ok(payload.into())
    }

    /// GET /auth/me
    pub async fn me(&self, token: &AuthToken) -> Result<User, AppError> {
        let request = self
            .client
            .get(self.url("/auth/me"))
            .bearer_auth(token.as_str());
        Self::send(request, "Failed to get user").await
    }

    // ==================== MESSAGES ====================

    /// GET /messages
    pub async fn fetch_messages(&self, token: &AuthToken) -> Result<Vec<Message>, AppError> {
        let request = self
            .client
            .get(self.url("/messages"))
            .bearer_auth(token.as_str());
        Self::send(request, "Failed to fetch messages").await
    }

    /// GET /messages/{id}
    pub async fn fetch_message(&self, token: &AuthToken, id: Id) -> Result<Message, AppError> {
        let request = self
            .client
            .get(self.url(&format!("/messages/{}", id)))
            .bearer_auth(token.as_str());
        Self::send(request, "Failed to fetch message").await
    }

    /// PATCH /messages/{id}
    pub async fn update_message_read_status(
        &self,
        token: &AuthToken,
        id: Id,
        is_read: bool,
    ) -> Result<Message, AppError> {
        let request = self
            .client
            .patch(self.url(&format!("/messages/{}", id)))
            .bearer_auth(token.as_str())
            .json(&ReadStatusUpdate { is_read });
        Self::send(request, "Failed to update message").await
    }

    /// DELETE /messages/{id}
    pub async fn delete_message(&self, token: &AuthToken, id: Id) -> Result<(), AppError> {
        let request = self
            .client
            .delete(self.url(&format!("/messages/{}", id)))
            .bearer_auth(token.as_str());
        Self::send_empty(request, "Failed to delete message").await
    }

    // ==================== PROJECTS ====================

    /// POST /projects (multipart)
    pub async fn create_project(
        &self,
        token: &AuthToken,
        draft: &ProjectDraft,
    ) -> Result<Project, AppError> {
        let request = self
            .client
            .post(self.url("/projects"))
            .bearer_auth(token.as_str())
            .multipart(multipart::project_form(draft)?);
        Self::send(request, "Failed to create project").await
    }

    /// PUT /projects/{id} (multipart)
    pub async fn update_project(
        &self,
        token: &AuthToken,
        id: Id,
        draft: &ProjectDraft,
    ) -> Result<Project, AppError> {
        let request = self
            .client
            .put(self.url(&format!("/projects/{}", id)))
            .bearer_auth(token.as_str())
            .multipart(multipart::project_form(draft)?);
        Self::send(request, "Failed to update project").await
    }

    /// DELETE /projects/{id}
    pub async fn delete_project(&self, token: &AuthToken, id: Id) -> Result<(), AppError> {
        let request = self
            .client
            .delete(self.url(&format!("/projects/{}", id)))
            .bearer_auth(token.as_str());
        Self::send_empty(request, "Failed to delete project").await
    }

    // ==================== TEAM ====================

    /// POST /team (multipart)
    pub async fn create_team_member(
        &self,
        token: &AuthToken,
        draft: &TeamDraft,
    ) -> Result<TeamMember, AppError> {
        let request = self
            .client
            .post(self.url("/team"))
            .bearer_auth(token.as_str())
            .multipart(multipart::team_form(draft)?);
        Self::send(request, "Failed to create team member").await
    }

    /// PUT /team/{id} (multipart)
    pub async fn update_team_member(
        &self,
        token: &AuthToken,
        id: Id,
        draft: &TeamDraft,
    ) -> Result<TeamMember, AppError> {
        let request = self
            .client
            .put(self.url(&format!("/team/{}", id)))
            .bearer_auth(token.as_str())
            .multipart(multipart::team_form(draft)?);
        Self::send(request, "Failed to update team member").await
    }

    /// DELETE /team/{id}
    pub async fn delete_team_member(&self, token: &AuthToken, id: Id) -> Result<(), AppError> {
        let request = self
            .client
            .delete(self.url(&format!("/team/{}", id)))
            .bearer_auth(token.as_str());
        Self::send_empty(request, "Failed to delete team member").await
    }

    // ==================== SERVICES ====================

    /// POST /services
    pub async fn create_service(
        &self,
        token: &AuthToken,
        draft: &ServiceDraft,
    ) -> Result<Service, AppError> {
        let request = self
            .client
            .post(self.url("/services"))
            .bearer_auth(token.as_str())
            .json(draft);
        Self::send(request, "Failed to create service").await
    }

    /// PUT /services/{id}
    pub async fn update_service(
        &self,
        token: &AuthToken,
        id: Id,
        draft: &ServiceDraft,
    ) -> Result<Service, AppError> {
        let request = self
            .client
            .put(self.url(&format!("/services/{}", id)))
            .bearer_auth(token.as_str())
            .json(draft);
        Self::send(request, "Failed to update service").await
    }

    /// DELETE /services/{id}
    pub async fn delete_service(&self, token: &AuthToken, id: Id) -> Result<(), AppError> {
        let request = self
            .client
            .delete(self.url(&format!("/services/{}", id)))
            .bearer_auth(token.as_str());
        Self::send_empty(request, "Failed to delete service").await
    }

    // ---- private helpers ----

    /// Send the request and decode the enveloped payload.
    async fn send<T: DeserializeOwned>(
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<T, AppError> {
        let response = Self::ensure_success(request.send().await?, fallback).await?;
        let bytes = response.bytes().await?;
        let envelope: ApiEnvelope<T> = serde_json::from_slice(&bytes)?;
        if !envelope.succeeded() {
            return Err(AppError::Api {
                status: 200,
                message: envelope.message().unwrap_or(fallback).to_string(),
            });
        }
        Ok(envelope.into_data())
    }

    /// Send the request, discarding the body on success.
    async fn send_empty(request: RequestBuilder, fallback: &str) -> Result<(), AppError> {
        Self::ensure_success(request.send().await?, fallback).await?;
        Ok(())
    }

    /// Return the response unchanged on 2xx, otherwise an [`AppError::Api`]
    /// with the server's message or `fallback`.
    async fn ensure_success(response: Response, fallback: &str) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| fallback.to_string());

        tracing::debug!(status = status.as_u16(), %message, "Upstream request failed");
        Err(AppError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
