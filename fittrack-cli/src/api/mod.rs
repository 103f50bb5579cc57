use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::config::Config;
use crate::models::{
    AnalysisResponse, Exercise, LoginRequest, NewWorkout, Profile, RegisterRequest,
    StatsSnapshot, TokenResponse, WorkoutEntry,
};
use crate::routing::{Navigator, Route};
use crate::storage::TokenStore;

mod error;

pub use error::{ApiError, FALLBACK_MESSAGE};

/// API client for communicating with the FitTrack backend
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
            navigator,
        })
    }

    /// Create a client pointed at the configured backend
    pub fn from_config(
        config: &Config,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        Self::new(config.api.base_url.clone(), tokens, navigator)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }

    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    /// Issue a request and return the parsed JSON body as-is.
    ///
    /// A 401 clears the stored token and navigates to the login route before
    /// failing with [`ApiError::SessionExpired`]. Other non-success statuses
    /// fail with the server's `detail` message.
    pub async fn request_json<B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);

        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = self.tokens.get() {
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("{} {} failed: {}", method, endpoint, e);
            ApiError::Network(e)
        })?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("{} {} returned 401, clearing session", method, endpoint);
            if let Err(e) = self.tokens.remove() {
                tracing::warn!("Failed to clear stored token: {:#}", e);
            }
            self.navigator.navigate(Route::Login);
            return Err(ApiError::SessionExpired);
        }

        let bytes = response.bytes().await?;
        let parsed = if bytes.is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_slice::<Value>(&bytes)
        };

        if !status.is_success() {
            let error = ApiError::from_status(status, parsed.as_ref().ok());
            tracing::debug!("{} {} returned {}: {}", method, endpoint, status, error);
            return Err(error);
        }

        parsed.map_err(|e| {
            tracing::warn!("{} {} returned an unreadable body: {}", method, endpoint, e);
            ApiError::Decode(e)
        })
    }

    /// Issue a request and deserialize the JSON body
    pub async fn request<B, T>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = self.request_json(method, endpoint, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request::<Value, T>(Method::GET, endpoint, None).await
    }

    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, endpoint, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request::<Value, T>(Method::DELETE, endpoint, None).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        tracing::debug!("Logging in as {}", request.email);
        self.post("/api/auth/login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<TokenResponse, ApiError> {
        tracing::debug!("Registering {}", request.email);
        self.post("/api/auth/register", request).await
    }

    pub async fn profile(&self) -> Result<Profile, ApiError> {
        self.get("/api/profile").await
    }

    pub async fn exercises(&self) -> Result<Vec<Exercise>, ApiError> {
        self.get("/api/exercises").await
    }

    /// Workout history, newest first
    pub async fn workout_history(&self) -> Result<Vec<WorkoutEntry>, ApiError> {
        self.get("/api/workouts/history").await
    }

    pub async fn create_workout(&self, workout: &NewWorkout) -> Result<Value, ApiError> {
        self.post("/api/workouts", workout).await
    }

    pub async fn delete_workout(&self, id: &str) -> Result<Value, ApiError> {
        self.delete(&format!("/api/workouts/{}", id)).await
    }

    pub async fn stats(&self) -> Result<StatsSnapshot, ApiError> {
        self.get("/api/stats").await
    }

    pub async fn ai_analysis(&self) -> Result<AnalysisResponse, ApiError> {
        self.get("/api/ai/analysis").await
    }
}
