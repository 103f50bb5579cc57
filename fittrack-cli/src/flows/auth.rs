use anyhow::{Context, Result};

use crate::api::ApiClient;
use crate::models::{LoginRequest, RegisterRequest, TokenResponse};
use crate::routing::Route;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    SignedIn,
    /// The server answered without a token; nothing was stored
    NoToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    SignedIn,
    /// Account created but no session issued; the user has to log in
    LoginRequired,
}

/// Store the issued token and go to the dashboard. Returns whether a token
/// was present.
fn accept_token(client: &ApiClient, response: &TokenResponse) -> Result<bool> {
    let Some(token) = response.token() else {
        return Ok(false);
    };

    client
        .tokens()
        .set(token)
        .context("Failed to store session token")?;
    client.navigator().navigate(Route::Dashboard);
    Ok(true)
}

pub async fn login(client: &ApiClient, form: &LoginForm) -> Result<LoginOutcome> {
    let request = LoginRequest {
        email: form.email.clone(),
        password: form.password.clone(),
    };

    let response = client.login(&request).await?;

    if accept_token(client, &response)? {
        tracing::info!("Logged in as {}", form.email);
        Ok(LoginOutcome::SignedIn)
    } else {
        tracing::warn!("Login for {} returned no token", form.email);
        Ok(LoginOutcome::NoToken)
    }
}

pub async fn register(client: &ApiClient, form: &RegisterForm) -> Result<RegisterOutcome> {
    let request = RegisterRequest {
        email: form.email.clone(),
        password: form.password.clone(),
        username: form.username.clone(),
    };

    let response = client.register(&request).await?;

    if accept_token(client, &response)? {
        tracing::info!("Registered and signed in as {}", form.email);
        Ok(RegisterOutcome::SignedIn)
    } else {
        tracing::info!("Registered {}, login required", form.email);
        Ok(RegisterOutcome::LoginRequired)
    }
}

/// Forget the session and go back to the login view
pub fn logout(client: &ApiClient) -> Result<()> {
    client.tokens().remove()?;
    client.navigator().navigate(Route::Login);
    tracing::info!("Logged out");
    Ok(())
}
