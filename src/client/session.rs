use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::{
    auth::{AuthResponse, LoginRequest, RegisterRequest},
    client::Category,
    expenses::{CreateExpenseRequest, Expense, ExpenseListResponse, MessageResponse},
};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the request; the message is surfaced verbatim.
    #[error("{message}")]
    Api { status: StatusCode, message: String },
    /// An expense call was made with no session token held.
    #[error("not logged in")]
    NotLoggedIn,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Explicit session context for the expense API. Created once on startup,
/// it holds the signed token between login and logout and attaches it to
/// every expense call.
pub struct Session {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl Session {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Drops the held token. The token itself stays valid until expiry;
    /// the server keeps no session state to tear down.
    pub fn logout(&mut self) {
        self.token = None;
    }

    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ClientError> {
        let resp = self
            .http
            .post(format!("{}/api/auth/register", self.base_url))
            .json(&RegisterRequest {
                username: username.into(),
                email: email.into(),
                password: password.into(),
            })
            .send()
            .await?;
        let auth: AuthResponse = Self::read_body(resp).await?;
        debug!(user_id = %auth.id, "registered");
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let resp = self
            .http
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&LoginRequest {
                email: email.into(),
                password: password.into(),
            })
            .send()
            .await?;
        let auth: AuthResponse = Self::read_body(resp).await?;
        debug!(user_id = %auth.id, "logged in");
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    pub async fn add_expense(
        &self,
        amount: f64,
        category: Category,
        description: Option<&str>,
    ) -> Result<Expense, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotLoggedIn)?;
        let resp = self
            .http
            .post(format!("{}/api/expenses", self.base_url))
            .bearer_auth(token)
            .json(&CreateExpenseRequest {
                description: description.map(str::to_string),
                amount: Some(amount),
                category: Some(category.as_str().to_string()),
            })
            .send()
            .await?;
        Self::read_body(resp).await
    }

    pub async fn expenses(&self, page: i64, limit: i64) -> Result<ExpenseListResponse, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotLoggedIn)?;
        let resp = self
            .http
            .get(format!(
                "{}/api/expenses?page={}&limit={}",
                self.base_url, page, limit
            ))
            .bearer_auth(token)
            .send()
            .await?;
        Self::read_body(resp).await
    }

    pub async fn delete_expense(&self, id: Uuid) -> Result<MessageResponse, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotLoggedIn)?;
        let resp = self
            .http
            .delete(format!("{}/api/expenses/{}", self.base_url, id))
            .bearer_auth(token)
            .send()
            .await?;
        Self::read_body(resp).await
    }

    /// Decodes a success body, or turns an error response into the server's
    /// `{"message": ...}` text with a generic fallback.
    async fn read_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }
        let message = resp
            .json::<MessageResponse>()
            .await
            .map(|b| b.message)
            .unwrap_or_else(|_| "Something went wrong".to_string());
        Err(ClientError::Api { status, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_holds_no_token() {
        let session = Session::new("http://localhost:8080/");
        assert!(!session.is_authenticated());
        assert_eq!(session.base_url, "http://localhost:8080");
    }

    #[test]
    fn logout_clears_the_token() {
        let mut session = Session::new("http://localhost:8080");
        session.token = Some("tok".into());
        assert!(session.is_authenticated());
        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[tokio::test]
    async fn expense_calls_fail_fast_without_a_token() {
        let session = Session::new("http://localhost:8080");
        let err = session.expenses(1, 10).await.unwrap_err();
        assert!(matches!(err, ClientError::NotLoggedIn));
        let err = session.delete_expense(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ClientError::NotLoggedIn));
    }

    #[test]
    fn api_error_displays_the_server_message() {
        let err = ClientError::Api {
            status: StatusCode::UNAUTHORIZED,
            message: "Invalid credentials".into(),
        };
        assert_eq!(err.to_string(), "Invalid credentials");
    }
}
