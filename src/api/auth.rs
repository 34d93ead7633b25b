// Authentication calls: register, login, profile.

use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::ApiClient;

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// User summary returned alongside a token by register and login.
#[derive(Debug, Deserialize)]
pub struct UserSummary {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

/// Claims of the currently stored token.
#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub email: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl ApiClient {
    /// Register a new account. On success the returned token is persisted
    /// and adopted for the rest of this process.
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let body = RegisterRequest {
            name,
            email,
            password,
        };
        let resp = self.request(Method::POST, "/auth/register", Some(&body), false)?;
        let auth: AuthResponse = resp.json()?;

        self.adopt_token(&auth.token)?;
        Ok(auth)
    }

    /// Login with an existing account. Persists the token like
    /// [`ApiClient::register`].
    pub fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse> {
        let body = LoginRequest { email, password };
        let resp = self.request(Method::POST, "/auth/login", Some(&body), false)?;
        let auth: AuthResponse = resp.json()?;

        self.adopt_token(&auth.token)?;
        Ok(auth)
    }

    pub fn profile(&mut self) -> Result<ProfileResponse> {
        let resp = self.get("/auth/profile")?;
        resp.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_decodes() {
        let json = r#"{
            "token": "jwt-token",
            "user": {
                "user_id": "u-1",
                "name": "Ada",
                "email": "ada@example.com",
                "created_at": "2024-05-01T12:00:00Z"
            }
        }"#;
        let auth: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(auth.token, "jwt-token");
        assert_eq!(auth.user.user_id, "u-1");
        assert!(auth.user.created_at.is_some());
    }

    #[test]
    fn null_timestamp_decodes_as_none() {
        let json = r#"{
            "user_id": "u-1",
            "name": "Ada",
            "email": "ada@example.com",
            "created_at": null
        }"#;
        let user: UserSummary = serde_json::from_str(json).unwrap();
        assert!(user.created_at.is_none());
    }

    #[test]
    fn register_request_shape() {
        let body = RegisterRequest {
            name: "Ada",
            email: "ada@example.com",
            password: "hunter22",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "hunter22"
            })
        );
    }
}
