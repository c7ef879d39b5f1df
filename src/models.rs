use serde::{Deserialize, Serialize};

const MIN_PASSWORD_LENGTH: usize = 6;

/// Authenticated user, produced by a successful credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: u64,
    pub username: String,
}

#[derive(Clone)]
pub struct Credential {
    pub user_id: u64,
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut reasons = Vec::new();
        if self.username.is_empty() {
            reasons.push("username should not be empty".to_string());
        }
        if self.password.is_empty() {
            reasons.push("password should not be empty".to_string());
        }
        if reasons.is_empty() {
            Ok(())
        } else {
            Err(reasons)
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut reasons = Vec::new();
        if self.username.is_empty() {
            reasons.push("username should not be empty".to_string());
        }
        if self.password.is_empty() {
            reasons.push("password should not be empty".to_string());
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            reasons.push(format!(
                "password must be longer than or equal to {} characters",
                MIN_PASSWORD_LENGTH
            ));
        }
        if reasons.is_empty() {
            Ok(())
        } else {
            Err(reasons)
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Signed token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: u64,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: u64,
    pub username: String,
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

#[derive(Serialize, Deserialize)]
pub struct InfoResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub uptime: f64,
}
