use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{Result, Session, normalize_roles};

#[derive(Validate, Serialize, Clone, Debug)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl LoginInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Body returned by `POST /auth/login`.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct LoginUser {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleClaim>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

/// The API sends `role` either as a single name or as a list.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(untagged)]
pub enum RoleClaim {
    One(String),
    Many(Vec<String>),
}

impl LoginResponse {
    pub fn into_session(self) -> Result<Session> {
        let LoginResponse { token, user } = self;

        let mut names = match user.role {
            Some(RoleClaim::One(name)) => vec![name],
            Some(RoleClaim::Many(names)) => names,
            None => vec![],
        };
        names.extend(user.roles.unwrap_or_default());

        let roles = normalize_roles(names);
        if roles.is_empty() {
            crate::authentication!("Account {} has no assigned role", user.email);
        }

        if token.trim().is_empty() {
            crate::authentication!("Login response did not include a token");
        }

        Ok(Session::new(user.email, roles, token))
    }
}

/// Credential check against the external authentication endpoint.
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, input: &LoginInput) -> Result<LoginResponse>;
}
