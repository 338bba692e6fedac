//! Session and authorization for the console
//!
//! The session is an explicit, read-only context handed to every backend
//! call. Screens check an [`AccessPolicy`] against it before talking to the
//! backend.

use crate::core::error::{ConsoleError, ConsoleResult, RequestError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

/// Role name granting administrative access
pub const ADMIN_ROLE: &str = "admin";

/// The authenticated user behind a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token sent with every backend request
    pub token: String,
    /// Absent for anonymous sessions
    pub user: Option<SessionUser>,
}

impl Session {
    /// Create an authenticated session
    pub fn new(token: impl Into<String>, user: SessionUser) -> Self {
        Self {
            token: token.into(),
            user: Some(user),
        }
    }

    /// Session with no identity (public screens only)
    pub fn anonymous() -> Self {
        Self {
            token: String::new(),
            user: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && !self.token.is_empty()
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user.as_ref().map(|u| u.id)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.roles.iter().any(|r| r == role))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }
}

/// Authorization policy for a screen
#[derive(Debug, Clone)]
pub enum AccessPolicy {
    /// Public access (no auth required)
    Public,

    /// Any authenticated user
    Authenticated,

    /// User must have one of these roles
    HasRole(Vec<String>),

    /// Admin only
    AdminOnly,

    /// Combination of policies (AND)
    And(Vec<AccessPolicy>),

    /// Combination of policies (OR)
    Or(Vec<AccessPolicy>),
}

impl AccessPolicy {
    /// Check if the session satisfies this policy
    pub fn check(&self, session: &Session) -> bool {
        match self {
            AccessPolicy::Public => true,

            AccessPolicy::Authenticated => session.is_authenticated(),

            AccessPolicy::HasRole(required_roles) => {
                session.is_authenticated() && required_roles.iter().any(|r| session.has_role(r))
            }

            AccessPolicy::AdminOnly => session.is_authenticated() && session.is_admin(),

            AccessPolicy::And(policies) => policies.iter().all(|p| p.check(session)),

            AccessPolicy::Or(policies) => policies.iter().any(|p| p.check(session)),
        }
    }

    /// Check the policy, turning a refusal into a typed error
    pub fn authorize(&self, session: &Session, action: &str) -> ConsoleResult<()> {
        if self.check(session) {
            return Ok(());
        }
        if !session.is_authenticated() {
            return Err(RequestError::Unauthorized {
                message: format!("sign-in required to {}", action),
            }
            .into());
        }
        Err(RequestError::Forbidden {
            message: format!("not allowed to {}", action),
        }
        .into())
    }

    /// Parse policy from string (for YAML config)
    pub fn parse_policy(s: &str) -> Self {
        match s {
            "public" => AccessPolicy::Public,
            "authenticated" => AccessPolicy::Authenticated,
            "admin_only" => AccessPolicy::AdminOnly,
            s if s.starts_with("role:") => {
                let roles = s["role:".len()..]
                    .split(',')
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
                    .collect();
                AccessPolicy::HasRole(roles)
            }
            s if s.starts_with("admin_or_role:") => {
                let role = s["admin_or_role:".len()..].trim().to_string();
                AccessPolicy::Or(vec![AccessPolicy::AdminOnly, AccessPolicy::HasRole(vec![role])])
            }
            _ => AccessPolicy::Authenticated, // Default
        }
    }
}

/// Login form payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Trait for authentication providers
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Exchange credentials for a session
    async fn login(&self, credentials: &Credentials) -> ConsoleResult<Session>;

    /// Invalidate a session
    async fn logout(&self, session: &Session) -> ConsoleResult<()>;
}

/// In-memory authenticator for tests and demos
pub struct InMemoryAuthenticator {
    accounts: HashMap<String, (String, SessionUser)>,
    issued: RwLock<Vec<String>>,
}

impl InMemoryAuthenticator {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            issued: RwLock::new(Vec::new()),
        }
    }

    /// Register an account
    pub fn with_account(
        mut self,
        username: &str,
        password: &str,
        roles: &[&str],
    ) -> Self {
        let user = SessionUser {
            id: Uuid::new_v4(),
            username: username.to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        };
        self.accounts
            .insert(username.to_string(), (password.to_string(), user));
        self
    }

    /// Whether a token is currently valid
    pub fn is_active_token(&self, token: &str) -> bool {
        self.issued
            .read()
            .map(|issued| issued.iter().any(|t| t == token))
            .unwrap_or(false)
    }
}

impl Default for InMemoryAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Authenticator for InMemoryAuthenticator {
    async fn login(&self, credentials: &Credentials) -> ConsoleResult<Session> {
        credentials.validate()?;

        let Some((password, user)) = self.accounts.get(&credentials.username) else {
            tracing::warn!(username = %credentials.username, "login rejected: unknown user");
            return Err(RequestError::Unauthorized {
                message: "invalid username or password".to_string(),
            }
            .into());
        };
        if password != &credentials.password {
            tracing::warn!(username = %credentials.username, "login rejected: bad password");
            return Err(RequestError::Unauthorized {
                message: "invalid username or password".to_string(),
            }
            .into());
        }

        let token = Uuid::new_v4().simple().to_string();
        self.issued
            .write()
            .map_err(|e| ConsoleError::Internal(format!("Failed to acquire write lock: {}", e)))?
            .push(token.clone());

        tracing::info!(username = %user.username, "user signed in");
        Ok(Session::new(token, user.clone()))
    }

    async fn logout(&self, session: &Session) -> ConsoleResult<()> {
        self.issued
            .write()
            .map_err(|e| ConsoleError::Internal(format!("Failed to acquire write lock: {}", e)))?
            .retain(|t| t != &session.token);
        Ok(())
    }
}

/// Authenticator posting credentials to the backend's `/auth/login`
#[cfg(feature = "http")]
pub struct HttpAuthenticator {
    client: reqwest::Client,
    base_url: String,
}

#[cfg(feature = "http")]
impl HttpAuthenticator {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Authenticator for HttpAuthenticator {
    async fn login(&self, credentials: &Credentials) -> ConsoleResult<Session> {
        credentials.validate()?;

        let url = format!("{}/auth/login", self.base_url);
        let response = self.client.post(&url).json(credentials).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(RequestError::Unauthorized {
                message: "invalid username or password".to_string(),
            }
            .into());
        }
        if !status.is_success() {
            return Err(RequestError::Status {
                method: "POST".to_string(),
                path: "/auth/login".to_string(),
                status: status.as_u16(),
            }
            .into());
        }
        Ok(response.json::<Session>().await?)
    }

    async fn logout(&self, session: &Session) -> ConsoleResult<()> {
        let url = format!("{}/auth/logout", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&session.token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(RequestError::Status {
                method: "POST".to_string(),
                path: "/auth/logout".to_string(),
                status: response.status().as_u16(),
            }
            .into());
        }
        Ok(())
    }
}
