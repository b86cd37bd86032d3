use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;
use tokio::sync::RwLock;

use crate::core::error::{self, Error};
use crate::token::{TokenIssuer, UserIdentity};
use crate::types::{User, Username};

/// Checked against when the username is unknown, so a failed login costs the
/// same whether or not the account exists.
const DUMMY_PASSWORD: &str = "not-a-real-password";

#[derive(Debug, Default)]
struct Registry {
    next_id: u32,
    users: HashMap<Username, User>,
}

/// In-memory user registry. Users live for the lifetime of the process.
#[derive(Clone)]
pub(crate) struct UserController {
    registry: Arc<RwLock<Registry>>,
    issuer: TokenIssuer,
    username_pattern: Regex,
    hash_cost: u32,
    dummy_hash: Arc<str>,
}

impl std::fmt::Debug for UserController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserController")
            .field("username_pattern", &self.username_pattern.as_str())
            .field("hash_cost", &self.hash_cost)
            .finish()
    }
}

impl UserController {
    pub(crate) fn new(issuer: TokenIssuer, hash_cost: u32) -> Result<Self, error::ConfigError> {
        Ok(Self {
            registry: Arc::new(RwLock::new(Registry::default())),
            issuer,
            username_pattern: Regex::new(r"^[a-zA-Z0-9_-]{3,20}$")?,
            hash_cost,
            dummy_hash: Arc::from(bcrypt::hash(DUMMY_PASSWORD, hash_cost)?),
        })
    }

    pub(crate) async fn register(
        &self,
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<User, Error> {
        if !self.username_pattern.is_match(username) {
            return Err(Error::InvalidUsername);
        }

        if password.len() < 8 {
            return Err(Error::InvalidPassword(
                "Password must be at least 8 characters".to_owned(),
            ));
        }

        if role.trim().is_empty() {
            return Err(Error::InvalidRole);
        }

        let password_hash = self.hash(password).await?;

        let mut registry = self.registry.write().await;

        if registry.users.contains_key(username) {
            return Err(Error::UserAlreadyExists);
        }

        registry.next_id += 1;

        let user = User {
            id: registry.next_id,
            username: username.into(),
            password_hash,
            role: role.into(),
        };

        registry.users.insert(user.username.clone(), user.clone());

        tracing::info!(username = %user.username, role = %user.role, "registered user");

        Ok(user)
    }

    pub(crate) async fn login(&self, username: &str, password: &str) -> Result<(User, String), Error> {
        let user = self.get_user_by_username(username).await;

        let password_hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash.to_string(),
        };

        let user = match (user, self.verify(password, password_hash).await?) {
            (Some(user), true) => user,
            _ => return Err(Error::Unauthorized),
        };

        let token = self.issue_token(&user)?;

        Ok((user, token))
    }

    pub(crate) async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.registry.read().await.users.get(username).cloned()
    }

    pub(crate) async fn list(&self) -> Vec<User> {
        let mut users: Vec<User> = self.registry.read().await.users.values().cloned().collect();
        users.sort_by_key(|user| user.id);
        users
    }

    pub(crate) async fn set_role(&self, id: u32, role: &str) -> Result<User, Error> {
        if role.trim().is_empty() {
            return Err(Error::InvalidRole);
        }

        let mut registry = self.registry.write().await;

        let user = registry
            .users
            .values_mut()
            .find(|user| user.id == id)
            .ok_or(Error::UserNotFound)?;

        user.role = role.into();

        tracing::info!(username = %user.username, role = %user.role, "changed user role");

        Ok(user.clone())
    }

    fn issue_token(&self, user: &User) -> Result<String, Error> {
        let identity = UserIdentity::new(user.username.as_str(), user.role.as_str())?;
        self.issuer.issue(&identity)
    }

    async fn hash(&self, value: &str) -> Result<String, Error> {
        let value = value.to_owned();
        let cost = self.hash_cost;

        Ok(tokio::task::spawn_blocking(move || bcrypt::hash(value, cost)).await??)
    }

    async fn verify(&self, password: &str, hash: String) -> Result<bool, Error> {
        let password = password.to_owned();

        Ok(tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??)
    }
}
