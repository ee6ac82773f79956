use std::{cell::RefCell, fmt};

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

#[derive(Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Credentials {
    pub username: String,
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

// Shows up in dispatch logs, so the password is left out
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub token: String,
}

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    /// Value of the `Authorization` header carrying this token.
    pub fn header_value(&self) -> String {
        format!("Token {}", self.token)
    }
}

/// Durable storage for the auth token.
pub trait TokenStore {
    fn load(&self) -> Option<AuthToken>;
    fn save(&self, token: &AuthToken) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;

    fn is_logged_in(&self) -> bool {
        self.load().is_some()
    }

    /// `Authorization` header for outgoing requests, if a token is stored.
    fn authorization(&self) -> Option<String> {
        self.load().map(|token| token.header_value())
    }
}

/// Keeps the token in memory only. Lost on reload.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<AuthToken>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: AuthToken) -> Self {
        Self { token: RefCell::new(Some(token)) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<AuthToken> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &AuthToken) -> Result<(), StorageError> {
        *self.token.borrow_mut() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.token.borrow_mut().take();
        Ok(())
    }
}
