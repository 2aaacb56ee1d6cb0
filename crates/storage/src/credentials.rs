// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Demo credential store
//!
//! Plain JSON records with plain-text passwords, kept only so the demo
//! has register/login flows. Not production auth and never will be.

use crate::error::StorageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const USERS_FILE: &str = "users.json";
const SESSION_FILE: &str = "auth.json";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email already registered: {0}")]
    EmailTaken(String),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("not logged in")]
    NotLoggedIn,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A registered user as stored on disk, password included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
        }
    }
}

/// A user as exposed to callers, password stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// File-backed user accounts plus the current login.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    users_path: PathBuf,
    session_path: PathBuf,
}

impl CredentialStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            users_path: dir.join(USERS_FILE),
            session_path: dir.join(SESSION_FILE),
        })
    }

    /// Create an account and log it in. Fails when the email is taken.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<PublicUser, AuthError> {
        let mut users = self.load_users()?;
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::EmailTaken(email.to_string()));
        }
        let record = UserRecord {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        let user = record.public();
        users.push(record);
        self.save_users(&users)?;
        self.save_session(&user)?;
        Ok(user)
    }

    /// Log in with exact email and password match.
    pub fn login(&self, email: &str, password: &str) -> Result<PublicUser, AuthError> {
        let users = self.load_users()?;
        let record = users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .ok_or(AuthError::InvalidCredentials)?;
        let user = record.public();
        self.save_session(&user)?;
        Ok(user)
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        if self.session_path.exists() {
            fs::remove_file(&self.session_path).map_err(StorageError::from)?;
        }
        Ok(())
    }

    /// The persisted current login, if any.
    pub fn current_user(&self) -> Result<Option<PublicUser>, AuthError> {
        if !self.session_path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.session_path).map_err(StorageError::from)?;
        let user = serde_json::from_str(&json).map_err(StorageError::from)?;
        Ok(Some(user))
    }

    fn load_users(&self) -> Result<Vec<UserRecord>, StorageError> {
        if !self.users_path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&self.users_path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn save_users(&self, users: &[UserRecord]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(users)?;
        fs::write(&self.users_path, json)?;
        Ok(())
    }

    fn save_session(&self, user: &PublicUser) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(user)?;
        fs::write(&self.session_path, json)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;
