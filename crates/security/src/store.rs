//! Token store
//!
//! Tokens are looked up by the hex SHA-256 digest of their secret. The whole
//! store is rewritten as JSON after every mutation: written to a sibling
//! temp file first, then renamed over the previous copy.

use crate::permission::Permission;
use crate::token::Token;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from token store operations
#[derive(Debug, Error)]
pub enum TokenError {
    /// Reading or writing the store file failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The store file is not valid JSON
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No token matches the given secret
    #[error("unknown token")]
    UnknownToken,
}

impl From<TokenError> for tailbus_core::Error {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Io(io_err) => tailbus_core::Error::Io(io_err),
            TokenError::Serialization(json_err) => {
                tailbus_core::Error::Io(io::Error::new(io::ErrorKind::InvalidData, json_err))
            }
            TokenError::UnknownToken => tailbus_core::Error::PermissionDenied("unknown token".into()),
        }
    }
}

/// Persistent set of tokens
pub struct TokenStore {
    path: PathBuf,
    tokens: Mutex<HashMap<String, Token>>,
}

/// Hex SHA-256 digest of a secret
pub fn hash_secret(secret: &str) -> String {
    format!("{:x}", Sha256::digest(secret.as_bytes()))
}

impl TokenStore {
    /// Open the store at `path`, loading it if the file exists
    ///
    /// A missing file yields an empty store; nothing is written until the
    /// first mutation.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TokenError> {
        let path = path.as_ref().to_path_buf();
        let tokens = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("Opened token store {} ({} tokens)", path.display(), tokens.len());
        Ok(Self {
            path,
            tokens: Mutex::new(tokens),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored tokens
    pub fn len(&self) -> usize {
        self.tokens.lock().len()
    }

    /// Check if the store holds no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.lock().is_empty()
    }

    /// Issue the first admin token
    ///
    /// Returns `None` if the store already holds tokens.
    pub fn init_admin(&self) -> Result<Option<Token>, TokenError> {
        if !self.is_empty() {
            return Ok(None);
        }
        let token = self.issue(Permission::ADMIN, Vec::new())?;
        info!("Initialized token store {} with an admin token", self.path.display());
        Ok(Some(token))
    }

    /// Issue a new token and persist it
    pub fn issue(&self, permission: Permission, topics: Vec<String>) -> Result<Token, TokenError> {
        let token = Token::generate(permission, topics);
        let mut tokens = self.tokens.lock();
        tokens.insert(hash_secret(&token.secret), token.clone());
        self.save(&tokens)?;
        Ok(token)
    }

    /// Find the token holding `secret`
    pub fn lookup(&self, secret: &str) -> Option<Token> {
        self.tokens.lock().get(&hash_secret(secret)).cloned()
    }

    /// Revoke the token holding `secret`; returns whether one existed
    pub fn revoke(&self, secret: &str) -> Result<bool, TokenError> {
        let mut tokens = self.tokens.lock();
        let removed = tokens.remove(&hash_secret(secret)).is_some();
        if removed {
            self.save(&tokens)?;
        }
        Ok(removed)
    }

    /// Subscribe the token holding `secret` to `topic`
    pub fn subscribe(&self, secret: &str, topic: &str) -> Result<Token, TokenError> {
        let mut tokens = self.tokens.lock();
        let token = tokens
            .get_mut(&hash_secret(secret))
            .ok_or(TokenError::UnknownToken)?;
        let changed = token.subscribe(topic);
        let token = token.clone();
        if changed {
            self.save(&tokens)?;
        }
        Ok(token)
    }

    fn save(&self, tokens: &HashMap<String, Token>) -> Result<(), TokenError> {
        let json = serde_json::to_vec_pretty(tokens)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
