//! Access tokens and capability checks

use crate::permission::Permission;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Base32 alphabet used for generated secrets
const SECRET_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Length of generated secrets (130 bits of entropy)
const SECRET_LEN: usize = 26;

/// Broker operations subject to a capability check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Create a topic
    CreateTopic,
    /// Append events to a topic
    Write,
    /// Read events from a topic
    Read,
    /// List every known topic
    ListTopics,
    /// Subscribe a token to a topic
    Subscribe,
    /// Issue a token
    CreateToken,
    /// Revoke a token
    DeleteToken,
}

impl Operation {
    /// Permission bit the operation requires
    pub fn required(self) -> Permission {
        match self {
            Operation::CreateTopic => Permission::CREATE_TOPIC,
            Operation::Write => Permission::WRITE,
            Operation::Read => Permission::READ,
            Operation::ListTopics => Permission::ADMIN_FLAG,
            Operation::Subscribe => Permission::SUBSCRIBE,
            Operation::CreateToken => Permission::CREATE_TOKEN,
            Operation::DeleteToken => Permission::DELETE_TOKEN,
        }
    }

    /// Whether the token must also be subscribed to the target topic
    pub fn is_topic_scoped(self) -> bool {
        matches!(self, Operation::Write | Operation::Read)
    }
}

/// A bearer token: a secret plus what it may do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Bearer secret
    #[serde(rename = "token_key")]
    pub secret: String,
    /// Granted capabilities
    pub permission: Permission,
    /// Topics the token is subscribed to
    #[serde(rename = "subscriptions", default)]
    pub topics: Vec<String>,
}

impl Token {
    /// Create a token with a freshly generated secret
    pub fn generate(permission: Permission, topics: Vec<String>) -> Self {
        let mut rng = rand::thread_rng();
        let secret = (0..SECRET_LEN)
            .map(|_| SECRET_ALPHABET[rng.gen_range(0..SECRET_ALPHABET.len())] as char)
            .collect();
        Self {
            secret,
            permission,
            topics,
        }
    }

    /// Check if the token holds any bit of `permission`
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permission.intersects(permission)
    }

    /// Check if the token may touch `topic`
    ///
    /// Tokens carrying the admin flag are subscribed to every topic.
    pub fn is_subscribed(&self, topic: &str) -> bool {
        self.has_permission(Permission::ADMIN_FLAG) || self.topics.iter().any(|t| t == topic)
    }

    /// Add `topic` to the subscriptions; returns false if already present
    pub fn subscribe(&mut self, topic: &str) -> bool {
        if self.topics.iter().any(|t| t == topic) {
            return false;
        }
        self.topics.push(topic.to_string());
        true
    }

    /// The access decision for `op` on `topic`
    pub fn allows(&self, op: Operation, topic: Option<&str>) -> bool {
        if !self.has_permission(op.required()) {
            return false;
        }
        if op.is_topic_scoped() {
            return topic.map_or(false, |t| self.is_subscribed(t));
        }
        true
    }
}
