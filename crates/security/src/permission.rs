//! Permission bitmask
//!
//! Each bit grants one capability. `ADMIN` sets every bit, including
//! `ADMIN_FLAG`, which additionally subscribes the holder to every topic.
//!
//! The serialized form is a list of capability names, e.g.
//! `["read", "write"]`; a full admin mask serializes as `["admin"]`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Capability bitmask
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Permission(u8);

/// Named bits in serialization order
const NAMED: [(Permission, &str); 7] = [
    (Permission::READ, "read"),
    (Permission::WRITE, "write"),
    (Permission::CREATE_TOPIC, "createTopic"),
    (Permission::DELETE_TOPIC, "deleteTopic"),
    (Permission::CREATE_TOKEN, "createToken"),
    (Permission::DELETE_TOKEN, "deleteToken"),
    (Permission::SUBSCRIBE, "subscribe"),
];

impl Permission {
    /// No capabilities
    pub const NONE: Permission = Permission(0);
    /// Read events from subscribed topics
    pub const READ: Permission = Permission(1 << 0);
    /// Append events to subscribed topics
    pub const WRITE: Permission = Permission(1 << 1);
    /// Subscribe the token to more topics
    pub const SUBSCRIBE: Permission = Permission(1 << 2);
    /// Create topics
    pub const CREATE_TOPIC: Permission = Permission(1 << 3);
    /// Delete topics
    pub const DELETE_TOPIC: Permission = Permission(1 << 4);
    /// Issue new tokens
    pub const CREATE_TOKEN: Permission = Permission(1 << 5);
    /// Revoke tokens
    pub const DELETE_TOKEN: Permission = Permission(1 << 6);
    /// Implicit subscription to every topic
    pub const ADMIN_FLAG: Permission = Permission(1 << 7);
    /// Every capability
    pub const ADMIN: Permission = Permission(u8::MAX);

    /// Raw bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if any bit of `other` is set in `self`
    pub const fn intersects(self, other: Permission) -> bool {
        self.0 & other.0 != 0
    }

    /// Check if every bit of `other` is set in `self`
    pub const fn contains(self, other: Permission) -> bool {
        self.0 & other.0 == other.0
    }

    /// Parse one capability name
    ///
    /// Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Permission> {
        if name == "admin" {
            return Some(Permission::ADMIN);
        }
        NAMED
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(p, _)| *p)
    }

    /// Capability names set in this mask
    pub fn names(self) -> Vec<&'static str> {
        if self == Permission::ADMIN {
            return vec!["admin"];
        }
        NAMED
            .iter()
            .filter(|(p, _)| self.contains(*p))
            .map(|(_, n)| *n)
            .collect()
    }
}

impl BitOr for Permission {
    type Output = Permission;

    fn bitor(self, rhs: Permission) -> Permission {
        Permission(self.0 | rhs.0)
    }
}

impl BitOrAssign for Permission {
    fn bitor_assign(&mut self, rhs: Permission) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join(","))
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.names().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        names.iter().try_fold(Permission::NONE, |acc, name| {
            Permission::from_name(name)
                .map(|p| acc | p)
                .ok_or_else(|| D::Error::custom(format!("unknown permission '{}'", name)))
        })
    }
}
