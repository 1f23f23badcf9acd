//! Role model for role-based access control
//!
//! Roles form a small closed enumeration. Grants and route requirements are
//! both expressed as a [`RoleSet`], and authorization is a set intersection.

use bitflags::bitflags;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A single named role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    User,
    Admin,
    Manager,
}

impl Role {
    /// Every role, in a stable order
    pub const ALL: [Role; 3] = [Role::User, Role::Admin, Role::Manager];

    /// Canonical upper-case name, as stored in the database and in tokens
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
        }
    }

    /// The single-member set for this role
    #[must_use]
    pub const fn as_set(self) -> RoleSet {
        match self {
            Self::User => RoleSet::USER,
            Self::Admin => RoleSet::ADMIN,
            Self::Manager => RoleSet::MANAGER,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a role name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            "MANAGER" => Ok(Self::Manager),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

bitflags! {
    /// A set of roles
    ///
    /// Serialized as a JSON array of role names (`["ADMIN","USER"]`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RoleSet: u8 {
        const USER    = 1 << 0;
        const ADMIN   = 1 << 1;
        const MANAGER = 1 << 2;

        /// Any authenticated member role
        const ANY_MEMBER = Self::USER.bits()
            | Self::ADMIN.bits()
            | Self::MANAGER.bits();
    }
}

impl RoleSet {
    /// Build a set from individual roles
    pub fn from_roles<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        roles
            .into_iter()
            .fold(RoleSet::empty(), |acc, role| acc | role.as_set())
    }

    /// Check whether the set contains a role
    #[inline]
    pub fn has(&self, role: Role) -> bool {
        self.contains(role.as_set())
    }

    /// Check whether at least one role is shared with `required`
    #[inline]
    pub fn grants_any(&self, required: RoleSet) -> bool {
        self.intersects(required)
    }

    /// Individual roles in the set, in [`Role::ALL`] order
    pub fn roles(&self) -> Vec<Role> {
        Role::ALL.into_iter().filter(|r| self.has(*r)).collect()
    }

    /// Role names in the set
    pub fn names(&self) -> Vec<&'static str> {
        self.roles().into_iter().map(Role::as_str).collect()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join(","))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        Self::from_roles(iter)
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        role.as_set()
    }
}

impl Serialize for RoleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let roles = self.roles();
        let mut seq = serializer.serialize_seq(Some(roles.len()))?;
        for role in roles {
            seq.serialize_element(&role)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for RoleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RoleSetVisitor;

        impl<'de> Visitor<'de> for RoleSetVisitor {
            type Value = RoleSet;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an array of role names")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<RoleSet, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut set = RoleSet::empty();
                while let Some(role) = seq.next_element::<Role>()? {
                    set |= role.as_set();
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(RoleSetVisitor)
    }
}
