//! Ownership permission levels for host entities.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Permission level a user (or "all players") holds on an entity.
///
/// Serialized as the host's numeric level.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "i8", try_from = "i8")]
pub enum OwnershipLevel {
    /// Defer to the parent folder's setting
    Inherit,
    /// No access
    #[default]
    None,
    /// Can see the entity in the sidebar but not open it
    Limited,
    /// Can view but not edit
    Observer,
    /// Full control
    Owner,
}

impl OwnershipLevel {
    pub fn as_i8(self) -> i8 {
        match self {
            Self::Inherit => -1,
            Self::None => 0,
            Self::Limited => 1,
            Self::Observer => 2,
            Self::Owner => 3,
        }
    }
}

impl From<OwnershipLevel> for i8 {
    fn from(level: OwnershipLevel) -> Self {
        level.as_i8()
    }
}

impl TryFrom<i8> for OwnershipLevel {
    type Error = DomainError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Inherit),
            0 => Ok(Self::None),
            1 => Ok(Self::Limited),
            2 => Ok(Self::Observer),
            3 => Ok(Self::Owner),
            other => Err(DomainError::parse(format!(
                "Unknown ownership level: {other}"
            ))),
        }
    }
}

impl fmt::Display for OwnershipLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Inherit => "Inherit",
            Self::None => "None",
            Self::Limited => "Limited",
            Self::Observer => "Observer",
            Self::Owner => "Owner",
        };
        f.write_str(label)
    }
}

impl FromStr for OwnershipLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inherit" | "-1" => Ok(Self::Inherit),
            "none" | "0" => Ok(Self::None),
            "limited" | "1" => Ok(Self::Limited),
            "observer" | "2" => Ok(Self::Observer),
            "owner" | "3" => Ok(Self::Owner),
            _ => Err(DomainError::parse(format!("Unknown ownership level: {s}"))),
        }
    }
}

/// Ownership of one entity: the "All Players" default plus per-user overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    #[serde(default)]
    pub default: OwnershipLevel,
    /// Per-user overrides keyed by user id
    #[serde(flatten)]
    pub users: BTreeMap<String, OwnershipLevel>,
}

impl Ownership {
    /// Copy of this ownership with only the default entry replaced.
    pub fn with_default(&self, level: OwnershipLevel) -> Self {
        Self {
            default: level,
            users: self.users.clone(),
        }
    }
}
