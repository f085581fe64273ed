//! User domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// User permission level.
///
/// Wire format: lowercase string (`"driver"` or `"authority"`), both in JSON
/// bodies and in the gateway-injected `x-tss-user-role` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Driver,
    Authority,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Driver => "driver",
            Self::Authority => "authority",
        }
    }

    /// Whether this role may use the admin console (code issuance, analytics).
    pub fn is_authority(self) -> bool {
        matches!(self, Self::Authority)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown user role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driver" => Ok(Self::Driver),
            "authority" => Ok(Self::Authority),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}
