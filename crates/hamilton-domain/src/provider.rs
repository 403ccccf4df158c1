//! Authentication provider kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The channel an authentication identity belongs to.
///
/// Wire format: lowercase string (`"email"`, `"username"`, ...), both in
/// JSON bodies and in the `auth_identities.provider` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Email,
    Username,
    Room,
    /// Reserved for phone-number login.
    Phone,
    /// Reserved for federated single sign-on.
    Sso,
}

/// Providers tried, in this exact order, when the caller names no provider
/// and the identifier gives no stronger hint. The login flow stops at the
/// first provider that yields a match, so a string registered as both a
/// username and a room resolves to the username identity.
pub const DEFAULT_PROVIDER_ORDER: [Provider; 3] =
    [Provider::Email, Provider::Username, Provider::Room];

impl Provider {
    /// Whether identifiers under this provider match case-insensitively.
    ///
    /// Phone numbers and SSO subjects are not naturally case-variant, so
    /// they are looked up verbatim.
    pub fn is_case_insensitive(self) -> bool {
        matches!(self, Self::Email | Self::Username | Self::Room)
    }

    /// Stable string form used as the storage value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Username => "username",
            Self::Room => "room",
            Self::Phone => "phone",
            Self::Sso => "sso",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown provider name.
#[derive(Debug, thiserror::Error)]
#[error("unknown provider")]
pub struct UnknownProvider;

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "username" => Ok(Self::Username),
            "room" => Ok(Self::Room),
            "phone" => Ok(Self::Phone),
            "sso" => Ok(Self::Sso),
            _ => Err(UnknownProvider),
        }
    }
}
