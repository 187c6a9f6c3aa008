//! User roles carried in the session token.

use serde::{Deserialize, Serialize};

/// Role claim of an authenticated user.
///
/// The set is closed: a role string the client does not recognise decodes as
/// [`Role::Customer`], so an unexpected claim never grants admin access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Store administrator with access to catalog management.
    Admin,
    /// Regular shopper.
    #[default]
    #[serde(other)]
    Customer,
}

impl Role {
    /// Label shown next to the user's name in the navigation bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Admin => "Administrator",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles() {
        assert_eq!(serde_json::from_str::<Role>("\"admin\"").unwrap(), Role::Admin);
        assert_eq!(serde_json::from_str::<Role>("\"customer\"").unwrap(), Role::Customer);
    }

    #[test]
    fn test_unknown_role_is_customer() {
        assert_eq!(serde_json::from_str::<Role>("\"superuser\"").unwrap(), Role::Customer);
        assert_eq!(serde_json::from_str::<Role>("\"Admin\"").unwrap(), Role::Customer);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Role::Admin.label(), "Administrator");
        assert_eq!(Role::Customer.label(), "Customer");
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}
