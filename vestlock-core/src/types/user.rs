//! Platform identities.
//!
//! Roles are a tagged variant; lifecycle operations dispatch on the tag,
//! never on which fields happen to be present.

use serde::{Deserialize, Serialize};

use super::common::{UserId, WalletRef};

/// Operator identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
}

/// Investing client identity, including the simulated payout wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    pub wallet: WalletRef,
}

/// A logged-in platform identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum User {
    Admin(AdminProfile),
    Client(ClientProfile),
}

impl User {
    pub fn user_id(&self) -> &UserId {
        match self {
            Self::Admin(p) => &p.id,
            Self::Client(p) => &p.id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Admin(p) => &p.display_name,
            Self::Client(p) => &p.display_name,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin(_))
    }

    /// The client profile, if this identity can hold investments
    pub fn as_client(&self) -> Option<&ClientProfile> {
        match self {
            Self::Client(p) => Some(p),
            Self::Admin(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_tag_serialization() {
        let user = User::Client(ClientProfile {
            id: UserId::new("demo"),
            username: "demo".to_string(),
            display_name: "Demo User".to_string(),
            wallet: WalletRef::new("0xFEDCBA9876543210FEDCBA9876543210"),
        });

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"role\":\"client\""));

        let back: User = serde_json::from_str(&json).unwrap();
        assert!(!back.is_admin());
        assert!(back.as_client().is_some());
    }
}
