//! Authentication collaborator: the fixed identity roster.
//!
//! The platform trusts whatever identity login resolves to; there is no
//! further verification downstream. The set of possible investment owners
//! is this fixed roster, not discovered dynamically - the operator
//! aggregation iterates exactly these clients.

use vestlock_core::types::{AdminProfile, ClientProfile, User, UserId, WalletRef};

/// Requested login role, selecting which table is consulted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Client,
}

struct RosterEntry {
    user: User,
    password: String,
}

/// Fixed set of known platform identities
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    /// The demo roster: one operator, two clients
    pub fn demo() -> Self {
        let entries = vec![
            RosterEntry {
                user: User::Admin(AdminProfile {
                    id: UserId::new("admin"),
                    username: "admin".to_string(),
                    display_name: "Admin User".to_string(),
                }),
                password: "admin123".to_string(),
            },
            RosterEntry {
                user: User::Client(ClientProfile {
                    id: UserId::new("vishal"),
                    username: "vishal".to_string(),
                    display_name: "Vishal Sheoran".to_string(),
                    wallet: WalletRef::new("0xABC123DEF4567890ABC123DEF4567890"),
                }),
                password: "vishal123".to_string(),
            },
            RosterEntry {
                user: User::Client(ClientProfile {
                    id: UserId::new("demo"),
                    username: "demo".to_string(),
                    display_name: "Demo User".to_string(),
                    wallet: WalletRef::new("0xFEDCBA9876543210FEDCBA9876543210"),
                }),
                password: "demo123".to_string(),
            },
        ];
        Self { entries }
    }

    /// Resolve a login attempt against the requested role's table
    pub fn login(&self, username: &str, password: &str, role: Role) -> Option<User> {
        self.entries
            .iter()
            .filter(|e| match role {
                Role::Admin => e.user.is_admin(),
                Role::Client => !e.user.is_admin(),
            })
            .find(|e| {
                let name = match &e.user {
                    User::Admin(p) => &p.username,
                    User::Client(p) => &p.username,
                };
                name == username && e.password == password
            })
            .map(|e| e.user.clone())
    }

    /// All client profiles (the operator aggregation roster)
    pub fn clients(&self) -> Vec<ClientProfile> {
        self.entries
            .iter()
            .filter_map(|e| e.user.as_client().cloned())
            .collect()
    }

    /// The operator profile
    pub fn admin(&self) -> Option<AdminProfile> {
        self.entries.iter().find_map(|e| match &e.user {
            User::Admin(p) => Some(p.clone()),
            User::Client(_) => None,
        })
    }
}
