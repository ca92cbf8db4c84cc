//! The authenticated caller and what it may do.

use serde::{Deserialize, Serialize};

/// Role granted to an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May view the page and edit the offset configuration.
    Admin,
    /// May view the page.
    Viewer,
}

impl Role {
    /// Resolves the role for `username` given the configured administrator.
    pub fn for_username(username: &str, admin_username: &str) -> Self {
        if username.eq_ignore_ascii_case(admin_username.trim()) {
            Self::Admin
        } else {
            Self::Viewer
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

/// Who is making the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Lowercased username.
    pub username: String,
    /// Display name from the credential file.
    pub display_name: String,
    /// Role derived from the username.
    pub role: Role,
}

impl Identity {
    /// Whether this identity may change offsets.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_for_username() {
        assert_eq!(Role::for_username("admin", "admin"), Role::Admin);
        assert_eq!(Role::for_username("admin", " Admin "), Role::Admin);
        assert_eq!(Role::for_username("imam", "admin"), Role::Viewer);
    }
}
