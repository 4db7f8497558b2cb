//! Well-known role names and the parsed [`Role`] enum.
//!
//! The names must match the `CHECK` constraint on `users.role` in
//! `20260301000002_create_users_table.sql`.

use serde::Serialize;

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// Legacy spelling of the super-admin role, still accepted when parsing.
const ROLE_SUPER_ADMIN_ALIAS: &str = "S-admin";

/// Caller role as carried in access-token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Parse a role name. Returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            ROLE_USER => Some(Role::User),
            ROLE_ADMIN => Some(Role::Admin),
            ROLE_SUPER_ADMIN | ROLE_SUPER_ADMIN_ALIAS => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Admin => ROLE_ADMIN,
            Role::SuperAdmin => ROLE_SUPER_ADMIN,
        }
    }

    /// `true` for `admin` and `super_admin`.
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    pub fn is_super_admin(self) -> bool {
        self == Role::SuperAdmin
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_roles() {
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("super_admin"), Some(Role::SuperAdmin));
    }

    #[test]
    fn accepts_legacy_super_admin_spelling() {
        assert_eq!(Role::parse("S-admin"), Some(Role::SuperAdmin));
    }

    #[test]
    fn rejects_unknown_role() {
        assert_eq!(Role::parse("moderator"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn admin_predicates() {
        assert!(!Role::User.is_admin());
        assert!(Role::Admin.is_admin());
        assert!(Role::SuperAdmin.is_admin());
        assert!(!Role::Admin.is_super_admin());
        assert!(Role::SuperAdmin.is_super_admin());
    }

    #[test]
    fn round_trips_through_name() {
        for role in [Role::User, Role::Admin, Role::SuperAdmin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }
}
