//! Well-known role name constants.
//!
//! These must match the `role` values stored in the users table.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Whether a role name grants administrative access.
pub fn is_admin(role: &str) -> bool {
    role == ROLE_ADMIN
}
