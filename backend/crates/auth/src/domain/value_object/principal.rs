//! Principal
//!
//! The identity a verified token vouches for, scoped to one request.

use serde::{Deserialize, Serialize};

use super::user_role::UserRole;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: i32,
    pub role: UserRole,
}

impl Principal {
    pub fn new(id: i32, role: UserRole) -> Self {
        Self { id, role }
    }

    /// Membership test against a set of role codes.
    pub fn has_any_role(&self, allowed: &[&str]) -> bool {
        allowed.iter().any(|code| *code == self.role.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_any_role() {
        let editor = Principal::new(7, UserRole::Editor);
        assert!(editor.has_any_role(&["admin", "editor"]));
        assert!(!editor.has_any_role(&["admin"]));
        assert!(!editor.has_any_role(&[]));
    }

    #[test]
    fn test_other_role_matches_verbatim() {
        let custom = Principal::new(1, UserRole::from_code("reviewer"));
        assert!(custom.has_any_role(&["reviewer"]));
        assert!(!custom.has_any_role(&["Reviewer"]));
    }
}
