use serde::{Deserialize, Serialize};
use std::fmt;

/// Role string carried by a user record and its tokens.
///
/// Only `admin` and `editor` carry privileges. Any other string is kept
/// verbatim so it round-trips through tokens and storage unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    Admin,
    Editor,
    Other(String),
}

impl UserRole {
    pub const ADMIN: &'static str = "admin";
    pub const EDITOR: &'static str = "editor";

    #[inline]
    pub fn code(&self) -> &str {
        match self {
            UserRole::Admin => Self::ADMIN,
            UserRole::Editor => Self::EDITOR,
            UserRole::Other(code) => code,
        }
    }

    /// Exact, case-sensitive match. `"Admin"` is *not* an admin.
    #[inline]
    pub fn from_code(code: &str) -> Self {
        match code {
            Self::ADMIN => UserRole::Admin,
            Self::EDITOR => UserRole::Editor,
            other => UserRole::Other(other.to_string()),
        }
    }
}

impl From<String> for UserRole {
    fn from(code: String) -> Self {
        match code.as_str() {
            Self::ADMIN => UserRole::Admin,
            Self::EDITOR => UserRole::Editor,
            _ => UserRole::Other(code),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("admin"), UserRole::Admin);
        assert_eq!(UserRole::from_code("editor"), UserRole::Editor);
        assert_eq!(
            UserRole::from_code("volunteer"),
            UserRole::Other("volunteer".to_string())
        );
    }

    #[test]
    fn test_role_match_is_case_sensitive() {
        assert_eq!(UserRole::from_code("ADMIN"), UserRole::Other("ADMIN".to_string()));
        assert_ne!(UserRole::from_code("Admin"), UserRole::Admin);
    }

    #[test]
    fn test_user_role_serde_is_verbatim() {
        let json = serde_json::to_string(&UserRole::Editor).unwrap();
        assert_eq!(json, "\"editor\"");

        let role: UserRole = serde_json::from_str("\"donor-relations\"").unwrap();
        assert_eq!(role.code(), "donor-relations");
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"donor-relations\"");
    }
}
