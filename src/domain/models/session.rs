use serde::{Deserialize, Serialize};

/// Identity issued by the session provider for one request.
///
/// Both fields may be missing: an absent email means the caller is not
/// authenticated, an absent id token means the session is incomplete.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_email: Option<String>,
    #[serde(skip_serializing)]
    pub id_token: Option<String>,
}

impl Session {
    pub fn new(user_email: impl Into<String>, id_token: impl Into<String>) -> Self {
        Self {
            user_email: Some(user_email.into()),
            id_token: Some(id_token.into()),
        }
    }

    /// Session with a user identity but no id token
    pub fn without_token(user_email: impl Into<String>) -> Self {
        Self {
            user_email: Some(user_email.into()),
            id_token: None,
        }
    }

    /// User email, ignoring blank values
    pub fn user_email(&self) -> Option<&str> {
        non_blank(self.user_email.as_deref())
    }

    /// Identity token, ignoring blank values
    pub fn id_token(&self) -> Option<&str> {
        non_blank(self.id_token.as_deref())
    }
}

// Tokens never end up in logs.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_email", &self.user_email)
            .field("id_token", &self.id_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_absent() {
        let session = Session {
            user_email: Some("  ".to_string()),
            id_token: Some(String::new()),
        };
        assert_eq!(session.user_email(), None);
        assert_eq!(session.id_token(), None);
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new("user@example.com", "secret-token");
        let printed = format!("{:?}", session);
        assert!(printed.contains("user@example.com"));
        assert!(!printed.contains("secret-token"));
    }

    #[test]
    fn test_without_token() {
        let session = Session::without_token("user@example.com");
        assert_eq!(session.user_email(), Some("user@example.com"));
        assert!(session.id_token().is_none());
    }
}
