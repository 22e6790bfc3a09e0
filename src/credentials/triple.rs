use std::fmt;

/// Temporary credentials for one profile.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialTriple {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
}

impl CredentialTriple {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: session_token.into(),
        }
    }

    /// The three `key = value` body lines of a credentials section.
    pub fn to_lines(&self) -> Vec<String> {
        vec![
            format!("aws_access_key_id = {}", self.access_key_id),
            format!("aws_secret_access_key = {}", self.secret_access_key),
            format!("aws_session_token = {}", self.session_token),
        ]
    }
}

impl fmt::Debug for CredentialTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialTriple")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &"<redacted>")
            .finish()
    }
}
