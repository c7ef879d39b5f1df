use crate::models::Credential;

/// Lookup of known users by exact username.
pub trait CredentialStore: Send + Sync {
    fn lookup(&self, username: &str) -> Option<Credential>;
}

/// Single built-in account; stands in until a real store is wired up.
pub struct StaticCredentialStore {
    record: Credential,
}

impl StaticCredentialStore {
    pub fn new(record: Credential) -> Self {
        Self { record }
    }
}

impl Default for StaticCredentialStore {
    fn default() -> Self {
        Self::new(Credential {
            user_id: 1,
            username: "admin".to_string(),
            password: "1234".to_string(),
        })
    }
}

impl CredentialStore for StaticCredentialStore {
    fn lookup(&self, username: &str) -> Option<Credential> {
        (self.record.username == username).then(|| self.record.clone())
    }
}
