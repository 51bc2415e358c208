use secrecy::Secret;

/// Opaque output of the credential hasher.
#[derive(Debug, Clone)]
pub struct CredentialHash(Secret<String>);

impl CredentialHash {
    pub fn new(hash: Secret<String>) -> Self {
        Self(hash)
    }
}

impl AsRef<Secret<String>> for CredentialHash {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
