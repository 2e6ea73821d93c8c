use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Fixed Argon2id hash compared against when no stored hash is available.
///
/// Structurally valid PHC string so the comparison path is identical to the
/// real-hash path; no password hashes to this value.
const DECOY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZGVjb3ktc2FsdC0xNmJ5dA$AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8";

/// Constant-effort credential verification.
///
/// Login lookups may miss (unknown email). Skipping the password comparison
/// in that case would let a caller distinguish "no such account" from "wrong
/// password" by response time. This verifier always runs the full Argon2
/// comparison, substituting [`DECOY_HASH`] when the account was not found,
/// and only then folds the lookup result into the outcome.
pub struct CredentialVerifier {
    hasher: PasswordHasher,
}

impl CredentialVerifier {
    pub fn new() -> Self {
        Self {
            hasher: PasswordHasher::new(),
        }
    }

    /// Verify a supplied password against an optional stored hash.
    ///
    /// # Arguments
    /// * `password` - Plaintext password from the login request
    /// * `stored_hash` - The account's stored hash, or `None` when no account
    ///   matched the login identifier
    ///
    /// # Returns
    /// True only when a stored hash was present AND the password matched it.
    /// A decoy comparison can never authenticate, regardless of its result.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is not a valid PHC string
    pub fn verify(
        &self,
        password: &str,
        stored_hash: Option<&str>,
    ) -> Result<bool, PasswordError> {
        let hash = stored_hash.unwrap_or(DECOY_HASH);
        let matched = self.hasher.verify(password, hash)?;

        Ok(stored_hash.is_some() && matched)
    }
}

impl Default for CredentialVerifier {
    fn default() -> Self {
        Self::new()
    }
}
