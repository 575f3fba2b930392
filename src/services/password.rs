use bcrypt::BcryptError;

use crate::config::Config;

/// Salted password hashing. Raw passwords are never stored or compared
/// directly; only the bcrypt-encoded form is persisted.
pub struct PasswordService;

impl PasswordService {
    pub fn hash(raw: &str) -> Result<String, BcryptError> {
        bcrypt::hash(raw, Config::bcrypt_cost())
    }

    pub fn verify(raw: &str, encoded: &str) -> bool {
        bcrypt::verify(raw, encoded).unwrap_or(false)
    }
}
