/**
 * Password Hashing Policy
 *
 * Passwords are stored as salted bcrypt hashes. Verification goes through
 * `bcrypt::verify`, which re-derives the hash from the stored salt and
 * compares in constant time.
 */

use bcrypt::BcryptError;

/// bcrypt hashing with a configured work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost (4..=31)
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Work factor used for new hashes
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password with a fresh salt
    pub fn hash(&self, plaintext: &str) -> Result<String, BcryptError> {
        bcrypt::hash(plaintext, self.cost)
    }

    /// Check a plaintext password against a stored hash
    ///
    /// Returns `Ok(false)` for a mismatch. An error means the stored hash
    /// itself could not be parsed.
    pub fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool, BcryptError> {
        bcrypt::verify(plaintext, stored_hash)
    }
}
