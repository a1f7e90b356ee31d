//! Argon2id password hashing with PHC-string storage.

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),

    #[error("Failed to parse password hash: {0}")]
    InvalidHash(String),
}

pub type Result<T> = std::result::Result<T, PasswordError>;

#[derive(Clone)]
pub struct Passwords<'a> {
    a2: Argon2<'a>,
    min_len: usize,
    max_len: usize,
}

impl<'a> Passwords<'a> {
    pub fn new(mem_kib: u32, iters: u32, lanes: u32) -> Self {
        let params = Params::new(mem_kib, iters, lanes, None).expect("argon2 params");
        let a2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        Self {
            a2,
            min_len: 8,
            max_len: 512,
        }
    }

    pub fn hash(&self, password: &str) -> Result<String> {
        self.guard_length(password)?;
        let salt = SaltString::generate(&mut OsRng);
        let phc = self
            .a2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
        Ok(phc.to_string())
    }

    /// Returns (password matches, stored hash uses weaker-than-current params).
    pub fn verify(&self, password: &str, pw_hash: &str) -> Result<(bool, bool)> {
        let parsed =
            PasswordHash::new(pw_hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;
        let ok = self
            .a2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok();
        let stored_params = Params::try_from(&parsed).ok();
        let needs_rehash = ok
            && !(parsed.algorithm == Algorithm::Argon2id.ident()
                && parsed.version == Some(Version::V0x13.into())
                && stored_params.as_ref().map(|p| p.m_cost()) == Some(self.a2.params().m_cost())
                && stored_params.as_ref().map(|p| p.t_cost()) == Some(self.a2.params().t_cost())
                && stored_params.as_ref().map(|p| p.p_cost()) == Some(self.a2.params().p_cost()));
        Ok((ok, needs_rehash))
    }

    fn guard_length(&self, s: &str) -> Result<()> {
        let len = s.chars().count();
        if len < self.min_len || len > self.max_len {
            return Err(PasswordError::HashingFailed(
                "password length out of bounds".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passwords() -> Passwords<'static> {
        // Small parameters keep the tests fast.
        Passwords::new(8, 1, 1)
    }

    #[test]
    fn hashes_and_verifies() {
        let pw = passwords();
        let hash = pw.hash("correct horse battery").unwrap();
        let (ok, needs_rehash) = pw.verify("correct horse battery", &hash).unwrap();
        assert!(ok);
        assert!(!needs_rehash);
    }

    #[test]
    fn rejects_the_wrong_password() {
        let pw = passwords();
        let hash = pw.hash("correct horse battery").unwrap();
        let (ok, _) = pw.verify("incorrect horse", &hash).unwrap();
        assert!(!ok);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let result = passwords().verify("secret!!", "not-a-phc-string");
        assert!(matches!(result.unwrap_err(), PasswordError::InvalidHash(_)));
    }

    #[test]
    fn too_short_password_never_reaches_argon2() {
        let result = passwords().hash("short");
        assert!(matches!(result.unwrap_err(), PasswordError::HashingFailed(_)));
    }

    #[test]
    fn stronger_params_flag_old_hashes_for_rehash() {
        let weak = Passwords::new(8, 1, 1);
        let strong = Passwords::new(16, 2, 1);

        let hash = weak.hash("correct horse battery").unwrap();
        let (ok, needs_rehash) = strong.verify("correct horse battery", &hash).unwrap();
        assert!(ok);
        assert!(needs_rehash);
    }
}
