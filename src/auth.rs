//! Credential validation and bearer-token lifecycle.
//!
//! The archive builder only consumes this boundary: callers authenticate,
//! receive an opaque bearer token, and present it on later requests. A login
//! revokes every token previously issued to that user before a fresh one is
//! handed out; a logout revokes exactly the token presented, nothing else.
//!
//! Tokens are opaque random hex strings, stored hashed so the plaintext is
//! only ever revealed once. Password hashing is salted iterated SHA-256.

use crate::error::Error;
use crate::result::Result;
use parking_lot::Mutex;
use rand::RngCore;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Token byte length before hex encoding (32 bytes = 64 hex chars).
const TOKEN_BYTES: usize = 32;

/// Salt byte length for password hashing.
const SALT_BYTES: usize = 16;

/// Number of SHA-256 iterations for password stretching.
const HASH_ITERATIONS: u32 = 100_000;

/// A registered user, as returned to the caller on login.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

/// A successful login: the authenticated user and their fresh bearer token.
#[derive(Debug, Clone)]
pub struct Login {
    pub user: User,
    pub token: String,
}

/// The consumed authentication contract.
pub trait CredentialValidator {
    /// Verify an email/password pair. On success every previously issued
    /// token for that user is revoked and a fresh one is returned.
    /// Mismatches and unknown emails fail with `Error::InvalidCredentials`.
    fn login(&self, email: &str, password: &str) -> Result<Login>;

    /// Revoke exactly the presented token. Unknown or already revoked
    /// tokens fail with `Error::InvalidCredentials`.
    fn logout(&self, token: &str) -> Result<()>;
}

struct Account {
    user: User,
    password_hash: String,
    salt: String,
}

#[derive(Default)]
struct Inner {
    /// Accounts keyed by normalized email.
    accounts: HashMap<String, Account>,
    /// token hash -> normalized email of the holder.
    tokens: HashMap<String, String>,
}

/// In-memory credential store implementing [`CredentialValidator`].
#[derive(Default)]
pub struct MemoryCredentials {
    inner: Mutex<Inner>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account. Returns the new user's id.
    pub fn register(&self, email: &str, password: &str) -> Result<String> {
        let key = normalize_email(email);
        if key.is_empty() {
            return Err(Error::custom("Email cannot be empty"));
        }

        let mut inner = self.inner.lock();
        if inner.accounts.contains_key(&key) {
            return Err(Error::custom(format!("Email '{key}' is already registered")));
        }

        let salt = generate_salt();
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: key.clone(),
        };
        let id = user.id.clone();

        inner.accounts.insert(
            key,
            Account {
                user,
                password_hash: hash_password(password, &salt),
                salt,
            },
        );

        Ok(id)
    }
}

impl CredentialValidator for MemoryCredentials {
    fn login(&self, email: &str, password: &str) -> Result<Login> {
        let key = normalize_email(email);
        let mut inner = self.inner.lock();

        let Some(account) = inner.accounts.get(&key) else {
            // Dummy hash to keep the timing of misses close to mismatches.
            let _ = hash_password(password, "0000000000000000");
            return Err(Error::InvalidCredentials);
        };

        let attempt = hash_password(password, &account.salt);
        if !constant_time_eq(account.password_hash.as_bytes(), attempt.as_bytes()) {
            return Err(Error::InvalidCredentials);
        }
        let user = account.user.clone();

        // A fresh login invalidates every token the user still holds.
        inner.tokens.retain(|_, holder| *holder != key);

        let token = generate_token();
        inner.tokens.insert(hash_token(&token), key);

        Ok(Login { user, token })
    }

    fn logout(&self, token: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        match inner.tokens.remove(&hash_token(token)) {
            Some(_) => Ok(()),
            None => Err(Error::InvalidCredentials),
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn hash_password(password: &str, salt: &str) -> String {
    let mut hash = Sha256::new();
    hash.update(salt.as_bytes());
    hash.update(password.as_bytes());
    let mut result = hash.finalize();

    for _ in 1..HASH_ITERATIONS {
        let mut h = Sha256::new();
        h.update(result);
        h.update(salt.as_bytes());
        result = h.finalize();
    }

    hex::encode(result)
}

// Single pass is enough: tokens are already high-entropy.
fn hash_token(token: &str) -> String {
    let mut h = Sha256::new();
    h.update(token.as_bytes());
    hex::encode(h.finalize())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
