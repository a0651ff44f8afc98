//! Credentials and bearer tokens
//!
//! Passwords are stored as argon2 PHC strings. Bearer tokens are 32 random
//! bytes, base64url encoded, shown once to the caller; only their sha256
//! digest is persisted.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::db::{DbError, Store, User};
use crate::models::NewUser;

const TOKEN_BYTES: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error(transparent)]
    Db(#[from] DbError),
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Hash(e.to_string())),
    }
}

/// Digest under which a bearer token is stored and looked up.
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hash the password and insert the user.
pub async fn register(store: &dyn Store, user: &NewUser) -> Result<User, AuthError> {
    let password_hash = hash_password(user.password())?;
    let created = store.create_user(user, &password_hash).await?;
    tracing::info!(user_id = created.id, username = %created.username, "User registered");
    Ok(created)
}

/// Replace a user's username, email and password.
pub async fn update_account(
    store: &dyn Store,
    user_id: i32,
    user: &NewUser,
) -> Result<User, AuthError> {
    let password_hash = hash_password(user.password())?;
    let updated = store.update_user(user_id, user, &password_hash).await?;
    tracing::info!(user_id, username = %updated.username, "User updated");
    Ok(updated)
}

/// Check a username/password pair.
///
/// Unknown users and wrong passwords produce the same error.
pub async fn authenticate(
    store: &dyn Store,
    username: &str,
    password: &str,
) -> Result<User, AuthError> {
    let creds = store
        .find_user_credentials(username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(password, &creds.password_hash)? {
        tracing::warn!(username, "Password mismatch");
        return Err(AuthError::InvalidCredentials);
    }

    Ok(creds.user)
}

/// Issue a new bearer token for `user_id`, returning the raw secret.
pub async fn issue_token(store: &dyn Store, user_id: i32) -> Result<String, AuthError> {
    let token = generate_token();
    store.save_token(user_id, &hash_token(&token)).await?;
    tracing::info!(user_id, "Issued API token");
    Ok(token)
}

/// Resolve a raw bearer token to its user.
pub async fn resolve_token(store: &dyn Store, token: &str) -> Result<Option<User>, DbError> {
    store.user_for_token(&hash_token(token)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[test]
    fn password_round_trip() {
        let hash = hash_password("secret").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secret", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn unreadable_hash_is_an_error() {
        assert!(matches!(
            verify_password("secret", "plaintext"),
            Err(AuthError::Hash(_))
        ));
    }

    #[test]
    fn token_digest_is_stable_hex() {
        let digest = hash_token("abc");
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn tokens_are_unique_and_url_safe() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(a
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[tokio::test]
    async fn register_authenticate_and_issue() {
        let store = MemoryStore::new();
        let new_user = NewUser::new("alice", "alice@example.com", "secret").unwrap();
        let user = register(&store, &new_user).await.unwrap();

        let same = authenticate(&store, "alice", "secret").await.unwrap();
        assert_eq!(same, user);

        assert!(matches!(
            authenticate(&store, "alice", "nope").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            authenticate(&store, "bob", "secret").await,
            Err(AuthError::InvalidCredentials)
        ));

        let token = issue_token(&store, user.id).await.unwrap();
        assert_eq!(resolve_token(&store, &token).await.unwrap(), Some(user));
        assert_eq!(resolve_token(&store, "forged").await.unwrap(), None);
    }

    #[tokio::test]
    async fn updated_password_replaces_old_one() {
        let store = MemoryStore::new();
        let user = register(
            &store,
            &NewUser::new("alice", "alice@example.com", "secret").unwrap(),
        )
        .await
        .unwrap();

        let changed = NewUser::new("bob", "bob@example.com", "hunter2").unwrap();
        update_account(&store, user.id, &changed).await.unwrap();

        assert!(matches!(
            authenticate(&store, "alice", "secret").await,
            Err(AuthError::InvalidCredentials)
        ));
        let same = authenticate(&store, "bob", "hunter2").await.unwrap();
        assert_eq!(same.id, user.id);
    }
}
