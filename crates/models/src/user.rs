use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::claim::UserClaim;
use crate::errors::ModelError;

/// Persisted user record.
///
/// `normalized_username` is the uniqueness key across the catalog; the id is
/// assigned once at construction and never re-validated by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub normalized_username: String,
    /// Opaque hash; the hashing algorithm lives with the caller.
    pub password_hash: String,
    #[serde(default)]
    pub claims: Vec<UserClaim>,
}

impl UserRecord {
    pub fn new(username: &str, password_hash: &str) -> Result<Self, ModelError> {
        if username.trim().is_empty() {
            return Err(ModelError::Validation("username required".into()));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            normalized_username: normalize_username(username),
            password_hash: password_hash.to_string(),
            claims: Vec::new(),
        })
    }
}

/// Case fold used as the catalog-wide uniqueness key.
pub fn normalize_username(username: &str) -> String {
    username.trim().to_uppercase()
}
