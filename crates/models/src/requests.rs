//! Inbound request DTOs handed to the store by its hosting surface.

use serde::{Deserialize, Serialize};

use crate::claim::Claim;
use crate::errors::ModelError;

/// New-user payload. Claims arrive as `"Type:Value"` strings and are parsed
/// into pairs; malformed entries are dropped rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub claims: Vec<String>,
}

impl NewUserRequest {
    /// Parse the `"Type:Value"` claim strings, keeping only well-formed pairs.
    pub fn claim_pairs(&self) -> Vec<Claim> {
        let mut result = Vec::new();
        for entry in &self.claims {
            let parts: Vec<&str> = entry.split(':').collect();
            if parts.len() == 2 {
                result.push(Claim::new(parts[0], parts[1]));
            }
        }
        result
    }
}

/// Login payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.username.trim().is_empty() {
            return Err(ModelError::Validation("username required".into()));
        }
        if self.password.is_empty() {
            return Err(ModelError::Validation("password required".into()));
        }
        Ok(())
    }
}
