use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use models::claim::{Claim, UserClaim};
use models::user::UserRecord;

use crate::catalog::IdentityCatalog;
use crate::errors::StoreError;
use crate::store::contract::{StoreOutcome, UserStore};

/// Adapter satisfying the storage contract on top of [`IdentityCatalog`].
///
/// The capability gaps are deliberate: the hosting engine is expected to read
/// password hashes straight off the record it obtained from `find_by_name`,
/// and user deletion/enumeration never shipped.
pub struct CatalogUserStore {
    catalog: Arc<IdentityCatalog>,
}

impl CatalogUserStore {
    pub fn new(catalog: Arc<IdentityCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl UserStore for CatalogUserStore {
    async fn create(&self, user: UserRecord) -> Result<StoreOutcome, StoreError> {
        let created = self.catalog.create_user(user).await;
        if !created {
            warn!("create rejected: normalized username already exists");
        }
        Ok(StoreOutcome::from_bool(created))
    }

    async fn update(&self, user: UserRecord) -> Result<StoreOutcome, StoreError> {
        Ok(StoreOutcome::from_bool(self.catalog.update_user(user).await))
    }

    async fn delete(&self, _user: UserRecord) -> Result<StoreOutcome, StoreError> {
        Err(StoreError::Unsupported("delete"))
    }

    async fn find_by_id(&self, _user_id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        Err(StoreError::Unsupported("find_by_id"))
    }

    async fn find_by_name(
        &self,
        normalized_username: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.catalog.find_by_name(normalized_username).await)
    }

    async fn user_id(&self, user: Option<&UserRecord>) -> Result<Option<Uuid>, StoreError> {
        Ok(user.map(|u| u.id))
    }

    async fn username(&self, user: Option<&UserRecord>) -> Result<Option<String>, StoreError> {
        Ok(user.map(|u| u.username.clone()))
    }

    async fn normalized_username(
        &self,
        _user: Option<&UserRecord>,
    ) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unsupported("normalized_username"))
    }

    async fn set_username(
        &self,
        _user: Option<&mut UserRecord>,
        _username: &str,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unsupported("set_username"))
    }

    async fn set_normalized_username(
        &self,
        user: Option<&mut UserRecord>,
        normalized: &str,
    ) -> Result<(), StoreError> {
        if let Some(user) = user {
            user.normalized_username = normalized.to_string();
        }
        Ok(())
    }

    async fn has_password(&self, _user: &UserRecord) -> Result<bool, StoreError> {
        Err(StoreError::Unsupported("has_password"))
    }

    async fn password_hash(&self, _user: &UserRecord) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unsupported("password_hash"))
    }

    async fn set_password_hash(
        &self,
        _user: Option<&mut UserRecord>,
        _hash: &str,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unsupported("set_password_hash"))
    }

    async fn get_claims(&self, user: &UserRecord) -> Result<Vec<Claim>, StoreError> {
        let assigned = self.catalog.claims_for_user(user.id).await;
        Ok(assigned
            .map(|claims| claims.iter().map(UserClaim::to_claim).collect())
            .unwrap_or_default())
    }

    async fn add_claims(
        &self,
        user: &mut UserRecord,
        claims: Option<&[Claim]>,
    ) -> Result<(), StoreError> {
        let Some(claims) = claims else { return Ok(()) };

        // Per-claim, no rollback: one bad claim never blocks the rest.
        for claim in claims {
            let resolved = self.catalog.resolve_claim(&claim.claim_type).await;
            if resolved.is_empty() {
                warn!(claim_type = %claim.claim_type, "claim type not in catalog; assigning empty claim");
            }
            user.claims.push(resolved);
        }
        Ok(())
    }

    async fn replace_claim(
        &self,
        _user: &mut UserRecord,
        _claim: &Claim,
        _new_claim: &Claim,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unsupported("replace_claim"))
    }

    async fn remove_claims(
        &self,
        _user: &mut UserRecord,
        _claims: &[Claim],
    ) -> Result<(), StoreError> {
        Err(StoreError::Unsupported("remove_claims"))
    }

    async fn users_for_claim(&self, _claim: &Claim) -> Result<Vec<UserRecord>, StoreError> {
        Err(StoreError::Unsupported("users_for_claim"))
    }
}
