use async_trait::async_trait;
use uuid::Uuid;

use models::claim::Claim;
use models::user::UserRecord;

use crate::errors::StoreError;

/// Result vocabulary for outcome-bearing contract mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Succeeded,
    Failed,
}

impl StoreOutcome {
    pub fn succeeded(self) -> bool {
        matches!(self, StoreOutcome::Succeeded)
    }

    pub fn from_bool(ok: bool) -> Self {
        if ok {
            StoreOutcome::Succeeded
        } else {
            StoreOutcome::Failed
        }
    }
}

/// Storage contract consumed by the external identity engine.
///
/// Supported operations never surface an `Err`: internal failures are caught
/// at the adapter boundary, logged, and converted into the operation's own
/// failure shape (`Failed`, `None`, or an empty list). The deliberately
/// unsupported operations return [`StoreError::Unsupported`] so a miswired
/// caller fails loudly instead of getting wrong semantics.
///
/// Field projections take `Option<&UserRecord>` because the engine may hand
/// over an absent user; they answer with an empty result instead of failing.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: UserRecord) -> Result<StoreOutcome, StoreError>;
    async fn update(&self, user: UserRecord) -> Result<StoreOutcome, StoreError>;
    /// Unsupported.
    async fn delete(&self, user: UserRecord) -> Result<StoreOutcome, StoreError>;

    /// Unsupported.
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserRecord>, StoreError>;
    async fn find_by_name(
        &self,
        normalized_username: &str,
    ) -> Result<Option<UserRecord>, StoreError>;

    async fn user_id(&self, user: Option<&UserRecord>) -> Result<Option<Uuid>, StoreError>;
    async fn username(&self, user: Option<&UserRecord>) -> Result<Option<String>, StoreError>;
    /// Unsupported.
    async fn normalized_username(
        &self,
        user: Option<&UserRecord>,
    ) -> Result<Option<String>, StoreError>;
    /// Unsupported.
    async fn set_username(
        &self,
        user: Option<&mut UserRecord>,
        username: &str,
    ) -> Result<(), StoreError>;
    /// In-memory field mutation only; triggers no persistence by itself.
    async fn set_normalized_username(
        &self,
        user: Option<&mut UserRecord>,
        normalized: &str,
    ) -> Result<(), StoreError>;

    /// Unsupported.
    async fn has_password(&self, user: &UserRecord) -> Result<bool, StoreError>;
    /// Unsupported.
    async fn password_hash(&self, user: &UserRecord) -> Result<Option<String>, StoreError>;
    /// Unsupported.
    async fn set_password_hash(
        &self,
        user: Option<&mut UserRecord>,
        hash: &str,
    ) -> Result<(), StoreError>;

    async fn get_claims(&self, user: &UserRecord) -> Result<Vec<Claim>, StoreError>;
    async fn add_claims(
        &self,
        user: &mut UserRecord,
        claims: Option<&[Claim]>,
    ) -> Result<(), StoreError>;
    /// Unsupported.
    async fn replace_claim(
        &self,
        user: &mut UserRecord,
        claim: &Claim,
        new_claim: &Claim,
    ) -> Result<(), StoreError>;
    /// Unsupported.
    async fn remove_claims(
        &self,
        user: &mut UserRecord,
        claims: &[Claim],
    ) -> Result<(), StoreError>;
    /// Unsupported.
    async fn users_for_claim(&self, claim: &Claim) -> Result<Vec<UserRecord>, StoreError>;
}
