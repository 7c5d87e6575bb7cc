//! File-backed user/claim catalog.
//!
//! The catalog exclusively owns both in-memory lists for the process
//! lifetime. Each list sits behind its own `RwLock`; a write guard is held
//! across list mutation *and* the commit that follows, so a mutation and its
//! file rewrite form one exclusive section.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::{fs, sync::RwLock};
use tracing::{debug, error, info};
use uuid::Uuid;

use configs::IdentityConfig;
use models::claim::{Claim, UserClaim};
use models::user::{normalize_username, UserRecord};

use crate::errors::StoreError;

/// Username of the bootstrap account created when the user file is absent.
pub const DEFAULT_ADMIN_USERNAME: &str = "root";

/// Claim type granted to the bootstrap account.
pub const DEFAULT_ADMIN_CLAIM: &str = "SuperUser";

// Hash of "P@ssword1234". The hashing algorithm is the caller's concern; the
// catalog only ever treats this field as an opaque string.
const DEFAULT_ADMIN_PASSWORD_HASH: &str =
    "AQAAAAEAACcQAAAAEPEklpcD6/h4WXtS4mzEY76idBGQQ42lVnnKyXig8dFxMuq1/mtcp6LcqTGt4tuS+Q==";

/// In-memory user/claim catalog persisted to two JSON files.
pub struct IdentityCatalog {
    users: RwLock<Vec<UserRecord>>,
    claims: RwLock<Vec<Claim>>,
    user_path: PathBuf,
    claims_path: PathBuf,
}

impl IdentityCatalog {
    /// Open the catalog at the configured paths.
    ///
    /// Parent directories are created recursively; that is the only fallible
    /// step. A missing claims file seeds the default claim catalog, a missing
    /// user file seeds the bootstrap account, and both seeds are committed
    /// immediately. Read or parse failures are logged and swallowed — the
    /// store never fails construction over them.
    pub async fn open(cfg: &IdentityConfig) -> Result<Arc<Self>, StoreError> {
        let catalog = Self {
            users: RwLock::new(Vec::new()),
            claims: RwLock::new(Vec::new()),
            user_path: PathBuf::from(&cfg.user_db_path),
            claims_path: PathBuf::from(&cfg.claims_db_path),
        };

        ensure_parent_dir(&catalog.user_path).await?;
        ensure_parent_dir(&catalog.claims_path).await?;

        // Claims first: the bootstrap user resolves its claim from the catalog.
        catalog.load_claims().await;
        catalog.load_users().await;

        Ok(Arc::new(catalog))
    }

    /// Look up a user by exact normalized-username match.
    pub async fn find_by_name(&self, normalized_username: &str) -> Option<UserRecord> {
        let users = self.users.read().await;
        users.iter().find(|u| u.normalized_username == normalized_username).cloned()
    }

    /// Assigned claims of the user with the given id; `None` when no record
    /// carries that id.
    pub async fn claims_for_user(&self, user_id: Uuid) -> Option<Vec<UserClaim>> {
        let users = self.users.read().await;
        users.iter().find(|u| u.id == user_id).map(|u| u.claims.clone())
    }

    /// Resolve a claim definition by exact type name. A miss yields the
    /// empty claim rather than an error; callers check `is_empty`.
    pub async fn resolve_claim(&self, type_name: &str) -> UserClaim {
        let claims = self.claims.read().await;
        UserClaim::from_resolved(claims.iter().find(|c| c.claim_type == type_name))
    }

    /// Append a user and commit. Returns `false` without touching the list
    /// when another record already holds the same normalized username.
    pub async fn create_user(&self, user: UserRecord) -> bool {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.normalized_username == user.normalized_username) {
            return false;
        }
        users.push(user);
        self.commit_users(&users).await;
        true
    }

    /// Replace the record sharing the supplied user's normalized username and
    /// commit. Returns `false` when no such record exists; internal failures
    /// are logged and reported as `false`, never propagated.
    pub async fn update_user(&self, user: UserRecord) -> bool {
        let mut users = self.users.write().await;
        if !users.iter().any(|u| u.normalized_username == user.normalized_username) {
            return false;
        }
        users.retain(|u| u.normalized_username != user.normalized_username);
        users.push(user);
        self.commit_users(&users).await;
        true
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn claim_count(&self) -> usize {
        self.claims.read().await.len()
    }

    /// Serialize the full user list and overwrite the user file. Failures are
    /// logged and swallowed: the in-memory list stays authoritative and
    /// callers must not infer durability from a returned mutation.
    async fn commit_users(&self, users: &[UserRecord]) {
        debug!(count = users.len(), "committing user db");
        match serde_json::to_vec_pretty(users) {
            Ok(bytes) => {
                if let Err(err) = fs::write(&self.user_path, bytes).await {
                    error!(path = %self.user_path.display(), %err, "failed to commit user db");
                }
            }
            Err(err) => error!(%err, "failed to serialize user db"),
        }
    }

    /// Same full-rewrite discipline for the claim catalog.
    async fn commit_claims(&self, claims: &[Claim]) {
        debug!(count = claims.len(), "committing claims db");
        match serde_json::to_vec_pretty(claims) {
            Ok(bytes) => {
                if let Err(err) = fs::write(&self.claims_path, bytes).await {
                    error!(path = %self.claims_path.display(), %err, "failed to commit claims db");
                }
            }
            Err(err) => error!(%err, "failed to serialize claims db"),
        }
    }

    async fn load_claims(&self) {
        if fs::metadata(&self.claims_path).await.is_ok() {
            match fs::read(&self.claims_path).await {
                Ok(bytes) => match serde_json::from_slice::<Vec<Claim>>(&bytes) {
                    Ok(list) => {
                        info!(count = list.len(), "loaded claims db");
                        *self.claims.write().await = list;
                    }
                    Err(err) => {
                        error!(path = %self.claims_path.display(), %err, "failed to parse claims db")
                    }
                },
                Err(err) => {
                    error!(path = %self.claims_path.display(), %err, "failed to read claims db")
                }
            }
        } else {
            self.bootstrap_claims().await;
        }
    }

    async fn load_users(&self) {
        if fs::metadata(&self.user_path).await.is_ok() {
            match fs::read(&self.user_path).await {
                Ok(bytes) => match serde_json::from_slice::<Vec<UserRecord>>(&bytes) {
                    Ok(list) => {
                        info!(count = list.len(), "loaded user db");
                        *self.users.write().await = list;
                    }
                    Err(err) => {
                        error!(path = %self.user_path.display(), %err, "failed to parse user db")
                    }
                },
                Err(err) => error!(path = %self.user_path.display(), %err, "failed to read user db"),
            }
        } else {
            self.bootstrap_users().await;
        }
    }

    /// Seed the default claim catalog and commit it.
    async fn bootstrap_claims(&self) {
        info!("claims db absent; seeding default claim catalog");
        let mut claims = self.claims.write().await;
        claims.push(Claim::new(DEFAULT_ADMIN_CLAIM, "True"));
        claims.push(Claim::new("IsAdmin", "True"));
        self.commit_claims(&claims).await;
    }

    /// Seed the bootstrap account and commit it.
    async fn bootstrap_users(&self) {
        info!(username = DEFAULT_ADMIN_USERNAME, "user db absent; seeding bootstrap account");
        let mut user = UserRecord {
            id: Uuid::new_v4(),
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            normalized_username: normalize_username(DEFAULT_ADMIN_USERNAME),
            password_hash: DEFAULT_ADMIN_PASSWORD_HASH.to_string(),
            claims: Vec::new(),
        };
        user.claims.push(self.resolve_claim(DEFAULT_ADMIN_CLAIM).await);

        let mut users = self.users.write().await;
        users.push(user);
        self.commit_users(&users).await;
    }
}

async fn ensure_parent_dir(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(|e| StoreError::Io(e.to_string()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_identity_config() -> IdentityConfig {
        let dir = std::env::temp_dir().join(format!("identity_catalog_{}", Uuid::new_v4()));
        IdentityConfig {
            user_db_path: dir.join("users.json").to_string_lossy().into_owned(),
            claims_db_path: dir.join("claims.json").to_string_lossy().into_owned(),
        }
    }

    #[tokio::test]
    async fn bootstrap_seeds_defaults_and_persists() -> Result<(), anyhow::Error> {
        let cfg = temp_identity_config();
        let catalog = IdentityCatalog::open(&cfg).await?;

        assert_eq!(catalog.user_count().await, 1);
        assert_eq!(catalog.claim_count().await, 2);

        let root = catalog.find_by_name("ROOT").await.expect("bootstrap user");
        assert_eq!(root.username, DEFAULT_ADMIN_USERNAME);
        assert!(!root.password_hash.is_empty());
        assert_eq!(root.claims.len(), 1);
        assert_eq!(root.claims[0].claim_type, "SuperUser");
        assert_eq!(root.claims[0].claim_value, "True");

        // Both seeds must be detectable from disk by a fresh instance.
        let reloaded = IdentityCatalog::open(&cfg).await?;
        assert_eq!(reloaded.user_count().await, 1);
        assert_eq!(reloaded.claim_count().await, 2);
        assert!(reloaded.find_by_name("ROOT").await.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_duplicate_normalized_username() -> Result<(), anyhow::Error> {
        let cfg = temp_identity_config();
        let catalog = IdentityCatalog::open(&cfg).await?;

        let first = UserRecord::new("Alice", "hash-1")?;
        assert!(catalog.create_user(first).await);

        // Same normalized name, different casing and id.
        let second = UserRecord::new("ALICE", "hash-2")?;
        assert!(!catalog.create_user(second).await);

        assert_eq!(catalog.user_count().await, 2); // bootstrap root + alice
        let found = catalog.find_by_name("ALICE").await.expect("alice");
        assert_eq!(found.password_hash, "hash-1");
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_user_fails_and_leaves_catalog_unchanged() -> Result<(), anyhow::Error>
    {
        let cfg = temp_identity_config();
        let catalog = IdentityCatalog::open(&cfg).await?;

        let ghost = UserRecord::new("nobody", "hash")?;
        assert!(!catalog.update_user(ghost).await);
        assert_eq!(catalog.user_count().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_exactly_one_record() -> Result<(), anyhow::Error> {
        let cfg = temp_identity_config();
        let catalog = IdentityCatalog::open(&cfg).await?;

        let user = UserRecord::new("bob", "old-hash")?;
        assert!(catalog.create_user(user.clone()).await);

        let mut updated = user;
        updated.password_hash = "new-hash".into();
        assert!(catalog.update_user(updated).await);

        assert_eq!(catalog.user_count().await, 2);
        let found = catalog.find_by_name("BOB").await.expect("bob");
        assert_eq!(found.password_hash, "new-hash");
        Ok(())
    }

    #[tokio::test]
    async fn resolve_unknown_claim_is_empty() -> Result<(), anyhow::Error> {
        let cfg = temp_identity_config();
        let catalog = IdentityCatalog::open(&cfg).await?;

        let resolved = catalog.resolve_claim("NoSuchClaim").await;
        assert!(resolved.is_empty());

        let known = catalog.resolve_claim("IsAdmin").await;
        assert_eq!(known.claim_value, "True");
        Ok(())
    }

    #[tokio::test]
    async fn claims_for_unknown_user_is_none() -> Result<(), anyhow::Error> {
        let cfg = temp_identity_config();
        let catalog = IdentityCatalog::open(&cfg).await?;
        assert!(catalog.claims_for_user(Uuid::new_v4()).await.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn round_trip_reload_preserves_users() -> Result<(), anyhow::Error> {
        let cfg = temp_identity_config();
        let catalog = IdentityCatalog::open(&cfg).await?;

        let names = ["carol", "dave", "erin"];
        for name in names {
            let mut user = UserRecord::new(name, &format!("hash-{name}"))?;
            user.claims.push(catalog.resolve_claim("IsAdmin").await);
            assert!(catalog.create_user(user).await);
        }

        let reloaded = IdentityCatalog::open(&cfg).await?;
        assert_eq!(reloaded.user_count().await, 1 + names.len());
        for name in names {
            let found = reloaded
                .find_by_name(&normalize_username(name))
                .await
                .unwrap_or_else(|| panic!("{name} not reloaded"));
            assert_eq!(found.username, name);
            assert_eq!(found.password_hash, format!("hash-{name}"));
            assert_eq!(found.claims.len(), 1);
        }
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_user_db_is_swallowed() -> Result<(), anyhow::Error> {
        let cfg = temp_identity_config();
        // First open seeds the files, then we corrupt the user db.
        let _ = IdentityCatalog::open(&cfg).await?;
        tokio::fs::write(&cfg.user_db_path, b"{ not json").await?;

        let catalog = IdentityCatalog::open(&cfg).await?;
        assert_eq!(catalog.user_count().await, 0);
        assert_eq!(catalog.claim_count().await, 2);
        Ok(())
    }
}
