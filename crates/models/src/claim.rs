use serde::{Deserialize, Serialize};

/// Catalog entry: a known claim kind and the value it carries when granted.
///
/// This is also the claim shape the external identity engine passes across
/// the storage contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub claim_type: String,
    pub value: String,
}

impl Claim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self { claim_type: claim_type.into(), value: value.into() }
    }
}

/// Claim assigned to a user record, materialized by copying a resolved
/// catalog entry. Duplicates on one record are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaim {
    pub claim_type: String,
    pub claim_value: String,
}

impl UserClaim {
    /// Copy a resolved catalog entry; `None` yields the empty claim.
    /// Resolution misses are therefore representable without an error;
    /// callers check [`UserClaim::is_empty`].
    pub fn from_resolved(claim: Option<&Claim>) -> Self {
        match claim {
            Some(c) => Self { claim_type: c.claim_type.clone(), claim_value: c.value.clone() },
            None => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.claim_type.is_empty() && self.claim_value.is_empty()
    }

    /// Project back into the contract's claim shape.
    pub fn to_claim(&self) -> Claim {
        Claim::new(&self.claim_type, &self.claim_value)
    }
}
