use std::fmt;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Profile not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Backend(String),
}

/// Identifier of the authenticated principal whose profile an estimate
/// belongs to. Issued by whatever identity provider fronts the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalId(String);

impl PrincipalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persistence collaborator that keeps the latest estimate on a profile.
///
/// This crate ships no implementation; the hosting service supplies one.
#[async_trait]
pub trait EstimateStore: Send + Sync {
    async fn save_estimated_tax(
        &self,
        principal: &PrincipalId,
        estimated_tax: Decimal,
    ) -> Result<(), StoreError>;
}
