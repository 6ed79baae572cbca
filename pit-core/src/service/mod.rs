//! Seam between the calculator and the service that hosts it.
//!
//! Persistence and identity stay outside this crate: the host passes in an
//! [`EstimateStore`] and a [`PrincipalId`], and [`ProfileEstimateService`]
//! does the rest.

mod profile;
mod store;

pub use profile::{ProfileEstimateService, ServiceError};
pub use store::{EstimateStore, PrincipalId, StoreError};
