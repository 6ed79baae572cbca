pub mod calculations;
pub mod config;
pub mod models;
pub mod service;

pub use config::{CalculatorConfig, ConfigError, NegativeAmountPolicy};
pub use models::*;
pub use service::{EstimateStore, PrincipalId, ProfileEstimateService, ServiceError, StoreError};
