use thiserror::Error;
use tracing::info;

use super::store::{EstimateStore, PrincipalId, StoreError};
use crate::calculations::{InputError, LiabilityCalculator, RawTaxInput, TaxInputNormalizer};
use crate::config::CalculatorConfig;
use crate::models::LiabilityResult;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Computes a principal's liability from a profile payload and records the
/// resulting tax on their profile.
pub struct ProfileEstimateService<S> {
    normalizer: TaxInputNormalizer,
    calculator: LiabilityCalculator,
    store: S,
}

impl<S: EstimateStore> ProfileEstimateService<S> {
    /// `config` is used as given. Run [`CalculatorConfig::validate`] first
    /// when it was assembled in code.
    pub fn new(
        config: CalculatorConfig,
        store: S,
    ) -> Self {
        Self {
            normalizer: TaxInputNormalizer::from_config(&config),
            calculator: LiabilityCalculator::new(config),
            store,
        }
    }

    pub fn calculator(&self) -> &LiabilityCalculator {
        &self.calculator
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Normalizes `raw`, computes the liability and stores `tax_due` for
    /// `principal`.
    ///
    /// # Errors
    ///
    /// * [`ServiceError::Input`]: the payload failed normalization. Nothing
    ///   is stored.
    /// * [`ServiceError::Store`]: the store rejected the write.
    pub async fn estimate(
        &self,
        principal: &PrincipalId,
        raw: &RawTaxInput,
    ) -> Result<LiabilityResult, ServiceError> {
        let input = self.normalizer.normalize(raw)?;
        let result = self.calculator.compute(&input);

        self.store
            .save_estimated_tax(principal, result.tax_due)
            .await?;
        info!(%principal, tax_due = %result.tax_due, "stored estimated tax");

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::config::NegativeAmountPolicy;

    // ── stub store ───────────────────────────────────────────────────────
    // Records every write so tests can assert what reached persistence.
    #[derive(Default)]
    struct RecordingStore {
        saved: Mutex<Vec<(PrincipalId, Decimal)>>,
    }

    impl RecordingStore {
        fn saved(&self) -> Vec<(PrincipalId, Decimal)> {
            self.saved.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EstimateStore for RecordingStore {
        async fn save_estimated_tax(
            &self,
            principal: &PrincipalId,
            estimated_tax: Decimal,
        ) -> Result<(), StoreError> {
            self.saved
                .lock()
                .unwrap()
                .push((principal.clone(), estimated_tax));
            Ok(())
        }
    }

    /// A store with no profiles at all.
    struct MissingProfileStore;

    #[async_trait]
    impl EstimateStore for MissingProfileStore {
        async fn save_estimated_tax(
            &self,
            _principal: &PrincipalId,
            _estimated_tax: Decimal,
        ) -> Result<(), StoreError> {
            Err(StoreError::NotFound)
        }
    }

    fn payload() -> RawTaxInput {
        RawTaxInput {
            employment_income: Some(dec!(15000000)),
            pension_contribution: Some(dec!(1000000)),
            house_rent: Some(dec!(3000000)),
            ..RawTaxInput::default()
        }
    }

    #[tokio::test]
    async fn estimate_stores_tax_for_principal() {
        let service =
            ProfileEstimateService::new(CalculatorConfig::default(), RecordingStore::default());
        let principal = PrincipalId::new("ada@example.com");

        let result = service.estimate(&principal, &payload()).await.unwrap();

        assert_eq!(result.tax_due, dec!(2265000));
        assert_eq!(service.store().saved(), vec![(principal, dec!(2265000))]);
    }

    #[tokio::test]
    async fn estimate_with_invalid_input_stores_nothing() {
        let service =
            ProfileEstimateService::new(CalculatorConfig::default(), RecordingStore::default());
        let raw = RawTaxInput {
            period: Some("weekly".to_string()),
            ..payload()
        };

        let result = service
            .estimate(&PrincipalId::new("ada@example.com"), &raw)
            .await;

        assert_eq!(
            result,
            Err(ServiceError::Input(InputError::InvalidPeriod(
                "weekly".to_string()
            )))
        );
        assert!(service.store().saved().is_empty());
    }

    #[tokio::test]
    async fn estimate_follows_configured_negative_policy() {
        let config = CalculatorConfig {
            negative_amounts: NegativeAmountPolicy::Clamp,
            ..CalculatorConfig::default()
        };
        let service = ProfileEstimateService::new(config, RecordingStore::default());
        let raw = RawTaxInput {
            employment_income: Some(dec!(1000000)),
            mortgage_interest: Some(dec!(-100000)),
            ..RawTaxInput::default()
        };

        let result = service
            .estimate(&PrincipalId::new("ada@example.com"), &raw)
            .await
            .unwrap();

        assert_eq!(result.tax_due, dec!(30000));
    }

    #[tokio::test]
    async fn estimate_propagates_store_error() {
        let service = ProfileEstimateService::new(CalculatorConfig::default(), MissingProfileStore);

        let result = service
            .estimate(&PrincipalId::new("nobody@example.com"), &payload())
            .await;

        assert_eq!(result, Err(ServiceError::Store(StoreError::NotFound)));
    }

    #[test]
    fn principal_id_displays_raw_value() {
        let principal = PrincipalId::new("ada@example.com");

        assert_eq!(principal.to_string(), "ada@example.com");
        assert_eq!(principal.as_str(), "ada@example.com");
    }
}
