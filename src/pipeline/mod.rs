//! Prediction Pipeline Module
//!
//! One synchronous cycle per request:
//!
//! ```text
//! FeatureVector -> primary.predict ---+
//!                                     +--> Blend -> Validate -> Score -> PredictionReport
//! FeatureVector -> secondary.predict -+
//! ```
//!
//! The pipeline is built once at startup from `AdvisorConfig` (models loaded
//! once, read-only thereafter) and holds no mutable state - running the same
//! feature vector twice yields identical predictions and scores.

mod blender;
mod scorer;
mod state;
mod validator;

pub use blender::{BlendPolicy, PredictionBlender};
pub use scorer::ValueScorer;
pub use state::SessionState;
pub use validator::{RangeSpec, RangeValidator};

use thiserror::Error;
use tracing::debug;

use crate::config::{AdvisorConfig, ConfigError};
use crate::model::{ModelAdapter, ModelError};
use crate::types::{
    positions, FeatureVector, InputError, PredictedTarget, PredictionReport,
};

/// A fatal initialization problem. The process cannot serve predictions and
/// should exit; there is no recovery path other than restart with fixed
/// config or artifacts.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// The assembled advisor: two loaded models plus the blend/validate/score
/// stages, all resolved from one `AdvisorConfig` at startup.
#[derive(Debug)]
pub struct PredictionPipeline {
    primary: ModelAdapter,
    secondary: ModelAdapter,
    blender: PredictionBlender,
    validator: RangeValidator,
    scorer: ValueScorer,
}

impl PredictionPipeline {
    /// Load both model artifacts and resolve the pipeline stages.
    pub fn from_config(config: &AdvisorConfig) -> Result<Self, StartupError> {
        let primary = ModelAdapter::load("primary", &config.models.primary)?;
        let secondary = ModelAdapter::load("secondary", &config.models.secondary)?;
        Ok(Self::with_adapters(primary, secondary, config))
    }

    /// Assemble a pipeline around already-loaded adapters (tests, demo).
    pub fn with_adapters(
        primary: ModelAdapter,
        secondary: ModelAdapter,
        config: &AdvisorConfig,
    ) -> Self {
        Self {
            primary,
            secondary,
            blender: PredictionBlender::new(BlendPolicy::from_config(&config.blend)),
            validator: RangeValidator::new(RangeSpec::from_limits(&config.limits)),
            scorer: ValueScorer::new(config.economics.clone()),
        }
    }

    /// Run one complete Blend -> Validate -> Score cycle.
    ///
    /// Errors only on a malformed feature vector; the downstream arithmetic
    /// cannot fail on valid numeric inputs.
    pub fn run(&self, features: &FeatureVector) -> Result<PredictionReport, InputError> {
        let primary_out = self.primary.predict(features)?;
        let secondary_out = self.secondary.predict(features)?;

        let blended = self.blender.blend(&primary_out, &secondary_out);
        let violations = self.validator.check(&blended);

        let mass_flow = features.as_row()[positions::FEED_MASS_FLOW];
        let score = self.scorer.score(&blended, mass_flow);

        debug!(
            product_value = score.product_value,
            co2 = score.co2_emission,
            optimum_ratio = score.optimum_ratio,
            violations = violations.len(),
            "Pipeline run complete"
        );

        Ok(PredictionReport {
            generated_at: chrono::Utc::now(),
            predictions: blended
                .iter()
                .map(|(target, value)| PredictedTarget {
                    target: target.to_string(),
                    value,
                })
                .collect(),
            violations,
            score,
        })
    }
}
