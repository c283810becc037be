//! FCC Advisor: Product-Quality Prediction & Optimum-Value Decision Support
//!
//! Thin decision-support layer over two pre-trained regression models for a
//! fluid catalytic cracking unit.
//!
//! ## Architecture
//!
//! - **Model Adapters**: two read-only regressor artifacts loaded at startup
//! - **Prediction Blender**: per-target override/correction policy as data
//! - **Range Validator**: flags blended predictions outside configured limits
//! - **Value Scorer**: product value, CO2 emission, and the optimum ratio

pub mod config;
pub mod display;
pub mod model;
pub mod pipeline;
pub mod types;

// Re-export configuration
pub use config::{AdvisorConfig, ConfigError, EconomicsConfig, TargetRange};

// Re-export model components
pub use model::{ModelAdapter, ModelError, RegressorArtifact};

// Re-export the pipeline
pub use pipeline::{
    BlendPolicy, PredictionBlender, PredictionPipeline, RangeSpec, RangeValidator, SessionState,
    StartupError, ValueScorer,
};

// Re-export commonly used types
pub use types::{
    BlendedPrediction, FeatureVector, InputError, PredictedTarget, PredictionReport,
    RangeViolation, ScoreResult, TargetVector,
};
