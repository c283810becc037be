//! Advisor Configuration Module
//!
//! Provides advisor configuration loaded from TOML files: model artifact
//! paths, the blend policy, economic weights, target limits, and input
//! defaults. Every hardcoded business value has a config counterpart so the
//! policy is auditable and tunable without touching pipeline logic.
//!
//! ## Loading Order
//!
//! 1. `FCC_ADVISOR_CONFIG` environment variable (path to TOML file)
//! 2. `advisor.toml` in the current working directory
//! 3. Built-in defaults (matching the historical commissioning values)
//!
//! The loaded config is passed explicitly into `PredictionPipeline`
//! construction - there is no ambient global, which keeps the pipeline pure
//! and independently testable.

mod advisor_config;
pub mod defaults;
pub mod validation;

pub use advisor_config::*;
pub use validation::{ConfigError, ValidationWarning};
