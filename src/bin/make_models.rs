//! Demo Model Artifact Generator
//!
//! Generates a plausible pair of regressor artifacts so the advisor can run
//! end-to-end without the unit's proprietary trained models:
//! - `primary_rf.json`: mean-of-trees forest (base 0, tree weight 1/n)
//! - `secondary_gb.json`: boosted ensemble (base = prior, tree weight = lr)
//!
//! Leaf values are centred on historical operating points, with splits on
//! thresholds near the feature defaults, so default inputs produce in-range
//! predictions and perturbed inputs respond plausibly.
//!
//! # Usage
//! ```bash
//! make-models --out-dir models --seed 42
//! ```

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use fcc_advisor::config::defaults::FEATURE_DEFAULTS;
use fcc_advisor::model::{
    DecisionTree, RegressorArtifact, TargetEnsemble, TreeNode, ARTIFACT_VERSION,
};
use fcc_advisor::types::{FEATURE_ORDER, NUM_FEATURES, TARGET_ORDER};

// ============================================================================
// Historical Operating Points
// ============================================================================

/// `(center, spread)` per target, aligned to `TARGET_ORDER`. Centers sit
/// inside the configured limits; spreads keep default-input predictions
/// in range.
const TARGET_CENTERS: [(f64, f64); 10] = [
    (45.5, 2.0),  // gasoline yield wt%
    (27.0, 2.0),  // gasoline aromatics vol%
    (18.5, 2.0),  // gasoline olefins vol%
    (93.2, 0.5),  // gasoline RON
    (202.0, 4.0), // gasoline endpoint C
    (24.5, 2.0),  // LPG yield wt%
    (34.0, 1.5),  // LPG propylene wt%
    (1.6, 0.3),   // LPG C5 ratio vol%
    (22.0, 2.5),  // flue-gas CO2 t/h
    (338.0, 8.0), // diesel T95 C
];

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "make-models")]
#[command(about = "Generate demo regressor artifacts for fcc-advisor")]
#[command(version)]
struct Args {
    /// Output directory for the artifact files
    #[arg(long, default_value = "models")]
    out_dir: PathBuf,

    /// RNG seed (same seed, same artifacts)
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Trees per target ensemble
    #[arg(long, default_value = "24")]
    trees: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;

    let primary = forest_artifact(&mut rng, args.trees);
    let secondary = boosted_artifact(&mut rng, args.trees);

    for (artifact, file) in [(primary, "primary_rf.json"), (secondary, "secondary_gb.json")] {
        let path = args.out_dir.join(file);
        let json = serde_json::to_string_pretty(&artifact)?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(
            path = %path.display(),
            algorithm = %artifact.algorithm,
            trees = artifact.tree_count(),
            "Wrote demo artifact"
        );
    }

    Ok(())
}

// ============================================================================
// Artifact Construction
// ============================================================================

/// Random stump splitting one feature near its default operating value.
fn stump(rng: &mut StdRng, lo: f64, hi: f64) -> DecisionTree {
    let feature = rng.gen_range(0..NUM_FEATURES);
    let (_, default) = FEATURE_DEFAULTS[feature];
    let threshold = default * rng.gen_range(0.85..1.15);

    DecisionTree {
        nodes: vec![
            TreeNode::Branch {
                feature,
                threshold,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf { value: lo },
            TreeNode::Leaf { value: hi },
        ],
    }
}

/// Mean-of-trees forest: every tree predicts the full target value.
fn forest_artifact(rng: &mut StdRng, n_trees: usize) -> RegressorArtifact {
    let ensembles = TARGET_CENTERS
        .iter()
        .map(|&(center, spread)| {
            let trees = (0..n_trees)
                .map(|_| {
                    let delta = rng.gen_range(-spread..spread);
                    stump(rng, center - delta, center + delta)
                })
                .collect();
            TargetEnsemble {
                base: 0.0,
                tree_weight: 1.0 / n_trees as f64,
                trees,
            }
        })
        .collect();

    artifact("random_forest", ensembles)
}

/// Boosted ensemble: base prior plus small learning-rate-weighted residuals.
fn boosted_artifact(rng: &mut StdRng, n_trees: usize) -> RegressorArtifact {
    const LEARNING_RATE: f64 = 0.1;

    let ensembles = TARGET_CENTERS
        .iter()
        .map(|&(center, spread)| {
            let trees = (0..n_trees)
                .map(|_| {
                    let residual = rng.gen_range(-spread..spread) / n_trees as f64 / LEARNING_RATE;
                    stump(rng, -residual, residual)
                })
                .collect();
            TargetEnsemble {
                base: center,
                tree_weight: LEARNING_RATE,
                trees,
            }
        })
        .collect();

    artifact("gradient_boosting", ensembles)
}

fn artifact(algorithm: &str, ensembles: Vec<TargetEnsemble>) -> RegressorArtifact {
    RegressorArtifact {
        version: ARTIFACT_VERSION,
        algorithm: algorithm.to_string(),
        feature_names: FEATURE_ORDER.iter().map(|&s| s.to_string()).collect(),
        target_names: TARGET_ORDER.iter().map(|&s| s.to_string()).collect(),
        ensembles,
    }
}
