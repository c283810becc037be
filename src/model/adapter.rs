//! Named adapter over a loaded regressor artifact.
//!
//! Loading checks the artifact against the advisor's canonical feature and
//! target orders, so a schema drift between training and this build is a
//! startup failure instead of silently misaligned predictions.

use std::path::Path;

use tracing::info;

use crate::types::{FeatureVector, InputError, TargetVector, FEATURE_ORDER, TARGET_ORDER};

use super::{ModelError, RegressorArtifact, ARTIFACT_VERSION};

/// A loaded, validated regression model.
#[derive(Debug)]
pub struct ModelAdapter {
    name: String,
    artifact: RegressorArtifact,
}

impl ModelAdapter {
    /// Load an artifact from disk and validate it for this advisor build.
    ///
    /// Any failure here is fatal: without both models no prediction is
    /// possible.
    pub fn load(name: &str, path: &Path) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: RegressorArtifact =
            serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let adapter = Self::from_artifact(name, path, artifact)?;

        info!(
            model = %name,
            path = %path.display(),
            algorithm = %adapter.artifact.algorithm,
            trees = adapter.artifact.tree_count(),
            "Loaded regressor artifact"
        );

        Ok(adapter)
    }

    /// Wrap an already-deserialized artifact. `path` is only used for error
    /// context.
    pub fn from_artifact(
        name: &str,
        path: &Path,
        artifact: RegressorArtifact,
    ) -> Result<Self, ModelError> {
        if artifact.version != ARTIFACT_VERSION {
            return Err(ModelError::Version {
                path: path.to_path_buf(),
                found: artifact.version,
                expected: ARTIFACT_VERSION,
            });
        }

        artifact.check().map_err(|reason| ModelError::Malformed {
            path: path.to_path_buf(),
            reason,
        })?;

        check_alignment(&artifact).map_err(|reason| ModelError::SchemaMismatch {
            path: path.to_path_buf(),
            reason,
        })?;

        Ok(Self {
            name: name.to_string(),
            artifact,
        })
    }

    /// Adapter name (`primary` / `secondary`), used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Producing algorithm recorded in the artifact.
    pub fn algorithm(&self) -> &str {
        &self.artifact.algorithm
    }

    /// Run the regressor for one validated feature vector.
    ///
    /// `FeatureVector` construction already enforces completeness and
    /// finiteness; the re-check here keeps the adapter's own contract
    /// honest for callers that bypass the normal construction path.
    pub fn predict(&self, features: &FeatureVector) -> Result<TargetVector, InputError> {
        let row = features.as_row();
        for (i, value) in row.iter().enumerate() {
            if !value.is_finite() {
                return Err(InputError::NonFinite {
                    feature: FEATURE_ORDER[i].to_string(),
                    value: *value,
                });
            }
        }

        Ok(TargetVector::from_aligned(self.artifact.predict(row)))
    }
}

/// The artifact must name exactly the canonical features and targets, in
/// canonical order - positional alignment is the whole contract.
fn check_alignment(artifact: &RegressorArtifact) -> Result<(), String> {
    if artifact.feature_names.len() != FEATURE_ORDER.len() {
        return Err(format!(
            "expected {} features, artifact has {}",
            FEATURE_ORDER.len(),
            artifact.feature_names.len()
        ));
    }
    for (i, (have, want)) in artifact
        .feature_names
        .iter()
        .zip(FEATURE_ORDER.iter())
        .enumerate()
    {
        if have != want {
            return Err(format!(
                "feature {i} is '{have}', expected '{want}'"
            ));
        }
    }

    if artifact.target_names.len() != TARGET_ORDER.len() {
        return Err(format!(
            "expected {} targets, artifact has {}",
            TARGET_ORDER.len(),
            artifact.target_names.len()
        ));
    }
    for (i, (have, want)) in artifact
        .target_names
        .iter()
        .zip(TARGET_ORDER.iter())
        .enumerate()
    {
        if have != want {
            return Err(format!("target {i} is '{have}', expected '{want}'"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DecisionTree, TargetEnsemble, TreeNode};
    use crate::types::{NUM_FEATURES, NUM_TARGETS};
    use std::io::Write;

    fn constant_artifact(values: [f64; NUM_TARGETS]) -> RegressorArtifact {
        RegressorArtifact {
            version: ARTIFACT_VERSION,
            algorithm: "random_forest".to_string(),
            feature_names: FEATURE_ORDER.iter().map(|&s| s.to_string()).collect(),
            target_names: TARGET_ORDER.iter().map(|&s| s.to_string()).collect(),
            ensembles: values
                .iter()
                .map(|&v| TargetEnsemble {
                    base: 0.0,
                    tree_weight: 1.0,
                    trees: vec![DecisionTree {
                        nodes: vec![TreeNode::Leaf { value: v }],
                    }],
                })
                .collect(),
        }
    }

    fn write_artifact(artifact: &RegressorArtifact) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(artifact).unwrap().as_bytes())
            .unwrap();
        file
    }

    fn default_features() -> FeatureVector {
        let map = crate::config::defaults::feature_defaults();
        FeatureVector::from_values(&map).unwrap()
    }

    #[test]
    fn load_and_predict_constant_artifact() {
        let values = [44.0, 28.0, 20.0, 93.0, 200.0, 25.0, 35.0, 1.5, 22.0, 340.0];
        let file = write_artifact(&constant_artifact(values));

        let adapter = ModelAdapter::load("primary", file.path()).unwrap();
        let out = adapter.predict(&default_features()).unwrap();
        assert_eq!(out.as_slice(), &values);
    }

    #[test]
    fn missing_artifact_is_a_startup_error() {
        let err = ModelAdapter::load("primary", Path::new("/nonexistent/model.json"));
        assert!(matches!(err, Err(ModelError::Io { .. })));
    }

    #[test]
    fn shuffled_feature_schema_is_rejected() {
        let mut artifact = constant_artifact([0.0; NUM_TARGETS]);
        artifact.feature_names.swap(0, 1);
        let file = write_artifact(&artifact);

        let err = ModelAdapter::load("primary", file.path());
        assert!(matches!(err, Err(ModelError::SchemaMismatch { .. })));
    }

    #[test]
    fn truncated_target_schema_is_rejected() {
        let mut artifact = constant_artifact([0.0; NUM_TARGETS]);
        artifact.target_names.pop();
        artifact.ensembles.pop();
        let file = write_artifact(&artifact);

        let err = ModelAdapter::load("primary", file.path());
        assert!(matches!(err, Err(ModelError::SchemaMismatch { .. })));
    }

    #[test]
    fn future_version_is_rejected() {
        let mut artifact = constant_artifact([0.0; NUM_TARGETS]);
        artifact.version = ARTIFACT_VERSION + 1;
        let file = write_artifact(&artifact);

        let err = ModelAdapter::load("primary", file.path());
        assert!(matches!(err, Err(ModelError::Version { .. })));
    }

    #[test]
    fn garbage_json_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = ModelAdapter::load("primary", file.path());
        assert!(matches!(err, Err(ModelError::Parse { .. })));
    }

    #[test]
    fn branch_artifact_responds_to_inputs() {
        let mut artifact = constant_artifact([0.0; NUM_TARGETS]);
        // gasoline yield depends on reaction temperature (feature 7)
        artifact.ensembles[0] = TargetEnsemble {
            base: 40.0,
            tree_weight: 1.0,
            trees: vec![DecisionTree {
                nodes: vec![
                    TreeNode::Branch {
                        feature: 7,
                        threshold: 500.0,
                        left: 1,
                        right: 2,
                    },
                    TreeNode::Leaf { value: 2.0 },
                    TreeNode::Leaf { value: 5.0 },
                ],
            }],
        };
        assert_eq!(artifact.feature_names.len(), NUM_FEATURES);
        let file = write_artifact(&artifact);
        let adapter = ModelAdapter::load("primary", file.path()).unwrap();

        // default reaction temp 495.3 <= 500 -> left leaf
        let out = adapter.predict(&default_features()).unwrap();
        assert_eq!(out.value_at(0), 42.0);
    }
}
