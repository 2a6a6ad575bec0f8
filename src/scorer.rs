//! Difficulty scorer contract

use crate::features::FeatureVector;
use pythia_core::{PythiaError, PythiaResult};

/// A trained model mapping features to a raw difficulty score
pub trait DifficultyScorer {
    /// Names of the features the scorer was trained with
    fn feature_names(&self) -> Vec<String>;

    /// Raw, unclipped score for `features`
    fn score(&self, features: &FeatureVector) -> PythiaResult<f64>;
}

/// Predict the difficulty of `features` with `scorer`, clipped to [0, 1]
pub fn predict<S: DifficultyScorer + ?Sized>(
    scorer: &S,
    features: &FeatureVector,
) -> PythiaResult<f64> {
    let missing: Vec<String> = scorer
        .feature_names()
        .into_iter()
        .filter(|name| !features.contains(name))
        .collect();
    if !missing.is_empty() {
        return Err(PythiaError::Prediction(format!(
            "the features do not contain all features the scorer was trained with, missing: {}",
            missing.join(", ")
        )));
    }

    let raw = scorer.score(features)?;
    if !raw.is_finite() {
        return Err(PythiaError::Prediction(format!(
            "the scorer returned a non-finite score ({})",
            raw
        )));
    }

    Ok(raw.clamp(0.0, 1.0))
}

/// Scorer computing a fixed linear combination of features
#[derive(Debug, Clone, Default)]
pub struct LinearScorer {
    intercept: f64,
    weights: Vec<(String, f64)>,
}

impl LinearScorer {
    pub fn new(intercept: f64) -> Self {
        Self {
            intercept,
            weights: Vec::new(),
        }
    }

    pub fn with_weight(mut self, feature: impl Into<String>, weight: f64) -> Self {
        self.weights.push((feature.into(), weight));
        self
    }
}

impl DifficultyScorer for LinearScorer {
    fn feature_names(&self) -> Vec<String> {
        self.weights.iter().map(|(name, _)| name.clone()).collect()
    }

    fn score(&self, features: &FeatureVector) -> PythiaResult<f64> {
        self.weights.iter().try_fold(self.intercept, |acc, (name, weight)| {
            features
                .get(name)
                .map(|value| acc + weight * value)
                .ok_or_else(|| PythiaError::Prediction(format!("missing feature {}", name)))
        })
    }
}
