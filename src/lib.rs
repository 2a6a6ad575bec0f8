//! Pythia: predicts how difficult phylogenetic tree inference will be for a
//! multiple sequence alignment.
//!
//! The alignment statistics live in `pythia-bio`, the RAxML-NG adapter in
//! `pythia-tools`. This crate combines them into a feature vector and scores
//! it with a [`DifficultyScorer`].

pub mod features;
pub mod prediction;
pub mod scorer;

pub use features::{collect_features, FeatureVector, FEATURE_NAMES, MIN_TAXA, N_PARSIMONY_TREES};
pub use prediction::{predict_difficulty, PredictionOptions, PredictionResult};
pub use scorer::{predict, DifficultyScorer, LinearScorer};

pub use pythia_core::{Config, PythiaError, PythiaResult};
