//! External tool integration for Pythia
//!
//! Wraps the RAxML-NG executable used to infer parsimony trees and to
//! compute RF distances, behind the [`TreeSearch`] trait so that feature
//! collection can run against a mock in tests.

// Modules
pub mod invocation;
pub mod raxmlng;
pub mod testing;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use invocation::{CapturedOutput, Invocation, InvocationState};
pub use raxmlng::RaxmlNg;
pub use testing::MockTreeSearch;
pub use traits::TreeSearch;
pub use types::{
    AlignmentSummary, ParsimonySettings, RfDistResult, RfDistSettings, DEFAULT_PARSIMONY_TREES,
};
