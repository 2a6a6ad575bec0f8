//! Test doubles for tree-search tools

pub mod mock;

pub use mock::{MockCall, MockTreeSearch};
