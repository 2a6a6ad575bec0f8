pub mod tree_search;

pub use tree_search::TreeSearch;
