// Analyzer module: trend metrics and recommendation filtering.

pub mod recommendation;
pub mod trend;

// Re-export the main Analyzer implementation for ease of use.
pub use trend::{Analyzer, TrendAnalyzer};
