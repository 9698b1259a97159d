// Shared types used across layers.

pub mod error;

pub use error::AnalyzerError;
