use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the host.
///
/// `InputNotFound` and `MalformedInput` are fatal and stop the pipeline
/// before any traversal. `ExportWriteFailure` is scoped to one artifact.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("File not found: {}", path.display())]
    InputNotFound { path: PathBuf },
    #[error("Malformed input {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },
    #[error("Failed to write {artifact}: {reason}")]
    ExportWriteFailure { artifact: String, reason: String },
}

impl AnalyzerError {
    /// Whether the pipeline must stop before producing anything.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AnalyzerError::ExportWriteFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatality() {
        let missing = AnalyzerError::InputNotFound { path: "Main.yaml".into() };
        assert!(missing.is_fatal());
        assert_eq!(missing.to_string(), "File not found: Main.yaml");

        let write = AnalyzerError::ExportWriteFailure {
            artifact: "ast.dot".into(),
            reason: "disk full".into(),
        };
        assert!(!write.is_fatal());
        assert_eq!(write.to_string(), "Failed to write ast.dot: disk full");
    }
}
