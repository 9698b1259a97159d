// Infrastructure adapters: document parser, output directory, config, pool.

pub mod concurrency;
pub mod config;

use crate::common::AnalyzerError;
use crate::domain::document::{DocumentFormat, NodeDocument};
use crate::domain::Ast;
use crate::ports::{ArtifactSink, AstParser};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads a tree from its YAML or JSON document form.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentAstParser {
    /// Forced format; inferred from the file extension when unset.
    pub format: Option<DocumentFormat>,
}

impl DocumentAstParser {
    pub fn new(format: Option<DocumentFormat>) -> Self {
        Self { format }
    }
}

impl AstParser for DocumentAstParser {
    fn parse(&self, path: &Path) -> Result<Ast, AnalyzerError> {
        if !path.is_file() {
            return Err(AnalyzerError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        let malformed = |reason: String| AnalyzerError::MalformedInput {
            path: path.to_path_buf(),
            reason,
        };

        let format = self
            .format
            .or_else(|| DocumentFormat::from_path(path))
            .ok_or_else(|| malformed("unknown document format, expected .yaml, .yml or .json".to_string()))?;
        let text = fs::read_to_string(path).map_err(|e| malformed(e.to_string()))?;

        let doc = NodeDocument::decode(&text, format).map_err(|e| malformed(e.to_string()))?;
        let ast = Ast::from_document(&doc).map_err(|e| malformed(e.to_string()))?;
        debug!("Parsed {} ({} nodes)", path.display(), ast.len());
        Ok(ast)
    }
}

/// Writes artifacts as files inside one directory.
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the directory (and parents) if needed.
    pub fn create(root: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = Self::new(root);
        fs::create_dir_all(&dir.root)?;
        Ok(dir)
    }

    pub fn path(&self) -> &Path {
        &self.root
    }
}

impl ArtifactSink for OutputDir {
    fn write(&self, name: &str, contents: &str) -> io::Result<()> {
        let path = self.root.join(name);
        // The handle is closed when `writer` drops, on success or error.
        let mut writer = BufWriter::new(File::create(&path)?);
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
        debug!("{} bytes -> {}", contents.len(), path.display());
        Ok(())
    }
}
