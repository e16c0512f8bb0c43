//! Shader program sources.

use std::any::Any;
use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::asset::{Asset, AssetHeader, AssetType};
use crate::error::AssetError;

/// Pipeline stage a source belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    TessControl,
    TessEvaluation,
    Geometry,
    Fragment,
}

impl ShaderStage {
    /// Every stage in pipeline order.
    pub const ALL: [ShaderStage; 5] = [
        ShaderStage::Vertex,
        ShaderStage::TessControl,
        ShaderStage::TessEvaluation,
        ShaderStage::Geometry,
        ShaderStage::Fragment,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Source text for each pipeline stage. Empty stages are unused.
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    header: AssetHeader,
    sources: [String; 5],
}

impl ShaderProgram {
    /// A program with every stage empty.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: AssetHeader::new(name),
            sources: Default::default(),
        }
    }

    /// Builder form of [`set_source`](Self::set_source).
    #[must_use]
    pub fn with_source(mut self, stage: ShaderStage, source: impl Into<String>) -> Self {
        self.set_source(stage, source);
        self
    }

    /// The source of one stage (empty if unused).
    #[must_use]
    pub fn source(&self, stage: ShaderStage) -> &str {
        &self.sources[stage.index()]
    }

    /// Stages with a non-empty source, in pipeline order.
    pub fn active_stages(&self) -> impl Iterator<Item = (ShaderStage, &str)> {
        ShaderStage::ALL
            .into_iter()
            .map(|stage| (stage, self.source(stage)))
            .filter(|(_, source)| !source.is_empty())
    }

    /// Replace one stage's source.
    pub fn set_source(&mut self, stage: ShaderStage, source: impl Into<String>) {
        self.sources[stage.index()] = source.into();
        self.header.mark_dirty();
    }

    /// Load one stage's source from a file.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Io`] if the file cannot be read; the program is
    /// left unchanged.
    pub fn load_stage_from_file(
        &mut self,
        stage: ShaderStage,
        path: impl AsRef<Path>,
    ) -> Result<(), AssetError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(program = %self.header.name(), %stage, path = %path.display(), "loaded shader stage");
        self.set_source(stage, source);
        Ok(())
    }
}

impl Asset for ShaderProgram {
    fn header(&self) -> &AssetHeader {
        &self.header
    }

    fn asset_type(&self) -> AssetType {
        AssetType::ShaderProgram
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_active_stages_skip_empty() {
        let program = ShaderProgram::new("basic")
            .with_source(ShaderStage::Vertex, "void main() {}")
            .with_source(ShaderStage::Fragment, "void main() {}");
        let stages: Vec<ShaderStage> = program.active_stages().map(|(s, _)| s).collect();
        assert_eq!(stages, vec![ShaderStage::Vertex, ShaderStage::Fragment]);
        assert_eq!(program.source(ShaderStage::Geometry), "");
    }

    #[test]
    fn test_load_stage_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "#version 330\nvoid main() {{}}\n").unwrap();
        let mut program = ShaderProgram::new("from-file");
        program
            .load_stage_from_file(ShaderStage::Geometry, file.path())
            .unwrap();
        assert!(program.source(ShaderStage::Geometry).starts_with("#version 330"));
    }

    #[test]
    fn test_missing_file_leaves_program_unchanged() {
        let mut program = ShaderProgram::new("p").with_source(ShaderStage::Vertex, "v");
        let err = program
            .load_stage_from_file(ShaderStage::Vertex, "/no/such/shader.vert")
            .unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
        assert_eq!(program.source(ShaderStage::Vertex), "v");
    }
}
