//! GPU mirror of a [`ShaderProgram`].

use engine_asset::{Asset, ShaderProgram, ShaderStage, SyncState};

/// A linked program built from the non-empty stages of its source.
#[derive(Debug, Clone)]
pub struct GlShaderProgram {
    sync: SyncState,
    stages: Vec<ShaderStage>,
    upload_count: u64,
}

impl GlShaderProgram {
    pub(crate) fn build(program: &ShaderProgram) -> Self {
        let mut gl = Self {
            sync: SyncState::new(program.id()),
            stages: Vec::new(),
            upload_count: 0,
        };
        gl.upload(program);
        gl
    }

    /// Recompile from the non-empty stages only.
    pub(crate) fn upload(&mut self, program: &ShaderProgram) {
        self.stages = program.active_stages().map(|(stage, _)| stage).collect();
        self.upload_count += 1;
        self.sync.mark_updated(program);
    }

    /// Version bookkeeping against the source program.
    #[must_use]
    pub fn sync(&self) -> &SyncState {
        &self.sync
    }

    /// Stages compiled by the last upload, in pipeline order.
    #[must_use]
    pub fn stages(&self) -> &[ShaderStage] {
        &self.stages
    }

    /// How many times the program has been rebuilt.
    #[must_use]
    pub fn upload_count(&self) -> u64 {
        self.upload_count
    }
}
