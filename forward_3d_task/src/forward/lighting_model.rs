/// Lighting model descriptor and the job that publishes it each frame

use std::sync::Arc;
use crate::error::Result;
use crate::task::{Job, RenderContext};

/// Lighting switches shared by the lighting-dependent jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightingModel {
    pub unlit: bool,
    pub emissive: bool,
    pub lightmap: bool,
    pub background: bool,
    pub ambient: bool,
    pub directional: bool,
    pub point: bool,
    pub spot: bool,
    pub wireframe: bool,
}

impl Default for LightingModel {
    fn default() -> Self {
        Self {
            unlit: true,
            emissive: true,
            lightmap: true,
            background: true,
            ambient: true,
            directional: true,
            point: true,
            spot: true,
            wireframe: false,
        }
    }
}

/// Outputs the configured lighting model
pub struct MakeLightingModel {
    model: Arc<LightingModel>,
}

impl MakeLightingModel {
    pub fn new(model: LightingModel) -> Self {
        Self { model: Arc::new(model) }
    }
}

impl Job for MakeLightingModel {
    type Input = ();
    type Output = Arc<LightingModel>;

    fn run(&mut self, _ctx: &mut RenderContext<'_>, _input: ()) -> Result<Arc<LightingModel>> {
        Ok(self.model.clone())
    }
}

#[cfg(test)]
#[path = "lighting_model_tests.rs"]
mod tests;
