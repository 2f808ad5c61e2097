/// Background (skybox) compositing

use std::sync::Arc;
use crate::error::Result;
use crate::gpu::{do_in_batch, Batch};
use crate::task::{Job, RenderArgs, RenderContext, Varying};
use super::lighting_model::LightingModel;

/// Background stage, resolved for the frame by the external lighting side
pub trait BackgroundStage: Send + Sync {
    /// Whether there is a background to draw this frame
    fn has_background(&self) -> bool;

    /// Record the background draw
    fn render(&self, batch: &mut Batch, args: &RenderArgs);
}

/// Background stage with nothing to draw
pub struct NoBackground;

impl BackgroundStage for NoBackground {
    fn has_background(&self) -> bool {
        false
    }

    fn render(&self, _batch: &mut Batch, _args: &RenderArgs) {}
}

/// Draws the background stage when the lighting model enables it
pub struct DrawBackgroundStage {
    stage: Arc<dyn BackgroundStage>,
}

impl DrawBackgroundStage {
    pub fn new(stage: Arc<dyn BackgroundStage>) -> Self {
        Self { stage }
    }
}

impl Job for DrawBackgroundStage {
    type Input = Varying<Arc<LightingModel>>;
    type Output = ();

    fn run(&mut self, ctx: &mut RenderContext<'_>, lighting: Arc<LightingModel>) -> Result<()> {
        if !lighting.background || !self.stage.has_background() {
            return Ok(());
        }

        let args = ctx.args;
        let view = ctx.view;
        let stage = &self.stage;
        do_in_batch(ctx.gpu, "DrawBackgroundDeferred", |batch| {
            batch.enable_skybox(true);
            batch.set_viewport_transform(args.viewport);
            batch.set_state_scissor_rect(args.viewport);
            batch.set_projection_transform(view.eval_projection_matrix());
            batch.set_view_transform(view.eval_view_transform());

            stage.render(batch, args);
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "background_tests.rs"]
mod tests;
