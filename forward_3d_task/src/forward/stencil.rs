/// Full-screen stencil pass
///
/// Marks the background region of the working framebuffer in the stencil
/// buffer so later passes can skip it.

use std::sync::Arc;
use crate::error::Result;
use crate::engine_debug;
use crate::gpu::{
    do_in_batch, CompareOp, Framebuffer, GpuContext, Pipeline, PipelineDesc, PrimitiveTopology,
    ProgramDesc, ShaderDesc, ShaderSource, ShaderStage, StandardShader, State, StencilOp,
    StencilOpState,
};
use crate::task::{Job, RenderContext, Varying};

/// Stencil value of shape pixels
pub const STENCIL_SHAPE: u32 = 0;
/// Stencil bit reserved for masking
pub const STENCIL_MASK: u32 = 1 << 6;
/// Stencil bit marking background pixels
pub const STENCIL_BACKGROUND: u32 = 1 << 7;

/// Configures the stencil part of the stencil pass render state
pub type StencilConfigFn = fn(&mut State);

/// Default stencil configuration: write STENCIL_BACKGROUND where the quad passes
pub fn mark_background(state: &mut State) {
    state.depth_stencil.set_stencil_test(StencilOpState {
        fail_op: StencilOp::Keep,
        pass_op: StencilOp::Replace,
        depth_fail_op: StencilOp::Keep,
        compare_op: CompareOp::Always,
        compare_mask: 0xFF,
        write_mask: 0xFF,
        reference: STENCIL_BACKGROUND,
    });
}

/// Draws a full-screen quad with a no-op pixel stage
///
/// The pipeline is built on the first run and kept for the lifetime of the
/// job.
pub struct PrepareStencil {
    configure: StencilConfigFn,
    pipeline: Option<Arc<dyn Pipeline>>,
}

impl PrepareStencil {
    pub fn new(configure: StencilConfigFn) -> Self {
        Self {
            configure,
            pipeline: None,
        }
    }

    /// Render state of the stencil pipeline
    pub fn state(&self) -> State {
        let mut state = State::default();
        state.depth_stencil.set_depth_test(true, false, CompareOp::LessOrEqual);
        (self.configure)(&mut state);
        state
    }

    fn pipeline(&mut self, gpu: &mut dyn GpuContext) -> Result<Arc<dyn Pipeline>> {
        if let Some(pipeline) = &self.pipeline {
            return Ok(pipeline.clone());
        }

        let vertex = gpu.create_shader(ShaderDesc {
            stage: ShaderStage::Vertex,
            source: ShaderSource::Standard(StandardShader::DrawUnitQuadTexcoordVS),
        })?;
        let pixel = gpu.create_shader(ShaderDesc {
            stage: ShaderStage::Pixel,
            source: ShaderSource::Standard(StandardShader::NopPS),
        })?;
        let program = gpu.create_program(ProgramDesc {
            name: "stencil".to_string(),
            vertex,
            pixel,
        })?;
        let pipeline = gpu.create_pipeline(PipelineDesc {
            name: "stencil".to_string(),
            program,
            state: self.state(),
        })?;

        engine_debug!("forward3d::PrepareStencil", "Stencil pipeline created");
        self.pipeline = Some(pipeline.clone());
        Ok(pipeline)
    }
}

impl Job for PrepareStencil {
    type Input = Varying<Arc<dyn Framebuffer>>;
    type Output = ();

    fn run(&mut self, ctx: &mut RenderContext<'_>, _framebuffer: Arc<dyn Framebuffer>) -> Result<()> {
        let pipeline = self.pipeline(ctx.gpu)?;
        let viewport = ctx.args.viewport;

        do_in_batch(ctx.gpu, "PrepareStencil", |batch| {
            batch.enable_stereo(false);
            batch.set_viewport_transform(viewport);
            batch.set_state_scissor_rect(viewport);
            batch.set_pipeline(&pipeline);
            batch.draw(PrimitiveTopology::TriangleStrip, 4, 0);
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "stencil_tests.rs"]
mod tests;
