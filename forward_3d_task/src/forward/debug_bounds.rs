/// Debug item bounds overlay

use std::sync::Arc;
use glam::Mat4;
use crate::error::Result;
use crate::gpu::{
    do_in_batch, CompareOp, GpuContext, Pipeline, PipelineDesc, PrimitiveTopology, ProgramDesc,
    ShaderDesc, ShaderSource, ShaderStage, StandardShader, State,
};
use crate::item::ItemBucket;
use crate::task::{Job, RenderContext, Varying};

/// Line vertices of one box outline (12 edges)
const BOX_LINE_VERTICES: u32 = 24;

/// Draws the world-space bounds of every item of a bucket
///
/// Reads the depth buffer but never writes it. Empty buckets record nothing.
pub struct DrawBounds {
    name: String,
    enabled: bool,
    pipeline: Option<Arc<dyn Pipeline>>,
}

impl DrawBounds {
    pub fn new(name: &str, enabled: bool) -> Self {
        Self {
            name: name.to_string(),
            enabled,
            pipeline: None,
        }
    }

    fn pipeline(&mut self, gpu: &mut dyn GpuContext) -> Result<Arc<dyn Pipeline>> {
        if let Some(pipeline) = &self.pipeline {
            return Ok(pipeline.clone());
        }

        let vertex = gpu.create_shader(ShaderDesc {
            stage: ShaderStage::Vertex,
            source: ShaderSource::Standard(StandardShader::DrawItemBoundsVS),
        })?;
        let pixel = gpu.create_shader(ShaderDesc {
            stage: ShaderStage::Pixel,
            source: ShaderSource::Standard(StandardShader::DrawColorPS),
        })?;
        let program = gpu.create_program(ProgramDesc {
            name: "draw_bounds".to_string(),
            vertex,
            pixel,
        })?;

        let mut state = State::default();
        state.depth_stencil.set_depth_test(true, false, CompareOp::LessOrEqual);

        let pipeline = gpu.create_pipeline(PipelineDesc {
            name: "draw_bounds".to_string(),
            program,
            state,
        })?;
        self.pipeline = Some(pipeline.clone());
        Ok(pipeline)
    }
}

impl Job for DrawBounds {
    type Input = Varying<Arc<ItemBucket>>;
    type Output = ();

    fn run(&mut self, ctx: &mut RenderContext<'_>, bucket: Arc<ItemBucket>) -> Result<()> {
        if !self.enabled || bucket.is_empty() {
            return Ok(());
        }

        let pipeline = self.pipeline(ctx.gpu)?;
        let args = ctx.args;
        let view = ctx.view;
        let items = ctx.items;

        do_in_batch(ctx.gpu, &self.name, |batch| {
            batch.set_viewport_transform(args.viewport);
            batch.set_projection_transform(view.eval_projection_matrix());
            batch.set_view_transform(view.eval_view_transform());
            batch.set_model_transform(Mat4::IDENTITY);
            batch.set_pipeline(&pipeline);

            for id in bucket.items() {
                let Some(item) = items.get(*id) else {
                    continue;
                };
                let world = item.bound.transformed(&item.transform);
                batch.set_uniform(0, world.min.extend(1.0));
                batch.set_uniform(1, world.size().extend(0.0));
                batch.draw(PrimitiveTopology::LineList, BOX_LINE_VERTICES, 0);
            }
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "debug_bounds_tests.rs"]
mod tests;
