/// Batch - a scoped recording of GPU commands submitted atomically
///
/// Jobs never issue GPU work directly. They open a batch with `do_in_batch()`,
/// record commands into it, and the batch is submitted to the `GpuContext`
/// as a whole when the recording closure returns.

use std::sync::Arc;
use glam::{Mat4, UVec2, Vec4};
use crate::error::Result;
use crate::gpu::{ClearFlags, Framebuffer, GpuContext, Pipeline, PrimitiveTopology};

/// Viewport rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Viewport at the origin covering `width` x `height`
    pub fn new(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }

    /// Size in pixels
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Corner rectangle covering this viewport
    ///
    /// Far corners saturate at `i32::MAX`.
    pub fn to_rect(&self) -> BlitRect {
        let extent = |origin: i32, length: u32| {
            origin.saturating_add(i32::try_from(length).unwrap_or(i32::MAX))
        };
        BlitRect {
            x0: self.x,
            y0: self.y,
            x1: extent(self.x, self.width),
            y1: extent(self.y, self.height),
        }
    }
}

/// Blit rectangle given by two corners. `x0 > x1` mirrors horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlitRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

/// A single recorded command
#[derive(Clone)]
pub enum BatchCommand {
    EnableStereo(bool),
    EnableSkybox(bool),
    SetViewportTransform(Viewport),
    SetScissorRect(Viewport),
    SetFramebuffer(Arc<dyn Framebuffer>),
    ClearFramebuffer {
        flags: ClearFlags,
        color: Vec4,
        depth: f32,
        stencil: u32,
        enable_scissor: bool,
    },
    SetProjectionTransform(Mat4),
    SetViewTransform(Mat4),
    SetModelTransform(Mat4),
    SetPipeline(Arc<dyn Pipeline>),
    SetUniform { slot: u32, value: Vec4 },
    Draw {
        topology: PrimitiveTopology,
        vertex_count: u32,
        first_vertex: u32,
    },
    DrawIndexed {
        topology: PrimitiveTopology,
        index_count: u32,
        first_index: u32,
        base_vertex: i32,
    },
    Blit {
        src: Arc<dyn Framebuffer>,
        src_rect: BlitRect,
        dst: Arc<dyn Framebuffer>,
        dst_rect: BlitRect,
    },
}

impl BatchCommand {
    /// Returns true for draw and indexed draw commands
    pub fn is_draw(&self) -> bool {
        matches!(self, BatchCommand::Draw { .. } | BatchCommand::DrawIndexed { .. })
    }
}

/// Recorded command batch
pub struct Batch {
    name: String,
    commands: Vec<BatchCommand>,
}

impl Batch {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            commands: Vec::new(),
        }
    }

    /// Name of the job that recorded this batch
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn commands(&self) -> &[BatchCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<BatchCommand> {
        self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of draw calls recorded so far
    pub fn draw_call_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_draw()).count()
    }

    // ===== STATE =====

    pub fn enable_stereo(&mut self, enable: bool) {
        self.commands.push(BatchCommand::EnableStereo(enable));
    }

    pub fn enable_skybox(&mut self, enable: bool) {
        self.commands.push(BatchCommand::EnableSkybox(enable));
    }

    pub fn set_viewport_transform(&mut self, viewport: Viewport) {
        self.commands.push(BatchCommand::SetViewportTransform(viewport));
    }

    pub fn set_state_scissor_rect(&mut self, rect: Viewport) {
        self.commands.push(BatchCommand::SetScissorRect(rect));
    }

    pub fn set_framebuffer(&mut self, framebuffer: &Arc<dyn Framebuffer>) {
        self.commands.push(BatchCommand::SetFramebuffer(framebuffer.clone()));
    }

    /// Clear the bound framebuffer
    ///
    /// `enable_scissor` restricts the clear to the current scissor rect.
    pub fn clear_framebuffer(
        &mut self,
        flags: ClearFlags,
        color: Vec4,
        depth: f32,
        stencil: u32,
        enable_scissor: bool,
    ) {
        self.commands.push(BatchCommand::ClearFramebuffer {
            flags,
            color,
            depth,
            stencil,
            enable_scissor,
        });
    }

    // ===== TRANSFORMS =====

    pub fn set_projection_transform(&mut self, projection: Mat4) {
        self.commands.push(BatchCommand::SetProjectionTransform(projection));
    }

    pub fn set_view_transform(&mut self, view: Mat4) {
        self.commands.push(BatchCommand::SetViewTransform(view));
    }

    pub fn set_model_transform(&mut self, model: Mat4) {
        self.commands.push(BatchCommand::SetModelTransform(model));
    }

    // ===== PIPELINE / UNIFORMS =====

    pub fn set_pipeline(&mut self, pipeline: &Arc<dyn Pipeline>) {
        self.commands.push(BatchCommand::SetPipeline(pipeline.clone()));
    }

    pub fn set_uniform(&mut self, slot: u32, value: Vec4) {
        self.commands.push(BatchCommand::SetUniform { slot, value });
    }

    // ===== DRAWS =====

    pub fn draw(&mut self, topology: PrimitiveTopology, vertex_count: u32, first_vertex: u32) {
        self.commands.push(BatchCommand::Draw {
            topology,
            vertex_count,
            first_vertex,
        });
    }

    pub fn draw_indexed(
        &mut self,
        topology: PrimitiveTopology,
        index_count: u32,
        first_index: u32,
        base_vertex: i32,
    ) {
        self.commands.push(BatchCommand::DrawIndexed {
            topology,
            index_count,
            first_index,
            base_vertex,
        });
    }

    /// Copy `src` color into `dst`
    pub fn blit(
        &mut self,
        src: &Arc<dyn Framebuffer>,
        src_rect: BlitRect,
        dst: &Arc<dyn Framebuffer>,
        dst_rect: BlitRect,
    ) {
        self.commands.push(BatchCommand::Blit {
            src: src.clone(),
            src_rect,
            dst: dst.clone(),
            dst_rect,
        });
    }
}

/// Open a batch, record into it, and submit it to the context
///
/// The batch is submitted only if `record` succeeds. Submission failures
/// propagate to the caller; nothing is retried.
///
/// # Example
///
/// ```ignore
/// do_in_batch(gpu, "PrepareStencil", |batch| {
///     batch.enable_stereo(false);
///     batch.draw(PrimitiveTopology::TriangleStrip, 4, 0);
///     Ok(())
/// })?;
/// ```
pub fn do_in_batch<F>(gpu: &mut dyn GpuContext, name: &str, record: F) -> Result<()>
where
    F: FnOnce(&mut Batch) -> Result<()>,
{
    let mut batch = Batch::new(name);
    record(&mut batch)?;
    gpu.submit(batch)
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
