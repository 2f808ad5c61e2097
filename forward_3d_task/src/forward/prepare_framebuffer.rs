/// Working framebuffer owner
///
/// The only job that keeps a GPU resource across frames. A size change
/// drops the old framebuffer and allocates a new one instead of resizing
/// in place, so a consumer of the previous frame keeps a valid resource.

use std::sync::Arc;
use crate::error::Result;
use crate::{engine_debug, engine_info};
use crate::gpu::{
    do_in_batch, ClearFlags, Filter, Framebuffer, FramebufferDesc, GpuContext, Sampler,
    TextureDesc,
};
use crate::task::{Job, RenderContext};
use super::config::FramebufferConfig;

pub struct PrepareFramebuffer {
    config: FramebufferConfig,
    framebuffer: Option<Arc<dyn Framebuffer>>,
}

impl PrepareFramebuffer {
    pub fn new(config: FramebufferConfig) -> Self {
        Self {
            config,
            framebuffer: None,
        }
    }

    /// Framebuffer currently held, if any
    pub fn framebuffer(&self) -> Option<&Arc<dyn Framebuffer>> {
        self.framebuffer.as_ref()
    }

    fn allocate(&self, gpu: &mut dyn GpuContext, width: u32, height: u32) -> Result<Arc<dyn Framebuffer>> {
        let sampler = Sampler { filter: Filter::MinMagPoint };
        let color = gpu.create_texture(TextureDesc::render_buffer(
            self.config.color_format, width, height, sampler,
        ))?;
        let depth_stencil = gpu.create_texture(TextureDesc::render_buffer(
            self.config.depth_stencil_format, width, height, sampler,
        ))?;

        let framebuffer = gpu.create_framebuffer(FramebufferDesc {
            name: self.config.name.clone(),
            color_attachments: vec![color],
            depth_stencil_attachment: Some(depth_stencil),
            width,
            height,
        })?;

        engine_info!("forward3d::PrepareFramebuffer",
            "Allocated framebuffer '{}' ({}x{})", framebuffer.name(), width, height);
        Ok(framebuffer)
    }
}

impl Job for PrepareFramebuffer {
    type Input = ();
    type Output = Arc<dyn Framebuffer>;

    fn run(&mut self, ctx: &mut RenderContext<'_>, _input: ()) -> Result<Arc<dyn Framebuffer>> {
        let args = ctx.args;
        let size = args.viewport.size();

        if let Some(old) = &self.framebuffer {
            if old.size() != size {
                engine_debug!("forward3d::PrepareFramebuffer",
                    "Releasing framebuffer '{}' ({}x{} -> {}x{})",
                    old.name(), old.width(), old.height(), size.x, size.y);
                self.framebuffer = None;
            }
        }

        let framebuffer = match self.framebuffer.clone() {
            Some(framebuffer) => framebuffer,
            None => {
                let framebuffer = self.allocate(ctx.gpu, size.x, size.y)?;
                self.framebuffer = Some(framebuffer.clone());
                framebuffer
            }
        };

        let config = &self.config;
        do_in_batch(ctx.gpu, "PrepareFramebuffer", |batch| {
            batch.enable_stereo(false);
            batch.set_viewport_transform(args.viewport);
            batch.set_state_scissor_rect(args.viewport);
            batch.set_framebuffer(&framebuffer);
            batch.clear_framebuffer(
                ClearFlags::COLOR0 | ClearFlags::DEPTH | ClearFlags::STENCIL,
                config.clear_color,
                config.clear_depth,
                config.clear_stencil,
                true,
            );
            Ok(())
        })?;

        Ok(framebuffer)
    }
}

#[cfg(test)]
#[path = "prepare_framebuffer_tests.rs"]
mod tests;
