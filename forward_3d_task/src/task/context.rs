/// Per-frame render context handed to every job

use std::sync::Arc;
use crate::camera::ViewFrustum;
use crate::gpu::{Framebuffer, GpuContext, Viewport};
use crate::item::ItemStore;

/// How the final blit is oriented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Default,
    /// Horizontally mirrored presentation
    Mirror,
}

/// Per-frame render arguments
#[derive(Clone)]
pub struct RenderArgs {
    pub viewport: Viewport,
    pub render_mode: RenderMode,
    /// Display framebuffer the final image is blitted into
    pub blit_framebuffer: Option<Arc<dyn Framebuffer>>,
}

impl RenderArgs {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            render_mode: RenderMode::Default,
            blit_framebuffer: None,
        }
    }

    pub fn with_blit_framebuffer(mut self, framebuffer: Arc<dyn Framebuffer>) -> Self {
        self.blit_framebuffer = Some(framebuffer);
        self
    }

    pub fn with_render_mode(mut self, render_mode: RenderMode) -> Self {
        self.render_mode = render_mode;
        self
    }
}

/// Everything a job may read or record into during one frame
pub struct RenderContext<'a> {
    pub args: &'a RenderArgs,
    /// View frustum provider (projection + view transforms)
    pub view: &'a dyn ViewFrustum,
    /// External item store the buckets point into
    pub items: &'a ItemStore,
    pub gpu: &'a mut dyn GpuContext,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        args: &'a RenderArgs,
        view: &'a dyn ViewFrustum,
        items: &'a ItemStore,
        gpu: &'a mut dyn GpuContext,
    ) -> Self {
        Self { args, view, items, gpu }
    }
}
