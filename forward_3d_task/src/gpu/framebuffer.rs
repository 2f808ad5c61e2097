/// Framebuffer trait - groups color and depth/stencil attachments
///
/// Framebuffers are never resized in place: a viewport change means a new
/// framebuffer, while the previous one stays valid for whoever still holds it.

use std::sync::Arc;
use bitflags::bitflags;
use glam::UVec2;
use crate::gpu::Texture;

bitflags! {
    /// Buffers affected by a framebuffer clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const COLOR0  = 1 << 0;
        const DEPTH   = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

/// Framebuffer resource trait
pub trait Framebuffer: Send + Sync {
    /// Debug name
    fn name(&self) -> &str;

    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Size in pixels
    fn size(&self) -> UVec2 {
        UVec2::new(self.width(), self.height())
    }

    /// Color attachment at `index`, if any
    fn color_attachment(&self, index: usize) -> Option<&Arc<dyn Texture>>;

    /// Depth/stencil attachment, if any
    fn depth_stencil_attachment(&self) -> Option<&Arc<dyn Texture>>;
}

/// Descriptor for creating a framebuffer
pub struct FramebufferDesc {
    /// Debug name
    pub name: String,
    /// Color attachments (render buffer textures)
    pub color_attachments: Vec<Arc<dyn Texture>>,
    /// Optional depth/stencil attachment
    pub depth_stencil_attachment: Option<Arc<dyn Texture>>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}
