/// Forward task configuration

use glam::Vec4;
use crate::gpu::TextureFormat;
use super::lighting_model::LightingModel;

/// Working framebuffer allocation and clear values
#[derive(Debug, Clone, PartialEq)]
pub struct FramebufferConfig {
    /// Debug name of the framebuffer
    pub name: String,
    pub color_format: TextureFormat,
    /// D24_UNORM_S8_UINT or D32_FLOAT_S8_UINT
    pub depth_stencil_format: TextureFormat,
    pub clear_color: Vec4,
    pub clear_depth: f32,
    pub clear_stencil: u32,
}

impl Default for FramebufferConfig {
    fn default() -> Self {
        Self {
            name: "forward".to_string(),
            color_format: TextureFormat::R8G8B8A8_SRGB,
            depth_stencil_format: TextureFormat::D24_UNORM_S8_UINT,
            clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            clear_depth: 1.0,
            clear_stencil: 0,
        }
    }
}

/// Forward task configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardTaskConfig {
    pub framebuffer: FramebufferConfig,
    /// Lighting switches output by the LightingModel job
    pub lighting: LightingModel,
    /// Draw item bounds after the shape passes
    pub draw_debug_bounds: bool,
}

impl Default for ForwardTaskConfig {
    fn default() -> Self {
        Self {
            framebuffer: FramebufferConfig::default(),
            lighting: LightingModel::default(),
            draw_debug_bounds: true,
        }
    }
}
