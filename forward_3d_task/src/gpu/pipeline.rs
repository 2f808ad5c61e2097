/// Render state, pipeline descriptor, and pipeline trait

use std::sync::Arc;
use crate::gpu::Program;

/// Primitive topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    TriangleList,
    TriangleStrip,
    LineList,
    PointList,
}

// ===== RASTERIZATION =====

/// Face culling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    None,
    Front,
    Back,
}

/// Polygon rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonMode {
    Fill,
    Line,
}

/// Rasterization fixed-function state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterizationState {
    pub cull_mode: CullMode,
    pub polygon_mode: PolygonMode,
}

impl Default for RasterizationState {
    fn default() -> Self {
        Self {
            cull_mode: CullMode::Back,
            polygon_mode: PolygonMode::Fill,
        }
    }
}

// ===== DEPTH/STENCIL =====

/// Comparison operator for depth and stencil tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Never,
    Less,
    Equal,
    LessOrEqual,
    Greater,
    NotEqual,
    GreaterOrEqual,
    Always,
}

/// Stencil operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
    IncrementAndClamp,
    DecrementAndClamp,
    Invert,
}

/// Stencil operation state (per-face)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StencilOpState {
    /// Action on stencil test fail
    pub fail_op: StencilOp,
    /// Action on stencil pass + depth pass
    pub pass_op: StencilOp,
    /// Action on stencil pass + depth fail
    pub depth_fail_op: StencilOp,
    pub compare_op: CompareOp,
    pub compare_mask: u32,
    pub write_mask: u32,
    pub reference: u32,
}

impl Default for StencilOpState {
    fn default() -> Self {
        Self {
            fail_op: StencilOp::Keep,
            pass_op: StencilOp::Keep,
            depth_fail_op: StencilOp::Keep,
            compare_op: CompareOp::Always,
            compare_mask: 0xFF,
            write_mask: 0xFF,
            reference: 0,
        }
    }
}

/// Depth and stencil testing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthStencilState {
    pub depth_test_enable: bool,
    pub depth_write_enable: bool,
    pub depth_compare_op: CompareOp,
    pub stencil_test_enable: bool,
    pub front: StencilOpState,
    pub back: StencilOpState,
}

impl DepthStencilState {
    /// Set depth test, depth write, and compare op in one call
    pub fn set_depth_test(&mut self, enable: bool, write: bool, compare_op: CompareOp) {
        self.depth_test_enable = enable;
        self.depth_write_enable = write;
        self.depth_compare_op = compare_op;
    }

    /// Enable stencil testing with the same op state on both faces
    pub fn set_stencil_test(&mut self, ops: StencilOpState) {
        self.stencil_test_enable = true;
        self.front = ops;
        self.back = ops;
    }
}

impl Default for DepthStencilState {
    fn default() -> Self {
        Self {
            depth_test_enable: true,
            depth_write_enable: true,
            depth_compare_op: CompareOp::Less,
            stencil_test_enable: false,
            front: StencilOpState::default(),
            back: StencilOpState::default(),
        }
    }
}

// ===== COLOR BLEND =====

/// Blend factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
}

/// Color write mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorWriteMask {
    pub r: bool,
    pub g: bool,
    pub b: bool,
    pub a: bool,
}

impl ColorWriteMask {
    pub const ALL: Self = Self { r: true, g: true, b: true, a: true };
    pub const NONE: Self = Self { r: false, g: false, b: false, a: false };
}

/// Color blending state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorBlendState {
    pub blend_enable: bool,
    pub src_factor: BlendFactor,
    pub dst_factor: BlendFactor,
    pub color_write_mask: ColorWriteMask,
}

impl ColorBlendState {
    /// Premultiplied-free alpha blending (src * a + dst * (1 - a))
    pub fn alpha_blend() -> Self {
        Self {
            blend_enable: true,
            src_factor: BlendFactor::SrcAlpha,
            dst_factor: BlendFactor::OneMinusSrcAlpha,
            color_write_mask: ColorWriteMask::ALL,
        }
    }
}

impl Default for ColorBlendState {
    fn default() -> Self {
        Self {
            blend_enable: false,
            src_factor: BlendFactor::One,
            dst_factor: BlendFactor::Zero,
            color_write_mask: ColorWriteMask::ALL,
        }
    }
}

// ===== STATE =====

/// Complete fixed-function render state of a pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct State {
    pub rasterization: RasterizationState,
    pub depth_stencil: DepthStencilState,
    pub color_blend: ColorBlendState,
}

// ===== PIPELINE =====

/// Descriptor for creating a pipeline
#[derive(Clone)]
pub struct PipelineDesc {
    /// Debug name
    pub name: String,
    /// Linked program
    pub program: Arc<dyn Program>,
    /// Fixed-function state
    pub state: State,
}

/// Pipeline resource trait
///
/// Implemented by backend-specific pipeline types.
/// The pipeline is destroyed when the last reference is dropped.
pub trait Pipeline: Send + Sync {
    /// Debug name
    fn name(&self) -> &str;
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
