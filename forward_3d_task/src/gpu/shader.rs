/// Shader and program traits and descriptors

use std::sync::Arc;

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Pixel,
}

/// Built-in shader stages provided by every backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardShader {
    /// Full-screen unit quad with texcoords, 4-vertex triangle strip
    DrawUnitQuadTexcoordVS,
    /// Pixel stage writing nothing (depth/stencil only)
    NopPS,
    /// Expands a unit cube outline from per-draw bound uniforms (24 line vertices)
    DrawItemBoundsVS,
    /// Flat color pixel stage
    DrawColorPS,
}

/// Where the shader code comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderSource {
    /// Backend built-in stage
    Standard(StandardShader),
    /// Named entry of the external shader library (e.g. "forward_model")
    Library(String),
}

/// Descriptor for creating a shader
#[derive(Debug, Clone)]
pub struct ShaderDesc {
    pub stage: ShaderStage,
    pub source: ShaderSource,
}

/// Shader module trait
pub trait Shader: Send + Sync {
    fn stage(&self) -> ShaderStage;
}

/// Descriptor for linking a vertex and a pixel shader into a program
pub struct ProgramDesc {
    pub name: String,
    pub vertex: Arc<dyn Shader>,
    pub pixel: Arc<dyn Shader>,
}

/// Linked GPU program trait
pub trait Program: Send + Sync {
    fn name(&self) -> &str;
}
