/// GpuContext trait - device-side factory and batch submission

use std::sync::Arc;
use crate::error::Result;
use crate::gpu::{
    Batch, Framebuffer, FramebufferDesc, Pipeline, PipelineDesc, Program, ProgramDesc,
    Shader, ShaderDesc, Texture, TextureDesc,
};

/// The only side-effect channel of the task graph
///
/// Implemented by GPU backends. Allocation failures are reported as
/// `Error::OutOfMemory` (or a backend error) and are fatal for the frame.
pub trait GpuContext: Send {
    /// Create a texture
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Create a framebuffer from already created attachments
    fn create_framebuffer(&mut self, desc: FramebufferDesc) -> Result<Arc<dyn Framebuffer>>;

    /// Create a shader stage
    fn create_shader(&mut self, desc: ShaderDesc) -> Result<Arc<dyn Shader>>;

    /// Link a vertex and a pixel shader
    fn create_program(&mut self, desc: ProgramDesc) -> Result<Arc<dyn Program>>;

    /// Create a pipeline (program + fixed-function state)
    fn create_pipeline(&mut self, desc: PipelineDesc) -> Result<Arc<dyn Pipeline>>;

    /// Submit a recorded batch
    fn submit(&mut self, batch: Batch) -> Result<()>;
}
