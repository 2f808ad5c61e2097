/// Mock GPU context for unit tests (no GPU required)
///
/// Records every submitted batch as a string trace and tracks created
/// resources, so task graph behavior can be verified without a device.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use crate::error::{Error, Result};
use crate::gpu::{
    Batch, BatchCommand, Framebuffer, FramebufferDesc, GpuContext, Pipeline, PipelineDesc,
    Program, ProgramDesc, Shader, ShaderDesc, ShaderStage, Texture, TextureDesc, TextureInfo,
};

/// Serial numbers shared by all mock resources (unique per process)
static NEXT_SERIAL: AtomicU64 = AtomicU64::new(1);

fn next_serial() -> u64 {
    NEXT_SERIAL.fetch_add(1, Ordering::Relaxed)
}

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub info: TextureInfo,
    pub serial: u64,
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

// ============================================================================
// Mock Framebuffer
// ============================================================================

pub struct MockFramebuffer {
    /// Desc name suffixed with a unique serial (e.g. "forward#12")
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub color_attachments: Vec<Arc<dyn Texture>>,
    pub depth_stencil_attachment: Option<Arc<dyn Texture>>,
}

impl MockFramebuffer {
    pub fn new(name: &str, width: u32, height: u32) -> Self {
        Self {
            name: format!("{}#{}", name, next_serial()),
            width,
            height,
            color_attachments: Vec::new(),
            depth_stencil_attachment: None,
        }
    }
}

impl Framebuffer for MockFramebuffer {
    fn name(&self) -> &str {
        &self.name
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color_attachment(&self, index: usize) -> Option<&Arc<dyn Texture>> {
        self.color_attachments.get(index)
    }

    fn depth_stencil_attachment(&self) -> Option<&Arc<dyn Texture>> {
        self.depth_stencil_attachment.as_ref()
    }
}

// ============================================================================
// Mock Shader / Program / Pipeline
// ============================================================================

#[derive(Debug)]
pub struct MockShader {
    pub stage: ShaderStage,
}

impl Shader for MockShader {
    fn stage(&self) -> ShaderStage {
        self.stage
    }
}

#[derive(Debug)]
pub struct MockProgram {
    pub name: String,
}

impl Program for MockProgram {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug)]
pub struct MockPipeline {
    pub name: String,
}

impl MockPipeline {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

impl Pipeline for MockPipeline {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Mock GpuContext
// ============================================================================

/// A submitted batch, flattened to strings
#[derive(Debug, Clone)]
pub struct RecordedBatch {
    pub name: String,
    pub commands: Vec<String>,
}

impl RecordedBatch {
    /// Number of draw / draw_indexed commands
    pub fn draw_count(&self) -> usize {
        self.commands.iter().filter(|c| c.starts_with("draw")).count()
    }

    /// Number of set_pipeline commands
    pub fn pipeline_bind_count(&self) -> usize {
        self.commands.iter().filter(|c| c.starts_with("set_pipeline")).count()
    }
}

/// Mock context that tracks created resources and submitted batches
///
/// Submitted batches are flattened immediately, so the mock never keeps
/// a framebuffer or pipeline alive.
#[derive(Default)]
pub struct MockGpuContext {
    pub batches: Vec<RecordedBatch>,
    pub created_textures: Vec<String>,
    pub created_framebuffers: Vec<String>,
    pub created_shaders: Vec<String>,
    pub created_programs: Vec<String>,
    pub created_pipelines: Vec<String>,
    /// When set, create_texture() fails with OutOfMemory
    pub fail_texture_allocation: bool,
    /// When set, create_pipeline() fails with a backend error
    pub fail_pipeline_creation: bool,
}

impl MockGpuContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Batches recorded by the named job
    pub fn batches_named(&self, name: &str) -> Vec<&RecordedBatch> {
        self.batches.iter().filter(|b| b.name == name).collect()
    }

    /// All commands across all batches, in submission order
    pub fn all_commands(&self) -> Vec<&str> {
        self.batches
            .iter()
            .flat_map(|b| b.commands.iter().map(|c| c.as_str()))
            .collect()
    }

    /// Total draw calls across all batches
    pub fn total_draw_count(&self) -> usize {
        self.batches.iter().map(|b| b.draw_count()).sum()
    }

    pub fn clear_batches(&mut self) {
        self.batches.clear();
    }

    fn describe(command: &BatchCommand) -> String {
        match command {
            BatchCommand::EnableStereo(enable) => format!("enable_stereo({})", enable),
            BatchCommand::EnableSkybox(enable) => format!("enable_skybox({})", enable),
            BatchCommand::SetViewportTransform(vp) => {
                format!("set_viewport({},{},{}x{})", vp.x, vp.y, vp.width, vp.height)
            }
            BatchCommand::SetScissorRect(vp) => {
                format!("set_scissor({},{},{}x{})", vp.x, vp.y, vp.width, vp.height)
            }
            BatchCommand::SetFramebuffer(fb) => format!("set_framebuffer({})", fb.name()),
            BatchCommand::ClearFramebuffer { flags, .. } => {
                format!("clear_framebuffer({:?})", flags)
            }
            BatchCommand::SetProjectionTransform(_) => "set_projection".to_string(),
            BatchCommand::SetViewTransform(_) => "set_view".to_string(),
            BatchCommand::SetModelTransform(_) => "set_model".to_string(),
            BatchCommand::SetPipeline(pipeline) => format!("set_pipeline({})", pipeline.name()),
            BatchCommand::SetUniform { slot, .. } => format!("set_uniform({})", slot),
            BatchCommand::Draw { topology, vertex_count, .. } => {
                format!("draw({:?},{})", topology, vertex_count)
            }
            BatchCommand::DrawIndexed { topology, index_count, .. } => {
                format!("draw_indexed({:?},{})", topology, index_count)
            }
            BatchCommand::Blit { src, dst, dst_rect, .. } => format!(
                "blit({}->{},{},{},{},{})",
                src.name(), dst.name(), dst_rect.x0, dst_rect.y0, dst_rect.x1, dst_rect.y1
            ),
        }
    }
}

impl GpuContext for MockGpuContext {
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        if self.fail_texture_allocation {
            return Err(Error::OutOfMemory);
        }
        self.created_textures.push(format!("texture_{}x{}_{:?}", desc.width, desc.height, desc.format));
        Ok(Arc::new(MockTexture {
            info: TextureInfo::from(&desc),
            serial: next_serial(),
        }))
    }

    fn create_framebuffer(&mut self, desc: FramebufferDesc) -> Result<Arc<dyn Framebuffer>> {
        let mut framebuffer = MockFramebuffer::new(&desc.name, desc.width, desc.height);
        framebuffer.color_attachments = desc.color_attachments;
        framebuffer.depth_stencil_attachment = desc.depth_stencil_attachment;
        self.created_framebuffers.push(framebuffer.name.clone());
        Ok(Arc::new(framebuffer))
    }

    fn create_shader(&mut self, desc: ShaderDesc) -> Result<Arc<dyn Shader>> {
        self.created_shaders.push(format!("{:?}:{:?}", desc.stage, desc.source));
        Ok(Arc::new(MockShader { stage: desc.stage }))
    }

    fn create_program(&mut self, desc: ProgramDesc) -> Result<Arc<dyn Program>> {
        self.created_programs.push(desc.name.clone());
        Ok(Arc::new(MockProgram { name: desc.name }))
    }

    fn create_pipeline(&mut self, desc: PipelineDesc) -> Result<Arc<dyn Pipeline>> {
        if self.fail_pipeline_creation {
            return Err(Error::BackendError(format!("pipeline '{}' rejected", desc.name)));
        }
        self.created_pipelines.push(desc.name.clone());
        Ok(Arc::new(MockPipeline::new(&desc.name)))
    }

    fn submit(&mut self, batch: Batch) -> Result<()> {
        let commands = batch.commands().iter().map(Self::describe).collect();
        self.batches.push(RecordedBatch {
            name: batch.name().to_string(),
            commands,
        });
        Ok(())
    }
}
