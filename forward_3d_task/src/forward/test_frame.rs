/// Frame harness for job tests: owns everything a RenderContext borrows

use std::sync::Arc;
use crate::camera::Camera;
use crate::error::Result;
use crate::gpu::{Framebuffer, Viewport};
use crate::gpu::mock_context::{MockFramebuffer, MockGpuContext};
use crate::item::ItemStore;
use crate::task::{Job, RenderArgs, RenderContext, TaskGraph};

pub struct TestFrame {
    pub args: RenderArgs,
    pub camera: Camera,
    pub items: ItemStore,
    pub gpu: MockGpuContext,
}

impl TestFrame {
    /// Frame with a `display` blit target of the same size
    pub fn new(width: u32, height: u32) -> Self {
        let display: Arc<dyn Framebuffer> = Arc::new(MockFramebuffer::new("display", width, height));
        Self {
            args: RenderArgs::new(Viewport::new(width, height)).with_blit_framebuffer(display),
            camera: Camera::default(),
            items: ItemStore::new(),
            gpu: MockGpuContext::new(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.args.viewport = Viewport::new(width, height);
    }

    /// Run a single job outside any graph
    pub fn run<J: Job>(
        &mut self,
        job: &mut J,
        input: <J::Input as crate::task::JobInput>::Value,
    ) -> Result<J::Output> {
        let mut ctx = RenderContext::new(&self.args, &self.camera, &self.items, &mut self.gpu);
        job.run(&mut ctx, input)
    }

    pub fn run_graph(&mut self, graph: &mut TaskGraph) -> Result<()> {
        let mut ctx = RenderContext::new(&self.args, &self.camera, &self.items, &mut self.gpu);
        graph.run(&mut ctx)
    }
}
