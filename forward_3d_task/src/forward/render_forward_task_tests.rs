/// Tests for RenderForwardTask
///
/// End-to-end frames through the full forward graph on the mock context:
/// node order, framebuffer lifecycle across frames, grouping of opaque
/// draws, build-time wiring errors and the injected collaborators.

use glam::{Mat4, Vec3, Vec4};
use super::*;
use crate::error::Error;
use crate::forward::test_frame::TestFrame;
use crate::gpu::{Batch, PrimitiveTopology};
use crate::item::{DrawCall, ItemId, RenderItem, AABB};
use crate::shape::{BatchSetter, ItemSetter, ShapeKey, ShapePipeline};
use crate::task::{Job, RenderArgs, RenderContext};

const FORWARD_NODES: [&str; 13] = [
    "LightingModel",
    "ZoneRenderer",
    "PrepareFramebuffer",
    "PrepareStencil",
    "DrawOpaques",
    "DrawBackgroundDeferred",
    "DrawTransparents",
    "DrawMetaBounds",
    "DrawBounds",
    "DrawTransparentBounds",
    "DrawZones",
    "HUD",
    "Blit",
];

fn build(frame: &mut TestFrame) -> (TaskGraph, ForwardInputs) {
    RenderForwardTask::build_graph(ForwardTaskDeps::new(&mut frame.gpu)).unwrap()
}

fn render(frame: &mut TestFrame, graph: &mut TaskGraph, inputs: &ForwardInputs, fetched: &FetchedItems) -> Result<()> {
    inputs.bind(graph, fetched)?;
    frame.run_graph(graph)
}

fn shape(key: ShapeKey, x: f32) -> RenderItem {
    RenderItem::shape(
        Mat4::from_translation(Vec3::new(x, 0.0, 0.0)),
        AABB::unit(),
        key,
        DrawCall::Indexed { topology: PrimitiveTopology::TriangleList, index_count: 36, first_index: 0, base_vertex: 0 },
    )
}

fn opaques(ids: Vec<ItemId>) -> FetchedItems {
    FetchedItems::new().with_bucket(ItemBucket::new(BucketCategory::OpaqueShape, ids))
}

/// Framebuffer name bound by the n-th PrepareFramebuffer batch
fn working_framebuffer(frame: &TestFrame, n: usize) -> String {
    let batch = frame.gpu.batches_named("PrepareFramebuffer")[n];
    batch.commands[3]
        .trim_start_matches("set_framebuffer(")
        .trim_end_matches(')')
        .to_string()
}

// ============================================================================
// Tests: Graph construction
// ============================================================================

#[test]
fn test_node_order() {
    let mut frame = TestFrame::new(800, 600);
    let (graph, _inputs) = build(&mut frame);

    assert_eq!(graph.node_names(), FORWARD_NODES.to_vec());
}

#[test]
fn test_plumber_is_constant_varying() {
    let mut frame = TestFrame::new(800, 600);
    let (graph, _inputs) = build(&mut frame);

    let plumber = graph.named_varying::<Arc<ShapePlumber>>(SHAPE_PLUMBER).unwrap();
    let plumber = graph.varyings().get(plumber).unwrap();
    assert_eq!(plumber.len(), 64);
}

#[test]
fn test_every_bucket_category_declared() {
    let mut frame = TestFrame::new(800, 600);
    let (graph, inputs) = build(&mut frame);

    for category in BucketCategory::ALL {
        let by_name = graph.named_varying::<Arc<ItemBucket>>(category.varying_name()).unwrap();
        assert_eq!(by_name, inputs.bucket(category));
    }
}

#[test]
fn test_missing_bucket_inputs_fail_at_build() {
    let mut gpu = crate::gpu::mock_context::MockGpuContext::new();
    let mut builder = TaskBuilder::new();

    let err = RenderForwardTask::build(&mut builder, ForwardTaskDeps::new(&mut gpu)).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(builder.node_count(), 0);
}

#[test]
fn test_mistyped_bucket_input_fails_at_build() {
    let mut gpu = crate::gpu::mock_context::MockGpuContext::new();
    let mut builder = TaskBuilder::new();
    builder.input::<u32>("opaques").unwrap();

    let err = RenderForwardTask::build(&mut builder, ForwardTaskDeps::new(&mut gpu)).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_pipeline_init_failure_fails_build() {
    let mut frame = TestFrame::new(800, 600);
    frame.gpu.fail_pipeline_creation = true;

    let result = RenderForwardTask::build_graph(ForwardTaskDeps::new(&mut frame.gpu));
    assert!(matches!(result, Err(Error::BackendError(_))));
}

// ============================================================================
// Tests: Frames
// ============================================================================

#[test]
fn test_empty_frame() {
    let mut frame = TestFrame::new(800, 600);
    let (mut graph, inputs) = build(&mut frame);

    render(&mut frame, &mut graph, &inputs, &FetchedItems::new()).unwrap();

    assert_eq!(frame.gpu.created_textures, vec![
        "texture_800x600_R8G8B8A8_SRGB".to_string(),
        "texture_800x600_D24_UNORM_S8_UINT".to_string(),
    ]);
    assert_eq!(frame.gpu.batches_named("Blit").len(), 1);
    assert_eq!(frame.gpu.total_draw_count(), 1);
    assert_eq!(frame.gpu.batches_named("PrepareStencil")[0].draw_count(), 1);
}

#[test]
fn test_batch_order_follows_nodes() {
    let mut frame = TestFrame::new(800, 600);
    let (mut graph, inputs) = build(&mut frame);

    render(&mut frame, &mut graph, &inputs, &FetchedItems::new()).unwrap();

    let names: Vec<&str> = frame.gpu.batches.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["PrepareFramebuffer", "PrepareStencil", "DrawOpaques", "DrawTransparents", "Blit"]);
}

#[test]
fn test_blit_sees_prepared_framebuffer() {
    let mut frame = TestFrame::new(800, 600);
    let (mut graph, inputs) = build(&mut frame);

    render(&mut frame, &mut graph, &inputs, &FetchedItems::new()).unwrap();

    let working = working_framebuffer(&frame, 0);
    let blit = frame.gpu.batches_named("Blit")[0].commands[1].clone();
    assert!(blit.starts_with(&format!("blit({}->", working)));
}

#[test]
fn test_opaques_grouped_by_pipeline() {
    let mut frame = TestFrame::new(800, 600);
    let key_a = ShapeKey::MATERIAL;
    let key_b = ShapeKey::MATERIAL | ShapeKey::UNLIT;
    let ids = vec![
        frame.items.insert(shape(key_a, 0.0)),
        frame.items.insert(shape(key_b, 1.0)),
        frame.items.insert(shape(key_a, 2.0)),
        frame.items.insert(shape(key_b, 3.0)),
        frame.items.insert(shape(key_a, 4.0)),
    ];
    let (mut graph, inputs) = build(&mut frame);

    render(&mut frame, &mut graph, &inputs, &opaques(ids)).unwrap();

    let batch = frame.gpu.batches_named("DrawOpaques")[0];
    assert_eq!(batch.pipeline_bind_count(), 2);
    assert_eq!(batch.draw_count(), 5);

    let binds: Vec<&str> = batch
        .commands
        .iter()
        .filter(|c| c.starts_with("set_pipeline") || c.starts_with("draw"))
        .map(|c| c.as_str())
        .collect();
    assert_eq!(binds[0], "set_pipeline(forward:material)");
    assert!(binds[1..4].iter().all(|c| c.starts_with("draw_indexed")));
    assert_eq!(binds[4], "set_pipeline(forward:material+unlit)");
    assert!(binds[5..].iter().all(|c| c.starts_with("draw_indexed")));

    // Bounds overlay of the same bucket
    assert_eq!(frame.gpu.batches_named("DrawBounds")[0].draw_count(), 5);
}

#[test]
fn test_resize_between_frames() {
    let mut frame = TestFrame::new(800, 600);
    let (mut graph, inputs) = build(&mut frame);

    render(&mut frame, &mut graph, &inputs, &FetchedItems::new()).unwrap();
    let first = working_framebuffer(&frame, 0);
    let frame_one_batches = frame.gpu.batches.len();

    frame.resize(1920, 1080);
    render(&mut frame, &mut graph, &inputs, &FetchedItems::new()).unwrap();
    let second = working_framebuffer(&frame, 1);

    assert_ne!(first, second);
    assert_eq!(frame.gpu.created_framebuffers.len(), 2);
    assert!(frame.gpu.created_textures.contains(&"texture_1920x1080_R8G8B8A8_SRGB".to_string()));

    let frame_two = &frame.gpu.batches[frame_one_batches..];
    let bind_first = format!("set_framebuffer({})", first);
    let blit_first = format!("blit({}->", first);
    assert!(frame_two
        .iter()
        .flat_map(|b| b.commands.iter())
        .all(|c| *c != bind_first && !c.starts_with(&blit_first)));
    let blit = &frame_two.last().unwrap().commands[1];
    assert!(blit.starts_with(&format!("blit({}->", second)));
    assert!(blit.ends_with(",0,0,1920,1080)"));
}

#[test]
fn test_same_size_frames_reuse_framebuffer_and_stencil_pipeline() {
    let mut frame = TestFrame::new(800, 600);
    let (mut graph, inputs) = build(&mut frame);
    let pipelines_after_build = frame.gpu.created_pipelines.len();

    for _ in 0..4 {
        render(&mut frame, &mut graph, &inputs, &FetchedItems::new()).unwrap();
    }

    assert_eq!(frame.gpu.created_framebuffers.len(), 1);
    assert_eq!(frame.gpu.created_pipelines.len(), pipelines_after_build + 1);
    assert_eq!(frame.gpu.created_pipelines.iter().filter(|p| *p == "stencil").count(), 1);
}

#[test]
fn test_out_of_memory_aborts_frame() {
    let mut frame = TestFrame::new(800, 600);
    let (mut graph, inputs) = build(&mut frame);
    frame.gpu.fail_texture_allocation = true;

    let result = render(&mut frame, &mut graph, &inputs, &FetchedItems::new());

    assert!(matches!(result, Err(Error::OutOfMemory)));
    assert!(frame.gpu.batches_named("Blit").is_empty());
    assert!(frame.gpu.batches.is_empty());
}

#[test]
fn test_unbound_inputs_fail_frame() {
    let mut frame = TestFrame::new(800, 600);
    let (mut graph, _inputs) = build(&mut frame);

    assert!(matches!(frame.run_graph(&mut graph), Err(Error::InvalidResource(_))));
}

#[test]
fn test_inputs_rebound_each_frame() {
    let mut frame = TestFrame::new(800, 600);
    let id = frame.items.insert(shape(ShapeKey::MATERIAL, 0.0));
    let (mut graph, inputs) = build(&mut frame);

    render(&mut frame, &mut graph, &inputs, &opaques(vec![id])).unwrap();
    render(&mut frame, &mut graph, &inputs, &FetchedItems::new()).unwrap();

    let draws = frame.gpu.batches_named("DrawOpaques");
    assert_eq!(draws[0].draw_count(), 1);
    assert_eq!(draws[1].draw_count(), 0);
}

// ============================================================================
// Tests: Collaborators
// ============================================================================

struct CountOpaques;

impl Job for CountOpaques {
    type Input = Varying<Arc<ItemBucket>>;
    type Output = usize;

    fn run(&mut self, _ctx: &mut RenderContext<'_>, bucket: Arc<ItemBucket>) -> Result<usize> {
        Ok(bucket.len())
    }
}

struct TestFade;

impl FadeEffect for TestFade {
    fn batch_setter(&self) -> BatchSetter {
        Arc::new(|_: &ShapePipeline, batch: &mut Batch, _: &RenderArgs| {
            batch.set_uniform(10, Vec4::ZERO)
        })
    }

    fn item_setter(&self) -> ItemSetter {
        Arc::new(|_: &ShapePipeline, batch: &mut Batch, _: &RenderArgs, _: &RenderItem| {
            batch.set_uniform(11, Vec4::ONE)
        })
    }

    fn build(&self, builder: &mut TaskBuilder, opaques: Varying<Arc<ItemBucket>>) -> Result<()> {
        builder.add_job("FadeOpaques", CountOpaques, opaques)?;
        Ok(())
    }
}

#[test]
fn test_fade_effect_hooks() {
    let mut frame = TestFrame::new(800, 600);
    let ids = vec![
        frame.items.insert(shape(ShapeKey::MATERIAL | ShapeKey::FADE, 0.0)),
        frame.items.insert(shape(ShapeKey::MATERIAL | ShapeKey::FADE, 1.0)),
        frame.items.insert(shape(ShapeKey::MATERIAL, 2.0)),
    ];
    let deps = ForwardTaskDeps::new(&mut frame.gpu).with_fade(Arc::new(TestFade));
    let (mut graph, inputs) = RenderForwardTask::build_graph(deps).unwrap();

    assert_eq!(graph.node_names()[0], "FadeOpaques");
    assert_eq!(graph.node_names()[1], "LightingModel");

    render(&mut frame, &mut graph, &inputs, &opaques(ids)).unwrap();

    let batch = frame.gpu.batches_named("DrawOpaques")[0];
    let uniforms: Vec<&str> = batch
        .commands
        .iter()
        .filter(|c| c.starts_with("set_uniform"))
        .map(|c| c.as_str())
        .collect();
    assert_eq!(uniforms, vec!["set_uniform(10)", "set_uniform(11)", "set_uniform(11)"]);
}

#[test]
fn test_custom_pipeline_initializer() {
    fn register_nothing(
        _plumber: &mut ShapePlumber,
        _gpu: &mut dyn GpuContext,
        _batch_setter: BatchSetter,
        _item_setter: ItemSetter,
    ) -> Result<()> {
        Ok(())
    }

    let mut frame = TestFrame::new(800, 600);
    let id = frame.items.insert(shape(ShapeKey::MATERIAL, 0.0));
    let deps = ForwardTaskDeps::new(&mut frame.gpu).with_init_pipelines(register_nothing);
    let (mut graph, inputs) = RenderForwardTask::build_graph(deps).unwrap();

    render(&mut frame, &mut graph, &inputs, &opaques(vec![id])).unwrap();

    assert!(frame.gpu.created_pipelines.iter().all(|p| !p.starts_with("forward:")));
    assert_eq!(frame.gpu.batches_named("DrawOpaques")[0].draw_count(), 0);
}

#[test]
fn test_hud_and_disabled_bounds() {
    let mut frame = TestFrame::new(800, 600);
    let id = frame.items.insert(shape(ShapeKey::MATERIAL, 0.0));
    let config = ForwardTaskConfig { draw_debug_bounds: false, ..ForwardTaskConfig::default() };
    let hud: HudOperator = Arc::new(|batch: &mut Batch, _: &RenderArgs| {
        batch.draw(PrimitiveTopology::TriangleStrip, 4, 0)
    });
    let deps = ForwardTaskDeps::new(&mut frame.gpu).with_config(config).with_hud(hud);
    let (mut graph, inputs) = RenderForwardTask::build_graph(deps).unwrap();

    render(&mut frame, &mut graph, &inputs, &opaques(vec![id])).unwrap();

    assert!(frame.gpu.batches_named("DrawBounds").is_empty());
    let names: Vec<&str> = frame.gpu.batches.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(&names[names.len() - 2..], &["HUD", "Blit"]);
}
