use glam::Vec3;
use super::*;
use crate::forward::test_frame::TestFrame;
use crate::gpu::{PrimitiveTopology, State};
use crate::gpu::mock_context::{MockPipeline, MockProgram};
use crate::item::{BucketCategory, DrawCall, RenderItem, AABB};
use crate::shape::{ShapeKey, ShapePipeline};

const KEY_A: ShapeKey = ShapeKey::MATERIAL;
const KEY_B: ShapeKey = ShapeKey::MATERIAL.union(ShapeKey::TANGENTS);

fn plumber() -> Arc<ShapePlumber> {
    let mut plumber = ShapePlumber::new();
    for (key, name) in [(KEY_A, "A"), (KEY_B, "B")] {
        plumber.add_pipeline(key, ShapePipeline::new(
            Arc::new(MockPipeline::new(name)),
            Arc::new(MockProgram { name: name.to_string() }),
            State::default(),
        ));
    }
    Arc::new(plumber)
}

fn shape(key: ShapeKey, x: f32) -> RenderItem {
    RenderItem::shape(
        Mat4::from_translation(Vec3::new(x, 0.0, 0.0)),
        AABB::unit(),
        key,
        DrawCall::Vertices { topology: PrimitiveTopology::TriangleList, vertex_count: 6, first_vertex: 0 },
    )
}

// ============================================================================
// Tests: Draw
// ============================================================================

#[test]
fn test_draw_sets_camera_transforms_first() {
    let mut frame = TestFrame::new(800, 600);
    let bucket = Arc::new(ItemBucket::empty(BucketCategory::OpaqueShape));
    let mut job = Draw::new("DrawOpaques");

    frame.run(&mut job, (bucket, plumber())).unwrap();

    let batches = frame.gpu.batches_named("DrawOpaques");
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].commands, vec!["set_projection", "set_view", "set_model"]);
}

#[test]
fn test_draw_groups_by_pipeline() {
    let mut frame = TestFrame::new(800, 600);
    let ids = vec![
        frame.items.insert(shape(KEY_A, 0.0)),
        frame.items.insert(shape(KEY_B, 1.0)),
        frame.items.insert(shape(KEY_A, 2.0)),
        frame.items.insert(shape(KEY_B, 3.0)),
        frame.items.insert(shape(KEY_A, 4.0)),
    ];
    let bucket = Arc::new(ItemBucket::new(BucketCategory::OpaqueShape, ids));
    let mut job = Draw::new("DrawOpaques");

    frame.run(&mut job, (bucket, plumber())).unwrap();

    let batch = frame.gpu.batches_named("DrawOpaques")[0];
    assert_eq!(batch.pipeline_bind_count(), 2);
    assert_eq!(batch.draw_count(), 5);

    let order: Vec<&str> = batch
        .commands
        .iter()
        .filter(|c| c.starts_with("set_pipeline") || c.starts_with("draw"))
        .map(|c| c.as_str())
        .collect();
    assert_eq!(order, vec![
        "set_pipeline(A)", "draw(TriangleList,6)", "draw(TriangleList,6)", "draw(TriangleList,6)",
        "set_pipeline(B)", "draw(TriangleList,6)", "draw(TriangleList,6)",
    ]);
}

#[test]
fn test_draw_twice_identical_traces() {
    let mut frame = TestFrame::new(800, 600);
    let ids = vec![
        frame.items.insert(shape(KEY_B, 0.0)),
        frame.items.insert(shape(KEY_A, 1.0)),
        frame.items.insert(shape(KEY_B, 2.0)),
    ];
    let bucket = Arc::new(ItemBucket::new(BucketCategory::TransparentShape, ids));
    let plumber = plumber();
    let mut job = Draw::new("DrawTransparents");

    frame.run(&mut job, (bucket.clone(), plumber.clone())).unwrap();
    frame.run(&mut job, (bucket, plumber)).unwrap();

    let batches = frame.gpu.batches_named("DrawTransparents");
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].commands, batches[1].commands);
}
