/// Default shape pipeline set of the forward task.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::engine_debug;
use crate::gpu::{
    ColorBlendState, CompareOp, CullMode, GpuContext, PipelineDesc, PolygonMode, Program,
    ProgramDesc, ShaderDesc, ShaderSource, ShaderStage, State,
};
use super::shape_key::{ShapeFilter, ShapeKey};
use super::shape_plumber::{BatchSetter, ItemSetter, ShapePipeline, ShapePlumber};

/// Populates a shape plumber; injected into the forward task at build time
pub type PipelineInitFn =
    fn(&mut ShapePlumber, &mut dyn GpuContext, BatchSetter, ItemSetter) -> Result<()>;

/// Variant bits every forward signature is expanded over
const FREE_VARIANT_BITS: ShapeKey = ShapeKey::SKINNED
    .union(ShapeKey::NO_CULL_FACE)
    .union(ShapeKey::WIREFRAME);

/// Register the forward material pipelines
///
/// One filter per signature (material, unlit, translucent, tangents), each
/// with and without fade, expanded over skinning / culling / wireframe.
/// The fade setters are attached to fade keys only.
pub fn init_forward_pipelines(
    plumber: &mut ShapePlumber,
    gpu: &mut dyn GpuContext,
    batch_setter: BatchSetter,
    item_setter: ItemSetter,
) -> Result<()> {
    let signatures = [
        ShapeKey::MATERIAL,
        ShapeKey::MATERIAL | ShapeKey::UNLIT,
        ShapeKey::MATERIAL | ShapeKey::TRANSLUCENT,
        ShapeKey::MATERIAL | ShapeKey::TANGENTS,
    ];

    // Programs are shared by every key using the same shader pair
    let mut programs: FxHashMap<(String, String), Arc<dyn Program>> = FxHashMap::default();

    for signature in signatures {
        for flags in [signature, signature | ShapeKey::FADE] {
            let filter = ShapeFilter::exact(flags).with_free(FREE_VARIANT_BITS);
            plumber.add_pipeline_filtered(filter, |key| {
                let names = shader_names(key);
                let program = match programs.get(&names) {
                    Some(program) => program.clone(),
                    None => {
                        let program = create_program(gpu, &names.0, &names.1)?;
                        programs.insert(names, program.clone());
                        program
                    }
                };

                let state = forward_state(key);
                let pipeline = gpu.create_pipeline(PipelineDesc {
                    name: pipeline_name(key),
                    program: program.clone(),
                    state,
                })?;

                let shape_pipeline = ShapePipeline::new(pipeline, program, state);
                if key.contains(ShapeKey::FADE) {
                    Ok(shape_pipeline.with_setters(batch_setter.clone(), item_setter.clone()))
                } else {
                    Ok(shape_pipeline)
                }
            })?;
        }
    }

    engine_debug!("forward3d::ShapePlumber",
        "Registered {} forward shape pipelines ({} programs)", plumber.len(), programs.len());
    Ok(())
}

/// Library shader names (vertex, pixel) for a key
fn shader_names(key: ShapeKey) -> (String, String) {
    let mut vertex = String::from(if key.contains(ShapeKey::TANGENTS) {
        "model_normal_map"
    } else {
        "model"
    });
    if key.contains(ShapeKey::SKINNED) {
        vertex.insert_str(0, "skin_");
    }

    let mut pixel = String::from(if key.contains(ShapeKey::UNLIT) {
        "model_unlit"
    } else if key.contains(ShapeKey::TRANSLUCENT) {
        "model_translucent"
    } else if key.contains(ShapeKey::TANGENTS) {
        "model_normal_map"
    } else {
        "model"
    });

    if key.contains(ShapeKey::FADE) {
        vertex.push_str("_fade");
        pixel.push_str("_fade");
    }
    (vertex, pixel)
}

fn create_program(gpu: &mut dyn GpuContext, vertex: &str, pixel: &str) -> Result<Arc<dyn Program>> {
    let vertex_shader = gpu.create_shader(ShaderDesc {
        stage: ShaderStage::Vertex,
        source: ShaderSource::Library(vertex.to_string()),
    })?;
    let pixel_shader = gpu.create_shader(ShaderDesc {
        stage: ShaderStage::Pixel,
        source: ShaderSource::Library(pixel.to_string()),
    })?;

    gpu.create_program(ProgramDesc {
        name: format!("{}:{}", vertex, pixel),
        vertex: vertex_shader,
        pixel: pixel_shader,
    })
}

fn forward_state(key: ShapeKey) -> State {
    let mut state = State::default();
    state.depth_stencil.set_depth_test(true, true, CompareOp::LessOrEqual);

    if key.contains(ShapeKey::TRANSLUCENT) {
        state.depth_stencil.depth_write_enable = false;
        state.color_blend = ColorBlendState::alpha_blend();
    }
    if key.contains(ShapeKey::NO_CULL_FACE) {
        state.rasterization.cull_mode = CullMode::None;
    }
    if key.contains(ShapeKey::WIREFRAME) {
        state.rasterization.polygon_mode = PolygonMode::Line;
    }
    state
}

/// e.g. "forward:material+translucent+fade"
fn pipeline_name(key: ShapeKey) -> String {
    let flags: Vec<String> = key.iter_names().map(|(name, _)| name.to_lowercase()).collect();
    format!("forward:{}", flags.join("+"))
}

#[cfg(test)]
#[path = "forward_pipelines_tests.rs"]
mod tests;
