use crate::components::entity::Entity;
use crate::renderer::instance::{BoxInstance, RenderBuffer};

/// Convert one entity into its render instance.
pub fn box_instance(entity: &Entity) -> BoxInstance {
    let dims = entity.dims();
    let material = entity.material;
    BoxInstance {
        x: entity.pos.x,
        y: entity.pos.y,
        z: entity.pos.z,
        width: dims.x,
        height: dims.y,
        depth: dims.z,
        r: material.color.r,
        g: material.color.g,
        b: material.color.b,
        role: entity.role.as_f32(),
        cast_shadow: if material.cast_shadow { 1.0 } else { 0.0 },
        receive_shadow: if material.receive_shadow { 1.0 } else { 0.0 },
    }
}

/// Rebuild the render buffer from the scene, keeping scene order so JS can
/// match instances to meshes by index. At most `max_instances` are written;
/// returns how many entities did not fit.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut RenderBuffer,
    max_instances: usize,
) -> usize {
    buffer.clear();
    let mut dropped = 0usize;
    for entity in entities {
        if buffer.instances.len() >= max_instances {
            dropped += 1;
            continue;
        }
        buffer.push(box_instance(entity));
    }
    dropped
}
