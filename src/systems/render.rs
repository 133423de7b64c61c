use glam::Vec2;

use crate::sprites::SpriteId;
use crate::systems::components::{ComponentMask, EntityId};
use crate::systems::store::EntityStore;

/// What a renderer needs to draw one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderItem {
    pub entity: EntityId,
    /// Center of the entity, in pixels.
    pub position: Vec2,
    pub scale: Vec2,
    pub sprite: SpriteId,
}

/// Every positioned, visible entity in slot order.
pub fn render_list(store: &EntityStore) -> Vec<RenderItem> {
    EntityStore::ids()
        .filter(|&entity| store.has(entity, ComponentMask::POSITION | ComponentMask::VISUAL))
        .map(|entity| {
            let transform = store.transform(entity);
            RenderItem {
                entity,
                position: transform.translate,
                scale: transform.scale,
                sprite: store.visual(entity).sprite,
            }
        })
        .collect()
}
