//! Fixed-capacity entity storage with per-entity capability masks.

use bevy_ecs::resource::Resource;
use glam::IVec2;
use tracing::trace;

use crate::constants::MAX_ENTITIES;
use crate::systems::animation::Animation;
use crate::systems::components::{ComponentMask, EntityId, Visual};
use crate::systems::movement::{Motion, Transform};

/// Parallel component arrays indexed by [`EntityId`].
///
/// Systems scan the whole capacity and skip slots lacking the bits they need. Data in a
/// slot whose bit is cleared is stale and never read.
#[derive(Resource, Debug, Clone)]
pub struct EntityStore {
    masks: Vec<ComponentMask>,
    transforms: Vec<Transform>,
    visuals: Vec<Visual>,
    animations: Vec<Animation>,
    motions: Vec<Motion>,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self {
            masks: vec![ComponentMask::empty(); MAX_ENTITIES],
            transforms: vec![Transform::default(); MAX_ENTITIES],
            visuals: vec![Visual::default(); MAX_ENTITIES],
            animations: vec![Animation::default(); MAX_ENTITIES],
            motions: vec![Motion::default(); MAX_ENTITIES],
        }
    }
}

impl EntityStore {
    /// Every handle the store can hold, in slot order.
    pub fn ids() -> impl Iterator<Item = EntityId> {
        (0..MAX_ENTITIES as u16).map(EntityId)
    }

    /// Returns the first free slot.
    ///
    /// The slot stays free until a component is inserted, so insert before creating again.
    ///
    /// # Panics
    ///
    /// Panics when every slot is in use. Capacity is sized above anything a level can
    /// spawn, so running out means the static bound is wrong.
    pub fn create(&mut self) -> EntityId {
        let index = self
            .masks
            .iter()
            .position(|mask| mask.is_empty())
            .unwrap_or_else(|| panic!("entity store exhausted: all {MAX_ENTITIES} slots are in use"));
        EntityId(index as u16)
    }

    /// Clears every capability bit, freeing the slot for reuse.
    pub fn destroy(&mut self, entity: EntityId) {
        trace!(entity = entity.0, mask = ?self.masks[entity.index()], "Entity destroyed");
        self.masks[entity.index()] = ComponentMask::empty();
    }

    pub fn mask(&self, entity: EntityId) -> ComponentMask {
        self.masks[entity.index()]
    }

    /// Whether the entity carries every component in `required`.
    pub fn has(&self, entity: EntityId, required: ComponentMask) -> bool {
        self.masks[entity.index()].contains(required)
    }

    pub fn is_alive(&self, entity: EntityId) -> bool {
        !self.masks[entity.index()].is_empty()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.masks.iter().filter(|mask| !mask.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the given capability bits without touching the data.
    pub fn remove(&mut self, entity: EntityId, components: ComponentMask) {
        self.masks[entity.index()].remove(components);
    }

    /// Sets capability bits for data already in place, e.g. to resume an animation.
    pub fn enable(&mut self, entity: EntityId, components: ComponentMask) {
        self.masks[entity.index()].insert(components);
    }

    pub fn insert_transform(&mut self, entity: EntityId, transform: Transform) {
        self.transforms[entity.index()] = transform;
        self.masks[entity.index()].insert(ComponentMask::POSITION);
    }

    pub fn insert_visual(&mut self, entity: EntityId, visual: Visual) {
        self.visuals[entity.index()] = visual;
        self.masks[entity.index()].insert(ComponentMask::VISUAL);
    }

    pub fn insert_animation(&mut self, entity: EntityId, animation: Animation) {
        self.animations[entity.index()] = animation;
        self.masks[entity.index()].insert(ComponentMask::ANIMATION);
    }

    pub fn insert_motion(&mut self, entity: EntityId, motion: Motion) {
        self.motions[entity.index()] = motion;
        self.masks[entity.index()].insert(ComponentMask::MOTION);
    }

    pub fn transform(&self, entity: EntityId) -> &Transform {
        debug_assert!(self.has(entity, ComponentMask::POSITION), "{entity:?} has no position");
        &self.transforms[entity.index()]
    }

    pub fn transform_mut(&mut self, entity: EntityId) -> &mut Transform {
        debug_assert!(self.has(entity, ComponentMask::POSITION), "{entity:?} has no position");
        &mut self.transforms[entity.index()]
    }

    pub fn visual(&self, entity: EntityId) -> &Visual {
        debug_assert!(self.has(entity, ComponentMask::VISUAL), "{entity:?} has no visual");
        &self.visuals[entity.index()]
    }

    pub fn visual_mut(&mut self, entity: EntityId) -> &mut Visual {
        debug_assert!(self.has(entity, ComponentMask::VISUAL), "{entity:?} has no visual");
        &mut self.visuals[entity.index()]
    }

    /// The entity's animation data. Readable while the animation bit is cleared, since a
    /// paused animation keeps its state for when it resumes.
    pub fn animation(&self, entity: EntityId) -> &Animation {
        &self.animations[entity.index()]
    }

    pub fn animation_mut(&mut self, entity: EntityId) -> &mut Animation {
        &mut self.animations[entity.index()]
    }

    pub fn motion(&self, entity: EntityId) -> &Motion {
        &self.motions[entity.index()]
    }

    pub fn motion_mut(&mut self, entity: EntityId) -> &mut Motion {
        &mut self.motions[entity.index()]
    }

    /// Position and motion of one entity, borrowed together.
    pub fn transform_and_motion_mut(&mut self, entity: EntityId) -> (&mut Transform, &mut Motion) {
        debug_assert!(
            self.has(entity, ComponentMask::POSITION | ComponentMask::MOTION),
            "{entity:?} cannot move"
        );
        (&mut self.transforms[entity.index()], &mut self.motions[entity.index()])
    }

    /// Visual and animation of one entity, borrowed together.
    pub fn visual_and_animation_mut(&mut self, entity: EntityId) -> (&mut Visual, &mut Animation) {
        (&mut self.visuals[entity.index()], &mut self.animations[entity.index()])
    }

    /// The cell an entity's position falls in.
    pub fn cell(&self, entity: EntityId) -> IVec2 {
        self.transform(entity).cell()
    }

    /// The first entity positioned in `cell` that satisfies `filter`.
    pub fn find_at_cell(&self, cell: IVec2, mut filter: impl FnMut(EntityId) -> bool) -> Option<EntityId> {
        Self::ids().find(|&entity| self.has(entity, ComponentMask::POSITION) && self.cell(entity) == cell && filter(entity))
    }
}
