use bevy_ecs::system::{Res, ResMut};

use crate::sprites::SpriteId;
use crate::systems::components::{ComponentMask, DeltaTime};
use crate::systems::store::EntityStore;

/// A strip of contiguous sprites played at a fixed rate.
///
/// Strips of three or more frames play back and forth (0, 1, 2, 1, 0, ...). Shorter
/// strips simply alternate. A non-looping strip finishes once its last frame is shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub base_sprite_id: SpriteId,
    pub current_sprite_id: u8,
    pub num_frames: u8,
    pub is_looped: bool,
    pub is_finished: bool,
    pub is_reversed: bool,
    pub seconds_since_last_frame: f32,
    pub seconds_between_frames: f32,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            base_sprite_id: SpriteId::default(),
            current_sprite_id: 0,
            num_frames: 1,
            is_looped: true,
            is_finished: false,
            is_reversed: false,
            seconds_since_last_frame: 0.0,
            seconds_between_frames: 1.0,
        }
    }
}

impl Animation {
    /// Creates a looping animation.
    pub fn looping(base_sprite_id: SpriteId, num_frames: u8, seconds_between_frames: f32) -> Self {
        Self::new(base_sprite_id, num_frames, seconds_between_frames, true)
    }

    /// Creates an animation that plays through once and then finishes.
    pub fn once(base_sprite_id: SpriteId, num_frames: u8, seconds_between_frames: f32) -> Self {
        Self::new(base_sprite_id, num_frames, seconds_between_frames, false)
    }

    fn new(base_sprite_id: SpriteId, num_frames: u8, seconds_between_frames: f32, is_looped: bool) -> Self {
        assert!(num_frames > 0, "animation needs at least one frame");
        assert!(seconds_between_frames > 0.0, "animation frame time must be positive");
        Self {
            base_sprite_id,
            num_frames,
            is_looped,
            seconds_between_frames,
            ..Default::default()
        }
    }

    /// The sprite for the current frame.
    pub fn current_sprite(&self) -> SpriteId {
        self.base_sprite_id.offset(self.current_sprite_id)
    }

    /// Switches to another strip, keeping the frame timing.
    pub fn retarget(&mut self, base_sprite_id: SpriteId, num_frames: u8) {
        assert!(num_frames > 0, "animation needs at least one frame");
        self.base_sprite_id = base_sprite_id;
        self.num_frames = num_frames;
        if self.current_sprite_id >= num_frames {
            self.current_sprite_id = 0;
            self.is_reversed = false;
        }
    }

    /// Accumulates `dt` and, once a frame's time is up, returns the sprite to display
    /// and steps to the next frame.
    pub fn tick(&mut self, dt: f32) -> Option<SpriteId> {
        if self.is_finished {
            return None;
        }

        self.seconds_since_last_frame += dt;
        if self.seconds_since_last_frame < self.seconds_between_frames {
            return None;
        }
        self.seconds_since_last_frame = 0.0;

        let shown = self.current_sprite();
        let last = self.num_frames - 1;

        if self.num_frames <= 2 {
            if !self.is_looped && self.current_sprite_id == last {
                self.is_finished = true;
            } else {
                self.current_sprite_id = (self.current_sprite_id + 1) % self.num_frames;
            }
            return Some(shown);
        }

        if self.is_reversed {
            if !self.is_looped {
                self.is_finished = true;
                return Some(shown);
            }
            self.current_sprite_id -= 1;
            self.is_reversed = self.current_sprite_id != 0;
        } else {
            self.current_sprite_id += 1;
            self.is_reversed = self.current_sprite_id == last;
        }

        Some(shown)
    }
}

/// Steps every running animation and writes the displayed frame into its visual.
pub fn animation_system(delta_time: Res<DeltaTime>, mut store: ResMut<EntityStore>) {
    for entity in EntityStore::ids() {
        if !store.has(entity, ComponentMask::VISUAL | ComponentMask::ANIMATION) {
            continue;
        }

        let (visual, animation) = store.visual_and_animation_mut(entity);
        if let Some(sprite) = animation.tick(delta_time.0) {
            visual.sprite = sprite;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn frames(animation: &mut Animation, ticks: usize) -> Vec<u16> {
        (0..ticks).filter_map(|_| animation.tick(0.1)).map(|sprite| sprite.0).collect()
    }

    #[test]
    fn test_three_frame_strip_ping_pongs() {
        let mut animation = Animation::looping(SpriteId(10), 3, 0.1);
        assert_eq!(frames(&mut animation, 7), vec![10, 11, 12, 11, 10, 11, 12]);
    }

    #[test]
    fn test_two_frame_strip_alternates() {
        let mut animation = Animation::looping(SpriteId(4), 2, 0.1);
        assert_eq!(frames(&mut animation, 5), vec![4, 5, 4, 5, 4]);
    }

    #[test]
    fn test_non_looped_strip_finishes_on_last_frame() {
        let mut animation = Animation::once(SpriteId(0), 4, 0.1);
        assert_eq!(frames(&mut animation, 10), vec![0, 1, 2, 3]);
        assert!(animation.is_finished);
        assert_eq!(animation.current_sprite_id, 3);
    }

    #[test]
    fn test_frame_waits_for_accumulated_time() {
        let mut animation = Animation::looping(SpriteId(0), 2, 0.25);
        assert_eq!(animation.tick(0.1), None);
        assert_eq!(animation.tick(0.1), None);
        assert_eq!(animation.tick(0.1), Some(SpriteId(0)));
        assert_eq!(animation.tick(0.0), None);
    }

    #[test]
    fn test_retarget_clamps_frame() {
        let mut animation = Animation::looping(SpriteId(0), 3, 0.1);
        frames(&mut animation, 2);
        assert_eq!(animation.current_sprite_id, 2);

        animation.retarget(SpriteId(40), 2);
        assert_eq!(animation.current_sprite_id, 0);
        assert_eq!(animation.current_sprite(), SpriteId(40));
    }
}
