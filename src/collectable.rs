use crate::config::{COIN_HEAL, COIN_SCORE, MAX_HEALTH};
use crate::entities::{Collectable, Entity};
use crate::geometry::Rect;
use crate::world::World;

impl Entity for Collectable {
    fn rect(&self) -> Rect {
        self.rect
    }

    /// Picked up on touch: score plus a little health, never above the cap.
    fn update(&mut self, _dt: f32, world: &mut World) {
        if self.rect.intersects(&world.player.rect) {
            world.score += COIN_SCORE;
            world.health = (world.health + COIN_HEAL).min(MAX_HEALTH);
            self.kill();
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn kill(&mut self) {
        self.alive = false;
    }
}
