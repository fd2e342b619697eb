//! Patrolling enemies.
//!
//! An enemy walks back and forth between `reverse` regions, fires at the
//! player when it is close, level and in front, and hurts the player on
//! contact.

use crate::config::{
    CONTACT_BOUNCE, CONTACT_DAMAGE, ENEMY_GUN_COOLDOWN, ENEMY_SIGHT_HEIGHT, ENEMY_SIGHT_RANGE,
    ENEMY_SPEED,
};
use crate::entities::{Bullet, BulletOrigin, Direction, Enemy, Entity};
use crate::geometry::Rect;
use crate::map::{Tag, TileMap};
use crate::world::{GameEvent, World};

impl Entity for Enemy {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, dt: f32, world: &mut World) {
        self.gun_cooldown = (self.gun_cooldown - dt).max(0.0);

        self.patrol(dt, &world.map);

        let target = world.player.rect;
        if let Some(direction) = self.aim(&target) {
            let muzzle = match direction {
                Direction::Left => self.rect.mid_left(),
                Direction::Right => self.rect.mid_right(),
            };
            world.spawn_bullet(Bullet::new(BulletOrigin::Enemy, muzzle, direction));
            world.emit(GameEvent::Shot(BulletOrigin::Enemy));
            self.gun_cooldown = ENEMY_GUN_COOLDOWN;
        }

        if self.rect.intersects(&target) {
            world.health -= CONTACT_DAMAGE;
            self.bounce();
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn kill(&mut self) {
        self.alive = false;
    }
}

impl Enemy {
    /// Steps along the patrol and turns around at the first reverse region hit.
    pub fn patrol(&mut self, dt: f32, map: &TileMap) {
        self.rect.x += self.direction.sign() * ENEMY_SPEED * dt;

        // Snap out of the region so the next tick doesn't turn us back.
        if let Some(region) = map.collide(self.rect, Tag::Reverse).next() {
            match self.direction {
                Direction::Right => self.rect.set_right(region.rect.left()),
                Direction::Left => self.rect.set_left(region.rect.right()),
            }
            self.direction = self.direction.flipped();
        }
    }

    /// Direction to fire in, if the gun is ready and the player is in the
    /// firing lane in front of this enemy.
    pub fn aim(&self, target: &Rect) -> Option<Direction> {
        if self.gun_cooldown > 0.0 {
            return None;
        }
        let vertical = (target.y - self.rect.y).abs();
        if vertical > ENEMY_SIGHT_HEIGHT {
            return None;
        }

        let (side, distance) = if target.x < self.rect.x {
            (Direction::Left, self.rect.x - target.x)
        } else {
            (Direction::Right, target.x - self.rect.x)
        };
        (distance < ENEMY_SIGHT_RANGE && side == self.direction).then_some(side)
    }

    /// Turns around and steps back after touching the player.
    pub fn bounce(&mut self) {
        self.rect.x -= self.direction.sign() * CONTACT_BOUNCE;
        self.direction = self.direction.flipped();
    }
}
