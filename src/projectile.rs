//! Bullets and the explosions they leave behind.

use crate::collision::crossing;
use crate::config::{BULLET_DAMAGE, BULLET_SPEED, KILL_SCORE};
use crate::entities::{Bullet, BulletOrigin, Entity, Explosion};
use crate::geometry::Rect;
use crate::map::Tag;
use crate::world::{GameEvent, World};

impl Entity for Bullet {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, dt: f32, world: &mut World) {
        let last = self.rect;

        self.lifespan -= dt;
        if self.lifespan < 0.0 {
            self.kill();
            return;
        }

        self.rect.x += self.direction.sign() * BULLET_SPEED * dt;

        match self.origin {
            BulletOrigin::Player => self.hit_enemy(world),
            BulletOrigin::Enemy => self.hit_player(world),
        }

        // Walls stop bullets from either side. A shot fired point-blank starts
        // inside the wall face it was aimed at, so a wall face overlapping the
        // bullet counts as well as one crossed this tick.
        let hit_wall = world.map.collide(self.rect, Tag::Blockers).any(|region| {
            region.sides.left
                || region.sides.right
                || crossing(&last, &self.rect, &region.rect, region.sides).any()
        });
        if hit_wall {
            if self.alive {
                world.emit(GameEvent::Explosion);
            }
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

impl Bullet {
    /// Destroys the first live enemy this bullet overlaps.
    fn hit_enemy(&mut self, world: &mut World) {
        let Some(enemy) = world
            .enemies
            .iter_mut()
            .find(|enemy| enemy.is_alive() && enemy.rect.intersects(&self.rect))
        else {
            return;
        };
        let center = enemy.rect.center();
        enemy.kill();

        world.spawn_explosion(Explosion::new(center));
        world.emit(GameEvent::Explosion);
        world.score += KILL_SCORE;
        log::debug!("enemy destroyed at {:?}, score {}", center, world.score);
        self.kill();
    }

    fn hit_player(&mut self, world: &mut World) {
        if self.rect.intersects(&world.player.rect) {
            world.health -= BULLET_DAMAGE;
            world.emit(GameEvent::Explosion);
            self.kill();
        }
    }
}

impl Entity for Explosion {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, dt: f32, _world: &mut World) {
        self.lifespan -= dt;
        if self.lifespan < 0.0 {
            self.kill();
            return;
        }

        self.since_frame_ms += dt * 1000.0;
        if self.since_frame_ms > self.frame_delay_ms {
            self.frame = (self.frame + 1) % self.frame_count;
            self.since_frame_ms = 0.0;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn kill(&mut self) {
        self.alive = false;
    }
}
