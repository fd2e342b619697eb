//! Player movement, jumping, climbing and shooting.

use crate::collision::{ladder_contact, resolve_blocker};
use crate::config::{
    GravityMode, JUMP_SPEED, LADDER_SPEED, MAX_FALL_SPEED, PLAYER_GUN_COOLDOWN, PLAYER_SPEED,
    WALL_JUMP_PUSH,
};
use crate::entities::{Bullet, BulletOrigin, Direction, Entity, Player, Wall};
use crate::geometry::Rect;
use crate::map::{Tag, TileMap};
use crate::world::{GameEvent, World};

impl Entity for Player {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, dt: f32, world: &mut World) {
        let last = self.rect;

        self.apply_controls(dt, world);
        self.gun_cooldown = (self.gun_cooldown - dt).max(0.0);
        self.apply_gravity(dt, world.config.gravity);
        self.integrate(dt);
        self.resolve_map(&last, &world.map, world.input.down);

        world.viewport.set_focus(self.rect.x, self.rect.y);
    }
}

impl Player {
    /// Walking, climbing, shooting and jumping from the held keys.
    pub fn apply_controls(&mut self, dt: f32, world: &mut World) {
        let input = world.input;

        // Walking moves the rect directly and cancels wall-jump drift.
        if input.left {
            self.rect.x -= PLAYER_SPEED * dt;
            self.direction = Direction::Left;
            self.dx = 0.0;
        }
        if input.right {
            self.rect.x += PLAYER_SPEED * dt;
            self.direction = Direction::Right;
            self.dx = 0.0;
        }
        if input.up && self.on_ladder {
            self.rect.y -= LADDER_SPEED * dt;
            self.dx = 0.0;
        }
        if input.down && self.on_ladder {
            self.rect.y += LADDER_SPEED * dt;
            self.dx = 0.0;
        }

        if input.shoot && self.gun_cooldown == 0.0 {
            let muzzle = match self.direction {
                Direction::Right => self.rect.mid_right(),
                Direction::Left => self.rect.mid_left(),
            };
            world.spawn_bullet(Bullet::new(BulletOrigin::Player, muzzle, self.direction));
            world.emit(GameEvent::Shot(BulletOrigin::Player));
            self.gun_cooldown = PLAYER_GUN_COOLDOWN;
        }

        if input.jump && (self.resting || self.on_wall.is_some()) && self.jump() {
            world.emit(GameEvent::Jump);
        }
    }

    /// Starts a jump if the current contact allows one.
    ///
    /// Against a wall only a wall-jump is possible, and only off a different
    /// wall than the previous one. Returns whether the player jumped.
    pub fn jump(&mut self) -> bool {
        match self.on_wall {
            Some(wall) if self.previous_wall != Some(wall) => {
                // Push away from the wall and turn to face the open side.
                self.direction = match wall {
                    Wall::Left => Direction::Right,
                    Wall::Right => Direction::Left,
                };
                self.dy = -JUMP_SPEED;
                self.dx = self.direction.sign() * WALL_JUMP_PUSH;
                self.previous_wall = Some(wall);
                true
            }
            _ if self.resting => {
                self.dy = -JUMP_SPEED;
                true
            }
            _ => false,
        }
    }

    pub fn apply_gravity(&mut self, dt: f32, gravity: GravityMode) {
        if !self.on_ladder {
            self.dy = (self.dy + gravity.increment(dt)).min(MAX_FALL_SPEED);
        }
    }

    pub fn integrate(&mut self, dt: f32) {
        self.rect.y += self.dy * dt;
        self.rect.x += self.dx * dt;
    }

    /// Re-derives the contact flags from ladders and blockers, pushing the
    /// player out of anything crossed since `last`.
    pub fn resolve_map(&mut self, last: &Rect, map: &TileMap, descending: bool) {
        self.resting = false;
        self.on_wall = None;
        self.on_ladder = false;

        for region in map.collide(self.rect, Tag::Action) {
            if !region.is_ladder() {
                continue;
            }
            let contact = ladder_contact(last, &self.rect, &region.rect);
            if contact.inside {
                self.on_ladder = true;
                self.resting = true;
                self.dy = 0.0;
            }
            if contact.crossed_top {
                self.on_ladder = true;
                self.resting = true;
                if !descending {
                    self.rect.set_bottom(region.rect.top());
                }
                self.dy = 0.0;
                self.dx = 0.0;
                self.previous_wall = None;
            }
        }

        for region in map.collide(self.rect, Tag::Blockers) {
            let contact = resolve_blocker(last, &mut self.rect, region);
            if let Some(wall) = contact.wall {
                self.on_wall = Some(wall);
            }
            if contact.landed {
                self.resting = true;
                self.dy = 0.0;
                self.dx = 0.0;
                self.previous_wall = None;
            }
            if contact.bumped_head {
                self.dy = 0.0;
                self.dx = 0.0;
            }
        }
    }
}
