//! All game entity types and the update contract they share.
//!
//! The structs are plain data; each variant's behaviour lives in its own
//! module (`player`, `enemy`, `projectile`, `collectable`).

use crate::config::{
    BULLET_LIFESPAN, BULLET_SIZE, COIN_SIZE, ENEMY_SIZE, EXPLOSION_FPS, EXPLOSION_FRAME_HEIGHT,
    EXPLOSION_FRAME_WIDTH, EXPLOSION_LIFESPAN, EXPLOSION_STRIP_WIDTH, PLAYER_SIZE,
};
use crate::geometry::Rect;
use crate::world::World;

/// Anything the session loop advances once per tick.
pub trait Entity {
    fn rect(&self) -> Rect;

    fn update(&mut self, dt: f32, world: &mut World);

    fn is_alive(&self) -> bool {
        true
    }

    /// Marks the entity for removal; calling it again does nothing.
    fn kill(&mut self) {}
}

// ── Small shared enums ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(&self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Side of the entity a wall is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOrigin {
    Player,
    Enemy,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct Player {
    pub rect: Rect,
    pub dx: f32,
    pub dy: f32,
    /// Standing on something and allowed to jump.
    pub resting: bool,
    pub on_ladder: bool,
    pub on_wall: Option<Wall>,
    /// Wall the last wall-jump pushed off from.
    pub previous_wall: Option<Wall>,
    pub direction: Direction,
    pub gun_cooldown: f32,
}

impl Player {
    pub fn new(px: f32, py: f32) -> Player {
        Player {
            rect: Rect::new(px, py, PLAYER_SIZE.0, PLAYER_SIZE.1),
            ..Player::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    pub direction: Direction,
    pub gun_cooldown: f32,
    pub(crate) alive: bool,
}

impl Enemy {
    pub fn new(px: f32, py: f32) -> Enemy {
        Enemy {
            rect: Rect::new(px, py, ENEMY_SIZE.0, ENEMY_SIZE.1),
            direction: Direction::Right,
            gun_cooldown: 0.0,
            alive: true,
        }
    }
}

// ── Projectiles & effects ─────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub rect: Rect,
    pub direction: Direction,
    /// Seconds left before the bullet fizzles out.
    pub lifespan: f32,
    pub origin: BulletOrigin,
    pub(crate) alive: bool,
}

impl Bullet {
    /// `location` becomes the bullet's top-left corner.
    pub fn new(origin: BulletOrigin, location: (f32, f32), direction: Direction) -> Bullet {
        Bullet {
            rect: Rect::new(location.0, location.1, BULLET_SIZE.0, BULLET_SIZE.1),
            direction,
            lifespan: BULLET_LIFESPAN,
            origin,
            alive: true,
        }
    }
}

/// A looping filmstrip animation with a fixed lifespan.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub rect: Rect,
    pub lifespan: f32,
    pub frame: usize,
    pub frame_count: usize,
    pub frame_delay_ms: f32,
    /// Milliseconds since the frame last changed.
    pub since_frame_ms: f32,
    pub(crate) alive: bool,
}

impl Explosion {
    /// Centres a new explosion on `center`.
    pub fn new(center: (f32, f32)) -> Explosion {
        Explosion::with_fps(center, EXPLOSION_FPS)
    }

    /// The first update already steps past frame 0.
    pub fn with_fps(center: (f32, f32), fps: u32) -> Explosion {
        let (w, h) = (EXPLOSION_FRAME_WIDTH as f32, EXPLOSION_FRAME_HEIGHT as f32);
        let frame_delay_ms = 1000.0 / fps.max(1) as f32;
        Explosion {
            rect: Rect::new(center.0 - w / 2.0, center.1 - h / 2.0, w, h),
            lifespan: EXPLOSION_LIFESPAN,
            frame: 0,
            frame_count: filmstrip_frames(EXPLOSION_STRIP_WIDTH, EXPLOSION_FRAME_WIDTH),
            frame_delay_ms,
            since_frame_ms: frame_delay_ms,
            alive: true,
        }
    }
}

/// Number of whole frames in a horizontal filmstrip; never zero.
pub fn filmstrip_frames(strip_width: u32, frame_width: u32) -> usize {
    (strip_width / frame_width.max(1)).max(1) as usize
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Collectable {
    pub rect: Rect,
    pub(crate) alive: bool,
}

impl Collectable {
    pub fn new(px: f32, py: f32) -> Collectable {
        Collectable {
            rect: Rect::new(px, py, COIN_SIZE.0, COIN_SIZE.1),
            alive: true,
        }
    }
}
