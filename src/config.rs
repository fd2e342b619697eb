//! Tuning constants and per-session settings.
//!
//! Speeds are pixels per second, times are seconds unless the name says
//! otherwise.

// ── Screen & clock ───────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: f32 = 640.0;
pub const SCREEN_HEIGHT: f32 = 360.0;
/// Target ticks per second for the frame limiter.
pub const TICK_RATE: f32 = 25.0;
/// Longest `dt` a single tick may consume.
pub const MAX_DT: f32 = 0.1;

// ── Map ──────────────────────────────────────────────────────────────────────

pub const TILE_SIZE: f32 = 32.0;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: (f32, f32) = (16.0, 32.0);
pub const PLAYER_SPEED: f32 = 300.0;
pub const LADDER_SPEED: f32 = 300.0;
pub const JUMP_SPEED: f32 = 500.0;
pub const WALL_JUMP_PUSH: f32 = 200.0;
/// Added to `dy` once per tick (see `GravityMode`).
pub const GRAVITY_STEP: f32 = 40.0;
pub const MAX_FALL_SPEED: f32 = 400.0;
pub const PLAYER_GUN_COOLDOWN: f32 = 0.25;

// ── Enemy ────────────────────────────────────────────────────────────────────

pub const ENEMY_SIZE: (f32, f32) = (16.0, 32.0);
pub const ENEMY_SPEED: f32 = 100.0;
pub const ENEMY_GUN_COOLDOWN: f32 = 1.0;
/// Horizontal reach of the enemy's aim check (exclusive).
pub const ENEMY_SIGHT_RANGE: f32 = 200.0;
/// Vertical tolerance of the enemy's aim check (inclusive).
pub const ENEMY_SIGHT_HEIGHT: f32 = 32.0;
pub const CONTACT_DAMAGE: i32 = 10;
pub const CONTACT_BOUNCE: f32 = 16.0;

// ── Projectiles & effects ────────────────────────────────────────────────────

pub const BULLET_SIZE: (f32, f32) = (8.0, 4.0);
pub const BULLET_SPEED: f32 = 400.0;
pub const BULLET_LIFESPAN: f32 = 1.0;
pub const BULLET_DAMAGE: i32 = 10;
pub const KILL_SCORE: u32 = 10;

pub const EXPLOSION_LIFESPAN: f32 = 0.5;
pub const EXPLOSION_FPS: u32 = 10;
pub const EXPLOSION_FRAME_WIDTH: u32 = 20;
pub const EXPLOSION_FRAME_HEIGHT: u32 = 20;
pub const EXPLOSION_STRIP_WIDTH: u32 = 80;

// ── Pickups & session ────────────────────────────────────────────────────────

pub const COIN_SIZE: (f32, f32) = (16.0, 16.0);
pub const COIN_SCORE: u32 = 10;
pub const COIN_HEAL: i32 = 5;
pub const MAX_HEALTH: i32 = 200;
pub const START_LIVES: u32 = 3;

/// How the per-tick gravity increment relates to elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GravityMode {
    /// `dy += GRAVITY_STEP` every tick regardless of `dt`; the feel of the
    /// game is tied to the tick rate.
    PerTick,
    /// `dy += GRAVITY_STEP * dt * tick_rate`, matching `PerTick` exactly
    /// when `dt == 1 / tick_rate`.
    PerSecond { tick_rate: f32 },
}

impl GravityMode {
    pub fn increment(&self, dt: f32) -> f32 {
        match self {
            GravityMode::PerTick => GRAVITY_STEP,
            GravityMode::PerSecond { tick_rate } => GRAVITY_STEP * dt * tick_rate,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    pub gravity: GravityMode,
    pub lives: u32,
    pub max_dt: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            gravity: GravityMode::PerTick,
            lives: START_LIVES,
            max_dt: MAX_DT,
        }
    }
}
