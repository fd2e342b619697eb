//! Session state and the fixed-tick update loop.
//!
//! `World` owns the map, every live entity and the shared counters (score,
//! health, lives). One call to [`World::tick`] advances everything by `dt`
//! and then settles respawn / game-over / victory.

use crate::config::{SessionConfig, MAX_HEALTH};
use crate::entities::{Bullet, BulletOrigin, Collectable, Enemy, Entity, Explosion, Player};
use crate::input::InputSnapshot;
use crate::map::{MapError, SpawnPoint, Tag, TileMap, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    GameOver,
    Victory,
}

impl Status {
    pub fn is_finished(&self) -> bool {
        *self != Status::Running
    }
}

/// Something the audio / log sink may want to react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Jump,
    Shot(BulletOrigin),
    Explosion,
    LifeLost,
    GameOver,
    Victory,
}

/// Per-kind storage inside the world, so passes can take a collection out
/// while its members update against the rest of the world.
trait Roster: Entity + Sized {
    fn roster(world: &mut World) -> &mut Vec<Self>;
}

impl Roster for Bullet {
    fn roster(world: &mut World) -> &mut Vec<Self> {
        &mut world.bullets
    }
}

impl Roster for Explosion {
    fn roster(world: &mut World) -> &mut Vec<Self> {
        &mut world.explosions
    }
}

impl Roster for Enemy {
    fn roster(world: &mut World) -> &mut Vec<Self> {
        &mut world.enemies
    }
}

impl Roster for Collectable {
    fn roster(world: &mut World) -> &mut Vec<Self> {
        &mut world.collectables
    }
}

pub struct World {
    pub map: TileMap,
    pub viewport: Viewport,
    pub config: SessionConfig,
    pub score: u32,
    /// May dip below zero inside a tick; settled at the end of it.
    pub health: i32,
    pub lives: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub explosions: Vec<Explosion>,
    pub collectables: Vec<Collectable>,
    /// Keys held during the current tick.
    pub input: InputSnapshot,
    pub status: Status,
    pub spawn: SpawnPoint,
    pub ticks: u64,
    pending_bullets: Vec<Bullet>,
    pending_explosions: Vec<Explosion>,
    events: Vec<GameEvent>,
}

impl World {
    /// Builds a fresh session, populating actors from the map's spawn cells.
    pub fn new(map: TileMap, config: SessionConfig) -> Result<World, MapError> {
        let spawn = map.player_spawn()?;
        let player = Player::new(spawn.px, spawn.py);
        let enemies = map.find(Tag::Enemy).map(|p| Enemy::new(p.px, p.py)).collect();
        let collectables = map.find(Tag::Coin).map(|p| Collectable::new(p.px, p.py)).collect();

        let mut viewport = Viewport::new(&map);
        viewport.set_focus(spawn.px, spawn.py);

        Ok(World {
            map,
            viewport,
            config,
            score: 0,
            health: MAX_HEALTH,
            lives: config.lives,
            player,
            enemies,
            bullets: Vec::new(),
            explosions: Vec::new(),
            collectables,
            input: InputSnapshot::default(),
            status: Status::Running,
            spawn,
            ticks: 0,
            pending_bullets: Vec::new(),
            pending_explosions: Vec::new(),
            events: Vec::new(),
        })
    }

    // ── Spawning & events ────────────────────────────────────────────────────

    /// Queues a bullet; it joins the world once the current pass finishes.
    pub fn spawn_bullet(&mut self, bullet: Bullet) {
        self.pending_bullets.push(bullet);
    }

    pub fn spawn_explosion(&mut self, explosion: Explosion) {
        self.pending_explosions.push(explosion);
    }

    pub fn pending_bullets(&self) -> &[Bullet] {
        &self.pending_bullets
    }

    pub fn pending_explosions(&self) -> &[Explosion] {
        &self.pending_explosions
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hands every event since the last drain to the caller.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Health as the HUD shows it.
    pub fn display_health(&self) -> u32 {
        self.health.clamp(0, MAX_HEALTH) as u32
    }

    // ── Tick ─────────────────────────────────────────────────────────────────

    /// Advances the session by `dt` seconds with the given keys held.
    ///
    /// A finished session ignores further ticks.
    pub fn tick(&mut self, dt: f32, input: InputSnapshot) -> Status {
        if self.status.is_finished() {
            return self.status;
        }
        let dt = dt.clamp(0.0, self.config.max_dt);
        self.input = input;
        self.ticks += 1;

        let mut player = std::mem::take(&mut self.player);
        player.update(dt, self);
        self.player = player;

        self.update_pass::<Bullet>(dt);
        self.update_pass::<Explosion>(dt);
        self.update_pass::<Enemy>(dt);
        self.update_pass::<Collectable>(dt);

        self.compact();
        self.settle()
    }

    fn update_pass<T: Roster>(&mut self, dt: f32) {
        let mut members = std::mem::take(T::roster(self));
        for member in members.iter_mut() {
            if member.is_alive() {
                member.update(dt, self);
            }
        }
        let slot = T::roster(self);
        members.append(slot);
        *slot = members;
    }

    /// Drops everything killed this tick and admits queued spawns.
    fn compact(&mut self) {
        self.enemies.retain(|e| e.is_alive());
        self.bullets.retain(|b| b.is_alive());
        self.explosions.retain(|e| e.is_alive());
        self.collectables.retain(|c| c.is_alive());
        self.bullets.append(&mut self.pending_bullets);
        self.explosions.append(&mut self.pending_explosions);
    }

    fn settle(&mut self) -> Status {
        if self.health <= 0 {
            self.lives = self.lives.saturating_sub(1);
            self.health = MAX_HEALTH;
            self.respawn();
            self.emit(GameEvent::LifeLost);
            log::info!("life lost, {} remaining", self.lives);
        }

        if self.lives == 0 {
            self.status = Status::GameOver;
            self.emit(GameEvent::GameOver);
            log::info!("game over after {} ticks, score {}", self.ticks, self.score);
        } else if self.map.collide(self.player.rect, Tag::Exit).next().is_some() {
            self.status = Status::Victory;
            self.emit(GameEvent::Victory);
            log::info!("exit reached after {} ticks, score {}", self.ticks, self.score);
        }
        self.status
    }

    /// Puts the player back on the spawn cell recorded at level load.
    pub fn respawn(&mut self) {
        let player = &mut self.player;
        player.rect.x = self.spawn.px;
        player.rect.y = self.spawn.py;
        player.dx = 0.0;
        player.dy = 0.0;
        player.previous_wall = None;
        self.viewport.set_focus(self.spawn.px, self.spawn.py);
    }
}
