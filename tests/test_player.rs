use tile_platformer::config::{GravityMode, SessionConfig};
use tile_platformer::entities::*;
use tile_platformer::geometry::Rect;
use tile_platformer::input::InputSnapshot;
use tile_platformer::map::TileMap;
use tile_platformer::world::{GameEvent, World};

/// Exactly representable, so positions compare with `==`.
const DT: f32 = 1.0 / 32.0;

const FLOOR: &[&str] = &[
    "##########",
    "#........#",
    "#........#",
    "#P.......#",
    "##########",
];

fn make_world(rows: &[&str]) -> World {
    let map = TileMap::from_ascii(&rows.join("\n")).unwrap();
    World::new(map, SessionConfig::default()).unwrap()
}

/// A world whose player has already settled onto the floor.
fn grounded(rows: &[&str]) -> World {
    let mut w = make_world(rows);
    w.tick(DT, InputSnapshot::default());
    assert!(w.player.resting);
    w
}

fn held(f: impl FnOnce(&mut InputSnapshot)) -> InputSnapshot {
    let mut input = InputSnapshot::default();
    f(&mut input);
    input
}

// ── Landing & gravity ─────────────────────────────────────────────────────────

#[test]
fn spawned_player_settles_onto_the_floor() {
    let w = grounded(FLOOR);
    assert_eq!(w.player.rect, Rect::new(32.0, 96.0, 16.0, 32.0));
    assert_eq!(w.player.dy, 0.0);
}

#[test]
fn jump_sets_launch_speed_then_gravity_applies() {
    let mut w = grounded(FLOOR);
    w.input = held(|i| i.jump = true);

    let mut p = w.player.clone();
    p.apply_controls(DT, &mut w);
    assert_eq!(p.dy, -500.0);
    p.apply_gravity(DT, w.config.gravity);
    assert_eq!(p.dy, -460.0);
}

#[test]
fn jump_through_ticks() {
    let mut w = grounded(FLOOR);
    w.tick(DT, held(|i| i.jump = true));
    assert_eq!(w.player.dy, -460.0);
    assert!(!w.player.resting);
    assert!(w.drain_events().contains(&GameEvent::Jump));

    w.tick(DT, InputSnapshot::default());
    assert_eq!(w.player.dy, -420.0);
}

#[test]
fn jump_lands_back_on_the_floor() {
    let mut w = grounded(FLOOR);
    w.tick(DT, held(|i| i.jump = true));
    for _ in 0..200 {
        w.tick(DT, InputSnapshot::default());
        if w.player.resting {
            break;
        }
    }
    assert!(w.player.resting);
    assert_eq!(w.player.rect.bottom(), 128.0);
}

#[test]
fn cannot_jump_in_mid_air() {
    let mut p = Player::new(0.0, 0.0);
    assert!(!p.jump());
    assert_eq!(p.dy, 0.0);
}

#[test]
fn fall_speed_is_capped() {
    let mut p = Player::new(0.0, 0.0);
    p.dy = 390.0;
    p.apply_gravity(DT, GravityMode::PerTick);
    assert_eq!(p.dy, 400.0);
    p.apply_gravity(DT, GravityMode::PerTick);
    assert_eq!(p.dy, 400.0);
}

#[test]
fn per_second_gravity_matches_per_tick_at_the_nominal_rate() {
    let per_second = GravityMode::PerSecond { tick_rate: 32.0 };
    assert_eq!(per_second.increment(DT), GravityMode::PerTick.increment(DT));
    assert_eq!(per_second.increment(DT / 2.0), 20.0);
}

#[test]
fn no_gravity_on_a_ladder() {
    let mut p = Player::new(0.0, 0.0);
    p.on_ladder = true;
    p.apply_gravity(DT, GravityMode::PerTick);
    assert_eq!(p.dy, 0.0);
}

// ── Walking ───────────────────────────────────────────────────────────────────

#[test]
fn walking_moves_directly_and_sets_facing() {
    let mut w = grounded(FLOOR);
    w.player.rect.x = 100.0;
    w.player.dx = 200.0;
    w.tick(DT, held(|i| i.left = true));
    assert_eq!(w.player.rect.x, 100.0 - 9.375);
    assert_eq!(w.player.direction, Direction::Left);
    assert_eq!(w.player.dx, 0.0);
}

#[test]
fn walking_into_a_wall_stops_at_its_face() {
    let mut w = grounded(&[
        "##########",
        "#........#",
        "#...#....#",
        "#P..#....#",
        "##########",
    ]);
    for _ in 0..12 {
        w.tick(DT, held(|i| i.right = true));
    }
    assert_eq!(w.player.rect.right(), 128.0);
    assert_eq!(w.player.on_wall, Some(Wall::Right));
    assert!(w.player.resting);
}

// ── Wall-jumps ────────────────────────────────────────────────────────────────

#[test]
fn wall_jump_pushes_away_from_the_wall() {
    let mut p = Player::new(0.0, 0.0);
    p.on_wall = Some(Wall::Left);
    assert!(p.jump());
    assert_eq!(p.dy, -500.0);
    assert_eq!(p.dx, 200.0);
    assert_eq!(p.direction, Direction::Right);
    assert_eq!(p.previous_wall, Some(Wall::Left));

    let mut p = Player::new(0.0, 0.0);
    p.on_wall = Some(Wall::Right);
    assert!(p.jump());
    assert_eq!(p.dx, -200.0);
    assert_eq!(p.direction, Direction::Left);
}

#[test]
fn same_wall_cannot_be_jumped_twice() {
    let mut p = Player::new(0.0, 0.0);
    p.on_wall = Some(Wall::Left);
    assert!(p.jump());

    p.dy = 0.0;
    assert!(!p.jump());
    assert_eq!(p.dy, 0.0);

    // The opposite wall is fine.
    p.on_wall = Some(Wall::Right);
    assert!(p.jump());
    assert_eq!(p.previous_wall, Some(Wall::Right));
}

#[test]
fn landing_clears_the_wall_jump_memory() {
    let mut w = make_world(FLOOR);
    w.player.previous_wall = Some(Wall::Left);
    w.tick(DT, InputSnapshot::default());
    assert!(w.player.resting);
    assert_eq!(w.player.previous_wall, None);
}

// ── Ladders ───────────────────────────────────────────────────────────────────

const LADDER: &[&str] = &[
    "##########",
    "#...H....#",
    "#...H....#",
    "#P..H....#",
    "##########",
];

#[test]
fn standing_in_a_ladder_then_climbing() {
    let mut w = make_world(LADDER);
    w.player.rect.x = 136.0;
    w.tick(DT, InputSnapshot::default());
    assert!(w.player.on_ladder);
    assert!(w.player.resting);

    w.tick(DT, held(|i| i.up = true));
    assert_eq!(w.player.rect.y, 96.0 - 9.375);
    assert!(w.player.on_ladder);
    assert_eq!(w.player.dy, 0.0);
}

#[test]
fn climbing_needs_the_ladder_from_the_previous_tick() {
    let mut w = grounded(LADDER);
    // Player spawned at x=32, nowhere near the ladder.
    w.tick(DT, held(|i| i.up = true));
    assert_eq!(w.player.rect.y, 96.0);
}

#[test]
fn dropping_onto_a_ladder_top_holds_unless_descending() {
    let w = make_world(&[
        "##########",
        "#........#",
        "#...H....#",
        "#P..H....#",
        "##########",
    ]);
    let last = Rect::new(136.0, 30.0, 16.0, 32.0);
    let new = Rect::new(136.0, 40.0, 16.0, 32.0);

    let mut p = Player::new(0.0, 0.0);
    p.rect = new;
    p.dy = 300.0;
    p.previous_wall = Some(Wall::Left);
    p.resolve_map(&last, &w.map, false);
    assert_eq!(p.rect.bottom(), 64.0);
    assert!(p.on_ladder && p.resting);
    assert_eq!(p.dy, 0.0);
    assert_eq!(p.previous_wall, None);

    let mut p = Player::new(0.0, 0.0);
    p.rect = new;
    p.resolve_map(&last, &w.map, true);
    assert_eq!(p.rect.y, 40.0);
    assert!(p.on_ladder);
}

// ── Shooting ──────────────────────────────────────────────────────────────────

#[test]
fn shooting_spawns_from_the_facing_edge() {
    let mut w = grounded(FLOOR);
    w.tick(DT, held(|i| i.shoot = true));

    assert_eq!(w.bullets.len(), 1);
    let b = &w.bullets[0];
    assert_eq!(b.origin, BulletOrigin::Player);
    assert_eq!(b.direction, Direction::Right);
    assert_eq!((b.rect.x, b.rect.y), (48.0, 112.0));
    assert_eq!(w.player.gun_cooldown, 0.25 - DT);
}

#[test]
fn facing_left_shoots_left() {
    let mut w = grounded(FLOOR);
    w.player.rect.x = 200.0;
    w.player.direction = Direction::Left;
    w.tick(DT, held(|i| i.shoot = true));
    let b = &w.bullets[0];
    assert_eq!(b.direction, Direction::Left);
    assert_eq!(b.rect.x, 200.0);
}

#[test]
fn cooldown_limits_the_fire_rate() {
    let mut w = grounded(FLOOR);
    for _ in 0..8 {
        w.tick(DT, held(|i| i.shoot = true));
    }
    assert_eq!(w.bullets.len(), 1);
    assert_eq!(w.player.gun_cooldown, 0.0);

    w.tick(DT, held(|i| i.shoot = true));
    assert_eq!(w.bullets.len(), 2);
}

#[test]
fn viewport_follows_the_player() {
    let row = format!("#{}#", ".".repeat(58));
    let spawn = format!("#P{}#", ".".repeat(57));
    let wall = "#".repeat(60);
    let mut w = grounded(&[wall.as_str(), row.as_str(), spawn.as_str(), wall.as_str()]);
    w.player.rect.x = 1000.0;
    w.tick(DT, InputSnapshot::default());
    assert_eq!(w.viewport.x, 1000.0 - 320.0);
}
