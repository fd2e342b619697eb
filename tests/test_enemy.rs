use tile_platformer::config::SessionConfig;
use tile_platformer::entities::*;
use tile_platformer::geometry::Rect;
use tile_platformer::input::InputSnapshot;
use tile_platformer::map::TileMap;
use tile_platformer::world::World;

const DT: f32 = 1.0 / 32.0;

const ARENA: &[&str] = &[
    "####################",
    "#..................#",
    "#..................#",
    "#P.................#",
    "####################",
];

fn make_world(rows: &[&str]) -> World {
    let map = TileMap::from_ascii(&rows.join("\n")).unwrap();
    World::new(map, SessionConfig::default()).unwrap()
}

fn facing(mut enemy: Enemy, direction: Direction) -> Enemy {
    enemy.direction = direction;
    enemy
}

// ── Shooting ──────────────────────────────────────────────────────────────────

#[test]
fn fires_at_a_level_player_in_front() {
    let mut w = make_world(ARENA);
    w.player.rect.x = 150.0;
    w.player.rect.y = 96.0;
    let mut enemy = facing(Enemy::new(300.0, 96.0), Direction::Left);

    enemy.update(DT, &mut w);

    let shots = w.pending_bullets();
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].origin, BulletOrigin::Enemy);
    assert_eq!(shots[0].direction, Direction::Left);
    assert_eq!((shots[0].rect.x, shots[0].rect.y), (296.875, 112.0));
    assert_eq!(enemy.gun_cooldown, 1.0);
}

#[test]
fn fired_bullet_joins_the_world_after_the_tick() {
    let mut w = make_world(ARENA);
    w.player.rect.x = 150.0;
    w.enemies.push(facing(Enemy::new(300.0, 96.0), Direction::Left));

    w.tick(DT, InputSnapshot::default());

    assert_eq!(w.bullets.len(), 1);
    assert_eq!(w.bullets[0].origin, BulletOrigin::Enemy);
    assert!(w.pending_bullets().is_empty());
    assert_eq!(w.enemies[0].gun_cooldown, 1.0);
}

#[test]
fn holds_fire_when_facing_away() {
    let mut w = make_world(ARENA);
    w.player.rect.x = 150.0;
    let mut enemy = facing(Enemy::new(300.0, 96.0), Direction::Right);
    enemy.update(DT, &mut w);
    assert!(w.pending_bullets().is_empty());
    assert_eq!(enemy.gun_cooldown, 0.0);
}

#[test]
fn holds_fire_when_out_of_range() {
    let mut w = make_world(ARENA);
    w.player.rect.x = 50.0;
    let mut enemy = facing(Enemy::new(300.0, 96.0), Direction::Left);
    enemy.update(DT, &mut w);
    assert!(w.pending_bullets().is_empty());
}

#[test]
fn holds_fire_when_the_player_is_above() {
    let mut w = make_world(ARENA);
    w.player.rect.x = 150.0;
    w.player.rect.y = 96.0 - 33.0;
    let mut enemy = facing(Enemy::new(300.0, 96.0), Direction::Left);
    enemy.update(DT, &mut w);
    assert!(w.pending_bullets().is_empty());

    w.player.rect.y = 96.0 - 32.0;
    enemy.update(DT, &mut w);
    assert_eq!(w.pending_bullets().len(), 1);
}

#[test]
fn fires_right_from_the_right_edge() {
    let mut w = make_world(ARENA);
    w.player.rect.x = 400.0;
    let mut enemy = Enemy::new(300.0, 96.0);
    enemy.update(DT, &mut w);
    let shots = w.pending_bullets();
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].direction, Direction::Right);
    assert_eq!(shots[0].rect.x, 303.125 + 16.0);
}

#[test]
fn cooldown_gates_and_decays() {
    let mut w = make_world(ARENA);
    w.player.rect.x = 150.0;
    let mut enemy = facing(Enemy::new(300.0, 96.0), Direction::Left);
    enemy.gun_cooldown = 0.5;
    enemy.update(DT, &mut w);
    assert!(w.pending_bullets().is_empty());
    assert_eq!(enemy.gun_cooldown, 0.5 - DT);
}

#[test]
fn aim_ignores_the_player_behind() {
    let enemy = facing(Enemy::new(300.0, 96.0), Direction::Left);
    assert_eq!(enemy.aim(&Rect::new(350.0, 96.0, 16.0, 32.0)), None);
    assert_eq!(enemy.aim(&Rect::new(250.0, 96.0, 16.0, 32.0)), Some(Direction::Left));
}

// ── Patrol ────────────────────────────────────────────────────────────────────

const PATROL: &[&str] = &[
    "##########",
    "#........#",
    "#P....RR.#",
    "##########",
];

#[test]
fn walks_at_patrol_speed() {
    let w = make_world(PATROL);
    let mut enemy = Enemy::new(64.0, 64.0);
    enemy.patrol(DT, &w.map);
    assert_eq!(enemy.rect.x, 64.0 + 3.125);
    assert_eq!(enemy.direction, Direction::Right);
}

#[test]
fn turns_around_at_a_reverse_region_and_snaps_out() {
    let w = make_world(PATROL);
    let mut enemy = Enemy::new(174.0, 64.0);
    enemy.patrol(DT, &w.map);
    assert_eq!(enemy.rect.right(), 192.0);
    assert_eq!(enemy.direction, Direction::Left);

    // Next step moves away without turning again.
    enemy.patrol(DT, &w.map);
    assert_eq!(enemy.rect.x, 176.0 - 3.125);
    assert_eq!(enemy.direction, Direction::Left);
}

#[test]
fn only_the_first_reverse_region_counts() {
    let w = make_world(PATROL);
    // Straddles both reverse cells (192..224 and 224..256) after moving.
    let mut enemy = facing(Enemy::new(220.0, 64.0), Direction::Left);
    enemy.patrol(DT, &w.map);
    assert_eq!(enemy.rect.left(), 224.0);
    assert_eq!(enemy.direction, Direction::Right);
}

// ── Contact ───────────────────────────────────────────────────────────────────

#[test]
fn touching_the_player_hurts_and_bounces() {
    let mut w = make_world(ARENA);
    w.player.rect.x = 150.0;
    let mut enemy = Enemy::new(148.0, 96.0);

    enemy.update(DT, &mut w);
    assert_eq!(w.health, 190);
    assert_eq!(enemy.direction, Direction::Left);
    assert_eq!(enemy.rect.x, 148.0 + 3.125 - 16.0);
}

#[test]
fn contact_damage_repeats_while_overlapping() {
    let mut w = make_world(ARENA);
    w.player.rect.x = 150.0;
    let mut enemy = Enemy::new(148.0, 96.0);
    enemy.update(DT, &mut w);
    enemy.rect.x = 148.0;
    enemy.update(DT, &mut w);
    assert_eq!(w.health, 180);
}

#[test]
fn several_enemies_each_deal_damage_in_one_tick() {
    let mut w = make_world(ARENA);
    w.player.rect.x = 150.0;
    w.enemies.push(Enemy::new(150.0, 96.0));
    w.enemies.push(facing(Enemy::new(152.0, 96.0), Direction::Left));

    w.tick(DT, InputSnapshot::default());

    assert_eq!(w.health, 180);
    assert!(w.bullets.is_empty());
}
