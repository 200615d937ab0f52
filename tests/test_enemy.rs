use arcade_shooter::catalog::{properties_of, Archetype};
use arcade_shooter::enemy::{Enemy, FireTuning, Owner};
use arcade_shooter::geometry::Bounds;

use rand::rngs::StdRng;
use rand::SeedableRng;

const ARENA_W: f32 = 400.0;
const ARENA_H: f32 = 600.0;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn player_at(x: f32) -> Bounds {
    Bounds::new(x, 550.0, 50.0, 30.0)
}

fn tuning() -> FireTuning {
    FireTuning {
        bullet_speed: 7.0,
        bullet_size: 5.0,
        enemy_speed_mult: 0.7,
        game_speed: 1.0,
    }
}

// ── spawn ─────────────────────────────────────────────────────────────────────

#[test]
fn spawn_initializes_from_catalog() {
    let mut rng = seeded_rng();
    for archetype in Archetype::ALL {
        let props = properties_of(archetype);
        let e = Enemy::spawn(archetype, 100.0, -props.size, 500, &mut rng);

        assert_eq!(e.archetype, archetype);
        assert_eq!(e.bounds.width, props.size);
        assert_eq!(e.bounds.height, props.size);
        assert_eq!(e.vy, props.speed);
        assert!(e.vx.abs() <= props.horizontal_speed);
        assert_eq!(e.hit_points, props.hit_points);
        assert_eq!(e.max_hit_points, props.hit_points);
        assert_eq!(e.last_shot_at, 500);
    }
}

#[test]
fn teleporter_spawns_without_drift() {
    let mut rng = seeded_rng();
    let e = Enemy::spawn(Archetype::Teleporter, 50.0, -25.0, 0, &mut rng);
    assert_eq!(e.vx, 0.0);
    assert_eq!(e.last_teleport_at, 0);
}

// ── Standard / Tank: bounce and fall ──────────────────────────────────────────

#[test]
fn standard_falls_and_drifts() {
    let mut rng = seeded_rng();
    let mut e = Enemy::spawn(Archetype::Standard, 200.0, 100.0, 0, &mut rng);
    e.vx = 1.0;
    e.advance(&player_at(175.0), ARENA_W, ARENA_H, 1.0, 16, &mut rng);
    assert_eq!(e.bounds.y, 102.0); // speed 2.0
    assert_eq!(e.bounds.x, 201.0);
}

#[test]
fn standard_bounces_off_left_wall() {
    let mut rng = seeded_rng();
    let mut e = Enemy::spawn(Archetype::Standard, 0.5, 100.0, 0, &mut rng);
    e.vx = -2.0;
    e.advance(&player_at(175.0), ARENA_W, ARENA_H, 1.0, 16, &mut rng);
    assert!(e.vx > 0.0, "must exit the wall moving rightward");
    assert_eq!(e.bounds.x, 0.0); // clamped into bounds
}

#[test]
fn standard_bounces_off_right_wall() {
    let mut rng = seeded_rng();
    let mut e = Enemy::spawn(Archetype::Standard, 369.5, 100.0, 0, &mut rng);
    e.vx = 2.0;
    e.advance(&player_at(175.0), ARENA_W, ARENA_H, 1.0, 16, &mut rng);
    assert!(e.vx < 0.0);
    assert_eq!(e.bounds.x, ARENA_W - e.bounds.width);
}

#[test]
fn tank_runs_the_same_bounce_rule() {
    let mut rng = seeded_rng();
    let mut e = Enemy::spawn(Archetype::Tank, 0.0, 100.0, 0, &mut rng);
    e.vx = -1.0;
    e.advance(&player_at(175.0), ARENA_W, ARENA_H, 1.0, 16, &mut rng);
    assert!(e.vx > 0.0);
    assert!(e.bounds.x >= 0.0 && e.bounds.x <= ARENA_W - e.bounds.width);
}

#[test]
fn game_speed_scales_motion() {
    let mut rng = seeded_rng();
    let mut e = Enemy::spawn(Archetype::Standard, 200.0, 100.0, 0, &mut rng);
    e.vx = 0.0;
    e.advance(&player_at(175.0), ARENA_W, ARENA_H, 0.5, 16, &mut rng);
    assert_eq!(e.bounds.y, 101.0); // 2.0 * 0.5
}

// ── Heavy ─────────────────────────────────────────────────────────────────────

#[test]
fn heavy_never_escapes_past_the_top() {
    let mut rng = seeded_rng();
    let mut e = Enemy::spawn(Archetype::Heavy, 200.0, -10.0, 0, &mut rng);
    e.vy = -1.5;
    e.advance(&player_at(175.0), ARENA_W, ARENA_H, 1.0, 16, &mut rng);
    assert!(e.vy > 0.0, "upward drift must be forced back down at the top edge");
}

#[test]
fn heavy_stays_within_horizontal_bounds() {
    let mut rng = seeded_rng();
    let mut e = Enemy::spawn(Archetype::Heavy, 395.0, 200.0, 0, &mut rng);
    e.vx = 2.0;
    for now in (0..50).map(|i| i * 16) {
        e.advance(&player_at(175.0), ARENA_W, ARENA_H, 1.0, now, &mut rng);
        assert!(e.bounds.x >= 0.0 && e.bounds.x <= ARENA_W - e.bounds.width);
    }
}

// ── Tracker ───────────────────────────────────────────────────────────────────

#[test]
fn tracker_moves_toward_player() {
    let mut rng = seeded_rng();
    // Player center at 225; tracker well to the left of it
    let mut e = Enemy::spawn(Archetype::Tracker, 100.0, 100.0, 0, &mut rng);
    e.advance(&player_at(200.0), ARENA_W, ARENA_H, 1.0, 16, &mut rng);
    assert_eq!(e.bounds.x, 104.0); // horizontal_speed 4.0
    assert_eq!(e.bounds.y, 103.0); // speed 3.0
}

#[test]
fn tracker_moves_left_when_past_player() {
    let mut rng = seeded_rng();
    let mut e = Enemy::spawn(Archetype::Tracker, 300.0, 100.0, 0, &mut rng);
    e.advance(&player_at(200.0), ARENA_W, ARENA_H, 1.0, 16, &mut rng);
    assert_eq!(e.bounds.x, 296.0);
}

#[test]
fn tracker_holds_inside_dead_zone() {
    let mut rng = seeded_rng();
    // Enemy center exactly on the player center: no lateral move
    let mut e = Enemy::spawn(Archetype::Tracker, 217.5, 100.0, 0, &mut rng);
    e.advance(&player_at(200.0), ARENA_W, ARENA_H, 1.0, 16, &mut rng);
    assert_eq!(e.bounds.x, 217.5);
    assert_eq!(e.bounds.y, 103.0);
}

// ── Teleporter ────────────────────────────────────────────────────────────────

#[test]
fn teleporter_only_drifts_before_cooldown() {
    let mut rng = seeded_rng();
    let mut e = Enemy::spawn(Archetype::Teleporter, 100.0, 100.0, 0, &mut rng);
    e.advance(&player_at(175.0), ARENA_W, ARENA_H, 1.0, 999, &mut rng);
    assert!((e.bounds.y - 100.3).abs() < 1e-3, "drift only: got {}", e.bounds.y);
    assert_eq!(e.last_teleport_at, 0);
}

#[test]
fn teleporter_jumps_on_cooldown_expiry() {
    let mut rng = seeded_rng();
    let mut e = Enemy::spawn(Archetype::Teleporter, 100.0, 100.0, 0, &mut rng);
    e.advance(&player_at(175.0), ARENA_W, ARENA_H, 1.0, 1000, &mut rng);
    // Jump is 100–150px plus the drift tick
    assert!(e.bounds.y >= 190.0, "expected a jump, got y={}", e.bounds.y);
    assert!(e.bounds.y <= 251.0);
    assert!(e.bounds.x >= 0.0 && e.bounds.x <= ARENA_W - e.bounds.width);
    assert_eq!(e.last_teleport_at, 1000);
}

#[test]
fn teleporter_jump_vetoed_near_bottom() {
    let mut rng = seeded_rng();
    let mut e = Enemy::spawn(Archetype::Teleporter, 100.0, 560.0, 0, &mut rng);
    e.advance(&player_at(175.0), ARENA_W, ARENA_H, 1.0, 1000, &mut rng);
    // Only the slow drift applies; the cooldown still resets
    assert!((e.bounds.y - 560.3).abs() < 1e-3);
    assert_eq!(e.bounds.x, 100.0);
    assert_eq!(e.last_teleport_at, 1000);
}

// ── Firing ────────────────────────────────────────────────────────────────────

#[test]
fn should_fire_respects_interval() {
    let mut rng = seeded_rng();
    let e = Enemy::spawn(Archetype::Standard, 100.0, 100.0, 1000, &mut rng);
    // Standard interval is 1000ms, strictly greater-than
    assert!(!e.should_fire(1500));
    assert!(!e.should_fire(2000));
    assert!(e.should_fire(2001));
}

#[test]
fn tracker_never_fires() {
    let mut rng = seeded_rng();
    let e = Enemy::spawn(Archetype::Tracker, 100.0, 100.0, 0, &mut rng);
    assert!(!e.should_fire(u64::MAX / 2));
}

#[test]
fn single_shot_comes_from_the_center() {
    let mut rng = seeded_rng();
    let e = Enemy::spawn(Archetype::Standard, 100.0, 100.0, 0, &mut rng);
    let shots = e.fire(&tuning());

    assert_eq!(shots.len(), 1);
    let shot = &shots[0];
    assert_eq!(shot.owner, Owner::Enemy);
    assert_eq!(shot.vx, 0.0);
    // center_x (115) minus half the bullet size
    assert_eq!(shot.bounds.x, 112.5);
    assert_eq!(shot.bounds.y, 130.0); // enemy bottom
    assert!((shot.vy - 4.9).abs() < 1e-3); // 7.0 * 0.7 * 1.0
}

#[test]
fn heavy_fires_a_triple_spread() {
    let mut rng = seeded_rng();
    let e = Enemy::spawn(Archetype::Heavy, 100.0, 100.0, 0, &mut rng);
    let shots = e.fire(&tuning());

    assert_eq!(shots.len(), 3);
    let center = 130.0 - 2.5; // center_x minus half bullet size

    assert_eq!(shots[0].bounds.x, center - 15.0);
    assert_eq!(shots[0].vx, -2.0);
    assert_eq!(shots[1].bounds.x, center);
    assert_eq!(shots[1].vx, 0.0);
    assert_eq!(shots[2].bounds.x, center + 15.0);
    assert_eq!(shots[2].vx, 2.0);

    for shot in &shots {
        assert_eq!(shot.owner, Owner::Enemy);
        assert_eq!(shot.bounds.y, 160.0); // enemy bottom
        assert!((shot.vy - 4.9).abs() < 1e-3);
    }
}
