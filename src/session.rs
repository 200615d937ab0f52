/// Session orchestration: one `advance_frame` call wires player input,
/// spawning, enemy movement, projectiles, and collisions into a single
/// frame step.  The session owns all mutable round state; the host owns
/// the clock and the render loop.

use rand::Rng;

use crate::catalog::{properties_of, Archetype};
use crate::enemy::{Enemy, FireTuning, Owner, Projectile};
use crate::geometry::{overlaps, Bounds};
use crate::spawn::{spawn_normal, spawn_test, SpawnConfig, SpawnTimers, TestSpawnConfig};

// ── Configuration ─────────────────────────────────────────────────────────────

/// All session tuning in one place.  Defaults are the stock arcade
/// values for a 400×600 arena.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    /// Player movement in pixels per frame.
    pub player_speed: f32,
    /// Side of the player's square bounding box.
    pub player_size: f32,
    pub player_shoot_interval_ms: u64,
    /// Base bullet speed in pixels per frame.
    pub bullet_speed: f32,
    pub bullet_size: f32,
    /// Enemy bullets travel at this fraction of the base bullet speed.
    pub enemy_bullet_speed_mult: f32,
    pub standard_spawn_interval_ms: u64,
    pub special_spawn_interval_ms: u64,
    pub test_spawn_interval_ms: u64,
    /// Global difficulty/tuning knob; scales all enemy motion and enemy
    /// bullet speed.  Nominal range 0.5–1.0.
    pub game_speed: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            arena_width: 400.0,
            arena_height: 600.0,
            player_speed: 5.0,
            player_size: 30.0,
            player_shoot_interval_ms: 200,
            bullet_speed: 7.0,
            bullet_size: 5.0,
            enemy_bullet_speed_mult: 0.7,
            standard_spawn_interval_ms: 1000,
            special_spawn_interval_ms: 4500,
            test_spawn_interval_ms: 1500,
            game_speed: 0.8,
        }
    }
}

/// How the session populates the arena: the progressive unlock curve, or a
/// fixed roster for trying out specific archetypes.
#[derive(Clone, Debug, PartialEq)]
pub enum SpawnMode {
    Normal,
    Test { enabled: Vec<Archetype> },
}

/// Held-key snapshot supplied by the host each frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

/// Per-frame report for the host: what appeared, what blew up, what it is
/// worth, and whether the round just ended.
#[derive(Clone, Debug, Default)]
pub struct FrameResult {
    /// Enemies created this frame (snapshots at spawn position).
    pub spawned: Vec<Enemy>,
    /// Enemies destroyed by player fire this frame (snapshots for effects).
    pub destroyed: Vec<Enemy>,
    pub score_delta: u32,
    pub game_over: bool,
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Session {
    pub config: SessionConfig,
    pub mode: SpawnMode,
    pub player: Bounds,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Projectile>,
    pub enemy_bullets: Vec<Projectile>,
    pub score: u32,
    pub game_over: bool,
    /// Timestamp of round start; elapsed time drives the unlock curve.
    pub started_at: u64,
    timers: SpawnTimers,
    last_player_shot: u64,
}

impl Session {
    /// A fresh round: player bottom-center, nothing else on the field.
    pub fn new(config: SessionConfig, mode: SpawnMode, now: u64) -> Self {
        let player = Bounds::new(
            config.arena_width / 2.0 - config.player_size / 2.0,
            config.arena_height - config.player_size - 20.0,
            config.player_size,
            config.player_size,
        );
        Session {
            player,
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            score: 0,
            game_over: false,
            started_at: now,
            timers: SpawnTimers::default(),
            last_player_shot: 0,
            config,
            mode,
        }
    }

    /// Milliseconds since the round started.
    pub fn elapsed_ms(&self, now: u64) -> u64 {
        now - self.started_at
    }

    /// Advance the whole simulation by one frame.  Once the round is over
    /// this is a no-op that keeps reporting `game_over` until the host
    /// builds a new session.
    pub fn advance_frame(&mut self, input: &Input, now: u64, rng: &mut impl Rng) -> FrameResult {
        let mut result = FrameResult::default();
        if self.game_over {
            result.game_over = true;
            return result;
        }

        self.move_player(input);
        self.player_fire(input, now);

        // ── Spawn ────────────────────────────────────────────────────────
        let before = self.enemies.len();
        match &self.mode {
            SpawnMode::Normal => {
                let cfg = SpawnConfig {
                    arena_width: self.config.arena_width,
                    standard_interval_ms: self.config.standard_spawn_interval_ms,
                    special_interval_ms: self.config.special_spawn_interval_ms,
                };
                let elapsed = now - self.started_at;
                spawn_normal(&mut self.enemies, &mut self.timers, elapsed, now, &cfg, rng);
            }
            SpawnMode::Test { enabled } => {
                let cfg = TestSpawnConfig {
                    arena_width: self.config.arena_width,
                    enabled: enabled.clone(),
                    spawn_interval_ms: self.config.test_spawn_interval_ms,
                };
                spawn_test(&mut self.enemies, &mut self.timers, now, &cfg, rng);
            }
        }
        result.spawned = self.enemies[before..].to_vec();

        self.move_projectiles();
        self.move_enemies_and_fire(now, rng);

        // ── Player bullets vs enemies ────────────────────────────────────
        let mut bi = 0;
        while bi < self.player_bullets.len() {
            let mut consumed = false;
            for ei in 0..self.enemies.len() {
                if overlaps(&self.player_bullets[bi].bounds, &self.enemies[ei].bounds) {
                    let enemy = &mut self.enemies[ei];
                    enemy.hit_points = enemy.hit_points.saturating_sub(1);
                    if enemy.hit_points == 0 {
                        result.score_delta += properties_of(enemy.archetype).score_value;
                        result.destroyed.push(self.enemies.remove(ei));
                    }
                    consumed = true;
                    break;
                }
            }
            if consumed {
                self.player_bullets.remove(bi);
            } else {
                bi += 1;
            }
        }
        self.score += result.score_delta;

        // ── Hazards vs player ────────────────────────────────────────────
        if self.enemies.iter().any(|e| overlaps(&self.player, &e.bounds))
            || self.enemy_bullets.iter().any(|b| overlaps(&self.player, &b.bounds))
        {
            self.game_over = true;
        }

        result.game_over = self.game_over;
        result
    }

    fn move_player(&mut self, input: &Input) {
        let cfg = &self.config;
        if input.left {
            self.player.x -= cfg.player_speed;
        }
        if input.right {
            self.player.x += cfg.player_speed;
        }
        if input.up {
            self.player.y -= cfg.player_speed;
        }
        if input.down {
            self.player.y += cfg.player_speed;
        }
        self.player.x = self.player.x.clamp(0.0, cfg.arena_width - self.player.width);
        self.player.y = self.player.y.clamp(0.0, cfg.arena_height - self.player.height);
    }

    fn player_fire(&mut self, input: &Input, now: u64) {
        if input.fire && now - self.last_player_shot > self.config.player_shoot_interval_ms {
            let x = self.player.center_x() - self.config.bullet_size / 2.0;
            self.player_bullets.push(Projectile::new(
                Owner::Player,
                x,
                self.player.y,
                self.config.bullet_size,
                0.0,
                -self.config.bullet_speed,
            ));
            self.last_player_shot = now;
        }
    }

    /// Integrate all projectiles and drop those that left the arena.
    fn move_projectiles(&mut self) {
        let w = self.config.arena_width;
        let h = self.config.arena_height;

        self.player_bullets.retain_mut(|b| {
            b.bounds.y += b.vy;
            b.bounds.x += b.vx;
            b.bounds.y > -b.bounds.height && b.bounds.x > -b.bounds.width && b.bounds.x < w
        });
        self.enemy_bullets.retain_mut(|b| {
            b.bounds.y += b.vy;
            b.bounds.x += b.vx;
            b.bounds.y < h && b.bounds.x > -b.bounds.width && b.bounds.x < w
        });
    }

    /// Move every enemy, collect their shots, and drop enemies that left
    /// the arena top or bottom.
    fn move_enemies_and_fire(&mut self, now: u64, rng: &mut impl Rng) {
        let player = self.player;
        let w = self.config.arena_width;
        let h = self.config.arena_height;
        let game_speed = self.config.game_speed;
        let tuning = FireTuning {
            bullet_speed: self.config.bullet_speed,
            bullet_size: self.config.bullet_size,
            enemy_speed_mult: self.config.enemy_bullet_speed_mult,
            game_speed,
        };

        let mut shots: Vec<Projectile> = Vec::new();
        self.enemies.retain_mut(|enemy| {
            enemy.advance(&player, w, h, game_speed, now, rng);

            if enemy.should_fire(now) {
                shots.extend(enemy.fire(&tuning));
                enemy.last_shot_at = now;
            }

            enemy.bounds.y < h && enemy.bounds.y > -enemy.bounds.height
        });
        self.enemy_bullets.extend(shots);
    }
}
