/// Enemy entities and their per-archetype movement and firing rules — the
/// behavioral heart of the game.  Movement mutates the enemy in place; the
/// session owns the collection and calls [`Enemy::advance`] once per frame.

use rand::Rng;

use crate::catalog::{properties_of, Archetype};
use crate::geometry::Bounds;

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub bounds: Bounds,
    /// Horizontal velocity per frame; zero for straight shots.
    pub vx: f32,
    /// Vertical velocity per frame; negative moves up (player shots).
    pub vy: f32,
    pub owner: Owner,
}

impl Projectile {
    /// A bullet that is `size` wide and `2 * size` tall, for an elongated
    /// tracer look.
    pub fn new(owner: Owner, x: f32, y: f32, size: f32, vx: f32, vy: f32) -> Self {
        Projectile {
            bounds: Bounds::new(x, y, size, size * 2.0),
            vx,
            vy,
            owner,
        }
    }
}

/// Bullet parameters the session threads into enemy firing.
#[derive(Clone, Copy, Debug)]
pub struct FireTuning {
    /// Base bullet speed in pixels per frame.
    pub bullet_speed: f32,
    /// Bullet bounding-box width.
    pub bullet_size: f32,
    /// Enemy bullets travel at this fraction of the base speed.
    pub enemy_speed_mult: f32,
    pub game_speed: f32,
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

/// Horizontal offset of the Heavy's diagonal spread shots from its center.
const SPREAD_OFFSET: f32 = 15.0;
/// Horizontal velocity of the Heavy's diagonal spread shots.
const SPREAD_VX: f32 = 2.0;
/// Fixed teleport cooldown.  Deliberately not scaled by game speed: the
/// Teleporter blinks on wall-clock seconds regardless of tuning.
const TELEPORT_COOLDOWN_MS: u64 = 1000;
/// The Heavy never reverses upward while closer than this to the top.
const HEAVY_REVERSE_FLOOR: f32 = 50.0;
/// Dead zone around the player's center inside which a Tracker holds its x.
const TRACKER_DEADZONE: f32 = 5.0;

#[derive(Clone, Debug)]
pub struct Enemy {
    pub archetype: Archetype,
    pub bounds: Bounds,
    pub vx: f32,
    pub vy: f32,
    pub hit_points: u32,
    pub max_hit_points: u32,
    /// Timestamp (ms) of the last shot, for fire-rate gating.
    pub last_shot_at: u64,
    /// Timestamp (ms) of the last teleport jump.  Only the Teleporter
    /// consults it; everyone else just carries their spawn time.
    pub last_teleport_at: u64,
}

impl Enemy {
    /// Create an enemy at `(x, y)` with catalog stats and a random lateral
    /// drift drawn from ±`horizontal_speed` (zero for the Teleporter, whose
    /// jitter range is zero).
    pub fn spawn(archetype: Archetype, x: f32, y: f32, now: u64, rng: &mut impl Rng) -> Self {
        let props = properties_of(archetype);
        let vx = if props.horizontal_speed > 0.0 {
            rng.gen_range(-props.horizontal_speed..=props.horizontal_speed)
        } else {
            0.0
        };
        Enemy {
            archetype,
            bounds: Bounds::new(x, y, props.size, props.size),
            vx,
            vy: props.speed,
            hit_points: props.hit_points,
            max_hit_points: props.hit_points,
            last_shot_at: now,
            last_teleport_at: now,
        }
    }

    /// Advance one frame of archetype-specific movement.
    ///
    /// `player` is the player's current bounding box (the Tracker aims at
    /// its horizontal center); `arena_width`/`arena_height` bound the
    /// playfield; `game_speed` scales every motion term.
    pub fn advance(
        &mut self,
        player: &Bounds,
        arena_width: f32,
        arena_height: f32,
        game_speed: f32,
        now: u64,
        rng: &mut impl Rng,
    ) {
        let props = properties_of(self.archetype);

        match self.archetype {
            // Fall and bounce off the side walls.  The Tank runs the same
            // rule; it only differs through its catalog values.
            Archetype::Standard | Archetype::Tank => {
                self.bounds.y += self.vy * game_speed;
                self.bounds.x += self.vx * game_speed;
                self.bounce_horizontal(arena_width);
            }

            Archetype::Heavy => {
                self.bounds.y += self.vy * game_speed;
                self.bounds.x += self.vx * game_speed;

                // Occasionally reverse vertical direction, but never while
                // still near the top of the arena.
                if rng.gen_bool(0.01) && self.bounds.y > HEAVY_REVERSE_FLOOR {
                    self.vy = -self.vy;
                }

                // An upward drift must not escape past the top edge.
                if self.bounds.y < 0.0 && self.vy < 0.0 {
                    self.vy = self.vy.abs();
                }

                self.bounce_horizontal(arena_width);
            }

            // Chase the player's column; stored vx is unused.
            Archetype::Tracker => {
                let center = self.bounds.center_x();
                let target = player.center_x();
                if center < target - TRACKER_DEADZONE {
                    self.bounds.x += props.horizontal_speed * game_speed;
                } else if center > target + TRACKER_DEADZONE {
                    self.bounds.x -= props.horizontal_speed * game_speed;
                }

                self.bounds.y += props.speed * game_speed;
                self.clamp_horizontal(arena_width);
            }

            Archetype::Teleporter => {
                if now - self.last_teleport_at >= TELEPORT_COOLDOWN_MS {
                    let jump = rng.gen_range(100.0..=150.0);
                    let new_y = self.bounds.y + jump;
                    // The jump is vetoed rather than clamped when it would
                    // land past the bottom edge.  The cooldown still resets.
                    if new_y < arena_height - self.bounds.height {
                        self.bounds.y = new_y;
                        self.bounds.x = rng.gen_range(0.0..arena_width - self.bounds.width);
                    }
                    self.last_teleport_at = now;
                }

                // Slow drift between jumps.
                self.bounds.y += props.speed * game_speed;
                self.clamp_horizontal(arena_width);
            }
        }
    }

    fn bounce_horizontal(&mut self, arena_width: f32) {
        if self.bounds.x <= 0.0 || self.bounds.x >= arena_width - self.bounds.width {
            self.vx = -self.vx;
            self.clamp_horizontal(arena_width);
        }
    }

    fn clamp_horizontal(&mut self, arena_width: f32) {
        self.bounds.x = self.bounds.x.clamp(0.0, arena_width - self.bounds.width);
    }

    /// True when this enemy's fire-rate gate is open.  The caller performs
    /// the actual shot via [`Enemy::fire`] and stamps `last_shot_at = now`.
    pub fn should_fire(&self, now: u64) -> bool {
        let props = properties_of(self.archetype);
        props.can_shoot && now - self.last_shot_at > props.shoot_interval_ms
    }

    /// Emit this enemy's shot pattern from its lower edge.  The Heavy fires
    /// a triple spread (straight center plus two diagonals); every other
    /// shooter fires a single straight-down bullet from its center.
    pub fn fire(&self, tuning: &FireTuning) -> Vec<Projectile> {
        let speed = tuning.bullet_speed * tuning.enemy_speed_mult * tuning.game_speed;
        let center_x = self.bounds.center_x() - tuning.bullet_size / 2.0;
        let bottom_y = self.bounds.bottom();

        match self.archetype {
            Archetype::Heavy => vec![
                Projectile::new(
                    Owner::Enemy,
                    center_x - SPREAD_OFFSET,
                    bottom_y,
                    tuning.bullet_size,
                    -SPREAD_VX,
                    speed,
                ),
                Projectile::new(Owner::Enemy, center_x, bottom_y, tuning.bullet_size, 0.0, speed),
                Projectile::new(
                    Owner::Enemy,
                    center_x + SPREAD_OFFSET,
                    bottom_y,
                    tuning.bullet_size,
                    SPREAD_VX,
                    speed,
                ),
            ],
            _ => vec![Projectile::new(
                Owner::Enemy,
                center_x,
                bottom_y,
                tuning.bullet_size,
                0.0,
                speed,
            )],
        }
    }
}
