/// Enemy spawning: interval bookkeeping per archetype plus the time-based
/// unlock curve (normal mode) or an explicit archetype roster (test mode).

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{is_unlocked, properties_of, Archetype};
use crate::enemy::Enemy;

/// Last-spawn timestamps, one per archetype category plus the shared
/// test-mode timer.  Mutated only by the spawn functions, once per spawn.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpawnTimers {
    pub last_standard_spawn: u64,
    pub last_heavy_spawn: u64,
    pub last_tracker_spawn: u64,
    pub last_tank_spawn: u64,
    pub last_teleport_spawn: u64,
    pub last_test_spawn: u64,
}

impl SpawnTimers {
    fn slot(&mut self, archetype: Archetype) -> &mut u64 {
        match archetype {
            Archetype::Standard => &mut self.last_standard_spawn,
            Archetype::Heavy => &mut self.last_heavy_spawn,
            Archetype::Tracker => &mut self.last_tracker_spawn,
            Archetype::Tank => &mut self.last_tank_spawn,
            Archetype::Teleporter => &mut self.last_teleport_spawn,
        }
    }
}

/// Normal-mode spawn tuning.
#[derive(Clone, Copy, Debug)]
pub struct SpawnConfig {
    pub arena_width: f32,
    /// Interval between Standard spawns, in milliseconds.
    pub standard_interval_ms: u64,
    /// Interval every special archetype shares (≈4.5× the standard one).
    pub special_interval_ms: u64,
}

/// Test-mode spawn tuning: one shared interval and an explicit roster.
#[derive(Clone, Debug)]
pub struct TestSpawnConfig {
    pub arena_width: f32,
    pub enabled: Vec<Archetype>,
    pub spawn_interval_ms: u64,
}

fn push_enemy(
    enemies: &mut Vec<Enemy>,
    archetype: Archetype,
    arena_width: f32,
    now: u64,
    rng: &mut impl Rng,
) {
    let size = properties_of(archetype).size;
    let x = rng.gen_range(0.0..arena_width - size);
    // Spawn just above the visible area so the entry is smooth.
    enemies.push(Enemy::spawn(archetype, x, -size, now, rng));
}

/// Progressive spawning: every archetype that is unlocked at `elapsed_ms`
/// and whose interval has elapsed spawns exactly one enemy.  Several
/// archetypes may spawn in the same call; none of them excludes another.
/// Returns how many enemies were pushed onto `enemies`.
pub fn spawn_normal(
    enemies: &mut Vec<Enemy>,
    timers: &mut SpawnTimers,
    elapsed_ms: u64,
    now: u64,
    config: &SpawnConfig,
    rng: &mut impl Rng,
) -> usize {
    let mut spawned = 0;
    for archetype in Archetype::ALL {
        if !is_unlocked(archetype, elapsed_ms) {
            continue;
        }
        let interval = match archetype {
            Archetype::Standard => config.standard_interval_ms,
            _ => config.special_interval_ms,
        };
        if now - *timers.slot(archetype) > interval {
            push_enemy(enemies, archetype, config.arena_width, now, rng);
            *timers.slot(archetype) = now;
            spawned += 1;
        }
    }
    spawned
}

/// Test-mode spawning: one enemy per interval, its archetype drawn uniformly
/// from the enabled roster.  An empty roster is a no-op and leaves the timer
/// untouched, so spawning resumes immediately once the roster is filled.
/// Returns how many enemies were pushed onto `enemies` (0 or 1).
pub fn spawn_test(
    enemies: &mut Vec<Enemy>,
    timers: &mut SpawnTimers,
    now: u64,
    config: &TestSpawnConfig,
    rng: &mut impl Rng,
) -> usize {
    if config.enabled.is_empty() || now - timers.last_test_spawn <= config.spawn_interval_ms {
        return 0;
    }
    let Some(&archetype) = config.enabled.choose(rng) else {
        return 0;
    };
    push_enemy(enemies, archetype, config.arena_width, now, rng);
    timers.last_test_spawn = now;
    1
}
