/// Static archetype tables: properties, unlock schedule, and narrative
/// metadata.  Everything here is a pure, total lookup — no enemy state.

/// The closed set of enemy archetypes.  Dispatch on this enum is always an
/// exhaustive `match`, so adding a variant fails to compile until every
/// table below has an entry for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Archetype {
    /// Bounces off the side walls while falling, fires single shots.
    Standard,
    /// Large bomber that occasionally drifts back upward; triple-spread shot.
    Heavy,
    /// Small and fast; chases the player's column, never shoots.
    Tracker,
    /// Slow, huge, soaks five hits.
    Tank,
    /// Blinks downward in 100–150px jumps once a second.
    Teleporter,
}

impl Archetype {
    pub const ALL: [Archetype; 5] = [
        Archetype::Standard,
        Archetype::Heavy,
        Archetype::Tracker,
        Archetype::Tank,
        Archetype::Teleporter,
    ];
}

/// Per-archetype tuning values.  `color` is a presentation hint (the host
/// may ignore it); everything else drives the simulation.
#[derive(Clone, Copy, Debug)]
pub struct ArchetypeProperties {
    /// Side of the square bounding box, in pixels.
    pub size: f32,
    /// Vertical speed in pixels per frame (before the game-speed multiplier).
    pub speed: f32,
    /// Lateral jitter range; spawn draws vx uniformly from ±this.
    pub horizontal_speed: f32,
    pub color: &'static str,
    /// Minimum milliseconds between shots.  Only meaningful if `can_shoot`.
    pub shoot_interval_ms: u64,
    pub can_shoot: bool,
    /// Starting (and maximum) hit points.
    pub hit_points: u32,
    /// Score credited when the enemy is destroyed.
    pub score_value: u32,
}

/// Display name and flavor text for the host's enemy field guide.
#[derive(Clone, Copy, Debug)]
pub struct ArchetypeInfo {
    pub display_name: &'static str,
    pub description: &'static str,
}

pub fn properties_of(archetype: Archetype) -> ArchetypeProperties {
    match archetype {
        Archetype::Standard => ArchetypeProperties {
            size: 30.0,
            speed: 2.0,
            horizontal_speed: 2.0,
            color: "#e94560",
            shoot_interval_ms: 1000,
            can_shoot: true,
            hit_points: 1,
            score_value: 10,
        },
        Archetype::Heavy => ArchetypeProperties {
            size: 60.0,
            speed: 1.5,
            horizontal_speed: 2.0,
            color: "#ffd700",
            shoot_interval_ms: 1500,
            can_shoot: true,
            hit_points: 1,
            score_value: 20,
        },
        Archetype::Tracker => ArchetypeProperties {
            size: 15.0,
            speed: 3.0,
            horizontal_speed: 4.0,
            color: "#9b59b6",
            shoot_interval_ms: 0,
            can_shoot: false,
            hit_points: 1,
            score_value: 25,
        },
        Archetype::Tank => ArchetypeProperties {
            size: 90.0,
            speed: 0.8,
            horizontal_speed: 1.0,
            color: "#2ecc71",
            shoot_interval_ms: 2000,
            can_shoot: true,
            hit_points: 5,
            score_value: 50,
        },
        Archetype::Teleporter => ArchetypeProperties {
            size: 25.0,
            speed: 0.3,
            horizontal_speed: 0.0,
            color: "#ff00ff",
            shoot_interval_ms: 1500,
            can_shoot: true,
            hit_points: 1,
            score_value: 30,
        },
    }
}

/// Whether an archetype may spawn at `elapsed_ms` milliseconds into the
/// session.  Thresholds are inclusive: exactly on the boundary is unlocked.
pub fn is_unlocked(archetype: Archetype, elapsed_ms: u64) -> bool {
    match archetype {
        Archetype::Standard => true,
        Archetype::Heavy => elapsed_ms >= 10_000,
        Archetype::Tracker => elapsed_ms >= 20_000,
        Archetype::Tank => elapsed_ms >= 20_000,
        Archetype::Teleporter => elapsed_ms >= 30_000,
    }
}

/// All archetypes unlocked at `elapsed_ms`, in declaration order.
/// Always contains at least `Standard`.
pub fn unlocked_archetypes(elapsed_ms: u64) -> Vec<Archetype> {
    Archetype::ALL
        .into_iter()
        .filter(|&a| is_unlocked(a, elapsed_ms))
        .collect()
}

pub fn metadata_of(archetype: Archetype) -> ArchetypeInfo {
    match archetype {
        Archetype::Standard => ArchetypeInfo {
            display_name: "Scout",
            description: "Basic hostile. Falls while bouncing off the side \
                          walls and fires single shots straight down.",
        },
        Archetype::Heavy => ArchetypeInfo {
            display_name: "Heavy Bomber",
            description: "Big and dangerous. Sometimes drifts back upward, \
                          which makes it hard to predict. Fires a triple \
                          spread of shots!",
        },
        Archetype::Tracker => ArchetypeInfo {
            display_name: "Swift Pursuer",
            description: "Small and nimble. Actively tracks your position \
                          and tries to ram you. Never shoots, but it is \
                          very fast!",
        },
        Archetype::Tank => ArchetypeInfo {
            display_name: "Armored Tank",
            description: "Massive and slow but extremely durable. Takes \
                          five hits to bring down.",
        },
        Archetype::Teleporter => ArchetypeInfo {
            display_name: "Teleporter",
            description: "A mysterious foe that blinks downward every \
                          second, changing position. Shoots back!",
        },
    }
}
