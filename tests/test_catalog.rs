use arcade_shooter::catalog::{
    is_unlocked, metadata_of, properties_of, unlocked_archetypes, Archetype,
};

// ── properties_of ─────────────────────────────────────────────────────────────

#[test]
fn every_archetype_has_sane_properties() {
    for archetype in Archetype::ALL {
        let props = properties_of(archetype);
        assert!(props.size > 0.0);
        assert!(props.speed > 0.0);
        assert!(props.hit_points >= 1);
        assert!(props.score_value > 0);
        // A non-shooter must carry a zero interval, and vice versa
        assert_eq!(props.can_shoot, props.shoot_interval_ms > 0);
    }
}

#[test]
fn tank_is_the_bruiser() {
    let tank = properties_of(Archetype::Tank);
    assert_eq!(tank.hit_points, 5);
    assert_eq!(tank.score_value, 50);
    // Biggest bounding box of the lot
    for archetype in Archetype::ALL {
        assert!(properties_of(archetype).size <= tank.size);
    }
}

#[test]
fn tracker_never_shoots() {
    let tracker = properties_of(Archetype::Tracker);
    assert!(!tracker.can_shoot);
    assert_eq!(tracker.shoot_interval_ms, 0);
}

#[test]
fn teleporter_has_no_lateral_jitter() {
    assert_eq!(properties_of(Archetype::Teleporter).horizontal_speed, 0.0);
}

// ── is_unlocked ───────────────────────────────────────────────────────────────

#[test]
fn standard_always_unlocked() {
    assert!(is_unlocked(Archetype::Standard, 0));
    assert!(is_unlocked(Archetype::Standard, u64::MAX));
}

#[test]
fn unlock_thresholds_are_inclusive() {
    assert!(!is_unlocked(Archetype::Heavy, 9_999));
    assert!(is_unlocked(Archetype::Heavy, 10_000));

    assert!(!is_unlocked(Archetype::Tracker, 19_999));
    assert!(is_unlocked(Archetype::Tracker, 20_000));

    assert!(!is_unlocked(Archetype::Tank, 19_999));
    assert!(is_unlocked(Archetype::Tank, 20_000));

    assert!(!is_unlocked(Archetype::Teleporter, 29_999));
    assert!(is_unlocked(Archetype::Teleporter, 30_000));
}

#[test]
fn unlocks_are_monotonic_in_time() {
    let samples = [0, 5_000, 9_999, 10_000, 15_000, 19_999, 20_000, 29_999, 30_000, 60_000];
    for archetype in Archetype::ALL {
        let mut seen_unlocked = false;
        for &t in &samples {
            let unlocked = is_unlocked(archetype, t);
            assert!(
                !seen_unlocked || unlocked,
                "{:?} re-locked at {}ms",
                archetype,
                t
            );
            seen_unlocked = unlocked;
        }
    }
}

// ── unlocked_archetypes ───────────────────────────────────────────────────────

#[test]
fn roster_grows_with_time() {
    assert_eq!(unlocked_archetypes(0), vec![Archetype::Standard]);
    assert_eq!(
        unlocked_archetypes(10_000),
        vec![Archetype::Standard, Archetype::Heavy]
    );
    assert_eq!(unlocked_archetypes(20_000).len(), 4);
    assert_eq!(unlocked_archetypes(30_000).len(), Archetype::ALL.len());
}

// ── metadata_of ───────────────────────────────────────────────────────────────

#[test]
fn every_archetype_has_metadata() {
    for archetype in Archetype::ALL {
        let info = metadata_of(archetype);
        assert!(!info.display_name.is_empty());
        assert!(!info.description.is_empty());
    }
}
