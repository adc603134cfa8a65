use rand::rngs::StdRng;
use rand::SeedableRng;

use detroit_anomaly::constants::{
    anomaly_size_range, decoy_count, PLACEMENT_BUFFER, PLAYFIELD_SIZE, SECTOR_COUNT,
};
use detroit_anomaly::placement::{place_rect, AnomalyRect, Placement};

#[test]
fn test_placed_rect_always_inside_playfield() {
    let mut rng = StdRng::seed_from_u64(0xD3701);
    for seed_round in 0..200 {
        for level in 0..SECTOR_COUNT {
            let rect = place_rect(level, &[], &mut rng)
                .unwrap_or_else(|e| panic!("round {seed_round} level {level}: {e}"));
            assert!(rect.in_bounds(), "{rect:?} leaves the playfield");
            assert!(rect.x + rect.w <= PLAYFIELD_SIZE.x);
            assert!(rect.y + rect.h <= PLAYFIELD_SIZE.y);
        }
    }
}

#[test]
fn test_placed_rect_respects_size_range() {
    let mut rng = StdRng::seed_from_u64(7);
    for level in 0..SECTOR_COUNT {
        let range = anomaly_size_range(level);
        for _ in 0..50 {
            let rect = place_rect(level, &[], &mut rng).unwrap();
            assert!(range.contains(&rect.w), "width {} outside {range:?}", rect.w);
            assert!(range.contains(&rect.h), "height {} outside {range:?}", rect.h);
        }
    }
}

#[test]
fn test_placement_is_deterministic_per_seed() {
    let a = place_rect(0, &[], &mut StdRng::seed_from_u64(42)).unwrap();
    let b = place_rect(0, &[], &mut StdRng::seed_from_u64(42)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_occupied_space_is_avoided() {
    // One giant occupied block leaves only the far edge free.
    let occupied = [AnomalyRect::new(0, 0, 400, 700)];
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..50 {
        if let Ok(rect) = place_rect(0, &occupied, &mut rng) {
            assert!(
                !rect.overlaps(&occupied[0], PLACEMENT_BUFFER),
                "{rect:?} crowds the occupied block"
            );
        }
    }
}

#[test]
fn test_generate_produces_expected_decoy_counts() {
    let mut rng = StdRng::seed_from_u64(1234);
    for level in 0..SECTOR_COUNT {
        let placement = Placement::generate(level, &mut rng).unwrap();
        // Decoys are best-effort, but with an empty field they should all fit.
        assert_eq!(placement.decoys.len(), decoy_count(level));
        assert_eq!(placement.rects().count(), 1 + decoy_count(level));
    }
}

#[test]
fn test_generated_decoys_keep_clear_of_the_target() {
    let mut rng = StdRng::seed_from_u64(5555);
    for _ in 0..50 {
        let placement = Placement::generate(SECTOR_COUNT - 1, &mut rng).unwrap();
        for decoy in &placement.decoys {
            assert!(decoy.in_bounds());
            assert!(!decoy.overlaps(&placement.target, PLACEMENT_BUFFER));
        }
    }
}
