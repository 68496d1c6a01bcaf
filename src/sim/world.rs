//! Procedural world generation
//!
//! Platforms and trees are appended ahead of the furthest existing one with a
//! random whole-unit gap. Nothing is ever removed during a session.

use rand::Rng;

use super::state::{Platform, Tree, TreeShade};
use crate::consts::*;

/// Whole-unit random value in `[min, max)`
fn spaced<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> f32 {
    (min + rng.random_range(0..max - min)) as f32
}

/// Append one platform after the furthest platform's right edge
pub fn generate_platform<R: Rng + ?Sized>(platforms: &mut Vec<Platform>, rng: &mut R) {
    let furthest_x = platforms.last().map(Platform::right).unwrap_or(0.0);

    let x = furthest_x + spaced(rng, PLATFORM_MIN_GAP, PLATFORM_MAX_GAP);
    let width = spaced(rng, PLATFORM_MIN_WIDTH, PLATFORM_MAX_WIDTH);

    platforms.push(Platform::new(x, width));
}

/// Append one tree after the furthest tree
pub fn generate_tree<R: Rng + ?Sized>(trees: &mut Vec<Tree>, rng: &mut R) {
    let furthest_x = trees.last().map(|t| t.x).unwrap_or(0.0);

    let x = furthest_x + spaced(rng, TREE_MIN_GAP, TREE_MAX_GAP);
    let shade = TreeShade::ALL[rng.random_range(0..TreeShade::ALL.len())];

    trees.push(Tree { x, shade });
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_first_tree_starts_from_origin() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut trees = Vec::new();
        generate_tree(&mut trees, &mut rng);
        assert!(trees[0].x >= TREE_MIN_GAP as f32);
        assert!(trees[0].x < TREE_MAX_GAP as f32);
    }

    #[test]
    fn test_generation_only_appends() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut platforms = vec![Platform::new(50.0, 50.0)];
        generate_platform(&mut platforms, &mut rng);
        generate_platform(&mut platforms, &mut rng);
        assert_eq!(platforms.len(), 3);
        assert_eq!(platforms[0], Platform::new(50.0, 50.0));
        assert!(platforms[1].x > platforms[0].right());
        assert!(platforms[2].x > platforms[1].right());
    }

    proptest! {
        #[test]
        fn platform_gap_and_width_in_range(seed in any::<u64>(), x in 0u32..10_000, w in 20u32..100) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut platforms = vec![Platform::new(x as f32, w as f32)];
            let furthest = platforms[0].right();
            generate_platform(&mut platforms, &mut rng);
            let p = platforms[1];
            let gap = p.x - furthest;
            prop_assert!((40.0..=200.0).contains(&gap));
            prop_assert!((20.0..=100.0).contains(&p.width));
        }

        #[test]
        fn tree_gap_in_range(seed in any::<u64>(), x in 0u32..10_000) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut trees = vec![Tree { x: x as f32, shade: TreeShade::Mid }];
            generate_tree(&mut trees, &mut rng);
            let gap = trees[1].x - x as f32;
            prop_assert!((30.0..=150.0).contains(&gap));
        }
    }
}
