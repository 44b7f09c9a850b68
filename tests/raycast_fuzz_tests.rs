//! Randomized tests for the DDA traversal
//! The "oracle" is an analytic ray/box slab test against a single solid cell.
use ascii_voxel::{DdaWalk, Material, Ray, RaycastConfig, Raycaster, World};
use glam::{IVec3, UVec3, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

const GRID: i32 = 12;
const CASES: usize = 2000;
/// Intersections shorter than this are grazing and skipped
const AMBIGUITY: f32 = 1e-3;

fn random_direction(rng: &mut ChaCha8Rng) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let len = v.length();
        if len > 0.1 && len <= 1.0 {
            return v / len;
        }
    }
}

fn random_origin(rng: &mut ChaCha8Rng) -> Vec3 {
    let hi = GRID as f32 - 0.05;
    Vec3::new(
        rng.gen_range(0.05..hi),
        rng.gen_range(0.05..hi),
        rng.gen_range(0.05..hi),
    )
}

/// Entry and exit distances of `ray` through the box [min, max], if any.
fn slab_intersection(ray: &Ray, min: Vec3, max: Vec3) -> Option<(f32, f32)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    for axis in 0..3 {
        let o = ray.origin[axis];
        let d = ray.direction[axis];
        if d == 0.0 {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let t1 = (min[axis] - o) / d;
        let t2 = (max[axis] - o) / d;
        t_enter = t_enter.max(t1.min(t2));
        t_exit = t_exit.min(t1.max(t2));
    }
    let t_enter = t_enter.max(0.0);
    (t_exit >= t_enter).then_some((t_enter, t_exit))
}

#[test]
fn dda_agrees_with_slab_oracle() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    let raycaster = Raycaster::new(&RaycastConfig::default());
    let mut checked_hits = 0;
    let mut checked_misses = 0;

    for _ in 0..CASES {
        let block = IVec3::new(
            rng.gen_range(2..GRID - 2),
            rng.gen_range(2..GRID - 2),
            rng.gen_range(2..GRID - 2),
        );
        let mut world = World::new(UVec3::splat(GRID as u32)).unwrap();
        world.place(block.x, block.y, block.z, Material::Stone);

        // Aim at the block half the time so hits are well represented
        let origin = random_origin(&mut rng);
        let direction = if rng.gen_bool(0.5) {
            let aim = block.as_vec3()
                + Vec3::new(rng.gen(), rng.gen(), rng.gen());
            aim - origin
        } else {
            random_direction(&mut rng)
        };
        let ray = Ray::new(origin, direction);
        if ray.direction == Vec3::ZERO {
            continue;
        }

        let min = block.as_vec3();
        let max = min + Vec3::ONE;
        let result = raycaster.cast(&ray, &world);

        match slab_intersection(&ray, min, max) {
            Some((t_enter, t_exit)) if t_exit - t_enter > AMBIGUITY => {
                let hit = result.unwrap_or_else(|| {
                    panic!("expected hit on {block} from {origin} along {}", ray.direction)
                });
                assert_eq!(hit.cell, block);
                assert!(
                    (hit.distance - t_enter).abs() < AMBIGUITY,
                    "distance {} vs oracle {}",
                    hit.distance,
                    t_enter
                );
                checked_hits += 1;
            }
            Some(_) => {}
            None => {
                let grown = slab_intersection(
                    &ray,
                    min - Vec3::splat(AMBIGUITY),
                    max + Vec3::splat(AMBIGUITY),
                );
                if grown.is_none() {
                    assert!(
                        result.is_none(),
                        "unexpected hit on {block} from {origin} along {}",
                        ray.direction
                    );
                    checked_misses += 1;
                }
            }
        }
    }

    assert!(checked_hits > CASES / 4, "only {checked_hits} hits checked");
    assert!(checked_misses > CASES / 10, "only {checked_misses} misses checked");
}

#[test]
fn dda_visits_each_cell_once_and_only_neighbours() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let bounds = IVec3::splat(GRID);

    for _ in 0..CASES {
        let ray = Ray::new(random_origin(&mut rng), random_direction(&mut rng));
        let steps: Vec<_> = DdaWalk::new(&ray, bounds, 1000.0).collect();
        assert!(!steps.is_empty());
        assert_eq!(steps[0].cell, ray.origin.floor().as_ivec3());

        let mut seen = HashSet::new();
        for step in &steps {
            assert!(seen.insert(step.cell), "cell {} visited twice", step.cell);
            assert!(step.cell.cmpge(IVec3::ZERO).all() && step.cell.cmplt(bounds).all());
        }

        for pair in steps.windows(2) {
            let delta = pair[1].cell - pair[0].cell;
            assert_eq!(
                delta.abs().element_sum(),
                1,
                "jump from {} to {}",
                pair[0].cell,
                pair[1].cell
            );
            assert!(pair[1].distance >= pair[0].distance);

            // Entry point lies on the shared face
            let face = pair[1].entry_face.expect("stepped cells have an entry face");
            assert_eq!(face.normal(), -delta);
        }

        // The ray's exit point is at the grid boundary, so the last cell is on the hull
        let last = steps[steps.len() - 1].cell;
        assert!(
            last.cmpeq(IVec3::ZERO).any() || last.cmpeq(bounds - IVec3::ONE).any(),
            "walk stopped inside the grid at {last}"
        );
    }
}
