/// World grid contract: bounds are always checked, edits round-trip
use ascii_voxel::{Material, World, WorldConfig};
use glam::UVec3;

fn snapshot(world: &World) -> Vec<bool> {
    let e = world.extents();
    let mut cells = Vec::new();
    for z in 0..e.z {
        for y in 0..e.y {
            for x in 0..e.x {
                cells.push(world.is_solid(x, y, z));
            }
        }
    }
    cells
}

const OUTSIDE: [(i32, i32, i32); 8] = [
    (-1, 0, 0),
    (0, -1, 0),
    (0, 0, -1),
    (20, 0, 0),
    (0, 20, 0),
    (0, 0, 10),
    (i32::MIN, i32::MAX, 3),
    (25, -7, 40),
];

#[test]
fn out_of_bounds_is_never_solid() {
    let mut world = World::from_config(&WorldConfig::default()).unwrap();
    // Fill everything so any leak through the bounds check would show up
    world.fill_layers(10, Material::Stone);
    for &(x, y, z) in &OUTSIDE {
        assert!(!world.is_solid(x, y, z), "({x}, {y}, {z}) must read empty");
        assert_eq!(world.material_at(x, y, z), None);
    }
}

#[test]
fn out_of_bounds_edits_leave_grid_unchanged() {
    let mut world = World::from_config(&WorldConfig::default()).unwrap();
    let before = snapshot(&world);
    for &(x, y, z) in &OUTSIDE {
        assert!(!world.place(x, y, z, Material::Brick));
        assert!(!world.remove(x, y, z));
    }
    assert_eq!(snapshot(&world), before);
}

#[test]
fn place_then_remove_round_trips() {
    let mut world = World::new(UVec3::new(20, 20, 10)).unwrap();
    assert!(!world.is_solid(3, 4, 5));

    assert!(world.place(3, 4, 5, Material::Wood));
    assert!(world.is_solid(3, 4, 5));
    assert_eq!(world.material_at(3, 4, 5), Some(Material::Wood));

    assert!(world.remove(3, 4, 5));
    assert!(!world.is_solid(3, 4, 5));
    assert_eq!(world.solid_count(), 0);
}

#[test]
fn place_on_solid_and_remove_on_empty_are_noops() {
    let mut world = World::new(UVec3::new(4, 4, 4)).unwrap();
    assert!(world.place(1, 1, 1, Material::Stone));
    assert!(!world.place(1, 1, 1, Material::Brick));
    assert_eq!(world.material_at(1, 1, 1), Some(Material::Stone));

    assert!(!world.remove(2, 2, 2));
    assert_eq!(world.solid_count(), 1);
}

#[test]
fn construction_rejects_empty_grid() {
    assert!(World::new(UVec3::new(0, 0, 0)).is_err());
    assert!(World::new(UVec3::new(1, 1, 1)).is_ok());
}
