//! Shape catalog tests

use std::collections::HashSet;

use block_blast::core::rand::rngs::SmallRng;
use block_blast::core::rand::SeedableRng;
use block_blast::core::{full_pool, random_piece_from, small_pool};
use block_blast::types::{ColorId, MAX_SHAPE_CELLS, MAX_SHAPE_SPAN};

#[test]
fn test_full_pool_is_varied_and_unique() {
    let pool = full_pool();
    assert!(pool.len() >= 25);

    let unique: HashSet<_> = pool.iter().map(|s| s.cells()).collect();
    assert_eq!(unique.len(), pool.len(), "catalog lists a shape twice");
}

#[test]
fn test_shapes_sit_in_minimal_bounding_box() {
    for shape in full_pool() {
        let cells = shape.cells();
        assert!(!cells.is_empty());
        assert!(cells.len() <= MAX_SHAPE_CELLS);
        assert_eq!(cells.iter().map(|c| c.0).min(), Some(0));
        assert_eq!(cells.iter().map(|c| c.1).min(), Some(0));
        assert_eq!(cells.iter().map(|c| c.0).max(), Some(shape.height() - 1));
        assert_eq!(cells.iter().map(|c| c.1).max(), Some(shape.width() - 1));
        assert!(shape.height() as usize <= MAX_SHAPE_SPAN);
        assert!(shape.width() as usize <= MAX_SHAPE_SPAN);

        let matrix = shape.rows();
        let filled = matrix.iter().flatten().filter(|&&f| f).count();
        assert_eq!(filled, shape.cell_count());
    }
}

#[test]
fn test_small_pool_is_subset_of_full_pool() {
    let sizes: Vec<_> = small_pool().iter().map(|s| s.cell_count()).collect();
    assert_eq!(sizes, vec![1, 2, 2, 3, 3]);
    for shape in small_pool() {
        assert!(full_pool().contains(shape));
    }
}

#[test]
fn test_random_draws_cover_palette() {
    let mut rng = SmallRng::seed_from_u64(2024);
    let mut colors = HashSet::new();
    let mut shapes = HashSet::new();
    for id in 0..2000 {
        let piece = random_piece_from(full_pool(), &ColorId::ALL, id, &mut rng);
        assert!(!piece.is_used());
        colors.insert(piece.color());
        shapes.insert(piece.shape().cells());
    }
    assert_eq!(colors.len(), ColorId::ALL.len());
    assert_eq!(shapes.len(), full_pool().len());
}
