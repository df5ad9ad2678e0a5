use super::*;

#[test]
fn single_tile_is_centered_on_origin() {
    let layout = FieldLayout::new(1);
    assert_eq!(layout.tile_count(), 1);
    let tile = &layout.tiles()[0];
    assert_eq!(tile.offset(), (0.0, 0.0));
    assert_eq!(tile.points().len(), GRID_SIZE * GRID_SIZE);
    let first = tile.points()[0];
    assert_eq!((first.x, first.z), (-25.0, -25.0));
    let last = tile.points()[GRID_SIZE * GRID_SIZE - 1];
    assert_eq!((last.i, last.j), (GRID_SIZE - 1, GRID_SIZE - 1));
    assert_eq!((last.x, last.z), (24.5, 24.5));
}

#[test]
fn tiles_are_symmetric_about_the_center() {
    let width = (GRID_SIZE - 1) as f64 * GRID_SPACING * TILE_GAP_FACTOR;
    assert_eq!(tile_offset(0, 3), -width);
    assert_eq!(tile_offset(1, 3), 0.0);
    assert_eq!(tile_offset(2, 3), width);
    assert_eq!(tile_offset(0, 2), -width / 2.0);
}

#[test]
fn three_repetitions_make_nine_tiles_of_the_same_size() {
    let mut layout = FieldLayout::new(1);
    assert!(layout.ensure_repetitions(3));
    assert_eq!(layout.tile_count(), 9);
    assert!(layout.tiles().iter().all(|t| t.points().len() == GRID_SIZE * GRID_SIZE));
    assert_eq!(layout.point_count(), 9 * GRID_SIZE * GRID_SIZE);
    assert!(!layout.ensure_repetitions(3));
}

#[test]
fn repetitions_are_clamped() {
    assert_eq!(FieldLayout::new(0).repetitions(), 1);
    assert_eq!(FieldLayout::new(9).repetitions(), MAX_REPETITIONS);
}
