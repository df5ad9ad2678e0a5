use crate::foundation::core::{GRID_SIZE, GRID_SPACING, TILE_GAP_FACTOR};

/// Upper bound on tiles per axis.
pub const MAX_REPETITIONS: usize = 5;

/// One sample point of a tile.
///
/// `x`/`z` are fixed at construction; `height` is rewritten every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPoint {
    /// World X within the grid group.
    pub x: f64,
    /// World Z within the grid group.
    pub z: f64,
    /// Column index inside the tile.
    pub i: usize,
    /// Row index inside the tile.
    pub j: usize,
    /// Last synthesized height.
    pub height: f64,
}

/// Offset of tile `g` along one axis for `repetitions` tiles per axis.
pub fn tile_offset(g: usize, repetitions: usize) -> f64 {
    let center = (repetitions.max(1) - 1) as f64 / 2.0;
    let width = (GRID_SIZE - 1) as f64 * GRID_SPACING;
    (g as f64 - center) * width * TILE_GAP_FACTOR
}

/// `GRID_SIZE x GRID_SIZE` points at a world offset.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    gx: usize,
    gz: usize,
    offset_x: f64,
    offset_z: f64,
    points: Vec<GridPoint>,
}

impl Tile {
    /// Tile `(gx, gz)` of a `repetitions x repetitions` layout.
    pub fn new(gx: usize, gz: usize, repetitions: usize) -> Self {
        let offset_x = tile_offset(gx, repetitions);
        let offset_z = tile_offset(gz, repetitions);
        let half = (GRID_SIZE / 2) as f64;
        let mut points = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
        for i in 0..GRID_SIZE {
            for j in 0..GRID_SIZE {
                points.push(GridPoint {
                    x: (i as f64 - half) * GRID_SPACING + offset_x,
                    z: (j as f64 - half) * GRID_SPACING + offset_z,
                    i,
                    j,
                    height: 0.0,
                });
            }
        }
        Self {
            gx,
            gz,
            offset_x,
            offset_z,
            points,
        }
    }

    /// Position of the tile in the layout.
    pub fn coords(&self) -> (usize, usize) {
        (self.gx, self.gz)
    }

    /// World offset `(x, z)`.
    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_z)
    }

    /// Points in `i`-major order.
    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    pub(crate) fn points_mut(&mut self) -> &mut [GridPoint] {
        &mut self.points
    }
}

/// All tiles of the field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldLayout {
    repetitions: usize,
    tiles: Vec<Tile>,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self::new(1)
    }
}

impl FieldLayout {
    /// Layout with `repetitions` tiles per axis, clamped to `1..=MAX_REPETITIONS`.
    pub fn new(repetitions: usize) -> Self {
        let repetitions = repetitions.clamp(1, MAX_REPETITIONS);
        let mut tiles = Vec::with_capacity(repetitions * repetitions);
        for gx in 0..repetitions {
            for gz in 0..repetitions {
                tiles.push(Tile::new(gx, gz, repetitions));
            }
        }
        Self { repetitions, tiles }
    }

    /// Tiles per axis.
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Tiles in `gx`-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    /// Number of tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Number of points across all tiles.
    pub fn point_count(&self) -> usize {
        self.tiles.iter().map(|t| t.points.len()).sum()
    }

    /// Rebuild when the repetition count differs. Returns `true` when a rebuild happened.
    #[tracing::instrument(level = "debug", skip(self), fields(current = self.repetitions))]
    pub fn ensure_repetitions(&mut self, repetitions: usize) -> bool {
        let target = repetitions.clamp(1, MAX_REPETITIONS);
        if target == self.repetitions {
            return false;
        }
        *self = Self::new(target);
        tracing::debug!(tiles = self.tiles.len(), "rebuilt field layout");
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/tile.rs"]
mod tests;
