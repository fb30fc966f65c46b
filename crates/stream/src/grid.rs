use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Integer coordinate of a lattice cell on the water plane (x = world X, z = world Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub z: i32,
}

impl CellCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    /// Chebyshev distance, i.e. the square ring this cell sits on around `other`.
    pub fn ring_distance(self, other: CellCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}

/// A square lattice of spacing `tile_size` anchored at the world origin.
///
/// Lattice points sit at exact multiples of `tile_size`; a position belongs to
/// the cell whose lattice point is nearest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lattice {
    tile_size: f32,
}

impl Lattice {
    pub fn new(tile_size: f32) -> Self {
        assert!(tile_size > 0.0, "tile_size must be positive");
        Self { tile_size }
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Cell whose lattice point is nearest to `pos` (rounding half away from zero).
    pub fn cell_of(&self, pos: Vec2) -> CellCoord {
        CellCoord {
            x: (pos.x / self.tile_size).round() as i32,
            z: (pos.y / self.tile_size).round() as i32,
        }
    }

    /// World-space lattice point of `cell`.
    pub fn origin_of(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(cell.x as f32, cell.z as f32) * self.tile_size
    }
}

/// All cells within a square radius of `center`, row by row.
pub fn cells_in_radius(center: CellCoord, radius: u32) -> impl Iterator<Item = CellCoord> {
    let r = radius as i32;
    (-r..=r).flat_map(move |dx| (-r..=r).map(move |dz| center.offset(dx, dz)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_of_rounds_to_nearest_lattice_point() {
        let lattice = Lattice::new(700.0);
        assert_eq!(lattice.cell_of(Vec2::new(0.0, 0.0)), CellCoord::new(0, 0));
        assert_eq!(lattice.cell_of(Vec2::new(349.0, -349.0)), CellCoord::new(0, 0));
        assert_eq!(lattice.cell_of(Vec2::new(750.0, 0.0)), CellCoord::new(1, 0));
        assert_eq!(lattice.cell_of(Vec2::new(-1100.0, 2000.0)), CellCoord::new(-2, 3));
    }

    #[test]
    fn origin_of_is_exact_multiple() {
        let lattice = Lattice::new(700.0);
        assert_eq!(lattice.origin_of(CellCoord::new(-3, 2)), Vec2::new(-2100.0, 1400.0));
    }

    #[test]
    fn cells_in_radius_counts() {
        let cells: Vec<_> = cells_in_radius(CellCoord::new(4, -2), 2).collect();
        assert_eq!(cells.len(), 25);
        assert!(cells.iter().all(|c| c.ring_distance(CellCoord::new(4, -2)) <= 2));
    }

    #[test]
    fn zero_radius_is_center_only() {
        let cells: Vec<_> = cells_in_radius(CellCoord::new(7, 7), 0).collect();
        assert_eq!(cells, vec![CellCoord::new(7, 7)]);
    }

    #[test]
    #[should_panic]
    fn non_positive_tile_size_panics() {
        let _ = Lattice::new(0.0);
    }
}
