use std::time::{Duration, Instant};

use glam::{Vec2, Vec3};
use oceanspace_common::ConfigError;
use serde::{Deserialize, Serialize};

use crate::grid::{CellCoord, Lattice};
use crate::wave::{WaveField, recompute_normals};

/// Tiling configuration: patch size, window radius and patch resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilerConfig {
    /// Side length of one square patch, in world units.
    pub tile_size: f32,
    /// Patches on each side of the centre patch; the window is `(2r + 1)²` patches.
    pub tile_range: u32,
    /// Quads along each edge of a patch.
    pub segments: u32,
}

impl Default for TilerConfig {
    fn default() -> Self {
        Self {
            tile_size: 700.0,
            tile_range: 5,
            segments: 32,
        }
    }
}

impl TilerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check("tile_size", self.tile_size, |v| v > 0.0, "> 0")?;
        ConfigError::check("tile_range", self.tile_range as f32, |v| v <= 64.0, "<= 64")?;
        ConfigError::check(
            "segments",
            self.segments as f32,
            |v| (1.0..=1024.0).contains(&v),
            "1..=1024",
        )?;
        Ok(())
    }

    pub fn patch_count(&self) -> usize {
        let side = 2 * self.tile_range as usize + 1;
        side * side
    }
}

/// Vertex layout shared by every patch, fixed at startup.
///
/// Vertices are row-major: rows run from local y = +size/2 down to −size/2,
/// columns from local x = −size/2 to +size/2. The patch lies flat, so local
/// +y points toward world −z.
#[derive(Debug, Clone)]
pub struct PatchLayout {
    segments: usize,
    tile_size: f32,
    local: Vec<Vec2>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
}

impl PatchLayout {
    pub fn new(tile_size: f32, segments: u32) -> Self {
        let segments = segments.max(1) as usize;
        let side = segments + 1;
        let half = tile_size * 0.5;
        let step = tile_size / segments as f32;

        let mut local = Vec::with_capacity(side * side);
        let mut uvs = Vec::with_capacity(side * side);
        for j in 0..side {
            for i in 0..side {
                local.push(Vec2::new(i as f32 * step - half, half - j as f32 * step));
                uvs.push(Vec2::new(
                    i as f32 / segments as f32,
                    1.0 - j as f32 / segments as f32,
                ));
            }
        }

        let mut indices = Vec::with_capacity(segments * segments * 6);
        for j in 0..segments {
            for i in 0..segments {
                let a = (j * side + i) as u32;
                let b = ((j + 1) * side + i) as u32;
                let c = ((j + 1) * side + i + 1) as u32;
                let d = (j * side + i + 1) as u32;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self {
            segments,
            tile_size,
            local,
            uvs,
            indices,
        }
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn vertex_count(&self) -> usize {
        self.local.len()
    }

    /// Patch-local `(x, y)` sample points.
    pub fn local(&self) -> &[Vec2] {
        &self.local
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    /// Triangle list, counter-clockwise seen from above.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn spacing(&self) -> f32 {
        self.tile_size / self.segments as f32
    }
}

/// One recycled square of ocean.
///
/// A patch keeps its slot in the window and its vertex arrays for the whole
/// session; only its lattice cell (and so its origin) changes.
#[derive(Debug, Clone)]
pub struct SurfacePatch {
    slot: CellCoord,
    cell: CellCoord,
    grid_origin: Vec2,
    heights: Vec<f32>,
    normals: Vec<Vec3>,
}

impl SurfacePatch {
    /// Offset of this patch from the window centre, in cells.
    pub fn slot(&self) -> CellCoord {
        self.slot
    }

    /// Lattice cell the patch currently covers.
    pub fn cell(&self) -> CellCoord {
        self.cell
    }

    /// World-space anchor (patch centre) on the water plane: `x` = world X, `y` = world Z.
    pub fn grid_origin(&self) -> Vec2 {
        self.grid_origin
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// World-space unit normals, one per vertex.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// World-space position of vertex `index`.
    pub fn world_vertex(&self, layout: &PatchLayout, index: usize) -> Vec3 {
        let local = layout.local[index];
        Vec3::new(
            self.grid_origin.x + local.x,
            self.heights[index],
            self.grid_origin.y - local.y,
        )
    }

    /// Whether `pos` lies inside this patch's square footprint (edges inclusive).
    pub fn contains(&self, pos: Vec2, tile_size: f32) -> bool {
        let d = (pos - self.grid_origin).abs();
        d.x <= tile_size * 0.5 && d.y <= tile_size * 0.5
    }

    fn update_waves(&mut self, layout: &PatchLayout, field: &WaveField, t: f32) {
        for (h, p) in self.heights.iter_mut().zip(&layout.local) {
            *h = field.height(p.x, p.y, t);
        }
        recompute_normals(
            &self.heights,
            &mut self.normals,
            layout.segments,
            layout.spacing(),
        );
    }
}

/// Per-tick tiling statistics for instrumentation.
#[derive(Debug, Clone, Default)]
pub struct TilerStats {
    pub patches_moved: usize,
    pub total_patches: usize,
    pub center: CellCoord,
    pub recenter_time: Duration,
    pub wave_time: Duration,
}

/// Keeps a fixed window of patches on the lattice around the vehicle.
///
/// The window holds `(2·tile_range + 1)²` patches, allocated once. Each tick,
/// [`recenter`](Self::recenter) snaps every patch by whole tiles so the window
/// stays centred on the vehicle's cell, and [`update_waves`](Self::update_waves)
/// rewrites the patch heights and normals in place.
#[derive(Debug, Clone)]
pub struct OceanTiler {
    config: TilerConfig,
    lattice: Lattice,
    layout: PatchLayout,
    patches: Vec<SurfacePatch>,
    center: CellCoord,
    stats: TilerStats,
}

impl OceanTiler {
    /// Lay the window out around the origin.
    ///
    /// Panics if `config.tile_size` is not positive; call
    /// [`TilerConfig::validate`] first for untrusted input.
    pub fn new(config: TilerConfig) -> Self {
        let lattice = Lattice::new(config.tile_size);
        let layout = PatchLayout::new(config.tile_size, config.segments);
        let vertex_count = layout.vertex_count();
        let r = config.tile_range as i32;

        let mut patches = Vec::with_capacity(config.patch_count());
        for dx in -r..=r {
            for dz in -r..=r {
                let slot = CellCoord::new(dx, dz);
                patches.push(SurfacePatch {
                    slot,
                    cell: slot,
                    grid_origin: lattice.origin_of(slot),
                    heights: vec![0.0; vertex_count],
                    normals: vec![Vec3::Y; vertex_count],
                });
            }
        }

        tracing::debug!(
            patches = patches.len(),
            vertices_per_patch = vertex_count,
            tile_size = config.tile_size,
            "ocean tiler initialised"
        );

        Self {
            config,
            lattice,
            layout,
            stats: TilerStats {
                total_patches: patches.len(),
                ..TilerStats::default()
            },
            patches,
            center: CellCoord::default(),
        }
    }

    pub fn config(&self) -> &TilerConfig {
        &self.config
    }

    pub fn layout(&self) -> &PatchLayout {
        &self.layout
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn patches(&self) -> &[SurfacePatch] {
        &self.patches
    }

    /// Cell the window is currently centred on.
    pub fn center(&self) -> CellCoord {
        self.center
    }

    /// Lattice cell containing `pos`.
    pub fn cell_of(&self, pos: Vec2) -> CellCoord {
        self.lattice.cell_of(pos)
    }

    pub fn stats(&self) -> &TilerStats {
        &self.stats
    }

    /// Snap patches by whole tiles to follow `vehicle_pos`. Returns how many moved.
    ///
    /// `offset = round((vehicle_pos − anchor) / tile_size)` where `anchor` is
    /// a patch origin minus its window slot; a nonzero offset shifts the
    /// origin by `offset · tile_size`. Every patch shares the window centre as
    /// its anchor, so the offset is computed once and the centre moves with
    /// the patches.
    pub fn recenter(&mut self, vehicle_pos: Vec2) -> usize {
        let start = Instant::now();
        let size = self.config.tile_size;

        let anchor = self.lattice.origin_of(self.center);
        let offset = ((vehicle_pos - anchor) / size).round();
        let (dx, dz) = (offset.x as i32, offset.y as i32);

        let mut moved = 0;
        if (dx, dz) != (0, 0) {
            for patch in &mut self.patches {
                patch.cell = patch.cell.offset(dx, dz);
                patch.grid_origin = self.lattice.origin_of(patch.cell);
                moved += 1;
            }
            let previous = self.center;
            self.center = previous.offset(dx, dz);
            tracing::debug!(
                moved,
                from = ?previous,
                to = ?self.center,
                "recentred ocean window"
            );
        }

        self.stats.patches_moved = moved;
        self.stats.center = self.center;
        self.stats.recenter_time = start.elapsed();
        moved
    }

    /// Re-evaluate `field` at time `t` for every vertex of every patch and
    /// refresh the normals. Reuses the patch buffers; nothing is allocated.
    pub fn update_waves(&mut self, field: &WaveField, t: f32) {
        let start = Instant::now();
        for patch in &mut self.patches {
            patch.update_waves(&self.layout, field, t);
        }
        self.stats.wave_time = start.elapsed();
    }

    /// Patch whose footprint contains `pos`, if the window covers it.
    ///
    /// Positions on a shared edge resolve to the first matching patch.
    pub fn patch_at(&self, pos: Vec2) -> Option<&SurfacePatch> {
        let size = self.config.tile_size;
        self.patches.iter().find(|p| p.contains(pos, size))
    }
}
