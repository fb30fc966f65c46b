use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use oceanspace_render::{FrameView, Projection, Renderer};
use oceanspace_stream::WavePath;

/// Host-evaluated height and world normal of one patch vertex.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct HostSample {
    pub height: f32,
    pub normal: [f32; 3],
}

/// CPU-side contents of one GPU frame.
///
/// Refilled in place by [`OceanScene::render_into`]; the vectors keep their
/// capacity between frames.
#[derive(Debug, Clone, Default)]
pub struct OceanDrawList {
    pub view_proj: Mat4,
    /// Seconds since start; the only value the shader wave path consumes.
    pub time: f32,
    /// Patch origins, in patch order.
    pub origins: Vec<[f32; 2]>,
    /// Per-vertex samples of every patch, concatenated in patch order.
    /// Empty when waves are evaluated in the shader.
    pub samples: Vec<HostSample>,
    pub hull_model: Mat4,
    pub hull_color: [f32; 4],
}

/// Turns a [`FrameView`] into an [`OceanDrawList`] without touching the GPU.
#[derive(Debug, Clone)]
pub struct OceanScene {
    pub projection: Projection,
    pub wave_path: WavePath,
    pub hull_color: [f32; 4],
}

impl OceanScene {
    pub fn new(wave_path: WavePath) -> Self {
        Self {
            projection: Projection::default(),
            wave_path,
            hull_color: [0.55, 0.35, 0.2, 1.0],
        }
    }
}

impl OceanScene {
    /// Empty draw list sized for `patch_count` patches of `vertices_per_patch`.
    pub fn draw_list(&self, patch_count: usize, vertices_per_patch: usize) -> OceanDrawList {
        let samples = match self.wave_path {
            WavePath::Cpu => patch_count * vertices_per_patch,
            WavePath::Gpu => 0,
        };
        OceanDrawList {
            origins: Vec::with_capacity(patch_count),
            samples: Vec::with_capacity(samples),
            ..OceanDrawList::default()
        }
    }

    /// Rewrite `list` for `frame`, reusing its buffers.
    pub fn render_into(&self, frame: &FrameView<'_>, list: &mut OceanDrawList) {
        let patches = frame.ocean.patches();
        list.origins.clear();
        list.origins
            .extend(patches.iter().map(|p| p.grid_origin().to_array()));

        list.samples.clear();
        if self.wave_path == WavePath::Cpu {
            list.samples.extend(
                patches
                    .iter()
                    .flat_map(|p| p.heights().iter().zip(p.normals()))
                    .map(|(&height, normal)| HostSample {
                        height,
                        normal: normal.to_array(),
                    }),
            );
        }

        let t = frame.vehicle_transform;
        list.view_proj = self.projection.view_projection(frame.camera);
        list.time = frame.elapsed;
        list.hull_model = Mat4::from_scale_rotation_translation(t.scale, t.rotation, t.position);
        list.hull_color = self.hull_color;
    }
}

impl Renderer for OceanScene {
    type Output = OceanDrawList;

    fn render(&self, frame: &FrameView<'_>) -> OceanDrawList {
        let mut list = OceanDrawList::default();
        self.render_into(frame, &mut list);
        list
    }
}
