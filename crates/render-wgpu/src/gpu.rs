use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use oceanspace_render::FrameView;
use oceanspace_stream::{PatchLayout, WaveField, WavePath};
use wgpu::util::DeviceExt;

use crate::scene::{HostSample, OceanDrawList, OceanScene};
use crate::shaders;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct WaterUniform {
    time: f32,
    _pad: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct HullUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct PatchVertex {
    local: [f32; 2],
    uv: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct HullVertex {
    position: [f32; 3],
    normal: [f32; 3],
}

/// Box hull: beam along X, draft along Y, length along Z.
fn hull_mesh() -> (Vec<HullVertex>, Vec<u16>) {
    let (w, h, l) = (0.3_f32, 0.15_f32, 0.6_f32);
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([0.0, 0.0, 1.0], [[-w, -h, l], [w, -h, l], [w, h, l], [-w, h, l]]),
        ([0.0, 0.0, -1.0], [[w, -h, -l], [-w, -h, -l], [-w, h, -l], [w, h, -l]]),
        ([1.0, 0.0, 0.0], [[w, -h, l], [w, -h, -l], [w, h, -l], [w, h, l]]),
        ([-1.0, 0.0, 0.0], [[-w, -h, -l], [-w, -h, l], [-w, h, l], [-w, h, -l]]),
        ([0.0, 1.0, 0.0], [[-w, h, l], [w, h, l], [w, h, -l], [-w, h, -l]]),
        ([0.0, -1.0, 0.0], [[-w, -h, -l], [w, -h, -l], [w, -h, l], [-w, -h, l]]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in faces {
        let base = vertices.len() as u16;
        vertices.extend(corners.map(|position| HullVertex { position, normal }));
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    (vertices, indices)
}

fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

fn uniform_binding<T: Pod>(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    label: &str,
    initial: &T,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(initial),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });
    (buffer, bind_group)
}

fn depth_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: wgpu::TextureFormat::Depth32Float,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: Default::default(),
        bias: Default::default(),
    }
}

const PATCH_VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<PatchVertex>() as u64,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2],
};

const PATCH_INSTANCE_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<[f32; 2]>() as u64,
    step_mode: wgpu::VertexStepMode::Instance,
    attributes: &wgpu::vertex_attr_array![2 => Float32x2],
};

const HOST_SAMPLE_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<HostSample>() as u64,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![3 => Float32, 4 => Float32x3],
};

static SHADER_WAVE_BUFFERS: [wgpu::VertexBufferLayout<'static>; 2] =
    [PATCH_VERTEX_LAYOUT, PATCH_INSTANCE_LAYOUT];

static HOST_WAVE_BUFFERS: [wgpu::VertexBufferLayout<'static>; 3] =
    [PATCH_VERTEX_LAYOUT, PATCH_INSTANCE_LAYOUT, HOST_SAMPLE_LAYOUT];

/// wgpu renderer for the ocean window and the vehicle hull.
///
/// Patch topology is uploaded once; per frame only patch origins, the camera,
/// the time scalar and (on the host wave path) the patch samples are written.
pub struct OceanRenderer {
    scene: OceanScene,
    frame: OceanDrawList,
    water_pipeline: wgpu::RenderPipeline,
    hull_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    water_buffer: wgpu::Buffer,
    water_bind_group: wgpu::BindGroup,
    hull_buffer: wgpu::Buffer,
    hull_bind_group: wgpu::BindGroup,
    patch_vertex_buffer: wgpu::Buffer,
    patch_index_buffer: wgpu::Buffer,
    patch_index_count: u32,
    patch_vertex_count: usize,
    origin_buffer: wgpu::Buffer,
    sample_buffer: Option<wgpu::Buffer>,
    patch_capacity: u32,
    hull_vertex_buffer: wgpu::Buffer,
    hull_index_buffer: wgpu::Buffer,
    hull_index_count: u32,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl OceanRenderer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        layout: &PatchLayout,
        patch_count: usize,
        waves: &WaveField,
        wave_path: WavePath,
    ) -> Self {
        let mut scene = OceanScene::new(wave_path);
        scene.projection.set_viewport(width, height);

        let camera_layout = uniform_layout(device, "camera_layout");
        let object_layout = uniform_layout(device, "object_layout");
        let (camera_buffer, camera_bind_group) = uniform_binding(
            device,
            &camera_layout,
            "camera_uniform",
            &CameraUniform {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            },
        );
        let (water_buffer, water_bind_group) = uniform_binding(
            device,
            &object_layout,
            "water_uniform",
            &WaterUniform {
                time: 0.0,
                _pad: [0.0; 3],
            },
        );
        let (hull_buffer, hull_bind_group) = uniform_binding(
            device,
            &object_layout,
            "hull_uniform",
            &HullUniform {
                model: Mat4::IDENTITY.to_cols_array_2d(),
                color: scene.hull_color,
            },
        );

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ocean_pipeline_layout"),
            bind_group_layouts: &[&camera_layout, &object_layout],
            push_constant_ranges: &[],
        });
        let color_target = [Some(wgpu::ColorTargetState {
            format: surface_format,
            blend: Some(wgpu::BlendState::REPLACE),
            write_mask: wgpu::ColorWrites::ALL,
        })];

        // Water pipeline
        let water_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("water_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::water_shader(waves).into()),
        });
        let (entry_point, water_buffers): (&str, &[wgpu::VertexBufferLayout]) = match wave_path {
            WavePath::Gpu => ("vs_gpu_waves", &SHADER_WAVE_BUFFERS),
            WavePath::Cpu => ("vs_cpu_waves", &HOST_WAVE_BUFFERS),
        };
        let water_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("water_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &water_shader,
                entry_point: Some(entry_point),
                compilation_options: Default::default(),
                buffers: water_buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &water_shader,
                entry_point: Some("fs_water"),
                compilation_options: Default::default(),
                targets: &color_target,
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(depth_state()),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Hull pipeline
        let hull_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("hull_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::VEHICLE_SHADER.into()),
        });
        let hull_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("hull_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &hull_shader,
                entry_point: Some("vs_hull"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<HullVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &hull_shader,
                entry_point: Some("fs_hull"),
                compilation_options: Default::default(),
                targets: &color_target,
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(depth_state()),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Shared patch topology
        let patch_vertices: Vec<PatchVertex> = layout
            .local()
            .iter()
            .zip(layout.uvs())
            .map(|(local, uv)| PatchVertex {
                local: local.to_array(),
                uv: uv.to_array(),
            })
            .collect();
        let patch_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("patch_vertex_buffer"),
            contents: bytemuck::cast_slice(&patch_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let patch_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("patch_index_buffer"),
            contents: bytemuck::cast_slice(layout.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        let patch_capacity = patch_count as u32;
        let origin_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("patch_origin_buffer"),
            size: (patch_count * std::mem::size_of::<[f32; 2]>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let sample_buffer = (wave_path == WavePath::Cpu).then(|| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("patch_sample_buffer"),
                size: (patch_count * layout.vertex_count() * std::mem::size_of::<HostSample>())
                    as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        });

        let (hull_vertices, hull_indices) = hull_mesh();
        let hull_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("hull_vertex_buffer"),
            contents: bytemuck::cast_slice(&hull_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let hull_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("hull_index_buffer"),
            contents: bytemuck::cast_slice(&hull_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        tracing::debug!(
            ?wave_path,
            patches = patch_count,
            vertices_per_patch = layout.vertex_count(),
            "ocean renderer created"
        );

        let frame = scene.draw_list(patch_count, layout.vertex_count());

        Self {
            scene,
            frame,
            water_pipeline,
            hull_pipeline,
            camera_buffer,
            camera_bind_group,
            water_buffer,
            water_bind_group,
            hull_buffer,
            hull_bind_group,
            patch_vertex_buffer,
            patch_index_buffer,
            patch_index_count: layout.indices().len() as u32,
            patch_vertex_count: layout.vertex_count(),
            origin_buffer,
            sample_buffer,
            patch_capacity,
            hull_vertex_buffer,
            hull_index_buffer,
            hull_index_count: hull_indices.len() as u32,
            depth_texture: Self::create_depth_texture(device, width, height),
            surface_format,
        }
    }

    pub fn set_hull_color(&mut self, color: [f32; 4]) {
        self.scene.hull_color = color;
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.scene.projection.set_viewport(width, height);
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Build this frame's draw list in the renderer's own buffers, then draw it.
    pub fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &FrameView<'_>,
    ) {
        self.scene.render_into(frame, &mut self.frame);
        self.submit(device, queue, view, &self.frame);
    }

    /// Upload `list` and draw it into `view`.
    pub fn submit(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        list: &OceanDrawList,
    ) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&CameraUniform {
                view_proj: list.view_proj.to_cols_array_2d(),
            }),
        );
        queue.write_buffer(
            &self.water_buffer,
            0,
            bytemuck::bytes_of(&WaterUniform {
                time: list.time,
                _pad: [0.0; 3],
            }),
        );
        queue.write_buffer(
            &self.hull_buffer,
            0,
            bytemuck::bytes_of(&HullUniform {
                model: list.hull_model.to_cols_array_2d(),
                color: list.hull_color,
            }),
        );

        let patch_count = (list.origins.len() as u32).min(self.patch_capacity);
        if patch_count > 0 {
            queue.write_buffer(
                &self.origin_buffer,
                0,
                bytemuck::cast_slice(&list.origins[..patch_count as usize]),
            );
        }
        let host_samples = match &self.sample_buffer {
            Some(buffer) if list.samples.len() >= patch_count as usize * self.patch_vertex_count => {
                let used = patch_count as usize * self.patch_vertex_count;
                queue.write_buffer(buffer, 0, bytemuck::cast_slice(&list.samples[..used]));
                Some(buffer)
            }
            Some(_) => {
                tracing::warn!(
                    samples = list.samples.len(),
                    "draw list is missing host wave samples; skipping water"
                );
                None
            }
            None => None,
        };

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("ocean_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("ocean_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.53,
                            g: 0.75,
                            b: 0.9,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            // Water
            pass.set_pipeline(&self.water_pipeline);
            pass.set_bind_group(0, &self.camera_bind_group, &[]);
            pass.set_bind_group(1, &self.water_bind_group, &[]);
            pass.set_vertex_buffer(0, self.patch_vertex_buffer.slice(..));
            pass.set_vertex_buffer(1, self.origin_buffer.slice(..));
            pass.set_index_buffer(self.patch_index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            match (&self.sample_buffer, host_samples) {
                (None, _) => pass.draw_indexed(0..self.patch_index_count, 0, 0..patch_count),
                (Some(_), Some(buffer)) => {
                    let stride = (self.patch_vertex_count * std::mem::size_of::<HostSample>()) as u64;
                    for patch in 0..patch_count {
                        let start = patch as u64 * stride;
                        pass.set_vertex_buffer(2, buffer.slice(start..start + stride));
                        pass.draw_indexed(0..self.patch_index_count, 0, patch..patch + 1);
                    }
                }
                (Some(_), None) => {}
            }

            // Vehicle
            pass.set_pipeline(&self.hull_pipeline);
            pass.set_bind_group(0, &self.camera_bind_group, &[]);
            pass.set_bind_group(1, &self.hull_bind_group, &[]);
            pass.set_vertex_buffer(0, self.hull_vertex_buffer.slice(..));
            pass.set_index_buffer(self.hull_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.hull_index_count, 0, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hull_mesh_faces_outward() {
        let (vertices, indices) = hull_mesh();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        for tri in indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| glam::Vec3::from(vertices[i as usize].position));
            let n = glam::Vec3::from(vertices[tri[0] as usize].normal);
            assert!((b - a).cross(c - a).dot(n) > 0.0);
        }
    }

    #[test]
    fn uniform_sizes_match_wgsl() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 64);
        assert_eq!(std::mem::size_of::<WaterUniform>(), 16);
        assert_eq!(std::mem::size_of::<HullUniform>(), 80);
    }
}
