//! wgpu renderer shared by the web and native front-ends.
//!
//! The front-end owns the surface and hands in the frame's color view; this
//! module owns pipelines, buffers and the depth target.

mod dynamic_buffer;
mod helpers;

use dynamic_buffer::DynamicBuffer;

use crate::batch::{self, LineVertex, MeshVertex, SceneUniforms};
use crate::constants::CLEAR_COLOR;
use crate::material::DecalMaterial;
use crate::scene::Scene;
use crate::texture::DecalTexture;

pub use helpers::DEPTH_FORMAT;

/// Depth state for decal triangles, taken from the shared decal material.
fn decal_depth_stencil(material: &DecalMaterial) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: material.depth_write,
        depth_compare: if material.depth_test {
            wgpu::CompareFunction::LessEqual
        } else {
            wgpu::CompareFunction::Always
        },
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState {
            constant: 0,
            slope_scale: material.polygon_offset_factor,
            clamp: 0.0,
        },
    }
}

fn decal_blend(material: &DecalMaterial) -> Option<wgpu::BlendState> {
    Some(if material.transparent {
        wgpu::BlendState::ALPHA_BLENDING
    } else {
        wgpu::BlendState::REPLACE
    })
}

pub struct SceneRenderer {
    line_pipeline: wgpu::RenderPipeline,
    decal_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bg: wgpu::BindGroup,
    texture_bg: wgpu::BindGroup,
    line_vb: DynamicBuffer,
    decal_vb: DynamicBuffer,
    line_count: u32,
    decal_count: u32,
    depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,
    clear_color: wgpu::Color,
}

impl SceneRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        texture: &DecalTexture,
        material: &DecalMaterial,
    ) -> Self {
        let lines_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lines_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::LINES_WGSL.into()),
        });
        let decal_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("decal_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::DECAL_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let uniform_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &uniform_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        // Decal texture and sampler
        let (decal_tex, decal_view) = helpers::create_texture(
            device,
            "decal_tex",
            texture.width,
            texture.height,
            wgpu::TextureFormat::Rgba8UnormSrgb,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        );
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &decal_tex,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &texture.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * texture.width),
                rows_per_image: Some(texture.height),
            },
            wgpu::Extent3d {
                width: texture.width,
                height: texture.height,
                depth_or_array_layers: 1,
            },
        );
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("decal_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("decal_texture_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let texture_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("decal_texture_bg"),
            layout: &texture_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&decal_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let line_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lines_pl"),
            bind_group_layouts: &[&uniform_bgl],
            push_constant_ranges: &[],
        });
        let decal_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("decal_pl"),
            bind_group_layouts: &[&uniform_bgl, &texture_bgl],
            push_constant_ranges: &[],
        });

        let line_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4],
        }];
        let decal_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x3,
                1 => Float32x3,
                2 => Float32x2,
                3 => Float32x4
            ],
        }];

        let line_pipeline = helpers::make_pipeline(
            device,
            "lines_pipeline",
            &line_layout,
            &lines_shader,
            &line_buffers,
            wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            },
            color_format,
            None,
        );
        let decal_pipeline = helpers::make_pipeline(
            device,
            "decal_pipeline",
            &decal_layout,
            &decal_shader,
            &decal_buffers,
            wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            decal_depth_stencil(material),
            color_format,
            decal_blend(material),
        );

        let line_vb = DynamicBuffer::new(
            device,
            "line_vb",
            std::mem::size_of::<LineVertex>() * 8192,
            wgpu::BufferUsages::VERTEX,
        );
        let decal_vb = DynamicBuffer::new(
            device,
            "decal_vb",
            std::mem::size_of::<MeshVertex>() * 4096,
            wgpu::BufferUsages::VERTEX,
        );
        let (depth_tex, depth_view) = helpers::create_depth_texture(device, width, height);

        log::info!("[render] pipelines ready, format {color_format:?}, {width}x{height}");
        Self {
            line_pipeline,
            decal_pipeline,
            uniform_buffer,
            uniform_bg,
            texture_bg,
            line_vb,
            decal_vb,
            line_count: 0,
            decal_count: 0,
            depth_tex,
            depth_view,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
        }
    }

    /// Recreate the depth target when the drawable size changes.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let size = self.depth_tex.size();
        if size.width == width && size.height == height {
            return;
        }
        (self.depth_tex, self.depth_view) = helpers::create_depth_texture(device, width, height);
    }

    /// Upload this frame's uniforms and vertex data.
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, scene: &Scene) {
        let uniforms = SceneUniforms::new(&scene.camera, &scene.lights, &scene.material);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let lines = batch::line_vertices(scene);
        self.line_vb.write(device, queue, &lines);
        self.line_count = lines.len() as u32;

        let decals = batch::decal_vertices(&scene.decals);
        self.decal_vb.write(device, queue, &decals);
        self.decal_count = decals.len() as u32;
    }

    /// Record the scene pass into `encoder`, targeting `view`.
    pub fn draw(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_bind_group(0, &self.uniform_bg, &[]);

        if self.line_count > 0 {
            rpass.set_pipeline(&self.line_pipeline);
            rpass.set_vertex_buffer(0, self.line_vb.slice());
            rpass.draw(0..self.line_count, 0..1);
        }
        // decals go last and in render order, after everything that writes depth
        if self.decal_count > 0 && !self.decal_vb.is_empty() {
            rpass.set_pipeline(&self.decal_pipeline);
            rpass.set_bind_group(1, &self.texture_bg, &[]);
            rpass.set_vertex_buffer(0, self.decal_vb.slice());
            rpass.draw(0..self.decal_count, 0..1);
        }
    }
}
