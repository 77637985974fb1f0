//! Lit pipeline
//!
//! Draws every body as a smooth textured sphere. Planets and moons are lit
//! by a point light with ambient, diffuse, and specular terms that can be
//! switched individually; stars are drawn at full brightness.

use solar_math::SphereMesh;

use crate::mesh::{GpuMesh, LIT_SEGMENTS};
use crate::renderable::RenderableBodies;
use crate::texture::TextureCache;

use super::buffers::{begin_clear_pass, depth_stencil_state, DepthTarget, FrameBindings, InstanceBuffer};
use super::types::{BodyInstance, FrameUniforms, MeshVertex};

/// Render pipeline for textured, lit spheres
pub struct LitPipeline {
    pipeline: wgpu::RenderPipeline,
    frame: FrameBindings,
    sphere: GpuMesh,
    instances: InstanceBuffer,
    depth: DepthTarget,
}

impl LitPipeline {
    /// Create a new lit pipeline
    ///
    /// `texture_layout` must be the layout of the bind groups handed out by
    /// the [`TextureCache`] passed to [`render`](Self::render).
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        texture_layout: &wgpu::BindGroupLayout,
        width: u32,
        height: u32,
    ) -> Self {
        let frame = FrameBindings::new(device, "Lit");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Lit Pipeline Layout"),
            bind_group_layouts: &[&frame.layout, texture_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Lit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/lit.wgsl").into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Lit Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::layout(), BodyInstance::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let (slices, stacks) = LIT_SEGMENTS;
        let sphere = GpuMesh::triangles(device, &SphereMesh::uv(slices, stacks), "Lit Sphere");

        Self {
            pipeline,
            frame,
            sphere,
            instances: InstanceBuffer::new(device, 16),
            depth: DepthTarget::new(device, width, height),
        }
    }

    /// Update uniforms
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &FrameUniforms) {
        self.frame.write(queue, uniforms);
    }

    /// Ensure depth texture matches the surface size
    pub fn ensure_depth_texture(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth.ensure_size(device, width, height);
    }

    /// Clear the target and draw every body with its texture
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        bodies: &RenderableBodies,
        textures: &TextureCache,
        clear_color: wgpu::Color,
    ) {
        self.instances.write(device, queue, &bodies.instances());

        let mut render_pass = begin_clear_pass(encoder, view, &self.depth, clear_color, "Lit Pass");
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.frame.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.sphere.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instances.buffer().slice(..));
        render_pass.set_index_buffer(self.sphere.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

        for (i, body) in bodies.bodies.iter().enumerate() {
            let instance = i as u32;
            render_pass.set_bind_group(1, textures.bind_group(body.texture), &[]);
            render_pass.draw_indexed(0..self.sphere.index_count, 0, instance..instance + 1);
        }
    }
}
