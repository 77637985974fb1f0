//! Wireframe pipeline
//!
//! Draws every body as a flat-colored line sphere, with the tessellation
//! chosen by the body's kind.

use crate::mesh::WireMeshes;
use crate::renderable::RenderableBodies;

use super::buffers::{begin_clear_pass, depth_stencil_state, DepthTarget, FrameBindings, InstanceBuffer};
use super::types::{BodyInstance, FrameUniforms, MeshVertex};

/// Render pipeline for wire spheres
pub struct WirePipeline {
    pipeline: wgpu::RenderPipeline,
    frame: FrameBindings,
    meshes: WireMeshes,
    instances: InstanceBuffer,
    depth: DepthTarget,
}

impl WirePipeline {
    /// Create a new wireframe pipeline
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let frame = FrameBindings::new(device, "Wire");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Wire Pipeline Layout"),
            bind_group_layouts: &[&frame.layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Wire Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/wire.wgsl").into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Wire Pipeline"),
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
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            frame,
            meshes: WireMeshes::new(device),
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

    /// Clear the target and draw every body
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        bodies: &RenderableBodies,
        clear_color: wgpu::Color,
    ) {
        self.instances.write(device, queue, &bodies.instances());

        let mut render_pass = begin_clear_pass(encoder, view, &self.depth, clear_color, "Wire Pass");
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.frame.bind_group, &[]);
        render_pass.set_vertex_buffer(1, self.instances.buffer().slice(..));

        for (i, body) in bodies.bodies.iter().enumerate() {
            let mesh = self.meshes.for_kind(body.kind);
            let instance = i as u32;
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..mesh.index_count, 0, instance..instance + 1);
        }
    }
}
