//! GPU rendering system
//!
//! Owns the render context, the fixed camera, and whichever pipeline the
//! configuration selected, and draws one frame per call.

use std::sync::Arc;
use winit::window::Window;
use solar_core::SolarSystem;
use solar_math::{mat4, Vec3};
use solar_render::{
    context::{RenderContext, RenderContextError},
    pipeline::{FrameUniforms, LitPipeline, WirePipeline},
    texture::TextureCache,
    LightingFlags, RenderableBodies, ViewCamera,
};

use crate::config::{CameraConfig, RenderVariant, RenderingConfig};
use super::simulation::FrameState;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

enum Pipeline {
    Wire(WirePipeline),
    Lit {
        pipeline: LitPipeline,
        textures: TextureCache,
    },
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    camera: ViewCamera,
    pipeline: Pipeline,
    render_config: RenderingConfig,
}

impl RenderSystem {
    /// Create render system from window and config
    ///
    /// For the textured variant every texture the system refers to is
    /// loaded up front.
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        camera_config: &CameraConfig,
        vsync: bool,
        system: &SolarSystem,
    ) -> Result<Self, RenderContextError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;
        let (width, height) = (context.size.width, context.size.height);

        let pipeline = match render_config.variant {
            RenderVariant::Wireframe => {
                Pipeline::Wire(WirePipeline::new(&context.device, context.config.format, width, height))
            }
            RenderVariant::Textured => {
                let mut textures =
                    TextureCache::new(&context.device, &context.queue, &render_config.texture_dir);
                textures.preload(&context.device, &context.queue, system);
                let pipeline = LitPipeline::new(
                    &context.device,
                    context.config.format,
                    textures.layout(),
                    width,
                    height,
                );
                Pipeline::Lit { pipeline, textures }
            }
        };
        log::info!("Rendering {:?} at {}x{}", render_config.variant, width, height);

        Ok(Self {
            context,
            camera: camera_from_config(camera_config),
            pipeline,
            render_config,
        })
    }

    /// Whether the lighting switches have any effect
    pub fn is_lit(&self) -> bool {
        matches!(self.pipeline, Pipeline::Lit { .. })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        let (width, height) = (self.context.size.width, self.context.size.height);
        match &mut self.pipeline {
            Pipeline::Wire(pipeline) => pipeline.ensure_depth_texture(&self.context.device, width, height),
            Pipeline::Lit { pipeline, .. } => {
                pipeline.ensure_depth_texture(&self.context.device, width, height)
            }
        }
    }

    /// Reconfigure the surface after it was lost
    pub fn reconfigure(&self) {
        self.context.reconfigure();
    }

    /// Render a single frame
    pub fn render_frame(
        &mut self,
        system: &SolarSystem,
        frame: &FrameState,
        lighting: LightingFlags,
    ) -> Result<(), RenderError> {
        let uniforms = frame_uniforms(
            &self.camera,
            self.context.aspect_ratio(),
            &self.render_config,
            lighting,
        );

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) => return Err(RenderError::SurfaceLost),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let clear_color = clear_color(self.render_config.background_color);
        let device = &self.context.device;
        let queue = &self.context.queue;

        match &mut self.pipeline {
            Pipeline::Wire(pipeline) => {
                let bodies = RenderableBodies::flat(system, &frame.placements);
                pipeline.update_uniforms(queue, &uniforms);
                pipeline.render(device, queue, &mut encoder, &view, &bodies, clear_color);
            }
            Pipeline::Lit { pipeline, textures } => {
                let bodies = RenderableBodies::textured(system, &frame.placements, |path| {
                    textures.is_loaded(path)
                });
                pipeline.update_uniforms(queue, &uniforms);
                pipeline.render(device, queue, &mut encoder, &view, &bodies, textures, clear_color);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn camera_from_config(config: &CameraConfig) -> ViewCamera {
    ViewCamera::new(config.distance, config.tilt, config.fov, config.near, config.far)
}

fn clear_color(bg: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: bg[0] as f64,
        g: bg[1] as f64,
        b: bg[2] as f64,
        a: bg[3] as f64,
    }
}

/// Per-frame uniforms; the light is moved into view space here
pub fn frame_uniforms(
    camera: &ViewCamera,
    aspect: f32,
    config: &RenderingConfig,
    lighting: LightingFlags,
) -> FrameUniforms {
    let view_matrix = camera.view_matrix();
    let [x, y, z] = config.light_position;
    let light = mat4::transform_point(view_matrix, Vec3::new(x, y, z));

    FrameUniforms {
        view_matrix,
        projection_matrix: camera.projection_matrix(aspect),
        light_position: light.to_array(),
        ambient_strength: config.ambient_strength,
        diffuse_strength: config.diffuse_strength,
        specular_strength: config.specular_strength,
        shininess: config.shininess,
        lighting_flags: lighting.bits(),
        ..FrameUniforms::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }

    #[test]
    fn test_light_at_sun_moves_to_view_space() {
        let camera = ViewCamera::default();
        let uniforms = frame_uniforms(&camera, 600.0 / 360.0, &RenderingConfig::default(), LightingFlags::all());

        // The sun sits at the origin, which the camera sees straight ahead
        assert!(uniforms.light_position[0].abs() < 1e-6);
        assert!(uniforms.light_position[1].abs() < 1e-6);
        assert!((uniforms.light_position[2] + 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_uniforms_carry_lighting_switches() {
        let camera = ViewCamera::default();
        let config = RenderingConfig::default();
        let flags = LightingFlags::AMBIENT | LightingFlags::SPECULAR;
        let uniforms = frame_uniforms(&camera, 1.0, &config, flags);

        assert_eq!(uniforms.lighting_flags, flags.bits());
        assert_eq!(uniforms.ambient_strength, config.ambient_strength);
        assert_eq!(uniforms.shininess, config.shininess);
        assert_eq!(uniforms.projection_matrix, camera.projection_matrix(1.0));
    }

    #[test]
    fn test_camera_from_config() {
        let camera = camera_from_config(&CameraConfig::default());
        assert_eq!(camera, ViewCamera::default());
    }

    #[test]
    fn test_clear_color() {
        let color = clear_color([0.0, 0.5, 1.0, 1.0]);
        assert_eq!((color.r, color.g, color.b, color.a), (0.0, 0.5, 1.0, 1.0));
    }
}
