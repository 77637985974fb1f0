//! GPU device initialization and surface management
//!
//! Provides [`RenderContext`] which owns the wgpu device, queue, and window
//! surface, and [`RenderContextError`] for when initialization fails.

use std::sync::Arc;
use winit::{dpi::PhysicalSize, window::Window};

/// Error initializing the render context
#[derive(Debug)]
pub enum RenderContextError {
    /// The window surface could not be created
    Surface(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface
    NoAdapter,
    /// The adapter refused to create a device
    Device(wgpu::RequestDeviceError),
}

impl From<wgpu::CreateSurfaceError> for RenderContextError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        RenderContextError::Surface(e)
    }
}

impl From<wgpu::RequestDeviceError> for RenderContextError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        RenderContextError::Device(e)
    }
}

impl std::fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderContextError::Surface(e) => write!(f, "Failed to create surface: {}", e),
            RenderContextError::NoAdapter => write!(f, "No compatible GPU adapter found"),
            RenderContextError::Device(e) => write!(f, "Failed to request GPU device: {}", e),
        }
    }
}

impl std::error::Error for RenderContextError {}

/// Owns the GPU device, queue, and window surface
pub struct RenderContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
}

impl RenderContext {
    /// Initialize the GPU, choosing the present mode from `vsync`
    pub async fn with_vsync(window: Arc<Window>, vsync: bool) -> Result<Self, RenderContextError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderContextError::NoAdapter)?;

        let info = adapter.get_info();
        log::info!("Using GPU: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Solar System Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: select_surface_format(&caps.formats),
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: select_present_mode(vsync, &caps.present_modes),
            alpha_mode: caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::debug!("Surface configured: {:?} {:?}", config.format, config.present_mode);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
        })
    }

    /// Reconfigure the surface after a window resize
    ///
    /// Zero sizes (minimized windows) are ignored.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure the surface at its current size
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Width / height of the surface
    pub fn aspect_ratio(&self) -> f32 {
        aspect_ratio(self.config.width, self.config.height)
    }
}

/// Width / height, treating a zero height as one
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

/// First sRGB format, else the first format offered
fn select_surface_format(formats: &[wgpu::TextureFormat]) -> wgpu::TextureFormat {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first().copied())
        .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb)
}

/// Fifo when vsync is wanted; otherwise the first tear-free mode without a
/// wait, falling back to Fifo which every surface supports
fn select_present_mode(vsync: bool, modes: &[wgpu::PresentMode]) -> wgpu::PresentMode {
    if vsync {
        return wgpu::PresentMode::Fifo;
    }
    [wgpu::PresentMode::Mailbox, wgpu::PresentMode::Immediate]
        .into_iter()
        .find(|mode| modes.contains(mode))
        .unwrap_or(wgpu::PresentMode::Fifo)
}
