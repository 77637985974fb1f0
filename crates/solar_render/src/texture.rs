//! Body textures
//!
//! [`TextureCache`] decodes each bitmap once, uploads it, and keeps a bind
//! group for it. Paths that fail to load (missing, undecodable, or larger
//! than the device allows) are remembered as failed so the warning is
//! logged once and the body is drawn with its fallback color.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use solar_core::SolarSystem;
use wgpu::util::DeviceExt;

/// Error loading a texture
#[derive(Debug)]
pub enum TextureError {
    /// The file could not be opened or decoded
    Image(image::ImageError),
    /// The image has no pixels
    ZeroDimensions { width: u32, height: u32 },
    /// The image exceeds the device's 2D texture limit
    TooLarge { width: u32, height: u32, max: u32 },
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::Image(e)
    }
}

impl std::fmt::Display for TextureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextureError::Image(e) => write!(f, "Image error: {}", e),
            TextureError::ZeroDimensions { width, height } => {
                write!(f, "Texture dimensions must be non-zero, got {}x{}", width, height)
            }
            TextureError::TooLarge { width, height, max } => {
                write!(f, "Texture is {}x{}, device limit is {}", width, height, max)
            }
        }
    }
}

impl std::error::Error for TextureError {}

/// Decode an image file to 8-bit RGBA
pub fn decode_rgba(path: &Path) -> Result<image::RgbaImage, TextureError> {
    let rgba = image::open(path)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureError::ZeroDimensions { width, height });
    }
    Ok(rgba)
}

/// Decode an image file and check it fits in a `max_dimension` texture
pub fn decode_rgba_within(path: &Path, max_dimension: u32) -> Result<image::RgbaImage, TextureError> {
    let rgba = decode_rgba(path)?;
    let (width, height) = rgba.dimensions();
    if width > max_dimension || height > max_dimension {
        return Err(TextureError::TooLarge {
            width,
            height,
            max: max_dimension,
        });
    }
    Ok(rgba)
}

/// Load-once bookkeeping, keyed by path
///
/// A path is tried at most once; `None` marks a path that failed.
#[derive(Debug)]
pub struct LoadOnce<T> {
    entries: HashMap<String, Option<T>>,
}

impl<T> Default for LoadOnce<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> LoadOnce<T> {
    /// Run `load` unless `path` has been tried before
    ///
    /// Returns whether the entry is available.
    pub fn get_or_load(&mut self, path: &str, load: impl FnOnce() -> Option<T>) -> bool {
        if let Some(entry) = self.entries.get(path) {
            return entry.is_some();
        }

        let entry = load();
        let loaded = entry.is_some();
        self.entries.insert(path.to_string(), entry);
        loaded
    }

    /// The loaded entry, if the path was tried and succeeded
    pub fn get(&self, path: &str) -> Option<&T> {
        self.entries.get(path).and_then(Option::as_ref)
    }

    /// Whether the path loaded successfully
    pub fn is_loaded(&self, path: &str) -> bool {
        self.get(path).is_some()
    }
}

/// Layout shared by every texture bind group (texture at 0, sampler at 1)
pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Texture Bind Group Layout"),
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
    })
}

/// Bitmap textures keyed by their path relative to the texture directory
pub struct TextureCache {
    directory: PathBuf,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    /// 1x1 white, tinted by the instance color
    blank: wgpu::BindGroup,
    max_dimension: u32,
    entries: LoadOnce<wgpu::BindGroup>,
}

impl TextureCache {
    /// Create an empty cache reading from `directory`
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, directory: impl Into<PathBuf>) -> Self {
        let layout = bind_group_layout(device);
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Body Texture Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let white = image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
        let blank = upload(device, queue, &layout, &sampler, &white, "Blank Texture");

        Self {
            directory: directory.into(),
            layout,
            sampler,
            blank,
            max_dimension: device.limits().max_texture_dimension_2d,
            entries: LoadOnce::default(),
        }
    }

    /// The layout every bind group handed out by this cache uses
    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Load a texture unless it has been tried before
    ///
    /// Returns whether the texture is available.
    pub fn load(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, path: &str) -> bool {
        let full_path = self.directory.join(path);
        let (layout, sampler, max_dimension) = (&self.layout, &self.sampler, self.max_dimension);

        self.entries.get_or_load(path, || match decode_rgba_within(&full_path, max_dimension) {
            Ok(rgba) => {
                log::debug!("Loaded texture {} ({}x{})", full_path.display(), rgba.width(), rgba.height());
                Some(upload(device, queue, layout, sampler, &rgba, path))
            }
            Err(e) => {
                log::warn!("Texture {} unavailable, using flat color: {}", full_path.display(), e);
                None
            }
        })
    }

    /// Load every texture a system refers to
    ///
    /// Returns how many loaded.
    pub fn preload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, system: &SolarSystem) -> usize {
        let paths: Vec<String> = system
            .iter()
            .filter_map(|(_, body)| body.appearance.texture_path().map(str::to_string))
            .collect();

        let loaded = paths.iter().filter(|path| self.load(device, queue, path)).count();
        log::info!("Loaded {} of {} textures from {}", loaded, paths.len(), self.directory.display());
        loaded
    }

    /// Whether a texture loaded successfully
    pub fn is_loaded(&self, path: &str) -> bool {
        self.entries.is_loaded(path)
    }

    /// Bind group for a texture, or the blank texture when it is missing
    pub fn bind_group(&self, path: Option<&str>) -> &wgpu::BindGroup {
        path.and_then(|p| self.entries.get(p)).unwrap_or(&self.blank)
    }
}

fn upload(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    rgba: &image::RgbaImage,
    label: &str,
) -> wgpu::BindGroup {
    let (width, height) = rgba.dimensions();
    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        rgba.as_raw(),
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
