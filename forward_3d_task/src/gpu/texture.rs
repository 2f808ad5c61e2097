/// Texture trait, texture descriptor, sampler, and texture info

/// Texture format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    // Color formats
    R8G8B8A8_SRGB,
    R8G8B8A8_UNORM,
    B8G8R8A8_SRGB,
    B8G8R8A8_UNORM,

    // Depth/stencil formats
    D24_UNORM_S8_UINT,
    D32_FLOAT_S8_UINT,
}

impl TextureFormat {
    /// Returns true for combined depth/stencil formats
    pub fn is_depth_stencil(&self) -> bool {
        matches!(self, TextureFormat::D24_UNORM_S8_UINT | TextureFormat::D32_FLOAT_S8_UINT)
    }
}

/// Texture usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureUsage {
    /// Texture can be sampled in shaders
    Sampled,
    /// Texture is a color render buffer that can also be sampled (blit source)
    SampledAndRenderTarget,
    /// Texture is a depth/stencil render buffer
    DepthStencil,
}

/// Sampler filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Nearest texel for both minification and magnification
    MinMagPoint,
    /// Linear filtering for both minification and magnification
    MinMagLinear,
}

/// Sampler description attached to a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    pub filter: Filter,
}

impl Default for Sampler {
    fn default() -> Self {
        Self { filter: Filter::MinMagPoint }
    }
}

// ===== TEXTURE DESC =====

/// Descriptor for creating a texture
#[derive(Debug, Clone)]
pub struct TextureDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Usage
    pub usage: TextureUsage,
    /// Number of mip levels (1 = single mip)
    pub mip_levels: u32,
    /// Sampler used when the texture is read
    pub sampler: Sampler,
}

impl TextureDesc {
    /// Single-mip render buffer sized `width` x `height`
    pub fn render_buffer(format: TextureFormat, width: u32, height: u32, sampler: Sampler) -> Self {
        let usage = if format.is_depth_stencil() {
            TextureUsage::DepthStencil
        } else {
            TextureUsage::SampledAndRenderTarget
        };
        Self {
            width,
            height,
            format,
            usage,
            mip_levels: 1,
            sampler,
        }
    }
}

// ===== TEXTURE INFO =====

/// Read-only properties of a created texture.
#[derive(Debug, Clone)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub usage: TextureUsage,
    pub mip_levels: u32,
    pub sampler: Sampler,
}

impl From<&TextureDesc> for TextureInfo {
    fn from(desc: &TextureDesc) -> Self {
        Self {
            width: desc.width,
            height: desc.height,
            format: desc.format,
            usage: desc.usage,
            mip_levels: desc.mip_levels,
            sampler: desc.sampler,
        }
    }
}

// ===== TEXTURE TRAIT =====

/// Texture resource trait
///
/// Implemented by backend-specific texture types.
/// The texture is destroyed when the last reference is dropped.
pub trait Texture: Send + Sync {
    /// Get the read-only properties of this texture
    fn info(&self) -> &TextureInfo;
}
