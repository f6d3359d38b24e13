use configurator_core::TextureError;
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// RGBA8 image with its full mip chain, level 0 first.
#[derive(Debug)]
pub struct DecodedTexture {
    pub width: u32,
    pub height: u32,
    pub levels: Vec<Vec<u8>>,
}

impl DecodedTexture {
    pub fn level_size(&self, level: u32) -> (u32, u32) {
        ((self.width >> level).max(1), (self.height >> level).max(1))
    }

    pub fn mip_level_count(&self) -> u32 {
        self.levels.len() as u32
    }
}

#[inline]
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Decodes PNG/JPEG bytes into RGBA8.
pub fn decode_rgba(path: &str, bytes: &[u8]) -> Result<RgbaImage, TextureError> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgba8())
        .map_err(|e| TextureError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })
}

/// Builds a mip chain one level per [`step`](Self::step), so an async caller
/// can hand the thread back between levels.
pub struct MipChainBuilder {
    width: u32,
    height: u32,
    count: u32,
    levels: Vec<Vec<u8>>,
    current: RgbaImage,
}

impl MipChainBuilder {
    pub fn new(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let count = mip_level_count(width, height);
        Self {
            width,
            height,
            count,
            levels: Vec::with_capacity(count as usize),
            current: img,
        }
    }

    /// Downsamples the next level. Returns `false` once nothing is left to build.
    pub fn step(&mut self) -> bool {
        let level = self.levels.len() as u32 + 1;
        if level >= self.count {
            return false;
        }
        let w = (self.width >> level).max(1);
        let h = (self.height >> level).max(1);
        let next = imageops::resize(&self.current, w, h, FilterType::Triangle);
        self.levels
            .push(std::mem::replace(&mut self.current, next).into_raw());
        true
    }

    pub fn finish(mut self) -> DecodedTexture {
        while self.step() {}
        self.levels.push(self.current.into_raw());
        DecodedTexture {
            width: self.width,
            height: self.height,
            levels: self.levels,
        }
    }
}
