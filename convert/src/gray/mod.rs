mod brightness;
mod gray_level;
mod gray_level_map;

pub use brightness::Brightness;
pub use gray_level::{GrayLevel, PackingMode};
pub use gray_level_map::GrayLevelMap;

use image::imageops::index_colors;
use image::{GrayImage, Luma};

/// Level indices for every pixel of a source image, row-major.
#[derive(Debug, Clone)]
pub struct QuantizedBuffer {
    level: GrayLevel,
    indices: GrayImage,
}

impl QuantizedBuffer {
    pub fn width(&self) -> u32 {
        self.indices.width()
    }

    pub fn height(&self) -> u32 {
        self.indices.height()
    }

    pub fn level(&self) -> GrayLevel {
        self.level
    }

    pub fn indices(&self) -> &[u8] {
        self.indices.as_raw()
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let width = self.width() as usize;
        let start = y as usize * width;
        &self.indices.as_raw()[start..start + width]
    }

    /// Render the indices as a grayscale image so the quantization can be
    /// checked by eye.
    pub fn preview(&self) -> GrayImage {
        let map = GrayLevelMap::new(self.level);
        GrayImage::from_fn(self.width(), self.height(), |x, y| {
            Luma([map.sample_of_index(self.indices.get_pixel(x, y).0[0])])
        })
    }
}

pub fn quantize(img: &GrayImage, level: GrayLevel) -> QuantizedBuffer {
    let map = GrayLevelMap::new(level);
    QuantizedBuffer {
        level,
        indices: index_colors(img, &map),
    }
}
