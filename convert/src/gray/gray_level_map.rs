use crate::gray::gray_level::GrayLevel;
use image::imageops::ColorMap;
use image::Luma;

/// Maps 8-bit luminance onto LBM level indices. The scale is inverted: the
/// brightest samples land on index 0, the darkest on `levels - 1`.
#[derive(Debug, Copy, Clone)]
pub struct GrayLevelMap {
    level: GrayLevel,
}

impl GrayLevelMap {
    pub fn new(level: GrayLevel) -> Self {
        Self { level }
    }

    pub fn index_of_sample(&self, sample: u8) -> u8 {
        self.level.max_index() - sample / self.level.divisor()
    }

    /// Luminance used to render an index back out, spread evenly over 0..=255.
    pub fn sample_of_index(&self, index: u8) -> u8 {
        let max = self.level.max_index() as u16;
        let index = (index as u16).min(max);
        ((max - index) * 255 / max) as u8
    }
}

impl ColorMap for GrayLevelMap {
    type Color = Luma<u8>;

    fn index_of(&self, color: &Self::Color) -> usize {
        self.index_of_sample(color.0[0]) as usize
    }

    fn lookup(&self, index: usize) -> Option<Self::Color> {
        if index > self.level.max_index() as usize {
            return None;
        }
        Some(Luma([self.sample_of_index(index as u8)]))
    }

    fn has_lookup(&self) -> bool {
        true
    }

    fn map_color(&self, color: &mut Self::Color) {
        let index = self.index_of(color);
        *color = Luma([self.sample_of_index(index as u8)]);
    }
}
