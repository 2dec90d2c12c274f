use image::GrayImage;
use tracing::debug;

/// Linear brightness gain in percent. `Brightness(20)` multiplies every
/// sample by 1.2, `Brightness(-50)` by 0.5. The intended range is -100..=100
/// but nothing enforces it.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Brightness(pub i32);

impl Brightness {
    pub fn factor(self) -> f64 {
        1.0 + self.0 as f64 / 100.0
    }

    pub fn is_identity(self) -> bool {
        self.0 == 0
    }

    pub fn adjust_sample(self, sample: u8) -> u8 {
        (sample as f64 * self.factor()).round().clamp(0.0, 255.0) as u8
    }

    /// Apply the gain in place. A zero gain leaves the buffer untouched.
    pub fn apply(self, img: &mut GrayImage) {
        if self.is_identity() {
            return;
        }
        let lut: [u8; 256] = std::array::from_fn(|x| self.adjust_sample(x as u8));
        for sample in img.iter_mut() {
            *sample = lut[*sample as usize];
        }
        debug!("Applied brightness factor: {:.2}", self.factor());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_identity() {
        let b = Brightness(0);
        for x in 0..=255u8 {
            assert_eq!(b.adjust_sample(x), x);
        }
        let original = GrayImage::from_fn(7, 3, |x, y| image::Luma([(x * 30 + y) as u8]));
        let mut img = original.clone();
        b.apply(&mut img);
        assert_eq!(img, original);
    }

    #[test]
    fn gain_rounds_and_clamps() {
        let brighter = Brightness(50);
        assert_eq!(brighter.adjust_sample(100), 150);
        assert_eq!(brighter.adjust_sample(3), 5); // 4.5 rounds up
        assert_eq!(brighter.adjust_sample(200), 255);

        let darker = Brightness(-50);
        assert_eq!(darker.adjust_sample(101), 51); // 50.5 rounds up
        assert_eq!(darker.adjust_sample(255), 128);

        assert_eq!(Brightness(-100).adjust_sample(255), 0);
        assert_eq!(Brightness(-250).adjust_sample(255), 0);
        assert_eq!(Brightness(100).adjust_sample(128), 255);
    }

    #[test]
    fn apply_matches_per_sample() {
        let b = Brightness(-30);
        let mut img = GrayImage::from_fn(16, 16, |x, y| image::Luma([(y * 16 + x) as u8]));
        b.apply(&mut img);
        for (i, sample) in img.iter().enumerate() {
            assert_eq!(*sample, b.adjust_sample(i as u8));
        }
    }
}
