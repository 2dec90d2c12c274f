use crate::error::ConvertError;
use std::fmt;
use std::str::FromStr;

/// Number of luminance steps an LBM file stores per pixel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GrayLevel {
    Two = 2,
    Four = 4,
    Sixteen = 16,
}

/// How indices are laid out in a packed byte. Chosen once per image.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PackingMode {
    OneBit,
    TwoBit,
    FourBit,
}

impl GrayLevel {
    pub const ALL: [GrayLevel; 3] = [GrayLevel::Two, GrayLevel::Four, GrayLevel::Sixteen];

    pub fn levels(self) -> u8 {
        self as u8
    }

    pub fn packing_mode(self) -> PackingMode {
        match self {
            GrayLevel::Two => PackingMode::OneBit,
            GrayLevel::Four => PackingMode::TwoBit,
            GrayLevel::Sixteen => PackingMode::FourBit,
        }
    }

    /// Width of one quantization bucket over the 0..=255 sample range.
    pub fn divisor(self) -> u8 {
        (256u16 / self.levels() as u16) as u8
    }

    pub fn max_index(self) -> u8 {
        self.levels() - 1
    }
}

impl PackingMode {
    pub fn bits_per_pixel(self) -> u8 {
        match self {
            PackingMode::OneBit => 1,
            PackingMode::TwoBit => 2,
            PackingMode::FourBit => 4,
        }
    }

    /// Pixels per packed byte, which is also the row alignment.
    pub fn samples_per_byte(self) -> u32 {
        match self {
            PackingMode::OneBit => 8,
            PackingMode::TwoBit => 4,
            PackingMode::FourBit => 2,
        }
    }

    pub fn mask(self) -> u8 {
        match self {
            PackingMode::OneBit => 0x01,
            PackingMode::TwoBit => 0x03,
            PackingMode::FourBit => 0x0F,
        }
    }

    /// `width` rounded up to the next multiple of the alignment.
    pub fn padded_width(self, width: u32) -> u32 {
        let alignment = self.samples_per_byte();
        width.div_ceil(alignment) * alignment
    }

    pub fn row_bytes(self, width: u32) -> usize {
        (self.padded_width(width) / self.samples_per_byte()) as usize
    }
}

impl TryFrom<u8> for GrayLevel {
    type Error = ConvertError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(GrayLevel::Two),
            4 => Ok(GrayLevel::Four),
            16 => Ok(GrayLevel::Sixteen),
            other => Err(ConvertError::UnsupportedGrayLevel(other)),
        }
    }
}

impl FromStr for GrayLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid gray level '{}': expected 2, 4 or 16", s))?;
        GrayLevel::try_from(value).map_err(|e| e.to_string())
    }
}

impl fmt::Display for GrayLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.levels())
    }
}

impl From<GrayLevel> for u8 {
    fn from(value: GrayLevel) -> Self {
        value.levels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_depth_table() {
        let table: Vec<(u8, u8, u32)> = GrayLevel::ALL
            .iter()
            .map(|l| {
                let mode = l.packing_mode();
                (l.levels(), mode.bits_per_pixel(), mode.samples_per_byte())
            })
            .collect();
        assert_eq!(table, vec![(2, 1, 8), (4, 2, 4), (16, 4, 2)]);
    }

    #[test]
    fn divisors() {
        assert_eq!(GrayLevel::Two.divisor(), 128);
        assert_eq!(GrayLevel::Four.divisor(), 64);
        assert_eq!(GrayLevel::Sixteen.divisor(), 16);
    }

    #[test]
    fn rejects_other_levels() {
        for value in [0u8, 1, 3, 8, 15, 17, 255] {
            assert!(matches!(
                GrayLevel::try_from(value),
                Err(ConvertError::UnsupportedGrayLevel(v)) if v == value
            ));
        }
        assert!("8".parse::<GrayLevel>().is_err());
        assert!("two".parse::<GrayLevel>().is_err());
        assert_eq!("16".parse::<GrayLevel>(), Ok(GrayLevel::Sixteen));
    }

    #[test]
    fn padding_invariant_holds_for_every_width() {
        for level in GrayLevel::ALL {
            let mode = level.packing_mode();
            let alignment = mode.samples_per_byte();
            for width in 1..=600u32 {
                let padded = mode.padded_width(width);
                assert_eq!(padded % alignment, 0, "width {width} level {level}");
                assert!(padded >= width);
                assert!(padded - width < alignment);
                assert_eq!(mode.row_bytes(width), (padded / alignment) as usize);
            }
        }
    }
}
