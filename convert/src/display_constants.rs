/// Largest image the target panel can show, in pixels. Sources are scaled
/// down to fit inside this box and never scaled up.
pub const MAX_PIXEL_WIDTH: u32 = 296;
pub const MAX_PIXEL_HEIGHT: u32 = 128;

/// reserved byte, bits per pixel, u16 width, u16 height
pub const LBM_HEADER_LEN: usize = 6;
pub const LBM_EXTENSION: &str = "lbm";

pub const INPUT_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "bmp", "png"];
