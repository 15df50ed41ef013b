/// A rasterized text image (RGBA8, row-major) at a fixed pixel scale.
///
/// Never mutated after rasterization; the bitmap cache accounts its cost in
/// bytes via [`Bitmap::byte_len`].
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub scale: f32,
    pub pixels: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, scale: f32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            scale,
            pixels,
        }
    }

    /// Memory footprint of the pixel data.
    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }
}
