use crate::frame::FrameSize;

/// How the channels of a frame are arranged in memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// Channels interleaved per pixel, e.g. `RGBRGB...`.
    Packed,
    /// Full resolution luma plane followed by two 2x2 sub-sampled chroma planes.
    Planar420,
}

/// Pixel formats understood by the kernels.
///
/// The host negotiates the format and hands it to the kernel once per format
/// change; the kernels never try to discover it from the buffer contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8-bit single channel, also used for masks.
    Gray8,
    /// Packed 8-bit RGB.
    Rgb24,
    /// Packed 8-bit YUV 4:4:4 (`v308`).
    Yuv444,
    /// Packed 8-bit RGB with an alpha byte.
    Rgba32,
    /// Packed 8-bit YUV with a leading alpha byte.
    Ayuv32,
    /// Planar YUV 4:2:0.
    I420,
}

impl PixelFormat {
    /// The memory layout of the format.
    pub fn layout(&self) -> PixelLayout {
        match self {
            PixelFormat::I420 => PixelLayout::Planar420,
            _ => PixelLayout::Packed,
        }
    }

    /// Bytes per pixel for packed formats, `None` for planar ones.
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        match self {
            PixelFormat::Gray8 => Some(1),
            PixelFormat::Rgb24 | PixelFormat::Yuv444 => Some(3),
            PixelFormat::Rgba32 | PixelFormat::Ayuv32 => Some(4),
            PixelFormat::I420 => None,
        }
    }

    /// Number of bytes a frame of the given size occupies in this format.
    ///
    /// # Example
    ///
    /// ```
    /// use rawfx_frame::{FrameSize, PixelFormat};
    ///
    /// let size = FrameSize { width: 5, height: 5 };
    /// assert_eq!(PixelFormat::Rgb24.buffer_len(size), 75);
    /// assert_eq!(PixelFormat::I420.buffer_len(size), 25 + 2 * 9);
    /// ```
    pub fn buffer_len(&self, size: FrameSize) -> usize {
        match self.bytes_per_pixel() {
            Some(bpp) => size.width * size.height * bpp,
            None => size.width * size.height + 2 * size.chroma_size().area(),
        }
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            PixelFormat::Gray8 => "GRAY8",
            PixelFormat::Rgb24 => "RGB24",
            PixelFormat::Yuv444 => "v308",
            PixelFormat::Rgba32 => "RGBA32",
            PixelFormat::Ayuv32 => "AYUV",
            PixelFormat::I420 => "I420",
        };
        write!(f, "{name}")
    }
}
