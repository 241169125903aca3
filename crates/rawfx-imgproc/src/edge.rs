use rawfx_frame::{FrameError, PlanarFrame};

use crate::filter::kernels::sobel_kernels_3x3;

/// Largest `|gx| + |gy|` a 3x3 Sobel kernel can produce on 8-bit input.
pub const SOBEL_MAX_ABS: u32 = 2040;

/// Largest `sqrt(gx^2 + gy^2)` a 3x3 Sobel kernel can produce on 8-bit input,
/// rounded up.
pub const SOBEL_MAX_SQRT: u32 = 1443;

/// Neutral chroma value written to both chroma planes.
pub const NEUTRAL_CHROMA: u8 = 127;

/// Configuration of the Sobel gradient magnitude operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SobelConfig {
    /// Replicate edge samples so the border ring gets a gradient too.
    /// When off, the outermost ring of the output luma is zero.
    pub mirror_border: bool,
    /// Use `|gx| + |gy|` instead of `sqrt(gx^2 + gy^2)`.
    pub use_absolute_magnitude: bool,
    /// Clamp the magnitude to `[0, 255]` instead of rescaling it.
    pub clamp_output: bool,
}

impl Default for SobelConfig {
    fn default() -> Self {
        Self {
            mirror_border: true,
            use_absolute_magnitude: false,
            clamp_output: false,
        }
    }
}

impl SobelConfig {
    /// Create a configuration with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the border policy.
    pub fn with_mirror_border(mut self, mirror_border: bool) -> Self {
        self.mirror_border = mirror_border;
        self
    }

    /// Set the magnitude policy.
    pub fn with_absolute_magnitude(mut self, use_absolute_magnitude: bool) -> Self {
        self.use_absolute_magnitude = use_absolute_magnitude;
        self
    }

    /// Set the output range policy.
    pub fn with_clamp_output(mut self, clamp_output: bool) -> Self {
        self.clamp_output = clamp_output;
        self
    }
}

fn gradient_magnitude(gx: i32, gy: i32, config: &SobelConfig) -> u8 {
    let (magnitude, max) = if config.use_absolute_magnitude {
        (gx.unsigned_abs() + gy.unsigned_abs(), SOBEL_MAX_ABS)
    } else {
        let (gx, gy) = (gx as f32, gy as f32);
        ((gx * gx + gy * gy).sqrt().round() as u32, SOBEL_MAX_SQRT)
    };

    if config.clamp_output {
        magnitude.min(255) as u8
    } else {
        (magnitude * 255 / max).min(255) as u8
    }
}

/// Compute the Sobel gradient magnitude of the luma plane of an I420 frame.
///
/// The output luma plane holds the gradient magnitude and both chroma planes
/// are set to [`NEUTRAL_CHROMA`], so the result is a grayscale image in the
/// source format.
///
/// # Arguments
///
/// * `src` - The input I420 frame.
/// * `dst` - The output I420 frame of the same size.
/// * `config` - Border, magnitude and range policy.
///
/// # Example
///
/// ```
/// use rawfx_frame::PlanarFrame;
/// use rawfx_imgproc::edge::{sobel_magnitude, SobelConfig};
///
/// let src = PlanarFrame::from_size_val([5, 5].into(), 128, 60).unwrap();
/// let mut dst = PlanarFrame::from_size_val(src.size(), 0, 0).unwrap();
///
/// let config = SobelConfig::new().with_clamp_output(true);
/// sobel_magnitude(&src, &mut dst, &config).unwrap();
///
/// assert!(dst.luma().iter().all(|&v| v == 0));
/// assert!(dst.chroma_u().iter().all(|&v| v == 127));
/// ```
pub fn sobel_magnitude(
    src: &PlanarFrame,
    dst: &mut PlanarFrame,
    config: &SobelConfig,
) -> Result<(), FrameError> {
    src.size().check_eq(dst.size())?;

    log::debug!("sobel_magnitude: {} {:?}", src.size(), config);

    let (width, height) = (src.width(), src.height());
    let (kernel_x, kernel_y) = sobel_kernels_3x3();
    let src_luma = src.luma();
    let (dst_luma, dst_u, dst_v) = dst.planes_mut();

    dst_u.fill(NEUTRAL_CHROMA);
    dst_v.fill(NEUTRAL_CHROMA);

    if !config.mirror_border {
        dst_luma.fill(0);
        // the border ring is already zero, and there is no interior
        if width < 3 || height < 3 {
            return Ok(());
        }
    }

    let skip = usize::from(!config.mirror_border);
    let (last_x, last_y) = (width as isize - 1, height as isize - 1);

    for y in skip..height - skip {
        for x in skip..width - skip {
            let mut gx = 0i32;
            let mut gy = 0i32;
            for (ki, dy) in (-1isize..=1).enumerate() {
                let v = (y as isize + dy).clamp(0, last_y) as usize;
                for (kj, dx) in (-1isize..=1).enumerate() {
                    let u = (x as isize + dx).clamp(0, last_x) as usize;
                    let sample = src_luma[v * width + u] as i32;
                    gx += kernel_x[ki][kj] * sample;
                    gy += kernel_y[ki][kj] * sample;
                }
            }
            dst_luma[y * width + x] = gradient_magnitude(gx, gy, config);
        }
    }

    Ok(())
}
