use rawfx_frame::{Frame, FrameError, Mask};

use crate::{
    arith::blend,
    filter::{kernels, SeparableFilter},
};

/// Largest `|sigma|` accepted by [`UnsharpConfig::validate`].
pub const MAX_UNSHARP_SIGMA: f32 = 20.0;

/// Configuration of the unsharp mask.
///
/// A positive sigma sharpens, a negative sigma blurs with a gaussian of
/// standard deviation `|sigma|` and zero leaves the frame unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnsharpConfig {
    /// Signed gaussian standard deviation in pixels.
    pub sigma: f32,
}

impl Default for UnsharpConfig {
    fn default() -> Self {
        Self { sigma: 6.0 }
    }
}

impl UnsharpConfig {
    /// Create a configuration with the default sigma.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the signed sigma.
    pub fn with_sigma(mut self, sigma: f32) -> Self {
        self.sigma = sigma;
        self
    }

    /// Check the sigma is finite and in `[-20, 20]`.
    pub fn validate(&self) -> Result<(), FrameError> {
        if !self.sigma.is_finite() || self.sigma.abs() > MAX_UNSHARP_SIGMA {
            return Err(FrameError::InvalidConfig(format!(
                "unsharp sigma must be in [-{MAX_UNSHARP_SIGMA}, {MAX_UNSHARP_SIGMA}], got {}",
                self.sigma
            )));
        }
        Ok(())
    }
}

/// Sharpen or blur a packed frame with a gaussian unsharp mask.
///
/// The frame is blurred with a normalized separable gaussian of size
/// `2 * ceil(3 * |sigma|) + 1` and replicated borders. For a positive sigma the
/// output is `2 * src - blur`, for a negative sigma it is the blur itself; both
/// are rounded and clamped to `[0, 255]`. A zero sigma copies `src`.
///
/// # Arguments
///
/// * `src` - The input frame.
/// * `dst` - The output frame.
/// * `config` - The signed sigma.
///
/// # Example
///
/// ```
/// use rawfx_frame::Frame;
/// use rawfx_imgproc::sharpen::{unsharp_mask, UnsharpConfig};
///
/// let src = Frame::<1>::from_size_val([4, 4].into(), 90).unwrap();
/// let mut dst = Frame::<1>::from_size_val(src.size(), 0).unwrap();
///
/// unsharp_mask(&src, &mut dst, &UnsharpConfig::new().with_sigma(1.0)).unwrap();
/// assert_eq!(dst, src);
/// ```
pub fn unsharp_mask<const C: usize>(
    src: &Frame<C>,
    dst: &mut Frame<C>,
    config: &UnsharpConfig,
) -> Result<(), FrameError> {
    config.validate()?;
    src.size().check_eq(dst.size())?;

    log::debug!("unsharp_mask: {} {:?}", src.size(), config);

    if config.sigma == 0.0 {
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    let kernel_size = kernels::gaussian_kernel_size(config.sigma);
    let kernel = kernels::gaussian_kernel_1d(kernel_size, config.sigma.abs());
    let blurred = SeparableFilter::new(&kernel, &kernel).apply_f32(src)?;

    let sharpen = config.sigma > 0.0;
    dst.as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter().zip(blurred.iter()))
        .for_each(|(out, (&orig, &blur))| {
            let val = if sharpen {
                2.0 * orig as f32 - blur
            } else {
                blur
            };
            *out = val.round().clamp(0.0, 255.0) as u8;
        });

    Ok(())
}

/// Sharpen a packed frame only where a mask allows it.
///
/// The unsharp result is blended with the original through `mask`: a mask
/// value of 255 keeps the sharpened pixel, 0 keeps the original pixel. An edge
/// magnitude image from [`crate::edge::sobel_magnitude`] makes a typical mask.
///
/// # Arguments
///
/// * `src` - The input frame, typically AYUV32.
/// * `mask` - The per pixel weight of the sharpened frame.
/// * `dst` - The output frame.
/// * `config` - The signed sigma.
pub fn masked_unsharp<const C: usize>(
    src: &Frame<C>,
    mask: &Mask,
    dst: &mut Frame<C>,
    config: &UnsharpConfig,
) -> Result<(), FrameError> {
    config.validate()?;
    src.size().check_eq(mask.size())?;
    src.size().check_eq(dst.size())?;

    let mut sharpened = Frame::<C>::from_size_val(src.size(), 0)?;
    unsharp_mask(src, &mut sharpened, config)?;

    blend(&sharpened, src, mask, dst)
}
