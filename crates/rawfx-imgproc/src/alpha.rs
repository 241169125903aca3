use rawfx_frame::{Frame, FrameError, Mask};

use crate::pixelwise;

/// Merge a 3 byte per pixel frame and a mask into a 4 byte per pixel frame.
///
/// The mask byte becomes the leading alpha byte of each output pixel, followed
/// by the three bytes of the base pixel: `RGB24 + GRAY8 -> ARGB` or
/// `v308 + GRAY8 -> AYUV`.
///
/// # Arguments
///
/// * `src` - The base frame with 3 bytes per pixel.
/// * `mask` - The alpha plane.
/// * `dst` - The output frame with 4 bytes per pixel.
///
/// # Errors
///
/// Returns [`FrameError::DimensionMismatch`] if the frames differ in size. No
/// byte of `dst` is written in that case.
///
/// # Example
///
/// ```
/// use rawfx_frame::{Frame, FrameSize, Mask};
/// use rawfx_imgproc::alpha::add_alpha;
///
/// let size = FrameSize { width: 2, height: 1 };
/// let base = Frame::<3>::new(size, vec![10, 20, 30, 40, 50, 60]).unwrap();
/// let mask = Mask::new(size, vec![200, 100]).unwrap();
/// let mut out = Frame::<4>::from_size_val(size, 0).unwrap();
///
/// add_alpha(&base, &mask, &mut out).unwrap();
///
/// assert_eq!(out.as_slice(), &[200, 10, 20, 30, 100, 40, 50, 60]);
/// ```
pub fn add_alpha(src: &Frame<3>, mask: &Mask, dst: &mut Frame<4>) -> Result<(), FrameError> {
    src.size().check_eq(mask.size())?;
    src.size().check_eq(dst.size())?;

    log::debug!("add_alpha: {}", src.size());

    pixelwise::iter_pixels_two(src, mask, dst, |src_pixel, alpha, dst_pixel| {
        dst_pixel[0] = alpha[0];
        dst_pixel[1..].copy_from_slice(src_pixel);
    });

    Ok(())
}
