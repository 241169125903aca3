use rawfx_frame::{Frame, FrameError, Mask};

use crate::pixelwise;

fn check_channels<const C: usize>() -> Result<(), FrameError> {
    if C == 0 {
        return Err(FrameError::UnsupportedFormat(
            "packed frames need at least one byte per pixel".to_string(),
        ));
    }
    Ok(())
}

/// Blend two frames using a per pixel ratio mask.
///
/// For pixel `p` and channel `c`:
///
/// dst(p,c) = (ratio(p) * a(p,c) + (255 - ratio(p)) * b(p,c)) / 255
///
/// with truncating integer division. A ratio of 255 reproduces `a`, a ratio of
/// 0 reproduces `b`. The mask has a single byte per pixel whatever `C` is.
///
/// # Arguments
///
/// * `a` - The frame selected by a full weight.
/// * `b` - The frame selected by a zero weight.
/// * `ratio` - The weight of `a` per pixel.
/// * `dst` - The output frame.
///
/// # Errors
///
/// Returns an error if any of the frames differ in size.
///
/// # Example
///
/// ```
/// use rawfx_frame::{Frame, Mask};
/// use rawfx_imgproc::arith::blend;
///
/// let a = Frame::<1>::new([1, 1].into(), vec![200]).unwrap();
/// let b = Frame::<1>::new([1, 1].into(), vec![0]).unwrap();
/// let ratio = Mask::new([1, 1].into(), vec![128]).unwrap();
/// let mut out = Frame::<1>::from_size_val([1, 1].into(), 0).unwrap();
///
/// blend(&a, &b, &ratio, &mut out).unwrap();
/// assert_eq!(out.as_slice(), &[100]);
/// ```
pub fn blend<const C: usize>(
    a: &Frame<C>,
    b: &Frame<C>,
    ratio: &Mask,
    dst: &mut Frame<C>,
) -> Result<(), FrameError> {
    check_channels::<C>()?;
    a.size().check_eq(b.size())?;
    a.size().check_eq(ratio.size())?;
    a.size().check_eq(dst.size())?;

    log::debug!("blend: {} with {} bytes per pixel", a.size(), C);

    pixelwise::iter_pixels_three(a, b, ratio, dst, |a_pixel, b_pixel, weight, dst_pixel| {
        let weight = weight[0] as u32;
        for ((&av, &bv), out) in a_pixel.iter().zip(b_pixel).zip(dst_pixel.iter_mut()) {
            *out = ((weight * av as u32 + (255 - weight) * bv as u32) / 255) as u8;
        }
    });

    Ok(())
}

/// Subtract `b` from `a` byte-wise, clamping at zero.
///
/// Both operands are indexed by `pixel * C + channel`, so every channel of
/// every pixel is subtracted from its own counterpart.
///
/// # Errors
///
/// Returns an error if any of the frames differ in size.
///
/// # Example
///
/// ```
/// use rawfx_frame::Frame;
/// use rawfx_imgproc::arith::subtract;
///
/// let a = Frame::<3>::new([1, 1].into(), vec![10, 200, 50]).unwrap();
/// let b = Frame::<3>::new([1, 1].into(), vec![20, 100, 50]).unwrap();
/// let mut out = Frame::<3>::from_size_val([1, 1].into(), 0).unwrap();
///
/// subtract(&a, &b, &mut out).unwrap();
/// assert_eq!(out.as_slice(), &[0, 100, 0]);
/// ```
pub fn subtract<const C: usize>(
    a: &Frame<C>,
    b: &Frame<C>,
    dst: &mut Frame<C>,
) -> Result<(), FrameError> {
    check_channels::<C>()?;
    a.size().check_eq(b.size())?;
    a.size().check_eq(dst.size())?;

    log::debug!("subtract: {} with {} bytes per pixel", a.size(), C);

    pixelwise::iter_pixels_two(a, b, dst, |a_pixel, b_pixel, dst_pixel| {
        for ((&av, &bv), out) in a_pixel.iter().zip(b_pixel).zip(dst_pixel.iter_mut()) {
            *out = av.saturating_sub(bv);
        }
    });

    Ok(())
}
