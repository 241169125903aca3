use rawfx_frame::{allocator, Frame, FrameError};

use crate::{
    color::{hsv_to_rgb, rgb_to_hsv},
    pixelwise,
};

/// Observed `[lo, hi]` range of one channel over a frame.
///
/// Created fresh for every frame, updated during a single scan and thrown away
/// afterwards.
///
/// NOTE: both bounds start at 0, so `lo` can never move: the lower end of the
/// stretch never activates and the mapping reduces to `value * 255 / hi`. This
/// reproduces the established output of the filter; see `DESIGN.md`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelRange {
    /// Smallest value seen.
    pub lo: u8,
    /// Largest value seen.
    pub hi: u8,
}

impl ChannelRange {
    /// A zero-initialized range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Widen the range to include `value`.
    pub fn update(&mut self, value: u8) {
        if value > self.hi {
            self.hi = value;
        }
        if value < self.lo {
            self.lo = value;
        }
    }

    /// Map `value` linearly from `[lo, hi]` onto `[0, 255]`.
    ///
    /// A degenerate range leaves the value untouched.
    pub fn stretch(&self, value: u8) -> u8 {
        if self.hi == self.lo {
            return value;
        }
        let v = (value as i32 - self.lo as i32) * 255 / (self.hi as i32 - self.lo as i32);
        v.clamp(0, 255) as u8
    }
}

/// Per-frame accumulator of the saturation and value ranges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnhanceState {
    /// Saturation range.
    pub s: ChannelRange,
    /// Value range.
    pub v: ChannelRange,
}

/// Stretch the saturation and value histograms of an RGB frame, preserving hue.
///
/// The frame is converted to HSV, the S and V ranges are measured over the
/// whole frame, each pixel's S and V are stretched to the full range and the
/// result is converted back to RGB.
///
/// # Arguments
///
/// * `src` - The input RGB24 frame.
/// * `dst` - The output RGB24 frame.
///
/// # Errors
///
/// Returns an error if the frames differ in size or the scratch buffer cannot
/// be allocated.
///
/// # Example
///
/// ```
/// use rawfx_frame::Frame;
/// use rawfx_imgproc::enhance::autostretch_hsv;
///
/// let src = Frame::<3>::new([2, 1].into(), vec![50, 50, 50, 100, 100, 100]).unwrap();
/// let mut dst = Frame::<3>::from_size_val(src.size(), 0).unwrap();
///
/// autostretch_hsv(&src, &mut dst).unwrap();
/// assert_eq!(dst.as_slice(), &[127, 127, 127, 255, 255, 255]);
/// ```
pub fn autostretch_hsv(src: &Frame<3>, dst: &mut Frame<3>) -> Result<(), FrameError> {
    src.size().check_eq(dst.size())?;

    log::debug!("autostretch_hsv: {}", src.size());

    let mut hsv = Frame::<3>::from_size_val(src.size(), 0)?;
    pixelwise::iter_pixels(src, &mut hsv, |src_pixel, hsv_pixel| {
        hsv_pixel.copy_from_slice(&rgb_to_hsv(src_pixel[0], src_pixel[1], src_pixel[2]));
    });

    let mut state = EnhanceState::default();
    for pixel in hsv.as_slice().chunks_exact(3) {
        state.s.update(pixel[1]);
        state.v.update(pixel[2]);
    }

    log::trace!("autostretch_hsv: s {:?} v {:?}", state.s, state.v);

    pixelwise::iter_pixels(&hsv, dst, |hsv_pixel, dst_pixel| {
        let s = state.s.stretch(hsv_pixel[1]);
        let v = state.v.stretch(hsv_pixel[2]);
        dst_pixel.copy_from_slice(&hsv_to_rgb(hsv_pixel[0], s, v));
    });

    Ok(())
}

// RGB -> (h, s, v, k): invert to CMY, pull the common black out and take the
// HSV of the remaining chromatic part.
fn hsvk_from_rgb(rgb: &[u8]) -> [u8; 4] {
    let c = 255 - rgb[0];
    let m = 255 - rgb[1];
    let y = 255 - rgb[2];
    let k = c.min(m).min(y);

    let [h, s, v] = rgb_to_hsv(c - k, m - k, y - k);
    [h, s, v, k]
}

fn rgb_from_hsvk(hsvk: &[u8; 4]) -> [u8; 3] {
    let k = hsvk[3];
    let [c, m, y] = hsv_to_rgb(hsvk[0], hsvk[1], hsvk[2]);
    [
        255 - c.saturating_add(k),
        255 - m.saturating_add(k),
        255 - y.saturating_add(k),
    ]
}

/// Enhance the colors of an RGB frame by stretching only the value channel.
///
/// Each pixel is split into a black component `k` and a chromatic CMY part,
/// the value range of the chromatic part is measured over the whole frame and
/// stretched to the full range, then the black component is added back.
/// Neutral (gray) pixels pass through unchanged.
///
/// # Arguments
///
/// * `src` - The input RGB24 frame.
/// * `dst` - The output RGB24 frame.
///
/// # Errors
///
/// Returns an error if the frames differ in size or the scratch buffer cannot
/// be allocated.
pub fn color_enhance(src: &Frame<3>, dst: &mut Frame<3>) -> Result<(), FrameError> {
    src.size().check_eq(dst.size())?;

    log::debug!("color_enhance: {}", src.size());

    let mut hsvk: Vec<[u8; 4]> = allocator::try_alloc(src.size().area(), [0u8; 4])?;
    let mut v_range = ChannelRange::new();
    for (pixel, out) in src.as_slice().chunks_exact(3).zip(hsvk.iter_mut()) {
        *out = hsvk_from_rgb(pixel);
        v_range.update(out[2]);
    }

    log::trace!("color_enhance: v {:?}", v_range);

    for (pixel, out) in hsvk.iter_mut().zip(dst.as_slice_mut().chunks_exact_mut(3)) {
        pixel[2] = v_range.stretch(pixel[2]);
        out.copy_from_slice(&rgb_from_hsvk(pixel));
    }

    Ok(())
}
