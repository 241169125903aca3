use rawfx_frame::{Frame, FrameError};

use crate::pixelwise;

/// Convert one RGB pixel to HSV in the 8-bit integer domain.
///
/// All three output channels are in `[0, 255]`; hue 255 corresponds to 360
/// degrees. Hue is 0 whenever the saturation is 0.
///
/// # Example
///
/// ```
/// use rawfx_imgproc::color::rgb_to_hsv;
///
/// assert_eq!(rgb_to_hsv(255, 0, 0), [0, 255, 255]);
/// assert_eq!(rgb_to_hsv(0, 255, 0), [85, 255, 255]);
/// ```
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let max = r.max(g).max(b) as i32;
    let min = r.min(g).min(b) as i32;
    let (r, g, b) = (r as i32, g as i32, b as i32);

    let v = max;
    let s = if max == 0 { 0 } else { (max - min) * 255 / max };

    let h = if s == 0 {
        0
    } else {
        let delta = match max - min {
            0 => 255,
            d => d,
        };

        // sectors: red at 0, green at 510, blue at 1020 (i.e. 0, 120, 240 degrees * 255 / 60)
        let h = if r == max {
            (g - b) * 255 / delta
        } else if g == max {
            510 + (b - r) * 255 / delta
        } else {
            1020 + (r - g) * 255 / delta
        };

        let mut h = h * 60 / 255;
        if h < 0 {
            h += 360;
        } else if h > 360 {
            h -= 360;
        }
        h * 255 / 360
    };

    [h as u8, s as u8, v as u8]
}

/// Convert one HSV pixel back to RGB in the 8-bit integer domain.
///
/// Uses six-sector integer math with a `255 * 59` denominator so that the
/// sector boundaries land exactly on the primary and secondary colors. When the
/// saturation is 0 the output is the gray `(v, v, v)`.
///
/// Hue 255 is 360 degrees and wraps onto the red sector, like hue 0.
///
/// # Example
///
/// ```
/// use rawfx_imgproc::color::hsv_to_rgb;
///
/// assert_eq!(hsv_to_rgb(0, 255, 255), [255, 0, 0]);
/// assert_eq!(hsv_to_rgb(31, 0, 77), [77, 77, 77]);
/// assert_eq!(hsv_to_rgb(255, 255, 255), hsv_to_rgb(0, 255, 255));
/// ```
pub fn hsv_to_rgb(h: u8, s: u8, v: u8) -> [u8; 3] {
    if s == 0 {
        return [v, v, v];
    }

    let h = h as i32 * 360 / 255;
    let s = s as i32;
    let v = v as i32;

    let f = h % 60;
    let p = v * (255 - s) / 255;
    let q = v * (255 * 59 - s * f) / (255 * 59);
    let t = v * (255 * 59 - s * (59 - f)) / (255 * 59);

    // hue 255 maps to 360 degrees, which wraps onto the red sector
    let (r, g, b) = match (h / 60) % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    [r as u8, g as u8, b as u8]
}

/// Convert an RGB frame to an HSV frame.
///
/// The input frame is assumed to have 3 channels in the order R, G, B.
///
/// # Arguments
///
/// * `src` - The input RGB frame.
/// * `dst` - The output HSV frame.
///
/// # Returns
///
/// The HSV frame with the following channels:
///
/// * H: The hue channel in the range [0, 255] (0-360 degrees).
/// * S: The saturation channel in the range [0, 255].
/// * V: The value channel in the range [0, 255].
///
/// Precondition: the input and output frames must have the same size.
pub fn hsv_from_rgb(src: &Frame<3>, dst: &mut Frame<3>) -> Result<(), FrameError> {
    src.size().check_eq(dst.size())?;

    pixelwise::iter_pixels(src, dst, |src_pixel, dst_pixel| {
        dst_pixel.copy_from_slice(&rgb_to_hsv(src_pixel[0], src_pixel[1], src_pixel[2]));
    });

    Ok(())
}

/// Convert an HSV frame back to an RGB frame.
///
/// Precondition: the input and output frames must have the same size.
pub fn rgb_from_hsv(src: &Frame<3>, dst: &mut Frame<3>) -> Result<(), FrameError> {
    src.size().check_eq(dst.size())?;

    pixelwise::iter_pixels(src, dst, |src_pixel, dst_pixel| {
        dst_pixel.copy_from_slice(&hsv_to_rgb(src_pixel[0], src_pixel[1], src_pixel[2]));
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{hsv_to_rgb, rgb_to_hsv};
    use rawfx_frame::{Frame, FrameError, FrameSize};

    #[test]
    fn rgb_to_hsv_primaries() {
        assert_eq!(rgb_to_hsv(255, 0, 0), [0, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 255, 0), [85, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 0, 255), [170, 255, 255]);
        assert_eq!(rgb_to_hsv(255, 255, 0), [42, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 255, 255), [127, 255, 255]);
        assert_eq!(rgb_to_hsv(255, 0, 255), [212, 255, 255]);
    }

    #[test]
    fn rgb_to_hsv_gray() {
        assert_eq!(rgb_to_hsv(0, 0, 0), [0, 0, 0]);
        assert_eq!(rgb_to_hsv(128, 128, 128), [0, 0, 128]);
        assert_eq!(rgb_to_hsv(255, 255, 255), [0, 0, 255]);
    }

    #[test]
    fn hsv_round_trip_exact_hues() {
        // the six sector boundaries survive the 8-bit hue quantization exactly
        let colors = [
            [255, 0, 0],
            [0, 255, 0],
            [0, 0, 255],
            [255, 255, 0],
            [0, 255, 255],
            [255, 0, 255],
        ];
        for [r, g, b] in colors {
            let [h, s, v] = rgb_to_hsv(r, g, b);
            assert_eq!(hsv_to_rgb(h, s, v), [r, g, b]);
        }
    }

    #[test]
    fn hsv_round_trip_gray_axis() {
        for level in 0..=255u8 {
            let [h, s, v] = rgb_to_hsv(level, level, level);
            assert_eq!(s, 0);
            assert_eq!(hsv_to_rgb(h, s, v), [level, level, level]);
        }
    }

    #[test]
    fn hsv_to_rgb_full_hue_wraps() {
        assert_eq!(hsv_to_rgb(255, 255, 255), [255, 0, 0]);
    }

    #[test]
    fn hsv_frame_conversion() -> Result<(), FrameError> {
        let size = FrameSize {
            width: 2,
            height: 1,
        };
        let rgb = Frame::<3>::new(size, vec![255, 0, 0, 10, 10, 10])?;
        let mut hsv = Frame::<3>::from_size_val(size, 0)?;
        let mut back = Frame::<3>::from_size_val(size, 0)?;

        super::hsv_from_rgb(&rgb, &mut hsv)?;
        assert_eq!(hsv.as_slice(), &[0, 255, 255, 0, 0, 10]);

        super::rgb_from_hsv(&hsv, &mut back)?;
        assert_eq!(back, rgb);

        Ok(())
    }
}
