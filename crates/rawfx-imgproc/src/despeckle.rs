use std::ops::RangeInclusive;

use rawfx_frame::{allocator, Frame, FrameError};

/// Largest despeckle radius accepted by [`DespeckleConfig::validate`].
pub const MAX_DESPECKLE_RADIUS: usize = 255;

const LUMINANCE_RED: f32 = 0.2126;
const LUMINANCE_GREEN: f32 = 0.7152;
const LUMINANCE_BLUE: f32 = 0.0722;

/// Configuration of the adaptive median (despeckle) filter.
///
/// # Example
///
/// ```
/// use rawfx_imgproc::despeckle::DespeckleConfig;
///
/// let config = DespeckleConfig::new().with_radius(3).with_adaptive(true);
/// assert_eq!(config.radius, 3);
/// assert_eq!(config.black_level, 7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DespeckleConfig {
    /// Half size of the median window; 0 turns the filter into a copy.
    pub radius: usize,
    /// Grow or shrink the window per pixel from the count of saturated samples.
    pub adaptive: bool,
    /// Write each result back into the source so later pixels see it.
    pub recursive: bool,
    /// Samples with luminance at or below this level are excluded as dark.
    pub black_level: u8,
    /// Samples with luminance at or above this level are excluded as bright.
    pub white_level: u8,
}

impl Default for DespeckleConfig {
    fn default() -> Self {
        Self {
            radius: 1,
            adaptive: false,
            recursive: false,
            black_level: 7,
            white_level: 248,
        }
    }
}

impl DespeckleConfig {
    /// Create a configuration with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial window radius.
    pub fn with_radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    /// Enable or disable the adaptive radius.
    pub fn with_adaptive(mut self, adaptive: bool) -> Self {
        self.adaptive = adaptive;
        self
    }

    /// Enable or disable recursive filtering.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set the dark and bright exclusion levels.
    pub fn with_levels(mut self, black_level: u8, white_level: u8) -> Self {
        self.black_level = black_level;
        self.white_level = white_level;
        self
    }

    /// Check the parameters are in range.
    pub fn validate(&self) -> Result<(), FrameError> {
        if self.radius > MAX_DESPECKLE_RADIUS {
            return Err(FrameError::InvalidConfig(format!(
                "despeckle radius must be in [0, {MAX_DESPECKLE_RADIUS}], got {}",
                self.radius
            )));
        }
        Ok(())
    }
}

/// Luminance of a packed pixel used to rank window samples.
///
/// One and two byte pixels use their first byte; three and four byte pixels
/// use the Rec. 709 weights of their first three bytes.
pub fn pixel_luminance(pixel: &[u8]) -> u8 {
    match pixel.len() {
        1 | 2 => pixel[0],
        _ => (pixel[0] as f32 * LUMINANCE_RED
            + pixel[1] as f32 * LUMINANCE_GREEN
            + pixel[2] as f32 * LUMINANCE_BLUE)
            .round()
            .clamp(0.0, 255.0) as u8,
    }
}

// Gather the window samples into `candidates` as `(luminance, offset)` pairs and
// return the `(dark, bright)` counts. A sample can count as both when the
// levels overlap; it is then never a candidate.
fn collect_window<const C: usize>(
    data: &[u8],
    width: usize,
    (xs, ys): (RangeInclusive<usize>, RangeInclusive<usize>),
    config: &DespeckleConfig,
    candidates: &mut Vec<(u8, usize)>,
) -> (usize, usize) {
    let mut dark = 0usize;
    let mut bright = 0usize;
    candidates.clear();

    for v in ys {
        for u in xs.clone() {
            let offset = (v * width + u) * C;
            let luminance = pixel_luminance(&data[offset..offset + C]);
            let is_dark = luminance <= config.black_level;
            let is_bright = luminance >= config.white_level;
            if is_dark {
                dark += 1;
            }
            if is_bright {
                bright += 1;
            }
            if !is_dark && !is_bright {
                candidates.push((luminance, offset));
            }
        }
    }

    (dark, bright)
}

fn check_channels<const C: usize>() -> Result<(), FrameError> {
    if !(1..=4).contains(&C) {
        return Err(FrameError::UnsupportedFormat(format!(
            "despeckle supports 1 to 4 bytes per pixel, got {C}"
        )));
    }
    Ok(())
}

/// Remove speckle noise with an adaptive, optionally recursive, median filter.
///
/// The frame is scanned once in raster order. For every pixel the window
/// `[y - r, y + r] x [x - r, x + r]`, clipped to the frame, is collected; samples
/// whose luminance is at or below `black_level` or at or above `white_level` are
/// only counted (as both when the levels overlap), the others become
/// candidates. With at least two candidates the pixel is replaced by the
/// candidate of median luminance, otherwise it is copied unchanged.
///
/// The effective radius `r` starts at `config.radius` and is carried from pixel
/// to pixel across rows. In adaptive mode it grows by one (up to
/// `config.radius`) when the dark or bright count of the window reaches it and
/// shrinks by one (down to 1) otherwise. In recursive mode each result is also
/// written into a working copy of the source, so that pixels later in the scan
/// read already filtered values: the output depends on the raster order.
/// The caller's `src` is never modified.
///
/// # Arguments
///
/// * `src` - The input frame, grayscale or RGB(A).
/// * `dst` - The output frame.
/// * `config` - The filter parameters.
///
/// # Errors
///
/// Returns an error for an invalid configuration, mismatched frame sizes, an
/// unsupported pixel size or a failed scratch allocation.
///
/// # Example
///
/// ```
/// use rawfx_frame::Frame;
/// use rawfx_imgproc::despeckle::{despeckle, DespeckleConfig};
///
/// let src = Frame::<1>::new([3, 3].into(), vec![
///     100, 100, 100,
///     100, 200, 100,
///     100, 100, 100,
/// ]).unwrap();
/// let mut dst = Frame::<1>::from_size_val(src.size(), 0).unwrap();
///
/// despeckle(&src, &mut dst, &DespeckleConfig::default()).unwrap();
/// assert_eq!(dst.as_slice()[4], 100);
/// ```
pub fn despeckle<const C: usize>(
    src: &Frame<C>,
    dst: &mut Frame<C>,
    config: &DespeckleConfig,
) -> Result<(), FrameError> {
    config.validate()?;
    check_channels::<C>()?;
    src.size().check_eq(dst.size())?;

    log::debug!("despeckle: {} {:?}", src.size(), config);

    let (width, height) = (src.width(), src.height());
    let window = 2 * config.radius + 1;
    let max_radius = window / 2;

    // the working copy only diverges from src in recursive mode
    let mut recursive_src = if config.recursive {
        Some(allocator::try_copy(src.as_slice())?)
    } else {
        None
    };

    let mut candidates: Vec<(u8, usize)> = Vec::new();
    candidates
        .try_reserve_exact(window * window)
        .map_err(|_| FrameError::AllocationFailed(window * window))?;

    let mut radius = config.radius;

    for y in 0..height {
        for x in 0..width {
            let data: &[u8] = match recursive_src.as_deref() {
                Some(work) => work,
                None => src.as_slice(),
            };

            let ymin = y.saturating_sub(radius);
            let ymax = (y + radius).min(height - 1);
            let xmin = x.saturating_sub(radius);
            let xmax = (x + radius).min(width - 1);

            let (dark, bright) = collect_window::<C>(
                data,
                width,
                (xmin..=xmax, ymin..=ymax),
                config,
                &mut candidates,
            );

            let pos = (y * width + x) * C;
            let mut pixel = [0u8; C];
            if candidates.len() < 2 {
                pixel.copy_from_slice(&data[pos..pos + C]);
            } else {
                let median = (candidates.len() - 1) / 2;
                let (_, &mut (_, offset), _) =
                    candidates.select_nth_unstable_by_key(median, |&(luminance, _)| luminance);
                pixel.copy_from_slice(&data[offset..offset + C]);

                if let Some(work) = recursive_src.as_mut() {
                    work[pos..pos + C].copy_from_slice(&pixel);
                }
            }
            dst.as_slice_mut()[pos..pos + C].copy_from_slice(&pixel);

            if config.adaptive {
                if dark >= radius || bright >= radius {
                    if radius < max_radius {
                        radius += 1;
                    }
                } else if radius > 1 {
                    radius -= 1;
                }
            }
        }
    }

    log::trace!("despeckle: effective radius at end of frame {radius}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{collect_window, despeckle, pixel_luminance, DespeckleConfig};
    use rawfx_frame::{Frame, FrameError, FrameSize};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn config_defaults() {
        let config = DespeckleConfig::default();
        assert_eq!(config.radius, 1);
        assert!(!config.adaptive);
        assert!(!config.recursive);
        assert_eq!((config.black_level, config.white_level), (7, 248));
    }

    #[test]
    fn config_radius_out_of_range() -> Result<(), FrameError> {
        let src = Frame::<1>::from_size_val([2, 2].into(), 1)?;
        let mut dst = Frame::<1>::from_size_val(src.size(), 5)?;
        let config = DespeckleConfig::new().with_radius(256);

        assert!(matches!(
            despeckle(&src, &mut dst, &config),
            Err(FrameError::InvalidConfig(_))
        ));
        assert!(dst.as_slice().iter().all(|&b| b == 5));

        Ok(())
    }

    #[test]
    fn luminance_weights() {
        assert_eq!(pixel_luminance(&[77]), 77);
        assert_eq!(pixel_luminance(&[77, 3]), 77);
        assert_eq!(pixel_luminance(&[255, 255, 255]), 255);
        assert_eq!(pixel_luminance(&[0, 100, 0, 9]), 72);
        assert_eq!(pixel_luminance(&[100, 0, 0]), 21);
    }

    #[test]
    fn uniform_gray_unchanged() -> Result<(), FrameError> {
        init_logger();
        let src = Frame::<1>::from_size_val([3, 3].into(), 100)?;
        let mut dst = Frame::<1>::from_size_val(src.size(), 0)?;

        despeckle(&src, &mut dst, &DespeckleConfig::default())?;

        assert_eq!(dst.as_slice(), &[100u8; 9]);

        Ok(())
    }

    #[test]
    fn removes_single_speckle() -> Result<(), FrameError> {
        let size = FrameSize {
            width: 3,
            height: 3,
        };
        #[rustfmt::skip]
        let src = Frame::<3>::new(size, vec![
            90, 90, 90,  90, 90, 90,  90, 90, 90,
            90, 90, 90,  10, 200, 10,  90, 90, 90,
            90, 90, 90,  90, 90, 90,  90, 90, 90,
        ])?;
        let mut dst = Frame::<3>::from_size_val(size, 0)?;

        despeckle(&src, &mut dst, &DespeckleConfig::default())?;

        assert_eq!(dst.as_slice(), &[90u8; 27]);

        Ok(())
    }

    #[test]
    fn saturated_samples_are_skipped() -> Result<(), FrameError> {
        let size = FrameSize {
            width: 3,
            height: 1,
        };
        // the window of the middle pixel holds 0, 50 and 255: only 50 is a
        // candidate, so every pixel is copied unchanged
        let src = Frame::<1>::new(size, vec![0, 50, 255])?;
        let mut dst = Frame::<1>::from_size_val(size, 0)?;

        despeckle(&src, &mut dst, &DespeckleConfig::default())?;

        assert_eq!(dst, src);

        Ok(())
    }

    #[test]
    fn lower_median_of_even_window() -> Result<(), FrameError> {
        let size = FrameSize {
            width: 2,
            height: 2,
        };
        let src = Frame::<1>::new(size, vec![10, 20, 30, 40])?;
        let mut dst = Frame::<1>::from_size_val(size, 0)?;

        despeckle(&src, &mut dst, &DespeckleConfig::default())?;

        // every window covers all four samples, the lower median is 20
        assert_eq!(dst.as_slice(), &[20, 20, 20, 20]);

        Ok(())
    }

    #[test]
    fn recursive_feeds_back() -> Result<(), FrameError> {
        let size = FrameSize {
            width: 3,
            height: 1,
        };
        let src = Frame::<1>::new(size, vec![50, 10, 30])?;
        let mut plain = Frame::<1>::from_size_val(size, 0)?;
        let mut recursive = Frame::<1>::from_size_val(size, 0)?;

        despeckle(&src, &mut plain, &DespeckleConfig::default())?;
        despeckle(
            &src,
            &mut recursive,
            &DespeckleConfig::default().with_recursive(true),
        )?;

        // plain: [med(50,10), med(50,10,30), med(10,30)] = [10, 30, 10]
        assert_eq!(plain.as_slice(), &[10, 30, 10]);
        // recursive: the first result rewrites the source to [10, 10, 30]
        // and the second to [10, 10, 30], so the last window is (10, 30)
        assert_eq!(recursive.as_slice(), &[10, 10, 10]);
        // the caller's frame is untouched
        assert_eq!(src.as_slice(), &[50, 10, 30]);

        Ok(())
    }

    fn run_row(row: &[u8], config: &DespeckleConfig) -> Result<Vec<u8>, FrameError> {
        let size = FrameSize {
            width: row.len(),
            height: 1,
        };
        let src = Frame::<1>::new(size, row.to_vec())?;
        let mut dst = Frame::<1>::from_size_val(size, 0)?;
        despeckle(&src, &mut dst, config)?;
        Ok(dst.into_vec())
    }

    #[test]
    fn adaptive_radius_shrinks() -> Result<(), FrameError> {
        let row = [100, 110, 120, 130, 140];
        let plain = DespeckleConfig::new().with_radius(2);

        // the first window has no saturated sample, so the radius drops to 1
        // and the last two pixels only see their direct neighbours
        assert_eq!(run_row(&row, &plain.with_adaptive(true))?, [110, 110, 120, 130, 130]);
        assert_eq!(run_row(&row, &plain)?, [110, 110, 120, 120, 130]);

        Ok(())
    }

    #[test]
    fn adaptive_radius_grows_on_saturated_samples() -> Result<(), FrameError> {
        let row = [100, 110, 120, 130, 0, 0, 140];
        let plain = DespeckleConfig::new().with_radius(2);

        // radius 2 -> 1 at x = 0, back to 2 once a dark sample enters the
        // window at x = 3; at x = 4 a radius 1 window would hold a single
        // candidate and copy the dark pixel
        assert_eq!(
            run_row(&row, &plain.with_adaptive(true))?,
            [110, 110, 120, 120, 130, 130, 140]
        );
        assert_eq!(run_row(&row, &plain)?, [110, 110, 110, 120, 130, 130, 140]);

        Ok(())
    }

    #[test]
    fn adaptive_radius_carries_across_rows() -> Result<(), FrameError> {
        let size = FrameSize {
            width: 5,
            height: 2,
        };
        #[rustfmt::skip]
        let src = Frame::<1>::new(size, vec![
            100, 110, 120, 130, 140,
            100, 110, 120, 130, 140,
        ])?;
        let mut dst = Frame::<1>::from_size_val(size, 0)?;

        let config = DespeckleConfig::new().with_radius(2).with_adaptive(true);
        despeckle(&src, &mut dst, &config)?;

        // the second row starts with radius 1; a reset to 2 would give 110
        #[rustfmt::skip]
        let expected = [
            110, 110, 120, 130, 130,
            100, 110, 120, 130, 130,
        ];
        assert_eq!(dst.as_slice(), &expected);

        Ok(())
    }

    #[test]
    fn adaptive_recursive_non_uniform() -> Result<(), FrameError> {
        let row = [100, 110, 120, 130, 0, 0, 140];
        let config = DespeckleConfig::new()
            .with_radius(2)
            .with_adaptive(true)
            .with_recursive(true);

        // the dark pixels are overwritten with 120 as the scan passes them,
        // so the later windows only hold 120 and 140
        assert_eq!(run_row(&row, &config)?, [110, 110, 120, 120, 120, 120, 120]);

        Ok(())
    }

    #[test]
    fn overlapping_levels_count_both() {
        let config = DespeckleConfig::new().with_levels(200, 100);
        let data = [50u8, 150, 240];
        let mut candidates = Vec::new();

        let (dark, bright) =
            collect_window::<1>(&data, 3, (0..=2, 0..=0), &config, &mut candidates);

        // 150 is both dark and bright, 50 is only dark, 240 only bright
        assert_eq!((dark, bright), (2, 2));
        assert!(candidates.is_empty());

        let (dark, bright) = collect_window::<1>(
            &data,
            3,
            (0..=2, 0..=0),
            &DespeckleConfig::default(),
            &mut candidates,
        );
        assert_eq!((dark, bright), (0, 0));
        assert_eq!(candidates, vec![(50, 0), (150, 1), (240, 2)]);
    }

    #[test]
    fn unsupported_pixel_size() -> Result<(), FrameError> {
        let src = Frame::<5>::from_size_val([1, 1].into(), 0)?;
        let mut dst = src.clone();
        assert!(matches!(
            despeckle(&src, &mut dst, &DespeckleConfig::default()),
            Err(FrameError::UnsupportedFormat(_))
        ));
        Ok(())
    }
}
