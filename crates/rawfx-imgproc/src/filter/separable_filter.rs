use rawfx_frame::{allocator, Frame, FrameError};

/// A separable 2D filter that applies horizontal and vertical 1D convolutions sequentially.
///
/// This struct caches the kernel data and precomputed offsets. Samples falling
/// outside the frame are replaced by the nearest edge sample (border replication).
pub(crate) struct SeparableFilter {
    kernel_x: Vec<f32>,
    kernel_y: Vec<f32>,
    offsets_x: Vec<isize>,
    offsets_y: Vec<isize>,
}

impl SeparableFilter {
    /// Create a new separable filter with the given kernels.
    ///
    /// # Arguments
    ///
    /// * `kernel_x` - The horizontal convolution kernel
    /// * `kernel_y` - The vertical convolution kernel
    pub(crate) fn new(kernel_x: &[f32], kernel_y: &[f32]) -> Self {
        let half_x = kernel_x.len() / 2;
        let half_y = kernel_y.len() / 2;

        let offsets_x = (0..kernel_x.len())
            .map(|i| i as isize - half_x as isize)
            .collect();

        let offsets_y = (0..kernel_y.len())
            .map(|i| i as isize - half_y as isize)
            .collect();

        Self {
            kernel_x: kernel_x.to_vec(),
            kernel_y: kernel_y.to_vec(),
            offsets_x,
            offsets_y,
        }
    }

    /// Filter a frame into an unrounded `f32` buffer of the same layout.
    ///
    /// Performs horizontal filtering followed by vertical filtering using a temporary buffer.
    pub(crate) fn apply_f32<const C: usize>(&self, src: &Frame<C>) -> Result<Vec<f32>, FrameError> {
        let rows = src.rows();
        let cols = src.cols();
        let src_data = src.as_slice();

        let mut temp = allocator::try_alloc(src_data.len(), 0.0f32)?;
        let mut out = allocator::try_alloc(src_data.len(), 0.0f32)?;

        if rows == 0 || cols == 0 {
            return Ok(out);
        }

        // Horizontal
        for r in 0..rows {
            let row_offset = r * cols * C;
            for c in 0..cols {
                let mut acc = [0.0f32; C];
                for (&k, &off) in self.kernel_x.iter().zip(self.offsets_x.iter()) {
                    let x = (c as isize + off).clamp(0, cols as isize - 1) as usize;
                    let idx = row_offset + x * C;
                    for (ch, acc_val) in acc.iter_mut().enumerate() {
                        *acc_val += src_data[idx + ch] as f32 * k;
                    }
                }

                let out_idx = row_offset + c * C;
                temp[out_idx..out_idx + C].copy_from_slice(&acc);
            }
        }

        // Vertical
        for r in 0..rows {
            let row_offset = r * cols * C;
            for c in 0..cols {
                let mut acc = [0.0f32; C];
                for (&k, &off) in self.kernel_y.iter().zip(self.offsets_y.iter()) {
                    let y = (r as isize + off).clamp(0, rows as isize - 1) as usize;
                    let idx = y * cols * C + c * C;
                    for (ch, acc_val) in acc.iter_mut().enumerate() {
                        *acc_val += temp[idx + ch] * k;
                    }
                }

                let out_idx = row_offset + c * C;
                out[out_idx..out_idx + C].copy_from_slice(&acc);
            }
        }

        Ok(out)
    }
}

/// Apply a separable filter to a frame.
///
/// Borders are handled by replicating the edge pixels; results are rounded and
/// clamped to `[0, 255]`.
///
/// # Arguments
///
/// * `src` - The source frame with shape (H, W, C).
/// * `dst` - The destination frame with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel.
/// * `kernel_y` - The vertical kernel.
pub fn separable_filter<const C: usize>(
    src: &Frame<C>,
    dst: &mut Frame<C>,
    kernel_x: &[f32],
    kernel_y: &[f32],
) -> Result<(), FrameError> {
    if kernel_x.is_empty() || kernel_y.is_empty() {
        return Err(FrameError::InvalidConfig(format!(
            "kernel lengths must be non-zero, got ({}, {})",
            kernel_x.len(),
            kernel_y.len()
        )));
    }

    src.size().check_eq(dst.size())?;

    let filtered = SeparableFilter::new(kernel_x, kernel_y).apply_f32(src)?;

    dst.as_slice_mut()
        .iter_mut()
        .zip(filtered.iter())
        .for_each(|(out, &val)| *out = val.round().clamp(0.0, 255.0) as u8);

    Ok(())
}
