use rawfx_frame::Frame;

/// Apply a function to each pixel of `src` and the matching pixel of `dst`.
///
/// PRECONDITION: `src` and `dst` must have the same size.
pub fn iter_pixels<const C1: usize, const C2: usize>(
    src: &Frame<C1>,
    dst: &mut Frame<C2>,
    mut f: impl FnMut(&[u8], &mut [u8]),
) {
    src.as_slice()
        .chunks_exact(C1)
        .zip(dst.as_slice_mut().chunks_exact_mut(C2))
        .for_each(|(src_pixel, dst_pixel)| f(src_pixel, dst_pixel));
}

/// Apply a function to each pixel of two sources and the matching pixel of `dst`.
///
/// PRECONDITION: `src1`, `src2` and `dst` must have the same size.
pub fn iter_pixels_two<const C1: usize, const C2: usize, const C3: usize>(
    src1: &Frame<C1>,
    src2: &Frame<C2>,
    dst: &mut Frame<C3>,
    mut f: impl FnMut(&[u8], &[u8], &mut [u8]),
) {
    src1.as_slice()
        .chunks_exact(C1)
        .zip(src2.as_slice().chunks_exact(C2))
        .zip(dst.as_slice_mut().chunks_exact_mut(C3))
        .for_each(|((src1_pixel, src2_pixel), dst_pixel)| {
            f(src1_pixel, src2_pixel, dst_pixel);
        });
}

/// Apply a function to each pixel of three sources and the matching pixel of `dst`.
///
/// PRECONDITION: all frames must have the same size.
pub fn iter_pixels_three<const C1: usize, const C2: usize, const C3: usize, const C4: usize>(
    src1: &Frame<C1>,
    src2: &Frame<C2>,
    src3: &Frame<C3>,
    dst: &mut Frame<C4>,
    mut f: impl FnMut(&[u8], &[u8], &[u8], &mut [u8]),
) {
    src1.as_slice()
        .chunks_exact(C1)
        .zip(src2.as_slice().chunks_exact(C2))
        .zip(src3.as_slice().chunks_exact(C3))
        .zip(dst.as_slice_mut().chunks_exact_mut(C4))
        .for_each(|(((src1_pixel, src2_pixel), src3_pixel), dst_pixel)| {
            f(src1_pixel, src2_pixel, src3_pixel, dst_pixel);
        });
}
