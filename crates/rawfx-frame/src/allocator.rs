use crate::error::FrameError;

/// Allocate a buffer of `len` elements filled with `val`.
///
/// The reservation is fallible so that an out-of-memory condition on large
/// frames reaches the caller as [`FrameError::AllocationFailed`] instead of
/// aborting the process.
///
/// # Arguments
///
/// * `len` - The number of elements to allocate.
/// * `val` - The value every element is initialized with.
///
/// # Example
///
/// ```
/// use rawfx_frame::allocator::try_alloc;
///
/// let buf = try_alloc(6, 127u8).unwrap();
/// assert_eq!(buf, vec![127u8; 6]);
/// ```
pub fn try_alloc<T: Clone>(len: usize, val: T) -> Result<Vec<T>, FrameError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| FrameError::AllocationFailed(len.saturating_mul(std::mem::size_of::<T>())))?;
    buf.resize(len, val);
    Ok(buf)
}

/// Copy a slice into a freshly allocated buffer, surfacing allocation failure.
pub fn try_copy<T: Clone>(src: &[T]) -> Result<Vec<T>, FrameError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(src.len())
        .map_err(|_| FrameError::AllocationFailed(std::mem::size_of_val(src)))?;
    buf.extend_from_slice(src);
    Ok(buf)
}
