/// An error type for frame containers and the kernels operating on them.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FrameError {
    /// Error when the buffer is too short for the frame geometry.
    #[error("Data length ({0}) does not match the frame size ({1})")]
    InvalidBufferLength(usize, usize),

    /// Error when paired frames differ in width or height.
    #[error("Frame size mismatch: ({0}x{1}) vs ({2}x{3})")]
    DimensionMismatch(usize, usize, usize, usize),

    /// Error when a kernel is handed a format outside its supported set.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error when a configuration parameter is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error when an output buffer could not be allocated.
    #[error("Failed to allocate {0} bytes for the frame buffer")]
    AllocationFailed(usize),

    /// Error when a pixel coordinate lies outside the frame.
    #[error("Pixel coordinate ({0}, {1}) is out of bounds ({2}x{3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),
}
