use crate::{allocator, error::FrameError};

/// Frame size in pixels
///
/// A struct to represent the size of a frame in pixels.
///
/// # Examples
///
/// ```
/// use rawfx_frame::FrameSize;
///
/// let frame_size = FrameSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(frame_size.width, 10);
/// assert_eq!(frame_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSize {
    /// Width of the frame in pixels
    pub width: usize,
    /// Height of the frame in pixels
    pub height: usize,
}

impl FrameSize {
    /// Number of pixels covered by the frame.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Size of one sub-sampled chroma plane of a 4:2:0 frame.
    ///
    /// Odd dimensions round up so that every luma pixel has a chroma sample.
    pub fn chroma_size(&self) -> FrameSize {
        FrameSize {
            width: self.width.div_ceil(2),
            height: self.height.div_ceil(2),
        }
    }

    /// Fail with [`FrameError::DimensionMismatch`] unless both sizes are equal.
    pub fn check_eq(&self, other: FrameSize) -> Result<(), FrameError> {
        if *self != other {
            return Err(FrameError::DimensionMismatch(
                self.width,
                self.height,
                other.width,
                other.height,
            ));
        }
        Ok(())
    }
}

impl std::fmt::Display for FrameSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "FrameSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for FrameSize {
    fn from(size: [usize; 2]) -> Self {
        FrameSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// A packed 8-bit frame with `CHANNELS` interleaved bytes per pixel.
///
/// The pixel data is stored row-major as `(H, W, C)`; the byte of channel `c`
/// of pixel `p = y * width + x` lives at `p * CHANNELS + c`.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<const CHANNELS: usize> {
    size: FrameSize,
    data: Vec<u8>,
}

/// A single channel weight or alpha plane paired with a frame of the same size.
pub type Mask = Frame<1>;

impl<const CHANNELS: usize> Frame<CHANNELS> {
    /// Create a new frame from pixel data.
    ///
    /// Host buffers may carry trailing padding, so `data` is accepted when it is
    /// at least `width * height * CHANNELS` bytes long; the excess is dropped.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the frame in pixels.
    /// * `data` - The pixel data of the frame.
    ///
    /// # Errors
    ///
    /// If the pixel data is shorter than the frame size requires, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use rawfx_frame::{Frame, FrameSize};
    ///
    /// let frame = Frame::<3>::new(
    ///    FrameSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(frame.size().width, 10);
    /// assert_eq!(frame.size().height, 20);
    /// assert_eq!(frame.num_channels(), 3);
    /// ```
    pub fn new(size: FrameSize, mut data: Vec<u8>) -> Result<Self, FrameError> {
        let expected = size.area() * CHANNELS;
        if data.len() < expected {
            return Err(FrameError::InvalidBufferLength(data.len(), expected));
        }
        data.truncate(expected);

        Ok(Self { size, data })
    }

    /// Create a new frame by copying a borrowed host buffer.
    ///
    /// # Errors
    ///
    /// Fails when the buffer is too short or the copy cannot be allocated.
    pub fn from_slice(size: FrameSize, data: &[u8]) -> Result<Self, FrameError> {
        let expected = size.area() * CHANNELS;
        if data.len() < expected {
            return Err(FrameError::InvalidBufferLength(data.len(), expected));
        }

        Ok(Self {
            size,
            data: allocator::try_copy(&data[..expected])?,
        })
    }

    /// Create a new frame with the given size and every byte set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rawfx_frame::{Frame, FrameSize};
    ///
    /// let frame = Frame::<4>::from_size_val(
    ///   FrameSize {
    ///     width: 10,
    ///     height: 20,
    ///   }, 0u8).unwrap();
    ///
    /// assert_eq!(frame.as_slice().len(), 10 * 20 * 4);
    /// ```
    pub fn from_size_val(size: FrameSize, val: u8) -> Result<Self, FrameError> {
        let data = allocator::try_alloc(size.area() * CHANNELS, val)?;
        Ok(Self { size, data })
    }

    /// Get the size of the frame in pixels.
    pub fn size(&self) -> FrameSize {
        self.size
    }

    /// Get the width of the frame in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the frame in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the frame.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the frame.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the number of bytes per pixel.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// The raw pixel bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// The raw pixel bytes, mutable.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the frame and return its buffer, e.g. to hand it back to the host.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Get the bytes of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// If the coordinate lies outside the frame, an error is returned.
    pub fn pixel(&self, x: usize, y: usize) -> Result<&[u8], FrameError> {
        if x >= self.width() || y >= self.height() {
            return Err(FrameError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }

        let offset = (y * self.width() + x) * CHANNELS;
        Ok(&self.data[offset..offset + CHANNELS])
    }
}
