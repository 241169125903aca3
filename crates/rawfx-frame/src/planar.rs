use crate::{
    allocator,
    error::FrameError,
    format::PixelFormat,
    frame::{FrameSize, Mask},
};

/// A planar 4:2:0 (I420) frame.
///
/// The buffer holds the full resolution luma plane followed by the U and V
/// planes, each sub-sampled by two in both directions.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanarFrame {
    size: FrameSize,
    data: Vec<u8>,
}

impl PlanarFrame {
    /// Create a new planar frame from an I420 buffer.
    ///
    /// # Errors
    ///
    /// If the buffer is shorter than the three planes require, an error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use rawfx_frame::{FrameSize, PlanarFrame};
    ///
    /// let frame = PlanarFrame::new(FrameSize { width: 4, height: 2 }, vec![0u8; 8 + 2 * 2]).unwrap();
    /// assert_eq!(frame.luma().len(), 8);
    /// assert_eq!(frame.chroma_u().len(), 2);
    /// ```
    pub fn new(size: FrameSize, mut data: Vec<u8>) -> Result<Self, FrameError> {
        let expected = PixelFormat::I420.buffer_len(size);
        if data.len() < expected {
            return Err(FrameError::InvalidBufferLength(data.len(), expected));
        }
        data.truncate(expected);

        Ok(Self { size, data })
    }

    /// Create a planar frame by copying a borrowed host buffer.
    pub fn from_slice(size: FrameSize, data: &[u8]) -> Result<Self, FrameError> {
        let expected = PixelFormat::I420.buffer_len(size);
        if data.len() < expected {
            return Err(FrameError::InvalidBufferLength(data.len(), expected));
        }

        Ok(Self {
            size,
            data: allocator::try_copy(&data[..expected])?,
        })
    }

    /// Create a planar frame with constant luma and chroma values.
    pub fn from_size_val(size: FrameSize, luma: u8, chroma: u8) -> Result<Self, FrameError> {
        let mut data = allocator::try_alloc(PixelFormat::I420.buffer_len(size), chroma)?;
        data[..size.area()].fill(luma);
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

    /// The whole I420 buffer.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// The whole I420 buffer, mutable.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the frame and return its buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// The luma plane.
    pub fn luma(&self) -> &[u8] {
        &self.data[..self.size.area()]
    }

    /// The U chroma plane.
    pub fn chroma_u(&self) -> &[u8] {
        let (start, len) = (self.size.area(), self.size.chroma_size().area());
        &self.data[start..start + len]
    }

    /// The V chroma plane.
    pub fn chroma_v(&self) -> &[u8] {
        let len = self.size.chroma_size().area();
        let start = self.size.area() + len;
        &self.data[start..start + len]
    }

    /// Split the buffer into mutable `(luma, u, v)` planes.
    pub fn planes_mut(&mut self) -> (&mut [u8], &mut [u8], &mut [u8]) {
        let chroma_len = self.size.chroma_size().area();
        let (luma, chroma) = self.data.split_at_mut(self.size.area());
        let (u, v) = chroma.split_at_mut(chroma_len);
        (luma, u, v)
    }

    /// Copy the luma plane into a single channel mask.
    ///
    /// Useful to feed an edge magnitude image into a masked blend.
    pub fn luma_mask(&self) -> Result<Mask, FrameError> {
        Mask::from_slice(self.size, self.luma())
    }
}
