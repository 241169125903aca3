#![deny(missing_docs)]
//! Frame containers and pixel format descriptions for raw video kernels

/// fallible buffer allocation helpers.
pub mod allocator;

/// Error types for the frame module.
pub mod error;

/// pixel formats and memory layouts.
pub mod format;

/// packed frame representation.
pub mod frame;

/// planar 4:2:0 frame representation.
pub mod planar;

pub use crate::error::FrameError;
pub use crate::format::{PixelFormat, PixelLayout};
pub use crate::frame::{Frame, FrameSize, Mask};
pub use crate::planar::PlanarFrame;
