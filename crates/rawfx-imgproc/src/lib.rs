#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// alpha channel compositing module.
pub mod alpha;

/// mask weighted blending and subtraction of frames.
pub mod arith;

/// color transformations module.
pub mod color;

/// adaptive median (despeckle) filter.
pub mod despeckle;

/// edge detection module.
pub mod edge;

/// image enhancement module.
pub mod enhance;

/// image filtering module.
pub mod filter;

/// utilities to iterate over the pixels of frames.
pub mod pixelwise;

/// unsharp mask sharpening.
pub mod sharpen;
