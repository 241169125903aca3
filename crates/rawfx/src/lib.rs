#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use rawfx_frame as frame;

#[doc(inline)]
pub use rawfx_imgproc as imgproc;
