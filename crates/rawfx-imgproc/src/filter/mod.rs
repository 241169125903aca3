//! Filter operations
//!
//! This module provides the convolution building blocks shared by the kernels.

/// Filter kernels
pub mod kernels;

/// Separable filter operations
mod separable_filter;
pub(crate) use separable_filter::SeparableFilter;
pub use separable_filter::separable_filter;
