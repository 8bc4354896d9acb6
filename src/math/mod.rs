//! Arithmetic utilities for pool calculations.
//!
//! - [`CheckedArithmetic`]: overflow-safe operations on domain newtypes.
//! - [`Rounding`]: the direction every pool division truncates in.
//! - [`mul_div`] / [`sqrt_product`]: 256-bit intermediates for share and
//!   swap math at 18-decimal scale.

mod checked;
mod rounding;
mod wide;

pub use checked::CheckedArithmetic;
pub use rounding::Rounding;
pub use wide::{full_product, mul_div, narrow, sqrt_product, U256};
