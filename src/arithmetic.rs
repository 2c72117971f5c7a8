//! A pure-Rust implementation of the secp256k1 arithmetic stack.
//!
//! Layered bottom-up: [`uint`] provides fixed-width 256/512-bit integers
//! with carry-exact limb arithmetic, [`field`] reduces them modulo the
//! field prime, and [`affine`] builds the curve group law on top.

pub mod affine;
pub mod field;
pub mod uint;

mod util;
