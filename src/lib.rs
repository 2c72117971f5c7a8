#![no_std]
#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]
#![allow(clippy::needless_range_loop)]

//! Elliptic Curve Integrated Encryption (ECIES) over secp256k1, built from
//! first principles.
//!
//! The crate implements the three primitives the scheme needs without any
//! external cryptographic dependency:
//!
//! - [`arithmetic`]: 256-bit limb arithmetic specialized for the secp256k1
//!   prime field (`y² = x³ + 7` over `p = 2²⁵⁶ − 2³² − 977`), plus affine
//!   curve group operations with double-and-add scalar multiplication.
//! - [`sha256`]: FIPS 180-4 SHA-256 with a streaming interface, used as the
//!   key derivation hash.
//! - [`aes`]: FIPS 197 AES-128 and counter mode for payload confidentiality.
//!
//! [`ecies`] wires them together: the sender transmits an ephemeral public
//! point `R = r·G` next to the ciphertext, both sides derive the shared
//! point `r·d·G`, and SHA-256 of its X coordinate yields the AES-128 key.
//!
//! The arithmetic is **not constant time**: the group law branches on the
//! point at infinity and on coordinate coincidence, and the inversion loop
//! count depends on its input. The crate documents functional semantics
//! only; do not use it where timing side channels matter.

#[cfg(test)]
extern crate std;

pub mod aes;
pub mod arithmetic;
pub mod ecies;
pub mod sha256;

pub use aes::Aes128;
pub use arithmetic::{
    affine::AffinePoint,
    field::FieldElement,
    uint::{Uint256, Uint512},
};
pub use sha256::Sha256;

/// Order of the secp256k1 elliptic curve in hexadecimal.
///
/// The core treats scalars as opaque 256-bit integers and never reduces
/// modulo the order; the constant exists for callers that sample scalars
/// and for the `n·G = O` group-order checks in the test suite.
pub const ORDER_HEX: &str = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141";
