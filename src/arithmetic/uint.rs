//! Fixed-width 256-bit and 512-bit unsigned integers.
//!
//! Values are stored as 64-bit limbs, least significant first, and carry no
//! canonical-form requirement of their own; the field layer decides what is
//! reduced. Per-limb overflow is captured through `u128` double-width
//! accumulators, so every operation meets the exact big-integer contract:
//! `add` returns the carry out of the top limb, `sub` the borrow, and `mul`
//! the full double-width product.
//!
//! Every operation returns a fresh value, which makes aliasing of inputs
//! and outputs a non-issue.

use core::cmp::Ordering;
use core::fmt;

use super::util::{adc, mac, sbb};

/// The number of 64-bit limbs in a [`Uint256`].
pub(crate) const LIMBS: usize = 4;

/// A 256-bit unsigned integer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Uint256(pub(crate) [u64; LIMBS]);

/// A 512-bit unsigned integer, produced as the full product of two
/// [`Uint256`] values.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Uint512(pub(crate) [u64; LIMBS * 2]);

impl Uint256 {
    /// The value 0.
    pub const ZERO: Self = Self([0; LIMBS]);

    /// The value 1.
    pub const ONE: Self = Self([1, 0, 0, 0]);

    /// Constructs an integer from its limbs, least significant first.
    pub const fn from_words(words: [u64; LIMBS]) -> Self {
        Self(words)
    }

    /// Returns the limbs, least significant first.
    pub const fn to_words(self) -> [u64; LIMBS] {
        self.0
    }

    /// Parses a big-endian hexadecimal string of up to 64 nibbles.
    ///
    /// Nibbles are consumed from the rightmost character leftward;
    /// characters that are not hex digits are skipped, and anything beyond
    /// 256 bits is ignored. Missing high nibbles are zero, so `""` parses
    /// as zero and a leading `0x` prefix is tolerated (the `x` is skipped).
    pub fn from_hex(hex: &str) -> Self {
        let mut limbs = [0u64; LIMBS];
        let mut shift = 0usize;
        for c in hex.bytes().rev() {
            let nibble = match c {
                b'0'..=b'9' => (c - b'0') as u64,
                b'a'..=b'f' => (c - b'a' + 10) as u64,
                b'A'..=b'F' => (c - b'A' + 10) as u64,
                _ => continue,
            };
            if shift == 256 {
                break;
            }
            limbs[shift / 64] |= nibble << (shift % 64);
            shift += 4;
        }
        Self(limbs)
    }

    /// Interprets 32 bytes as a big-endian integer.
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        let mut w = [0u64; LIMBS];
        w[3] = u64::from_be_bytes(bytes[0..8].try_into().unwrap());
        w[2] = u64::from_be_bytes(bytes[8..16].try_into().unwrap());
        w[1] = u64::from_be_bytes(bytes[16..24].try_into().unwrap());
        w[0] = u64::from_be_bytes(bytes[24..32].try_into().unwrap());
        Self(w)
    }

    /// Returns the big-endian byte encoding (limb 3 first, each limb
    /// most-significant byte first).
    pub fn to_be_bytes(self) -> [u8; 32] {
        let mut ret = [0u8; 32];
        ret[0..8].copy_from_slice(&self.0[3].to_be_bytes());
        ret[8..16].copy_from_slice(&self.0[2].to_be_bytes());
        ret[16..24].copy_from_slice(&self.0[1].to_be_bytes());
        ret[24..32].copy_from_slice(&self.0[0].to_be_bytes());
        ret
    }

    /// Whether the value is zero.
    pub fn is_zero(&self) -> bool {
        (self.0[0] | self.0[1] | self.0[2] | self.0[3]) == 0
    }

    /// Whether the value is even.
    pub fn is_even(&self) -> bool {
        self.0[0] & 1 == 0
    }

    /// The value of bit `i`, with bit 0 the least significant.
    pub fn bit(&self, i: usize) -> bool {
        (self.0[i / 64] >> (i % 64)) & 1 == 1
    }

    /// Computes `self + rhs`, returning the sum along with the carry out of
    /// the top limb, so that `sum + carry·2²⁵⁶` is the exact result.
    pub fn carrying_add(&self, rhs: &Self) -> (Self, u64) {
        let (w0, carry) = adc(self.0[0], rhs.0[0], 0);
        let (w1, carry) = adc(self.0[1], rhs.0[1], carry);
        let (w2, carry) = adc(self.0[2], rhs.0[2], carry);
        let (w3, carry) = adc(self.0[3], rhs.0[3], carry);
        (Self([w0, w1, w2, w3]), carry)
    }

    /// Computes `self - rhs`, returning the difference along with the
    /// borrow out of the top limb: 1 iff `self < rhs`, in which case the
    /// difference wrapped around 2²⁵⁶.
    pub fn borrowing_sub(&self, rhs: &Self) -> (Self, u64) {
        let (w0, borrow) = sbb(self.0[0], rhs.0[0], 0);
        let (w1, borrow) = sbb(self.0[1], rhs.0[1], borrow);
        let (w2, borrow) = sbb(self.0[2], rhs.0[2], borrow);
        let (w3, borrow) = sbb(self.0[3], rhs.0[3], borrow);
        (Self([w0, w1, w2, w3]), borrow >> 63)
    }

    /// Computes the full 512-bit product `self * rhs`.
    pub fn widening_mul(&self, rhs: &Self) -> Uint512 {
        let mut w = [0u64; LIMBS * 2];
        for i in 0..LIMBS {
            if self.0[i] == 0 {
                continue;
            }
            let mut carry = 0;
            for j in 0..LIMBS {
                let (t, c) = mac(w[i + j], self.0[i], rhs.0[j], carry);
                w[i + j] = t;
                carry = c;
            }
            // w[i + LIMBS] has not been written yet: earlier rows touch
            // w[..i + LIMBS] only, so plain assignment needs no further
            // carry propagation.
            w[i + LIMBS] = carry;
        }
        Uint512(w)
    }

    /// Logical right shift by one bit, inserting `hi` (0 or 1) as the new
    /// top bit.
    pub fn shr1(&self, hi: u64) -> Self {
        debug_assert!(hi <= 1);
        Self([
            (self.0[0] >> 1) | (self.0[1] << 63),
            (self.0[1] >> 1) | (self.0[2] << 63),
            (self.0[2] >> 1) | (self.0[3] << 63),
            (self.0[3] >> 1) | (hi << 63),
        ])
    }
}

impl Ord for Uint256 {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..LIMBS).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Uint256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u64> for Uint256 {
    fn from(value: u64) -> Self {
        Self([value, 0, 0, 0])
    }
}

impl fmt::Display for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for limb in self.0.iter().rev() {
            write!(f, "{limb:016x}")?;
        }
        Ok(())
    }
}

impl Uint512 {
    /// Constructs an integer from its limbs, least significant first.
    pub const fn from_words(words: [u64; LIMBS * 2]) -> Self {
        Self(words)
    }

    /// Returns the limbs, least significant first.
    pub const fn to_words(self) -> [u64; LIMBS * 2] {
        self.0
    }

    /// Splits into the low and high 256-bit halves.
    pub fn split(&self) -> (Uint256, Uint256) {
        (
            Uint256([self.0[0], self.0[1], self.0[2], self.0[3]]),
            Uint256([self.0[4], self.0[5], self.0[6], self.0[7]]),
        )
    }
}

impl From<Uint256> for Uint512 {
    /// Zero-extends a 256-bit value.
    fn from(value: Uint256) -> Self {
        let w = value.0;
        Self([w[0], w[1], w[2], w[3], 0, 0, 0, 0])
    }
}

impl fmt::Display for Uint512 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for limb in self.0.iter().rev() {
            write!(f, "{limb:016x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use num_traits::One;
    use proptest::prelude::*;
    use std::format;
    use std::string::ToString;

    use super::{Uint256, Uint512};
    use crate::arithmetic::util::{biguint_to_u64_array, u64_array_to_biguint};

    #[test]
    fn hex_construction() {
        assert_eq!(Uint256::from_hex(""), Uint256::ZERO);
        assert_eq!(Uint256::from_hex("1"), Uint256::ONE);
        assert_eq!(Uint256::from_hex("0x1"), Uint256::ONE);
        assert_eq!(
            Uint256::from_hex("ffffffffffffffff"),
            Uint256::from_words([u64::MAX, 0, 0, 0])
        );
        // Mixed case and separators are skipped, not rejected.
        assert_eq!(
            Uint256::from_hex("DE AD_be-ef"),
            Uint256::from_words([0xDEAD_BEEF, 0, 0, 0])
        );
        // Nibbles beyond 256 bits are ignored.
        let all_ones = "f".repeat(65);
        assert_eq!(
            Uint256::from_hex(&all_ones),
            Uint256::from_words([u64::MAX; 4])
        );
    }

    #[test]
    fn hex_construction_is_big_endian() {
        let x = Uint256::from_hex("0123456789abcdef00000000000000000000000000000000");
        assert_eq!(x.to_words(), [0, 0, 0x0123_4567_89AB_CDEF, 0]);
    }

    #[test]
    fn be_bytes_round_trip() {
        let x = Uint256::from_hex(
            "79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798",
        );
        let bytes = x.to_be_bytes();
        assert_eq!(bytes[0], 0x79);
        assert_eq!(bytes[31], 0x98);
        assert_eq!(Uint256::from_be_bytes(bytes), x);
    }

    #[test]
    fn bit_indexing() {
        let x = Uint256::from_words([0b101, 0, 1, 0]);
        assert!(x.bit(0));
        assert!(!x.bit(1));
        assert!(x.bit(2));
        assert!(x.bit(128));
        assert!(!x.bit(255));
    }

    #[test]
    fn shr1_inserts_top_bit() {
        let x = Uint256::from_words([3, 0, 0, 0]);
        assert_eq!(x.shr1(0), Uint256::ONE);
        assert_eq!(
            x.shr1(1),
            Uint256::from_words([1, 0, 0, 1 << 63])
        );
    }

    #[test]
    fn ordering_is_lexicographic_from_the_top() {
        let small = Uint256::from_words([u64::MAX, u64::MAX, u64::MAX, 0]);
        let big = Uint256::from_words([0, 0, 0, 1]);
        assert!(small < big);
        assert!(big > small);
        assert!(small <= small);
    }

    #[test]
    fn display_is_padded_hex() {
        assert_eq!(
            Uint256::ONE.to_string(),
            format!("0x{}1", "0".repeat(63))
        );
    }

    prop_compose! {
        fn uint256()(words in any::<[u64; 4]>()) -> Uint256 {
            Uint256::from_words(words)
        }
    }

    proptest! {
        #[test]
        fn fuzzy_carrying_add(a in uint256(), b in uint256()) {
            let (sum, carry) = a.carrying_add(&b);
            let res = u64_array_to_biguint(&sum.to_words())
                + (u64_array_to_biguint(&[carry]) << 256);
            prop_assert_eq!(
                res,
                u64_array_to_biguint(&a.to_words()) + u64_array_to_biguint(&b.to_words())
            );
        }

        #[test]
        fn fuzzy_borrowing_sub(a in uint256(), b in uint256()) {
            let (diff, borrow) = a.borrowing_sub(&b);
            prop_assert!(borrow <= 1);
            prop_assert_eq!(borrow == 1, a < b);
            let a_ref = u64_array_to_biguint(&a.to_words());
            let b_ref = u64_array_to_biguint(&b.to_words());
            let wrapped = if borrow == 1 {
                (BigUint::one() << 256) + a_ref - b_ref
            } else {
                a_ref - b_ref
            };
            prop_assert_eq!(u64_array_to_biguint(&diff.to_words()), wrapped);
        }

        #[test]
        fn fuzzy_widening_mul(a in uint256(), b in uint256()) {
            let product = a.widening_mul(&b);
            let res_ref = u64_array_to_biguint(&a.to_words())
                * u64_array_to_biguint(&b.to_words());
            prop_assert_eq!(
                Uint512::from_words(biguint_to_u64_array(&res_ref)),
                product
            );
        }

        #[test]
        fn fuzzy_cmp_matches_reference(a in uint256(), b in uint256()) {
            let a_ref = u64_array_to_biguint(&a.to_words());
            let b_ref = u64_array_to_biguint(&b.to_words());
            prop_assert_eq!(a.cmp(&b), a_ref.cmp(&b_ref));
        }
    }
}
