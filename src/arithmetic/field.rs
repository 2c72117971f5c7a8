//! Field arithmetic modulo p = 2²⁵⁶ − 2³² − 977.
//!
//! The prime is pseudo-Mersenne: 2²⁵⁶ ≡ 2³² + 977 (mod p), so a 512-bit
//! product reduces by folding its high half down multiplied by that 33-bit
//! constant. Inversion uses the binary extended GCD, which only ever halves
//! and subtracts.

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::uint::{Uint256, Uint512};
use super::util::mac;

/// The field modulus p = 2²⁵⁶ − 2³² − 977.
pub const MODULUS: Uint256 = Uint256::from_words([
    0xFFFF_FFFE_FFFF_FC2F,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
]);

/// 2²⁵⁶ − p = 2³² + 977: what one wrap around 2²⁵⁶ is worth modulo p.
const FOLD: u64 = 0x1_0000_03D1;

/// An element of the secp256k1 base field.
///
/// The inner integer is always the canonical representative in `[0, p)`;
/// every operation assumes and re-establishes that invariant.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FieldElement(Uint256);

impl FieldElement {
    /// The additive identity.
    pub const ZERO: Self = Self(Uint256::ZERO);

    /// The multiplicative identity.
    pub const ONE: Self = Self(Uint256::ONE);

    /// Wraps an integer already known to be in `[0, p)`.
    pub(crate) const fn from_uint_unchecked(uint: Uint256) -> Self {
        Self(uint)
    }

    /// Reduces an arbitrary 256-bit integer into the field.
    ///
    /// Any such integer is below 2p, so a single conditional subtraction
    /// canonicalizes it.
    pub fn from_uint(uint: Uint256) -> Self {
        Self(sub_modulus_once(uint))
    }

    /// Parses a big-endian hex string (see [`Uint256::from_hex`]) and
    /// reduces it into the field.
    pub fn from_hex(hex: &str) -> Self {
        Self::from_uint(Uint256::from_hex(hex))
    }

    /// Interprets 32 big-endian bytes, reducing into the field.
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self::from_uint(Uint256::from_be_bytes(bytes))
    }

    /// Returns the canonical representative as an integer.
    pub const fn to_uint(self) -> Uint256 {
        self.0
    }

    /// Returns the big-endian byte encoding of the canonical representative.
    pub fn to_be_bytes(self) -> [u8; 32] {
        self.0.to_be_bytes()
    }

    /// Whether this is the additive identity.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Reduces a full 512-bit value modulo p.
    ///
    /// Writing the input as `L + H·2²⁵⁶`, the congruence 2²⁵⁶ ≡ FOLD (mod p)
    /// turns it into `L + H·FOLD`, a 320-bit value whose overflow limb is
    /// folded the same way until the high part is gone. The first pass
    /// leaves at most a 33-bit high limb and the second at most one bit, so
    /// the loop runs at most four times; termination is structural, not a
    /// tuned iteration cap.
    pub fn reduce(wide: &Uint512) -> Self {
        let (mut lo, mut hi) = wide.split();
        while !hi.is_zero() {
            let lo_words = lo.to_words();
            let hi_words = hi.to_words();
            let mut w = [0u64; 4];
            let mut carry = 0;
            for i in 0..4 {
                let (t, c) = mac(lo_words[i], hi_words[i], FOLD, carry);
                w[i] = t;
                carry = c;
            }
            lo = Uint256::from_words(w);
            hi = Uint256::from(carry);
        }
        Self(sub_modulus_once(lo))
    }

    /// Modular addition.
    pub fn add(&self, rhs: &Self) -> Self {
        let (sum, carry) = self.0.carrying_add(&rhs.0);
        if carry != 0 {
            // The true value is sum + 2^256; one wrap is worth FOLD, and
            // both inputs being below p keeps sum + FOLD below p.
            let (sum, _) = sum.carrying_add(&Uint256::from(FOLD));
            Self(sum)
        } else {
            Self(sub_modulus_once(sum))
        }
    }

    /// Modular subtraction: borrow, then conditionally add p back.
    pub fn sub(&self, rhs: &Self) -> Self {
        Self(sub_mod(self.0, rhs.0))
    }

    /// Modular doubling.
    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// Modular multiplication via the full product and [`Self::reduce`].
    pub fn mul(&self, rhs: &Self) -> Self {
        Self::reduce(&self.0.widening_mul(&rhs.0))
    }

    /// Modular squaring.
    pub fn square(&self) -> Self {
        self.mul(self)
    }

    /// The additive inverse, p − self (and 0 for 0).
    pub fn negate(&self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        let (diff, _) = MODULUS.borrowing_sub(&self.0);
        Self(diff)
    }

    /// The multiplicative inverse via the binary extended GCD.
    ///
    /// Maintains `x1·self ≡ u` and `x2·self ≡ v (mod p)` while halving and
    /// subtracting until one of `u`, `v` reaches zero; the other is then
    /// gcd(self, p) = 1 and its cofactor is the inverse.
    ///
    /// The inverse of zero is defined to be zero. That is a benign
    /// convention for a total API; cryptographic callers never invert zero.
    pub fn invert(&self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }

        let mut u = self.0;
        let mut v = MODULUS;
        let mut x1 = Uint256::ONE;
        let mut x2 = Uint256::ZERO;

        while !u.is_zero() && !v.is_zero() {
            while u.is_even() {
                u = u.shr1(0);
                x1 = half_mod(x1);
            }
            while v.is_even() {
                v = v.shr1(0);
                x2 = half_mod(x2);
            }
            if u >= v {
                u = u.borrowing_sub(&v).0;
                x1 = sub_mod(x1, x2);
            } else {
                v = v.borrowing_sub(&u).0;
                x2 = sub_mod(x2, x1);
            }
        }

        if v.is_zero() { Self(x1) } else { Self(x2) }
    }
}

/// Halves `x` modulo p.
///
/// For odd `x` this is `(x + p) >> 1`; the addition can overflow 256 bits,
/// and its carry out must become the top bit after the shift. Dropping that
/// bit silently corrupts a fraction of inverses.
fn half_mod(x: Uint256) -> Uint256 {
    if x.is_even() {
        x.shr1(0)
    } else {
        let (sum, carry) = x.carrying_add(&MODULUS);
        sum.shr1(carry)
    }
}

/// `a - b mod p` for `a, b` in `[0, p)`: subtract, add p back on borrow.
fn sub_mod(a: Uint256, b: Uint256) -> Uint256 {
    let (diff, borrow) = a.borrowing_sub(&b);
    if borrow != 0 {
        diff.carrying_add(&MODULUS).0
    } else {
        diff
    }
}

/// Canonicalizes a value known to be below 2p.
fn sub_modulus_once(uint: Uint256) -> Uint256 {
    if uint >= MODULUS {
        uint.borrowing_sub(&MODULUS).0
    } else {
        uint
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Add<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn add(self, other: &FieldElement) -> FieldElement {
        FieldElement::add(self, other)
    }
}

impl Add<&FieldElement> for FieldElement {
    type Output = FieldElement;

    fn add(self, other: &FieldElement) -> FieldElement {
        FieldElement::add(&self, other)
    }
}

impl Add for FieldElement {
    type Output = FieldElement;

    fn add(self, other: FieldElement) -> FieldElement {
        FieldElement::add(&self, &other)
    }
}

impl AddAssign for FieldElement {
    fn add_assign(&mut self, rhs: FieldElement) {
        *self = FieldElement::add(self, &rhs);
    }
}

impl Sub<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn sub(self, other: &FieldElement) -> FieldElement {
        FieldElement::sub(self, other)
    }
}

impl Sub<&FieldElement> for FieldElement {
    type Output = FieldElement;

    fn sub(self, other: &FieldElement) -> FieldElement {
        FieldElement::sub(&self, other)
    }
}

impl Sub for FieldElement {
    type Output = FieldElement;

    fn sub(self, other: FieldElement) -> FieldElement {
        FieldElement::sub(&self, &other)
    }
}

impl SubAssign for FieldElement {
    fn sub_assign(&mut self, rhs: FieldElement) {
        *self = FieldElement::sub(self, &rhs);
    }
}

impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn mul(self, other: &FieldElement) -> FieldElement {
        FieldElement::mul(self, other)
    }
}

impl Mul<&FieldElement> for FieldElement {
    type Output = FieldElement;

    fn mul(self, other: &FieldElement) -> FieldElement {
        FieldElement::mul(&self, other)
    }
}

impl Mul for FieldElement {
    type Output = FieldElement;

    fn mul(self, other: FieldElement) -> FieldElement {
        FieldElement::mul(&self, &other)
    }
}

impl MulAssign for FieldElement {
    fn mul_assign(&mut self, rhs: FieldElement) {
        *self = FieldElement::mul(self, &rhs);
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        self.negate()
    }
}
