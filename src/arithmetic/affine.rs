//! Affine points on the secp256k1 curve.
//!
//! The group law is the textbook chord-and-tangent construction over
//! affine coordinates, with the point at infinity carried as an explicit
//! flag. Every coincidence case is branched on, so none of this is
//! constant time; the contract is functional correctness.

use core::fmt;
use core::ops::{Add, AddAssign, Mul, Neg};

use super::field::FieldElement;
use super::uint::Uint256;

/// b = 7 in the curve equation y² = x³ + 7.
pub(crate) const CURVE_EQUATION_B: FieldElement =
    FieldElement::from_uint_unchecked(Uint256::from_words([7, 0, 0, 0]));

/// secp256k1 curve point in affine coordinates.
#[derive(Clone, Copy, Debug)]
pub struct AffinePoint {
    /// x-coordinate
    x: FieldElement,

    /// y-coordinate
    y: FieldElement,

    /// Whether this is the point at infinity. The coordinates of the
    /// identity are meaningless and are never read.
    infinity: bool,
}

impl AffinePoint {
    /// Additive identity of the group: the point at infinity.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ZERO,
        infinity: true,
    };

    /// Base point of secp256k1.
    ///
    /// ```text
    /// Gₓ = 79be667e f9dcbbac 55a06295 ce870b07 029bfcdb 2dce28d9 59f2815b 16f81798
    /// Gᵧ = 483ada77 26a3c465 5da4fbfc 0e1108a8 fd17b448 a6855419 9c47d08f fb10d4b8
    /// ```
    pub const GENERATOR: Self = Self {
        x: FieldElement::from_uint_unchecked(Uint256::from_words([
            0x59F2_815B_16F8_1798,
            0x029B_FCDB_2DCE_28D9,
            0x55A0_6295_CE87_0B07,
            0x79BE_667E_F9DC_BBAC,
        ])),
        y: FieldElement::from_uint_unchecked(Uint256::from_words([
            0x9C47_D08F_FB10_D4B8,
            0xFD17_B448_A685_5419,
            0x5DA4_FBFC_0E11_08A8,
            0x483A_DA77_26A3_C465,
        ])),
        infinity: false,
    };

    const fn new(x: FieldElement, y: FieldElement) -> Self {
        Self {
            x,
            y,
            infinity: false,
        }
    }

    /// Creates a point from its coordinates, checking the curve equation.
    ///
    /// Returns `None` if `(x, y)` does not satisfy y² = x³ + 7.
    pub fn from_coordinates(x: FieldElement, y: FieldElement) -> Option<Self> {
        let point = Self::new(x, y);
        point.is_on_curve().then_some(point)
    }

    /// Whether this is the point at infinity.
    pub fn is_identity(&self) -> bool {
        self.infinity
    }

    /// The x-coordinate. Must not be called on the identity.
    pub fn x(&self) -> FieldElement {
        debug_assert!(!self.infinity);
        self.x
    }

    /// The y-coordinate. Must not be called on the identity.
    pub fn y(&self) -> FieldElement {
        debug_assert!(!self.infinity);
        self.y
    }

    /// Whether the point satisfies the curve equation (the identity counts
    /// as on-curve).
    pub fn is_on_curve(&self) -> bool {
        if self.infinity {
            return true;
        }
        self.y.square() == self.x.square() * self.x + CURVE_EQUATION_B
    }

    /// Doubles this point: the tangent at P meets the curve at −2P.
    pub fn double(&self) -> Self {
        if self.infinity {
            return Self::IDENTITY;
        }

        // λ = 3x² / 2y
        let x_sq = self.x.square();
        let lambda = (x_sq.double() + x_sq) * self.y.double().invert();

        let x3 = lambda.square() - self.x - self.x;
        let y3 = lambda * (self.x - x3) - self.y;
        Self::new(x3, y3)
    }

    /// Adds two points, handling every coincidence case.
    pub fn add(&self, rhs: &Self) -> Self {
        if self.infinity {
            return *rhs;
        }
        if rhs.infinity {
            return *self;
        }
        if self.x == rhs.x {
            // Same x: either the same point (tangent case) or mirror
            // images whose chord is vertical.
            return if self.y == rhs.y {
                self.double()
            } else {
                Self::IDENTITY
            };
        }

        // λ = (y₂ − y₁) / (x₂ − x₁)
        let lambda = (rhs.y - self.y) * (rhs.x - self.x).invert();

        let x3 = lambda.square() - self.x - rhs.x;
        let y3 = lambda * (self.x - x3) - self.y;
        Self::new(x3, y3)
    }

    /// Scalar multiplication by left-to-right double-and-add.
    ///
    /// Scans all 256 bits of `k` from the most significant down, starting
    /// from the identity. Scalars are opaque integers; no reduction modulo
    /// the group order is performed.
    pub fn mul(&self, k: &Uint256) -> Self {
        let mut acc = Self::IDENTITY;
        for i in (0..256).rev() {
            acc = acc.double();
            if k.bit(i) {
                acc = acc.add(self);
            }
        }
        acc
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        if self.infinity || other.infinity {
            return self.infinity == other.infinity;
        }
        self.x == other.x && self.y == other.y
    }
}

impl Eq for AffinePoint {}

impl Default for AffinePoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for AffinePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.infinity {
            f.write_str("(point at infinity)")
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

impl Add<&AffinePoint> for &AffinePoint {
    type Output = AffinePoint;

    fn add(self, other: &AffinePoint) -> AffinePoint {
        AffinePoint::add(self, other)
    }
}

impl Add<&AffinePoint> for AffinePoint {
    type Output = AffinePoint;

    fn add(self, other: &AffinePoint) -> AffinePoint {
        AffinePoint::add(&self, other)
    }
}

impl Add for AffinePoint {
    type Output = AffinePoint;

    fn add(self, other: AffinePoint) -> AffinePoint {
        AffinePoint::add(&self, &other)
    }
}

impl AddAssign for AffinePoint {
    fn add_assign(&mut self, rhs: AffinePoint) {
        *self = AffinePoint::add(self, &rhs);
    }
}

impl Mul<&Uint256> for &AffinePoint {
    type Output = AffinePoint;

    fn mul(self, scalar: &Uint256) -> AffinePoint {
        AffinePoint::mul(self, scalar)
    }
}

impl Mul<&Uint256> for AffinePoint {
    type Output = AffinePoint;

    fn mul(self, scalar: &Uint256) -> AffinePoint {
        AffinePoint::mul(&self, scalar)
    }
}

impl Mul<Uint256> for AffinePoint {
    type Output = AffinePoint;

    fn mul(self, scalar: Uint256) -> AffinePoint {
        AffinePoint::mul(&self, &scalar)
    }
}

impl Neg for AffinePoint {
    type Output = AffinePoint;

    /// The mirror point (x, −y); the identity is its own negation.
    fn neg(self) -> AffinePoint {
        AffinePoint {
            x: self.x,
            y: self.y.negate(),
            infinity: self.infinity,
        }
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use proptest::prelude::*;

    use super::AffinePoint;
    use crate::arithmetic::field::FieldElement;
    use crate::arithmetic::uint::Uint256;
    use crate::ORDER_HEX;

    /// 2·G, from the SEC2 test vectors.
    fn two_g() -> AffinePoint {
        AffinePoint::from_coordinates(
            FieldElement::from_be_bytes(hex!(
                "C6047F9441ED7D6D3045406E95C07CD85C778E4B8CEF3CA7ABAC09B95C709EE5"
            )),
            FieldElement::from_be_bytes(hex!(
                "1AE168FEA63DC339A3C58419466CEAEEF7F632653266D0E1236431A950CFE52A"
            )),
        )
        .unwrap()
    }

    #[test]
    fn generator_is_on_curve() {
        assert!(AffinePoint::GENERATOR.is_on_curve());
    }

    #[test]
    fn from_coordinates_rejects_off_curve_points() {
        assert!(
            AffinePoint::from_coordinates(FieldElement::ONE, FieldElement::ONE).is_none()
        );
    }

    #[test]
    fn identity_is_neutral() {
        let g = AffinePoint::GENERATOR;
        assert_eq!(g + AffinePoint::IDENTITY, g);
        assert_eq!(AffinePoint::IDENTITY + g, g);
        assert_eq!(
            AffinePoint::IDENTITY + AffinePoint::IDENTITY,
            AffinePoint::IDENTITY
        );
        assert_eq!(AffinePoint::IDENTITY.double(), AffinePoint::IDENTITY);
    }

    #[test]
    fn mirror_images_cancel() {
        let g = AffinePoint::GENERATOR;
        assert_eq!(g + -g, AffinePoint::IDENTITY);
        assert_eq!(-AffinePoint::IDENTITY, AffinePoint::IDENTITY);
    }

    #[test]
    fn coincident_addition_is_doubling() {
        let g = AffinePoint::GENERATOR;
        let doubled = g.double();
        assert_eq!(g + g, doubled);
        assert!(doubled.is_on_curve());
        assert_eq!(doubled, two_g());
    }

    #[test]
    fn addition_commutes() {
        let g = AffinePoint::GENERATOR;
        let h = g.double();
        assert_eq!(g + h, h + g);
    }

    #[test]
    fn addition_associates() {
        let p = AffinePoint::GENERATOR;
        let q = p.double();
        let r = q.double();
        assert_eq!((p + q) + r, p + (q + r));
    }

    #[test]
    fn scalar_mul_small_cases() {
        let g = AffinePoint::GENERATOR;
        assert_eq!(g * Uint256::ZERO, AffinePoint::IDENTITY);
        assert_eq!(g * Uint256::ONE, g);
        assert_eq!(g * Uint256::from(2u64), g.double());
        assert_eq!(g * Uint256::from(3u64), g.double() + g);
    }

    #[test]
    fn doubling_twice_is_mul_four() {
        let g = AffinePoint::GENERATOR;
        let four_g = g * Uint256::from(4u64);
        assert_eq!(four_g, g.double().double());
        assert_eq!(four_g, g.double() + g.double());
    }

    #[test]
    fn group_order_annihilates_the_generator() {
        let n = Uint256::from_hex(ORDER_HEX);
        assert_eq!(AffinePoint::GENERATOR * n, AffinePoint::IDENTITY);

        // (n - 1)·G is the mirror image of G.
        let n_minus_one = n.borrowing_sub(&Uint256::ONE).0;
        assert_eq!(AffinePoint::GENERATOR * n_minus_one, -AffinePoint::GENERATOR);
    }

    proptest! {
        // Scalar multiplication never leaves the curve, whatever the scalar.
        #![proptest_config(ProptestConfig::with_cases(16))]
        #[test]
        fn fuzzy_scalar_mul_stays_on_curve(words in any::<[u64; 4]>()) {
            let k = Uint256::from_words(words);
            prop_assert!((AffinePoint::GENERATOR * k).is_on_curve());
        }

        #[test]
        fn fuzzy_scalar_mul_distributes(a in any::<u64>(), b in any::<u64>()) {
            let g = AffinePoint::GENERATOR;
            let (sum, carry) = Uint256::from(a).carrying_add(&Uint256::from(b));
            prop_assert_eq!(carry, 0);
            prop_assert_eq!(g * sum, g * Uint256::from(a) + g * Uint256::from(b));
        }
    }
}
