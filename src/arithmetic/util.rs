//! Helper functions.

#[cfg(test)]
use num_bigint::{BigUint, ToBigUint};
#[cfg(test)]
use num_traits::cast::ToPrimitive;

/// Computes `a + b + carry`, returning the result along with the new carry.
#[inline(always)]
pub const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Computes `a - (b + borrow)`, returning the result along with the new
/// borrow. The borrow is an all-ones mask when the subtraction wrapped.
#[inline(always)]
pub const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + ((borrow >> 63) as u128));
    (ret as u64, (ret >> 64) as u64)
}

/// Computes `a + (b * c) + carry`, returning the result along with the new
/// carry.
#[inline(always)]
pub const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + ((b as u128) * (c as u128)) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

#[cfg(test)]
pub fn u64_array_to_biguint(words: &[u64]) -> BigUint {
    words
        .iter()
        .enumerate()
        .map(|(i, w)| w.to_biguint().unwrap() << (i * 64))
        .sum()
}

#[cfg(test)]
pub fn biguint_to_u64_array<const N: usize>(x: &BigUint) -> [u64; N] {
    let mask = BigUint::from(u64::MAX);
    let mut words = [0u64; N];
    for i in 0..N {
        words[i] = ((x >> (i * 64)) & &mask).to_u64().unwrap();
    }
    words
}
