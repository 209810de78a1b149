//! crc/algebra.rs
//! GF(2) polynomial arithmetic modulo the CRC-32 generator.
//!
//! Representation: a `u32` holds a polynomial of degree < 32 in reflected
//! order, bit 31 is the coefficient of `x^0` and bit 0 the coefficient of
//! `x^31`. This is the same orientation as a finalized CRC value, so CRCs can
//! be fed straight into these functions.
//!
//! Notes:
//! - `x` has multiplicative order `2^32 - 1` modulo the generator, so every
//!   exponent (including negative ones) is reduced into `[0, 2^32 - 1)`.
//! - Pre/post inversion of the CRC cancels out in `combine`; `zeros` and
//!   `unzero` operate on the raw register and re-apply it.

use crate::constants::crc_params::{ONE, POLY, X_ORDER};
use crate::crc::table::X_POW_2K;

/// Multiply two polynomials modulo the generator.
pub const fn multiply(mut a: u32, mut b: u32) -> u32 {
    let mut product = 0u32;
    let mut i = 0;
    while i < 32 {
        if b & ONE != 0 {
            product ^= a;
        }
        b <<= 1;
        // a *= x
        a = if a & 1 != 0 { (a >> 1) ^ POLY } else { a >> 1 };
        i += 1;
    }
    product
}

/// Multiply `value` by `x^exponent`, with `exponent` already reduced.
#[inline]
fn shift_reduced(mut value: u32, mut exponent: u64) -> u32 {
    debug_assert!(exponent < X_ORDER);
    while exponent != 0 {
        let k = exponent.trailing_zeros() as usize;
        value = multiply(value, X_POW_2K[k]);
        exponent &= exponent - 1;
    }
    value
}

/// Reduce a signed bit exponent modulo the order of `x`.
#[inline]
fn reduce_bits(n: i64) -> u64 {
    n.rem_euclid(X_ORDER as i64) as u64
}

/// Reduce a byte count to a bit exponent modulo the order of `x`.
#[inline]
fn reduce_bytes(len: u64) -> u64 {
    (len % X_ORDER) * 8 % X_ORDER
}

/// `x^n mod P`. Negative `n` yields the inverse power.
pub fn two_pow(n: i64) -> u32 {
    shift_reduced(ONE, reduce_bits(n))
}

/// `x^(8n) mod P`, the multiplier for appending `n` bytes.
pub fn two_fifty_six_pow(n: i64) -> u32 {
    let bytes = n.rem_euclid(X_ORDER as i64) as u64;
    shift_reduced(ONE, reduce_bytes(bytes))
}

/// CRC of `A ++ B` from `crc(A)`, `crc(B)` and `len(B)`.
pub fn combine(crc1: u32, crc2: u32, len2: u64) -> u32 {
    shift_reduced(crc1, reduce_bytes(len2)) ^ crc2
}

/// CRC after appending `len` zero bytes to a message whose CRC is `init`.
pub fn zeros(init: u32, len: u64) -> u32 {
    !shift_reduced(!init, reduce_bytes(len))
}

/// CRC before `len` trailing zero bytes were appended. Inverse of `zeros`.
pub fn unzero(init: u32, len: u64) -> u32 {
    let exponent = reduce_bytes(len);
    let inverse = if exponent == 0 { 0 } else { X_ORDER - exponent };
    !shift_reduced(!init, inverse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_is_multiplicative_identity() {
        for v in [0u32, 1, 0xDEAD_BEEF, POLY, ONE, 0xFFFF_FFFF] {
            assert_eq!(multiply(v, ONE), v);
            assert_eq!(multiply(ONE, v), v);
        }
    }

    #[test]
    fn multiply_is_commutative() {
        let a = 0x1234_5678;
        let b = 0x9ABC_DEF0;
        assert_eq!(multiply(a, b), multiply(b, a));
    }

    #[test]
    fn two_pow_small_exponents() {
        assert_eq!(two_pow(0), ONE);
        assert_eq!(two_pow(1), 0x4000_0000);
        assert_eq!(two_pow(8), 0x0080_0000);
        assert_eq!(two_pow(32), POLY);
    }

    #[test]
    fn x_has_order_two_pow_32_minus_one() {
        assert_eq!(two_pow(X_ORDER as i64), ONE);
        assert_eq!(two_pow(-(X_ORDER as i64)), ONE);
    }

    #[test]
    fn negative_exponent_is_inverse() {
        assert_eq!(two_pow(-1), 0xDB71_0641);
        assert_eq!(multiply(two_pow(-1), two_pow(1)), ONE);
        assert_eq!(multiply(two_pow(-12345), two_pow(12345)), ONE);
    }

    #[test]
    fn two_fifty_six_pow_is_eight_bit_shift() {
        for n in [0i64, 1, 3, 100, 65_536, 1 << 40] {
            assert_eq!(two_fifty_six_pow(n), two_pow((n % X_ORDER as i64) * 8));
        }
        assert_eq!(multiply(two_fifty_six_pow(-7), two_fifty_six_pow(7)), ONE);
    }

    #[test]
    fn combine_with_empty_second_part() {
        assert_eq!(combine(0xCAFE_BABE, 0, 0), 0xCAFE_BABE);
    }

    #[test]
    fn zeros_of_zero_length_is_identity() {
        assert_eq!(zeros(0x1234_5678, 0), 0x1234_5678);
        assert_eq!(unzero(0x1234_5678, 0), 0x1234_5678);
    }

    #[test]
    fn unzero_inverts_zeros_for_huge_lengths() {
        let c = 0x0BAD_F00D;
        for n in [1u64, 7, 1 << 33, u64::MAX] {
            assert_eq!(unzero(zeros(c, n), n), c);
        }
    }
}
