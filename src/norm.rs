//! Normalization and sign handling on top of the raw two's-complement encoding.
//!
//! Storage always keeps the fixed-width encoding, with the sign in the top bit of the
//! most significant limb. Code that needs a sign/magnitude split (rendering, absolute
//! value) asks for a [`Signed`] view instead of re-deriving it.

use std::borrow::Cow;

use crate::{
    error::{BigNumError, BigNumResult},
    kernel,
    limbs::{Limb, LIMB_BITS},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

/// Explicit sign plus an unsigned, normalized magnitude
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signed<'a> {
    pub sign: Sign,
    pub magnitude: Cow<'a, [Limb]>,
}

/// Number of leading limbs that hold no significant bits
pub fn leading_zero_limbs(x: &[Limb]) -> usize {
    (kernel::mszcnt(x) / LIMB_BITS) as usize
}

/// Number of limbs needed to hold the significant bits of `x`
pub fn significant_size(x: &[Limb]) -> usize {
    kernel::bitcnt(x).div_ceil(LIMB_BITS) as usize
}

/// The minimal suffix of `x` with the same unsigned value. Empty for zero
pub fn significant(x: &[Limb]) -> &[Limb] {
    &x[x.len() - significant_size(x)..]
}

pub fn is_negative(x: &[Limb]) -> bool {
    kernel::msbset(x)
}

pub fn negated(x: &[Limb]) -> Vec<Limb> {
    let mut z = x.to_vec();
    kernel::neg(&mut z);

    z
}

/// `x` itself when the sign bit is clear, otherwise its negation at the same width
pub fn absolute(x: &[Limb]) -> Cow<'_, [Limb]> {
    if is_negative(x) {
        Cow::Owned(negated(x))
    } else {
        Cow::Borrowed(x)
    }
}

/// Splits the full-width encoding into a sign and a normalized magnitude. The most
/// negative value of a width keeps its bit pattern, which read as unsigned is exactly
/// its magnitude
pub fn signed(x: &[Limb]) -> Signed<'_> {
    if is_negative(x) {
        let magnitude = negated(x);
        let skip = leading_zero_limbs(&magnitude);

        Signed {
            sign: Sign::Minus,
            magnitude: Cow::Owned(magnitude[skip..].to_vec()),
        }
    } else {
        Signed {
            sign: Sign::Plus,
            magnitude: Cow::Borrowed(significant(x)),
        }
    }
}

/// The value of `x` as a single limb, for callers that need a native-sized count or
/// integer. Fails with `ValueTooLarge` naming `what` when more than one limb is
/// significant
pub fn single_limb(x: &[Limb], what: &'static str) -> BigNumResult<Limb> {
    match significant(x) {
        [] => Ok(0),
        [l] => Ok(*l),
        _ => Err(BigNumError::ValueTooLarge(what)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn significant_prefix() {
        assert_eq!(significant(&[0, 0, 5, 0]), &[5, 0]);
        assert_eq!(significant(&[0, 0]), &[] as &[Limb]);
        assert_eq!(significant(&[]), &[] as &[Limb]);
        assert_eq!(significant(&[0, 0x8000_0000, 1]), &[0x8000_0000, 1]);
        assert_eq!(significant_size(&[0, 1, 0]), 2);
        assert_eq!(significant_size(&[0, 0]), 0);
        assert_eq!(leading_zero_limbs(&[0, 0, 0x8000_0000]), 2);
    }

    #[test]
    fn sign_views() {
        // -1 at 64 bits
        let minus_one = [0xffff_ffff, 0xffff_ffff];
        let view = signed(&minus_one);
        assert_eq!(view.sign, Sign::Minus);
        assert_eq!(view.magnitude.as_ref(), &[1]);

        let view = signed(&[0, 255]);
        assert_eq!(view.sign, Sign::Plus);
        assert_eq!(view.magnitude.as_ref(), &[255]);

        let view = signed(&[0x8000_0000]);
        assert_eq!(view.sign, Sign::Minus);
        assert_eq!(view.magnitude.as_ref(), &[0x8000_0000]);

        assert_eq!(signed(&[]).magnitude.as_ref(), &[] as &[Limb]);
    }

    #[test]
    fn absolute_is_idempotent() {
        let x = [0xffff_fff0, 0x0000_0010];
        let once = absolute(&x).into_owned();
        let twice = absolute(&once).into_owned();

        assert_eq!(once, negated(&x));
        assert_eq!(once, twice);
        assert!(matches!(absolute(&[0, 3]), Cow::Borrowed(_)));
    }

    #[test]
    fn single_limb_counts() {
        assert_eq!(single_limb(&[], "shift"), Ok(0));
        assert_eq!(single_limb(&[0, 0, 7], "shift"), Ok(7));
        assert_eq!(
            single_limb(&[1, 0], "shift"),
            Err(BigNumError::ValueTooLarge("shift"))
        );
    }
}
