//! Conversion of host inputs into [`BigNum`] values.
//!
//! Everything a caller may hand to a constructor or an operator is first described as an
//! [`Input`]; [`coerce`] is the only place that turns one into limbs.

use log::trace;

use crate::{
    convert,
    error::{BigNumError, BigNumResult},
    limbs::{Limb, Limbs, LIMB_BITS},
    BigNum,
};

/// The supported constructor inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input<'a> {
    /// No argument, reads as 0
    None,
    /// A single unsigned word
    Word(Limb),
    /// A native integer, stored as 64-bit two's complement
    Int(i64),
    /// Rounded to the nearest integer. Values outside the `i64` range saturate
    Float(f64),
    /// Base-16 digits, optionally prefixed with `0x`
    Text(&'a str),
    /// Copied as is, keeping its width
    BigNum(&'a BigNum),
    /// Anything else, named by its type. Always fails
    Unsupported(&'a str),
}

/// Builds a value from `input`. Native integers become two limbs, words one limb and hex
/// text `ceil(digits / 8)` limbs
pub fn coerce(input: Input<'_>) -> BigNumResult<BigNum> {
    let limbs = match input {
        Input::None => Limbs::from_word(0),
        Input::Word(w) => Limbs::from_word(w),
        Input::Int(l) => int_limbs(l),
        Input::Float(d) => int_limbs(d.round() as i64),
        Input::Text(text) => convert::parse_hex(text)?,
        Input::BigNum(n) => Limbs::from(n.limbs()),
        Input::Unsupported(name) => {
            return Err(BigNumError::TypeCoercion(name.to_string()));
        }
    };

    trace!("coerced {:?} into {} limbs", input, limbs.size());

    Ok(BigNum::from_limbs(limbs))
}

pub(crate) fn int_limbs(l: i64) -> Limbs {
    let l = l as u64;

    Limbs::from(vec![(l >> LIMB_BITS) as Limb, l as Limb])
}

impl From<Limb> for Input<'_> {
    fn from(w: Limb) -> Self {
        Input::Word(w)
    }
}

macro_rules! input_from_int {
    ( $($t:ty),* ) => {
        $(
            impl From<$t> for Input<'_> {
                fn from(l: $t) -> Self {
                    Input::Int(l as i64)
                }
            }
        )*
    };
}

input_from_int!(i64, i32, i16, i8, u64, u16, u8);

impl From<f64> for Input<'_> {
    fn from(d: f64) -> Self {
        Input::Float(d)
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a BigNum> for Input<'a> {
    fn from(n: &'a BigNum) -> Self {
        Input::BigNum(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_one_zero_limb() {
        let n = coerce(Input::None).unwrap();
        assert_eq!(n.limbs(), &[0]);
        assert!(n.is_zero());
    }

    #[test]
    fn widths() {
        assert_eq!(coerce(Input::Word(7)).unwrap().limbs(), &[7]);
        assert_eq!(coerce(Input::Int(255)).unwrap().limbs(), &[0, 255]);
        assert_eq!(
            coerce(Input::Int(-1)).unwrap().limbs(),
            &[0xffff_ffff, 0xffff_ffff]
        );
        assert_eq!(
            coerce(Input::Text("123456789")).unwrap().limbs(),
            &[1, 0x2345_6789]
        );
    }

    #[test]
    fn floats_round() {
        assert_eq!(coerce(Input::Float(2.5)).unwrap().limbs(), &[0, 3]);
        assert_eq!(coerce(Input::Float(2.4)).unwrap().limbs(), &[0, 2]);
        assert_eq!(
            coerce(Input::Float(-2.6)).unwrap().limbs(),
            &[0xffff_ffff, 0xffff_fffd]
        );
        assert_eq!(
            coerce(Input::Float(f64::INFINITY)).unwrap().limbs(),
            &[0x7fff_ffff, 0xffff_ffff]
        );
    }

    #[test]
    fn copies_keep_width() {
        let n = BigNum::from_limbs(vec![0, 0, 9]);
        assert_eq!(coerce(Input::BigNum(&n)).unwrap().limbs(), &[0, 0, 9]);
    }

    #[test]
    fn failures() {
        assert_eq!(
            coerce(Input::Unsupported("list")),
            Err(BigNumError::TypeCoercion("list".to_string()))
        );
        assert!(matches!(
            coerce(Input::Text("xyz")),
            Err(BigNumError::TypeCoercion(_))
        ));
    }

    #[test]
    fn conversions_into_input() {
        assert_eq!(Input::from(5u32), Input::Word(5));
        assert_eq!(Input::from(-5i64), Input::Int(-5));
        assert_eq!(Input::from(-5i8), Input::Int(-5));
        assert_eq!(Input::from(200u8), Input::Int(200));
        assert_eq!(Input::from(u64::MAX), Input::Int(-1));
        assert_eq!(Input::from(2.5), Input::Float(2.5));
        assert_eq!(Input::from("ff"), Input::Text("ff"));
    }
}
