//! Conversion between limb sequences and text.
//!
//! Rendering works on unsigned magnitudes only. The presentation layer ([`format`])
//! takes a [`Signed`] view from the caller and adds the sign, base prefix and optional
//! constructor name around the digits.

use crate::{
    bases::{self, BaseEntry, MAX_DIGIT_BASE},
    error::{BigNumError, BigNumResult},
    kernel,
    limbs::{Limb, Limbs, LIMB_BITS},
    norm::{Sign, Signed},
};

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Name used by the wrapped representation, e.g. `rpmbc(0xff)`
pub const INITIALISER_NAME: &str = "rpmbc";

/// Upper bound on the number of digits of `x` in `base`. Exact for power-of-two bases,
/// possibly one too large otherwise. `base` must be in `2..=256`
pub fn size_in_base(x: &[Limb], base: u32) -> BigNumResult<usize> {
    let entry = BaseEntry::get(base)?;
    let nbits = kernel::bitcnt(x);

    if nbits == 0 {
        return Ok(1);
    }

    if bases::is_power_of_two(base) {
        Ok(nbits.div_ceil(entry.big_base) as usize)
    } else {
        Ok((nbits as f64 * entry.chars_per_bit_exactly) as usize + 1)
    }
}

/// Writes the digits of `x` into `buf`, right aligned. Positions left of the most
/// significant digit are filled with `'0'`; digits that do not fit are dropped
pub fn render_into(buf: &mut [u8], x: &[Limb], base: u32) -> BigNumResult<()> {
    if !(2..=MAX_DIGIT_BASE).contains(&base) {
        return Err(BigNumError::InvalidBase(base));
    }
    let entry = BaseEntry::get(base)?;

    buf.fill(b'0');

    if bases::is_power_of_two(base) {
        render_pow2(buf, x, entry.big_base);
    } else {
        render_big_base(buf, x, base, entry);
    }

    Ok(())
}

/// Digits of the unsigned value of `x` in `base`, most significant first, without
/// leading zeros. Zero renders as `"0"`
///
/// # Examples
/// ```
/// use rpmbc::convert::render;
///
/// assert_eq!(render(&[0, 255], 16).unwrap(), "ff");
/// assert_eq!(render(&[1, 0], 10).unwrap(), "4294967296");
/// ```
pub fn render(x: &[Limb], base: u32) -> BigNumResult<String> {
    let mut buf = vec![0; size_in_base(x, base)?];
    render_into(&mut buf, x, base)?;

    // The size estimate may leave unused capacity at the front
    let start = buf
        .iter()
        .position(|&c| c != b'0')
        .unwrap_or(buf.len() - 1);

    Ok(buf[start..].iter().map(|&c| c as char).collect())
}

fn render_pow2(buf: &mut [u8], x: &[Limb], bits: u32) {
    let total = x.len() as u32 * LIMB_BITS;
    let mask = (1 << bits) - 1;
    let mut pos = 0;

    for slot in buf.iter_mut().rev() {
        if pos >= total {
            break;
        }

        *slot = DIGITS[(bits_at(x, pos) & mask) as usize];
        pos += bits;
    }
}

/// The 32 bits of `x` starting at bit `pos` counted from the low end
fn bits_at(x: &[Limb], pos: u32) -> Limb {
    let limb = |i: usize| -> Limb {
        if i < x.len() {
            x[x.len() - 1 - i]
        } else {
            0
        }
    };
    let index = (pos / LIMB_BITS) as usize;
    let shift = pos % LIMB_BITS;

    if shift == 0 {
        limb(index)
    } else {
        (limb(index) >> shift) | (limb(index + 1) << (LIMB_BITS - shift))
    }
}

fn render_big_base(buf: &mut [u8], x: &[Limb], base: u32, entry: &BaseEntry) {
    let mut work = x.to_vec();
    let mut slots = buf.iter_mut().rev();

    while kernel::nz(&work) {
        // One division by big_base yields chars_per_limb digits at once
        let mut chunk = kernel::divmod_preinv(&mut work, entry.big_base, entry.big_base_inverted);

        for _ in 0..entry.chars_per_limb {
            let Some(slot) = slots.next() else {
                return;
            };

            *slot = DIGITS[(chunk % base) as usize];
            chunk /= base;
        }
    }
}

/// Parses base-16 text into ceil(digits / 8) limbs. An optional `0x` or `0X` prefix is
/// accepted; empty text gives a size-0 sequence
///
/// # Examples
/// ```
/// use rpmbc::convert::parse_hex;
///
/// let limbs = parse_hex("1ffffffff").unwrap();
/// assert_eq!(limbs.as_slice(), &[1, 0xffff_ffff]);
/// ```
pub fn parse_hex(text: &str) -> BigNumResult<Limbs> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);

    let nibbles_per_limb = (LIMB_BITS / 4) as usize;
    let size = digits.len().div_ceil(nibbles_per_limb);
    let mut limbs = Limbs::with_size(size);
    let mut limb = 0;
    // Digits before the first full limb boundary belong to the top limb
    let mut left = digits.len() % nibbles_per_limb;
    if left == 0 {
        left = nibbles_per_limb;
    }

    let mut index = 0;
    for c in digits.chars() {
        let nibble = c
            .to_digit(16)
            .ok_or_else(|| BigNumError::TypeCoercion(format!("invalid hex digit {:?}", c)))?;

        limb = (limb << 4) | nibble;
        left -= 1;

        if left == 0 {
            limbs[index] = limb;
            index += 1;
            limb = 0;
            left = nibbles_per_limb;
        }
    }

    Ok(limbs)
}

/// Renders a sign/magnitude view with the text grammar hosts display: an optional
/// `rpmbc(...)` wrapper, then `-` for negative values, then the base prefix (`0x` for
/// 16, `0` for 8, `NN#` or `N#` for other bases except 10), then the digits. Zero always
/// renders in base 10
///
/// # Examples
/// ```
/// use rpmbc::{convert::format, norm::signed};
///
/// assert_eq!(format(&signed(&[0, 255]), 16, true).unwrap(), "rpmbc(0xff)");
/// assert_eq!(format(&signed(&[0xffff_ffff]), 3, false).unwrap(), "-3#1");
/// ```
pub fn format(value: &Signed<'_>, base: u32, with_name: bool) -> BigNumResult<String> {
    if !(2..=MAX_DIGIT_BASE).contains(&base) {
        return Err(BigNumError::InvalidBase(base));
    }

    let magnitude = value.magnitude.as_ref();
    let (base, negative) = if kernel::z(magnitude) {
        // 0 looks the same in every base
        (10, false)
    } else {
        (base, value.sign == Sign::Minus)
    };

    let digits = render(magnitude, base)?;
    let mut text = String::with_capacity(INITIALISER_NAME.len() + digits.len() + 6);

    if with_name {
        text.push_str(INITIALISER_NAME);
        text.push('(');
    }
    if negative {
        text.push('-');
    }
    match base {
        16 => text.push_str("0x"),
        8 => text.push('0'),
        10 => (),
        _ => {
            text.push_str(&base.to_string());
            text.push('#');
        }
    }
    text.push_str(&digits);
    if with_name {
        text.push(')');
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::norm::signed;

    #[test]
    fn size_estimates() {
        assert_eq!(size_in_base(&[], 10).unwrap(), 1);
        assert_eq!(size_in_base(&[0, 0xff], 16).unwrap(), 2);
        assert_eq!(size_in_base(&[0x100], 16).unwrap(), 3);
        assert_eq!(size_in_base(&[0xff], 2).unwrap(), 8);
        assert_eq!(size_in_base(&[0xff], 8).unwrap(), 3);
        assert_eq!(size_in_base(&[255], 10).unwrap(), 3);
        // 512 has 10 bits, the estimate leaves room for a fourth digit
        assert_eq!(size_in_base(&[512], 10).unwrap(), 4);
        assert_eq!(size_in_base(&[0xffff_ffff, 0xffff_ffff], 10).unwrap(), 20);
        assert!(size_in_base(&[1], 1).is_err());
    }

    #[test]
    fn render_small_values() {
        assert_eq!(render(&[8], 10).unwrap(), "8");
        assert_eq!(render(&[512], 10).unwrap(), "512");
        assert_eq!(render(&[0, 255], 16).unwrap(), "ff");
        assert_eq!(render(&[8], 8).unwrap(), "10");
        assert_eq!(render(&[5], 2).unwrap(), "101");
        assert_eq!(render(&[35], 36).unwrap(), "z");
        assert_eq!(render(&[36], 36).unwrap(), "10");
        assert_eq!(render(&[10], 3).unwrap(), "101");
        assert_eq!(render(&[0xffff_ffff, 0xffff_ffff], 10).unwrap(), u64::MAX.to_string());
        assert_eq!(
            render(&[0xffff_ffff, 0xffff_ffff, 0xffff_ffff, 0xffff_ffff], 10).unwrap(),
            u128::MAX.to_string()
        );
        assert_eq!(render(&[1, 0], 32).unwrap(), "4000000");
    }

    #[test]
    fn render_zero_in_every_base() {
        for base in 2..=36 {
            assert_eq!(render(&[], base).unwrap(), "0");
            assert_eq!(render(&[0, 0], base).unwrap(), "0");
        }
    }

    #[test]
    fn render_rejects_bases_without_alphabet() {
        assert_eq!(render(&[1], 37), Err(BigNumError::InvalidBase(37)));
        assert_eq!(render(&[1], 0), Err(BigNumError::InvalidBase(0)));
    }

    #[test]
    fn render_matches_std_radix() {
        let values = [1u64, 7, 35, 36, 1295, 123_456_789, 0xdead_beef_cafe, u64::MAX];

        for base in 2..=36 {
            for v in values {
                let limbs = [(v >> 32) as Limb, v as Limb];
                let mut expected = Vec::new();
                let mut n = v;

                while n > 0 {
                    expected.push(DIGITS[(n % base as u64) as usize] as char);
                    n /= base as u64;
                }
                let expected: String = expected.into_iter().rev().collect();

                assert_eq!(render(&limbs, base).unwrap(), expected, "base {}", base);
            }
        }
    }

    #[test]
    fn render_into_pads_with_zeros() {
        let mut buf = [0u8; 6];
        render_into(&mut buf, &[255], 10).unwrap();
        assert_eq!(&buf, b"000255");
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex("ff").unwrap().as_slice(), &[0xff]);
        assert_eq!(parse_hex("0xFF").unwrap().as_slice(), &[0xff]);
        assert_eq!(parse_hex("12345678").unwrap().as_slice(), &[0x1234_5678]);
        assert_eq!(
            parse_hex("123456789").unwrap().as_slice(),
            &[0x1, 0x2345_6789]
        );
        assert_eq!(parse_hex("").unwrap().size(), 0);
        assert!(matches!(
            parse_hex("fg"),
            Err(BigNumError::TypeCoercion(_))
        ));
    }

    #[test]
    fn hex_round_trip() {
        for text in ["1", "ff", "deadbeef", "123456789abcdef0123", "80000000000000000"] {
            let limbs = parse_hex(text).unwrap();
            assert_eq!(render(&limbs, 16).unwrap(), text);
        }

        // Leading zeros do not survive
        assert_eq!(render(&parse_hex("000abc").unwrap(), 16).unwrap(), "abc");
    }

    #[test]
    fn presentation_prefixes() {
        let v = signed(&[0, 255]);

        assert_eq!(format(&v, 10, false).unwrap(), "255");
        assert_eq!(format(&v, 10, true).unwrap(), "rpmbc(255)");
        assert_eq!(format(&v, 16, false).unwrap(), "0xff");
        assert_eq!(format(&v, 8, false).unwrap(), "0377");
        assert_eq!(format(&v, 2, false).unwrap(), "2#11111111");
        assert_eq!(format(&v, 12, false).unwrap(), "12#193");
        assert_eq!(format(&v, 36, true).unwrap(), "rpmbc(36#73)");
    }

    #[test]
    fn presentation_sign_and_zero() {
        let minus_one = signed(&[0xffff_ffff, 0xffff_ffff]);
        assert_eq!(format(&minus_one, 10, false).unwrap(), "-1");
        assert_eq!(format(&minus_one, 16, true).unwrap(), "rpmbc(-0x1)");

        let zero = Signed {
            sign: Sign::Plus,
            magnitude: Cow::Borrowed(&[] as &[Limb]),
        };
        for base in 2..=36 {
            assert_eq!(format(&zero, base, false).unwrap(), "0");
        }
        assert_eq!(format(&zero, 16, true).unwrap(), "rpmbc(0)");
        assert!(format(&zero, 40, false).is_err());
    }
}
