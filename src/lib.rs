use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display},
    str::FromStr,
};

use log::{debug, trace, LevelFilter};

#[macro_use]
mod macros;

pub mod bases;
pub mod coerce;
pub mod convert;
pub mod error;
pub mod kernel;
pub mod limbs;
pub mod norm;
mod ops;
pub mod random;

pub use coerce::Input;
pub use error::{BigNumError, BigNumResult};
pub use limbs::{Limb, Limbs, LIMB_BITS};
pub use random::{RandomBigNum, UniformBigNum};

use kernel::Workspace;

/// Fixed-width two's-complement integer on 32-bit limbs.
///
/// The width of a value is the number of limbs it was built with and arithmetic stays
/// inside it: sums and differences keep the width of the left operand, products are as
/// wide as both operands together, and bits carried out of the top are dropped. The sign
/// is the top bit of the most significant limb.
///
/// Comparison, division and gcd read the encoding as an unsigned quantity, so a negative
/// value compares above every positive one of the same width.
///
/// # Examples
/// ```
/// use rpmbc::BigNum;
///
/// let a = BigNum::from(3);
/// let b = BigNum::from(5);
/// assert_eq!((&a + &b).to_string(), "8");
///
/// let (q, r) = BigNum::from(17).divmod(&BigNum::from(5)).unwrap();
/// assert_eq!((q, r), (BigNum::from(3), BigNum::from(2)));
///
/// assert_eq!(BigNum::from(255).hex(), "rpmbc(0xff)");
/// assert_eq!(BigNum::from_hex("ff").unwrap(), BigNum::from(255));
/// ```
#[derive(Clone, Default)]
pub struct BigNum {
    n: Limbs,
}

impl BigNum {
    /// Size 0, holds no storage
    pub const fn zero() -> Self {
        Self { n: Limbs::zero() }
    }

    /// Builds a value from any supported input, see [`Input`]
    pub fn new<'a>(input: impl Into<Input<'a>>) -> BigNumResult<Self> {
        coerce::coerce(input.into())
    }

    /// Single limb holding `w`
    pub fn from_word(w: Limb) -> Self {
        Self::from_limbs(Limbs::from_word(w))
    }

    /// Two limbs holding the 64-bit two's complement of `l`
    pub fn from_i64(l: i64) -> Self {
        Self::from_limbs(coerce::int_limbs(l))
    }

    /// `d` rounded to the nearest integer, saturating at the bounds of `i64`
    pub fn from_f64(d: f64) -> Self {
        Self::from_i64(d.round() as i64)
    }

    pub fn from_hex(text: &str) -> BigNumResult<Self> {
        Ok(Self::from_limbs(convert::parse_hex(text)?))
    }

    /// Takes `limbs` as the encoding, most significant first
    pub fn from_limbs(limbs: impl Into<Limbs>) -> Self {
        Self { n: limbs.into() }
    }

    pub fn limbs(&self) -> &[Limb] {
        &self.n
    }

    /// Width in limbs
    pub fn size(&self) -> usize {
        self.n.size()
    }

    /// Changes the width, keeping the low-order limbs
    pub fn resize(&mut self, size: usize) {
        trace!("resize {} -> {} limbs", self.size(), size);

        self.n.resize(size);
    }

    /// Releases the storage. The value reads as 0 afterwards
    pub fn free(&mut self) {
        trace!("free {} limbs", self.size());

        self.n.free();
    }

    pub fn is_zero(&self) -> bool {
        kernel::z(&self.n)
    }

    /// Truth test
    pub fn is_nonzero(&self) -> bool {
        kernel::nz(&self.n)
    }

    pub fn is_negative(&self) -> bool {
        norm::is_negative(&self.n)
    }

    /// Number of significant bits of the unsigned encoding
    pub fn bit_count(&self) -> u32 {
        kernel::bitcnt(&self.n)
    }

    /// Three-way comparison of the encodings, returning -1, 0 or 1
    pub fn compare(&self, other: &Self) -> i32 {
        let ret = if kernel::eqx(&self.n, &other.n) {
            0
        } else if kernel::gtx(&self.n, &other.n) {
            1
        } else {
            -1
        };

        trace!("compare {:?} {:?} -> {}", self, other, ret);
        ret
    }

    /// Sign/magnitude view of the encoding
    pub fn signed(&self) -> norm::Signed<'_> {
        norm::signed(&self.n)
    }

    /// Quotient and remainder of the unsigned division, both as wide as `self`
    pub fn divmod(&self, rhs: &Self) -> BigNumResult<(Self, Self)> {
        let (q, r) = self.long_division(rhs, "divmod")?;

        debug!("divmod {:?} {:?} -> ({:?}, {:?})", self, rhs, q, r);
        Ok((q, r))
    }

    /// Truncating division. Fails instead of panicking on a zero divisor
    pub fn try_div(&self, rhs: &Self) -> BigNumResult<Self> {
        let (q, _) = self.long_division(rhs, "divide")?;

        debug!("divide {:?} {:?} -> {:?}", self, rhs, q);
        Ok(q)
    }

    pub fn try_rem(&self, rhs: &Self) -> BigNumResult<Self> {
        let y = norm::significant(&rhs.n);

        if y.is_empty() {
            return Err(BigNumError::DivisionByZero("remainder"));
        }

        let z = if self.size() < y.len() {
            self.clone()
        } else {
            let mut result = vec![0; self.size() + 1];
            let mut wksp = Workspace::for_division(y.len());

            kernel::nmod(&mut result, &self.n, y, &mut wksp)?;
            result.remove(0);

            Self::from_limbs(result)
        };

        debug!("remainder {:?} {:?} -> {:?}", self, rhs, z);
        Ok(z)
    }

    /// `self /= rhs` keeping the width of `self`. `self` is unchanged on error
    pub fn try_div_assign(&mut self, rhs: &Self) -> BigNumResult<()> {
        let q = self.try_div(rhs)?;
        self.n.replace(q.n.into_vec());

        Ok(())
    }

    pub fn try_rem_assign(&mut self, rhs: &Self) -> BigNumResult<()> {
        let r = self.try_rem(rhs)?;
        self.n.replace(r.n.into_vec());

        Ok(())
    }

    /// Divides by the normalized divisor. A dividend narrower than the divisor is already
    /// smaller than it
    fn long_division(&self, rhs: &Self, op: &'static str) -> BigNumResult<(Self, Self)> {
        let x = self.limbs();
        let y = norm::significant(&rhs.n);

        if y.is_empty() {
            return Err(BigNumError::DivisionByZero(op));
        }
        if x.len() < y.len() {
            return Ok((Self::from_limbs(Limbs::with_size(x.len())), self.clone()));
        }

        let mut result = vec![0; x.len() + 1];
        let mut wksp = Workspace::for_division(y.len());
        kernel::ndivmod(&mut result, x, y, &mut wksp)?;

        let quotient_size = x.len() - y.len() + 1;
        let mut q = Limbs::from(&result[..quotient_size]);
        let mut r = Limbs::from(&result[quotient_size..]);
        q.resize(x.len());
        r.resize(x.len());

        Ok((Self::from_limbs(q), Self::from_limbs(r)))
    }

    /// Copy of `self`. `exp` and `modulus` are ignored, no power is computed
    pub fn pow(&self, exp: &Self, modulus: Option<&Self>) -> Self {
        debug!("power {:?} {:?} {:?} -> {:?}", self, exp, modulus, self);

        self.clone()
    }

    /// In-place counterpart of [`BigNum::pow`], leaves `self` unchanged
    pub fn pow_assign(&mut self, exp: &Self, modulus: Option<&Self>) {
        debug!("inplace power {:?} {:?} {:?}", self, exp, modulus);
    }

    /// Unary plus
    pub fn plus(&self) -> Self {
        self.clone()
    }

    /// Negation of `self` at the same width when the sign bit is set, else a copy
    pub fn abs(&self) -> Self {
        let z = Self::from_limbs(norm::absolute(&self.n).into_owned());

        debug!("absolute {:?} -> {:?}", self, z);
        z
    }

    /// Left shift by the value of `count`, which must fit in one limb
    pub fn try_shl(&self, count: &Self) -> BigNumResult<Self> {
        let count = norm::single_limb(&count.n, "shift")?;
        Ok(self << count)
    }

    /// Logical right shift by the value of `count`, which must fit in one limb
    pub fn try_shr(&self, count: &Self) -> BigNumResult<Self> {
        let count = norm::single_limb(&count.n, "shift")?;
        Ok(self >> count)
    }

    pub fn try_shl_assign(&mut self, count: &Self) -> BigNumResult<()> {
        let count = norm::single_limb(&count.n, "shift")?;
        *self <<= count;

        Ok(())
    }

    pub fn try_shr_assign(&mut self, count: &Self) -> BigNumResult<()> {
        let count = norm::single_limb(&count.n, "shift")?;
        *self >>= count;

        Ok(())
    }

    /// Signed 32-bit value of the single significant limb
    pub fn to_int(&self) -> BigNumResult<i32> {
        let l = norm::single_limb(&self.n, "to_int")?;

        trace!("to_int {:?} -> {:#010x}", self, l);
        Ok(l as i32)
    }

    /// The single significant limb, zero-extended
    pub fn to_long(&self) -> BigNumResult<i64> {
        let l = norm::single_limb(&self.n, "to_long")?;

        trace!("to_long {:?} -> {:#010x}", self, l);
        Ok(l as i64)
    }

    /// Value of the base-10 rendering, sign included
    pub fn to_f64(&self) -> BigNumResult<f64> {
        let text = self.format(10, false)?;
        let d = text
            .parse()
            .map_err(|e: std::num::ParseFloatError| BigNumError::TypeCoercion(e.to_string()))?;

        trace!("to_f64 {:?} -> {}", self, d);
        Ok(d)
    }

    /// Renders in `base` (2..=36) with the sign/prefix grammar of
    /// [`convert::format`](crate::convert::format)
    pub fn format(&self, base: u32, with_name: bool) -> BigNumResult<String> {
        convert::format(&self.signed(), base, with_name)
    }

    /// Name-wrapped octal, e.g. `rpmbc(010)`
    pub fn oct(&self) -> String {
        self.present(8, true)
    }

    /// Name-wrapped hexadecimal, e.g. `rpmbc(0xff)`
    pub fn hex(&self) -> String {
        self.present(16, true)
    }

    /// Name-wrapped decimal, e.g. `rpmbc(8)`
    pub fn repr(&self) -> String {
        self.present(10, true)
    }

    // Only called with bases that have an alphabet
    fn present(&self, base: u32, with_name: bool) -> String {
        self.format(base, with_name).unwrap_or_default()
    }
}

/// Greatest common divisor of the unsigned encodings. The narrower operand is
/// zero-extended and the result is as wide as the wider one
pub fn gcd(a: &BigNum, b: &BigNum) -> BigNum {
    let size = a.size().max(b.size());
    let (mut x, mut y) = (a.n.clone(), b.n.clone());
    x.resize(size);
    y.resize(size);

    let mut result = vec![0; size];
    let mut wksp = Workspace::for_gcd(size);
    kernel::gcd_w(&mut result, &x, &y, &mut wksp);

    let z = BigNum::from_limbs(result);
    debug!("gcd {:?} {:?} -> {:?}", a, b, z);

    z
}

/// Square of `a`, twice as wide. Despite the name no root is taken
pub fn sqrt(a: &BigNum) -> BigNum {
    let mut result = vec![0; 2 * a.size()];
    kernel::sqr(&mut result, &a.n);

    let z = BigNum::from_limbs(result);
    debug!("sqrt {:?} -> {:?}", a, z);

    z
}

/// Sets the log verbosity: 0 logs warnings only, a positive level adds every operation
/// and a negative level also traces storage changes
pub fn set_debug(level: i32) {
    let filter = match level.cmp(&0) {
        Ordering::Equal => LevelFilter::Warn,
        Ordering::Greater => LevelFilter::Debug,
        Ordering::Less => LevelFilter::Trace,
    };

    log::set_max_level(filter);
    trace!("debug level {}", level);
}

impl PartialEq for BigNum {
    fn eq(&self, other: &Self) -> bool {
        kernel::eqx(&self.n, &other.n)
    }
}

impl Eq for BigNum {}

impl Ord for BigNum {
    fn cmp(&self, other: &Self) -> Ordering {
        kernel::cmpx(&self.n, &other.n)
    }
}

impl PartialOrd for BigNum {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for BigNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.format(10, false).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl Debug for BigNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.format(10, true).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for BigNum {
    type Err = BigNumError;

    /// Parses base-16 digits
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<&BigNum> for i32 {
    type Error = BigNumError;

    fn try_from(value: &BigNum) -> Result<Self, Self::Error> {
        value.to_int()
    }
}

impl TryFrom<&BigNum> for i64 {
    type Error = BigNumError;

    fn try_from(value: &BigNum) -> Result<Self, Self::Error> {
        value.to_long()
    }
}

impl TryFrom<&BigNum> for f64 {
    type Error = BigNumError;

    fn try_from(value: &BigNum) -> Result<Self, Self::Error> {
        value.to_f64()
    }
}

impl From<Limbs> for BigNum {
    fn from(n: Limbs) -> Self {
        Self { n }
    }
}

bignum_native_impl!(i64);
bignum_native_impl!(i32);
bignum_native_impl!(i16);
bignum_native_impl!(i8);
bignum_native_impl!(u64);
bignum_native_impl!(u16);
bignum_native_impl!(u8);
bignum_native_impl!(u32);
bignum_native_impl!(f64);
