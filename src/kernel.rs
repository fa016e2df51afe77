//! Limb-level arithmetic. Every function here works on plain limb slices, most
//! significant limb first, and writes its result in the fixed width of the destination.
//! Nothing in this module allocates except [`Workspace`], and the only reported failure
//! is a division by zero.

use std::{
    cmp::Ordering,
    ops::{Deref, DerefMut},
};

use crate::{
    error::{BigNumError, BigNumResult},
    limbs::{Limb, LIMB_BITS},
};

const LIMB_MAX: u64 = Limb::MAX as u64;

/// Scratch space for a single division or gcd call. It is sized exactly for the call
/// and released when dropped
#[derive(Debug)]
pub struct Workspace {
    wksp: Vec<Limb>,
}

impl Workspace {
    /// Holds one divisor-sized partial product plus its carry limb
    pub fn for_division(divisor_size: usize) -> Self {
        Self {
            wksp: vec![0; divisor_size + 1],
        }
    }

    pub fn for_gcd(size: usize) -> Self {
        Self {
            wksp: vec![0; size],
        }
    }
}

impl Deref for Workspace {
    type Target = [Limb];

    fn deref(&self) -> &Self::Target {
        &self.wksp
    }
}

impl DerefMut for Workspace {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.wksp
    }
}

pub fn z(x: &[Limb]) -> bool {
    x.iter().all(|&l| l == 0)
}

pub fn nz(x: &[Limb]) -> bool {
    !z(x)
}

/// Tests the sign bit, e.g. the top bit of the most significant limb
pub fn msbset(x: &[Limb]) -> bool {
    x.first().is_some_and(|&l| l >> (LIMB_BITS - 1) != 0)
}

pub fn lsbset(x: &[Limb]) -> bool {
    x.last().is_some_and(|&l| l & 1 != 0)
}

/// Number of leading zero bits. An all-zero sequence counts every bit
pub fn mszcnt(x: &[Limb]) -> u32 {
    let mut count = 0;

    for &l in x {
        if l != 0 {
            return count + l.leading_zeros();
        }
        count += LIMB_BITS;
    }

    count
}

/// Number of trailing zero bits. An all-zero sequence counts every bit
pub fn lszcnt(x: &[Limb]) -> u32 {
    let mut count = 0;

    for &l in x.iter().rev() {
        if l != 0 {
            return count + l.trailing_zeros();
        }
        count += LIMB_BITS;
    }

    count
}

/// Number of significant bits, e.g. the index of the highest set bit plus one
pub fn bitcnt(x: &[Limb]) -> u32 {
    x.len() as u32 * LIMB_BITS - mszcnt(x)
}

pub fn zero(x: &mut [Limb]) {
    x.fill(0);
}

/// Compares two sequences of equal width
pub fn cmp(x: &[Limb], y: &[Limb]) -> Ordering {
    debug_assert_eq!(x.len(), y.len());

    x.cmp(y)
}

/// Compares two sequences of any width, zero-extending the shorter one
pub fn cmpx(x: &[Limb], y: &[Limb]) -> Ordering {
    match x.len().cmp(&y.len()) {
        Ordering::Greater => {
            let (high, low) = x.split_at(x.len() - y.len());

            if nz(high) {
                Ordering::Greater
            } else {
                low.cmp(y)
            }
        }
        Ordering::Less => {
            let (high, low) = y.split_at(y.len() - x.len());

            if nz(high) {
                Ordering::Less
            } else {
                x.cmp(low)
            }
        }
        Ordering::Equal => x.cmp(y),
    }
}

pub fn eqx(x: &[Limb], y: &[Limb]) -> bool {
    cmpx(x, y) == Ordering::Equal
}

pub fn gtx(x: &[Limb], y: &[Limb]) -> bool {
    cmpx(x, y) == Ordering::Greater
}

/// Adds a single word at the low end, returns the carry out of the top
pub fn addw(x: &mut [Limb], w: Limb) -> Limb {
    let mut carry = w;

    for l in x.iter_mut().rev() {
        if carry == 0 {
            break;
        }

        let (sum, over) = l.overflowing_add(carry);
        *l = sum;
        carry = over as Limb;
    }

    carry
}

/// Subtracts a single word at the low end, returns the borrow out of the top
pub fn subw(x: &mut [Limb], w: Limb) -> Limb {
    let mut borrow = w;

    for l in x.iter_mut().rev() {
        if borrow == 0 {
            break;
        }

        let (diff, under) = l.overflowing_sub(borrow);
        *l = diff;
        borrow = under as Limb;
    }

    borrow
}

/// `x += y` for operands of equal width
pub fn add(x: &mut [Limb], y: &[Limb]) -> Limb {
    debug_assert_eq!(x.len(), y.len());

    let mut carry = false;

    for (a, &b) in x.iter_mut().zip(y).rev() {
        let (sum, c1) = a.overflowing_add(b);
        let (sum, c2) = sum.overflowing_add(carry as Limb);

        *a = sum;
        carry = c1 || c2;
    }

    carry as Limb
}

/// `x -= y` for operands of equal width
pub fn sub(x: &mut [Limb], y: &[Limb]) -> Limb {
    debug_assert_eq!(x.len(), y.len());

    let mut borrow = false;

    for (a, &b) in x.iter_mut().zip(y).rev() {
        let (diff, b1) = a.overflowing_sub(b);
        let (diff, b2) = diff.overflowing_sub(borrow as Limb);

        *a = diff;
        borrow = b1 || b2;
    }

    borrow as Limb
}

/// `x += y` aligned at the low end. `x` keeps its width: when `y` is wider its excess
/// high limbs are ignored, and the carry out of `x` is returned rather than stored
pub fn addx(x: &mut [Limb], y: &[Limb]) -> Limb {
    if x.len() >= y.len() {
        let split = x.len() - y.len();
        let (high, low) = x.split_at_mut(split);
        let carry = add(low, y);

        addw(high, carry)
    } else {
        add(x, &y[y.len() - x.len()..])
    }
}

/// `x -= y` aligned at the low end, with the same width rules as [`addx`]
pub fn subx(x: &mut [Limb], y: &[Limb]) -> Limb {
    if x.len() >= y.len() {
        let split = x.len() - y.len();
        let (high, low) = x.split_at_mut(split);
        let borrow = sub(low, y);

        subw(high, borrow)
    } else {
        sub(x, &y[y.len() - x.len()..])
    }
}

pub fn not(x: &mut [Limb]) {
    for l in x.iter_mut() {
        *l = !*l;
    }
}

/// Two's complement negation
pub fn neg(x: &mut [Limb]) {
    not(x);
    addw(x, 1);
}

pub fn and(x: &mut [Limb], y: &[Limb]) {
    debug_assert_eq!(x.len(), y.len());

    for (a, &b) in x.iter_mut().zip(y) {
        *a &= b;
    }
}

pub fn or(x: &mut [Limb], y: &[Limb]) {
    debug_assert_eq!(x.len(), y.len());

    for (a, &b) in x.iter_mut().zip(y) {
        *a |= b;
    }
}

pub fn xor(x: &mut [Limb], y: &[Limb]) {
    debug_assert_eq!(x.len(), y.len());

    for (a, &b) in x.iter_mut().zip(y) {
        *a ^= b;
    }
}

/// `result = x * y`, returns the limb that did not fit
pub fn setmul(result: &mut [Limb], x: &[Limb], y: Limb) -> Limb {
    debug_assert_eq!(result.len(), x.len());

    let mut carry = 0u64;

    for (r, &a) in result.iter_mut().zip(x).rev() {
        let t = a as u64 * y as u64 + carry;

        *r = t as Limb;
        carry = t >> LIMB_BITS;
    }

    carry as Limb
}

/// `result += x * y`, returns the limb that did not fit
pub fn addmul(result: &mut [Limb], x: &[Limb], y: Limb) -> Limb {
    debug_assert_eq!(result.len(), x.len());

    let mut carry = 0u64;

    for (r, &a) in result.iter_mut().zip(x).rev() {
        // (2^32 - 1)^2 + 2 * (2^32 - 1) == 2^64 - 1, so this never overflows
        let t = *r as u64 + a as u64 * y as u64 + carry;

        *r = t as Limb;
        carry = t >> LIMB_BITS;
    }

    carry as Limb
}

/// Schoolbook product. `result` must be exactly `x.len() + y.len()` limbs
pub fn mul(result: &mut [Limb], x: &[Limb], y: &[Limb]) {
    assert_eq!(result.len(), x.len() + y.len(), "product width mismatch");

    let m = x.len();
    result.fill(0);

    // Rows go from the low limb of y upwards, so result[j] is still untouched when the
    // carry of row j lands in it
    for (j, &w) in y.iter().enumerate().rev() {
        result[j] = addmul(&mut result[j + 1..j + 1 + m], x, w);
    }
}

/// `result = x * x`. `result` must be exactly `2 * x.len()` limbs
pub fn sqr(result: &mut [Limb], x: &[Limb]) {
    let n = x.len();
    assert_eq!(result.len(), 2 * n, "square width mismatch");

    result.fill(0);

    // Cross products x[i] * x[j] for i < j, each counted once
    for j in (1..n).rev() {
        result[j] = addmul(&mut result[j + 1..2 * j + 1], &x[..j], x[j]);
    }

    lshift(result, 1);

    for (i, &w) in x.iter().enumerate().rev() {
        let square = w as u64 * w as u64;

        addx(
            &mut result[..2 * i + 2],
            &[(square >> LIMB_BITS) as Limb, square as Limb],
        );
    }
}

/// Logical left shift within the width of `x`; bits moved past the top are lost
pub fn lshift(x: &mut [Limb], count: u32) {
    let len = x.len();
    let limbs = (count / LIMB_BITS) as usize;
    let bits = count % LIMB_BITS;

    if limbs >= len {
        x.fill(0);
        return;
    }

    for i in 0..len - limbs {
        let src = i + limbs;
        let mut l = x[src] << bits;

        if bits > 0 && src + 1 < len {
            l |= x[src + 1] >> (LIMB_BITS - bits);
        }

        x[i] = l;
    }

    x[len - limbs..].fill(0);
}

/// Logical right shift, zero bits come in at the top
pub fn rshift(x: &mut [Limb], count: u32) {
    let len = x.len();
    let limbs = (count / LIMB_BITS) as usize;
    let bits = count % LIMB_BITS;

    if limbs >= len {
        x.fill(0);
        return;
    }

    for i in (limbs..len).rev() {
        let src = i - limbs;
        let mut l = x[src] >> bits;

        if bits > 0 && src > 0 {
            l |= x[src - 1] << (LIMB_BITS - bits);
        }

        x[i] = l;
    }

    x[..limbs].fill(0);
}

/// Long division of `x` by the normalized divisor `y` (no leading zero limbs).
///
/// `result` must be `x.len() + 1` limbs and `wksp` at least `y.len() + 1`. On return the
/// first `x.len() - y.len() + 1` limbs of `result` hold the quotient and the last
/// `y.len()` limbs hold the remainder.
///
/// # Examples
/// ```
/// use rpmbc::kernel::{ndivmod, Workspace};
///
/// let mut result = [0; 3];
/// let mut wksp = Workspace::for_division(1);
/// ndivmod(&mut result, &[0, 17], &[5], &mut wksp).unwrap();
///
/// assert_eq!(result, [0, 3, 2]);
/// ```
pub fn ndivmod(
    result: &mut [Limb],
    x: &[Limb],
    y: &[Limb],
    wksp: &mut [Limb],
) -> BigNumResult<()> {
    if z(y) {
        return Err(BigNumError::DivisionByZero("divide"));
    }
    check_division(result, x, y, wksp);

    result[0] = 0;
    result[1..].copy_from_slice(x);
    divide_in_place(result, y, wksp);

    Ok(())
}

/// Remainder of `x` by the normalized divisor `y`, with the same sizing rules as
/// [`ndivmod`]. The whole of `result` holds the remainder, zero-extended
pub fn nmod(result: &mut [Limb], x: &[Limb], y: &[Limb], wksp: &mut [Limb]) -> BigNumResult<()> {
    if z(y) {
        return Err(BigNumError::DivisionByZero("remainder"));
    }
    check_division(result, x, y, wksp);

    result[0] = 0;
    result[1..].copy_from_slice(x);
    divide_in_place(result, y, wksp);

    let quotient_size = x.len() - y.len() + 1;
    result[..quotient_size].fill(0);

    Ok(())
}

fn check_division(result: &[Limb], x: &[Limb], y: &[Limb], wksp: &[Limb]) {
    assert!(y[0] != 0, "divisor must be normalized");
    assert!(x.len() >= y.len(), "dividend narrower than divisor");
    assert_eq!(result.len(), x.len() + 1, "division result width mismatch");
    assert!(wksp.len() > y.len(), "division workspace too small");
}

/// `r` starts as a zero limb followed by the dividend. Each step divides the
/// `y.len() + 1` limb window at `j`, leaves the partial remainder in its low limbs and
/// stores the quotient digit in the (now zero) top limb
fn divide_in_place(r: &mut [Limb], y: &[Limb], wksp: &mut [Limb]) {
    let n = y.len();
    let shift = y[0].leading_zeros();
    let v1 = shifted_limb(y, 0, shift);
    let v2 = shifted_limb(y, 1, shift);
    let wksp = &mut wksp[..n + 1];

    for j in 0..r.len() - n {
        let window = &mut r[j..j + n + 1];
        let mut q = estimate_quotient(window, shift, v1, v2);

        wksp[0] = setmul(&mut wksp[1..], y, q);

        // The estimate is at most one too large
        while cmp(wksp, window) == Ordering::Greater {
            subx(wksp, y);
            q -= 1;
        }

        sub(window, wksp);
        window[0] = q;
    }
}

/// Limb `i` of `x << shift`, treating limbs past the end as zero
fn shifted_limb(x: &[Limb], i: usize, shift: u32) -> Limb {
    let Some(&high) = x.get(i) else {
        return 0;
    };

    if shift == 0 {
        return high;
    }

    let low = x.get(i + 1).map_or(0, |&l| l >> (LIMB_BITS - shift));

    (high << shift) | low
}

/// Quotient digit estimate from the top three limbs of the normalized window and the
/// top two of the normalized divisor
fn estimate_quotient(window: &[Limb], shift: u32, v1: Limb, v2: Limb) -> Limb {
    let u0 = shifted_limb(window, 0, shift) as u64;
    let u1 = shifted_limb(window, 1, shift) as u64;
    let u2 = shifted_limb(window, 2, shift) as u64;
    let (v1, v2) = (v1 as u64, v2 as u64);

    let num = (u0 << LIMB_BITS) | u1;
    let mut qhat = num / v1;
    let mut rhat = num % v1;

    if qhat > LIMB_MAX {
        qhat = LIMB_MAX;
        rhat = num - qhat * v1;
    }

    while rhat <= LIMB_MAX && qhat * v2 > ((rhat << LIMB_BITS) | u2) {
        qhat -= 1;
        rhat += v1;
    }

    qhat as Limb
}

/// Divides `x` in place by the single limb `d` and returns the remainder. `dinv` is the
/// reciprocal `floor((2^64 - 1) / (d << d.leading_zeros())) - 2^32`, as stored in the
/// base table, which replaces the hardware division by two multiplications
pub fn divmod_preinv(x: &mut [Limb], d: Limb, dinv: Limb) -> Limb {
    let shift = d.leading_zeros();
    let d = d << shift;
    let mut r: Limb = 0;

    for l in x.iter_mut() {
        let (nh, nl) = if shift == 0 {
            (r, *l)
        } else {
            ((r << shift) | (*l >> (LIMB_BITS - shift)), *l << shift)
        };
        let (q, rem) = udiv_qrnnd_preinv(nh, nl, d, dinv);

        *l = q;
        r = rem >> shift;
    }

    r
}

/// Divides the two-limb `nh:nl` by the normalized `d`, requires `nh < d`
fn udiv_qrnnd_preinv(nh: Limb, nl: Limb, d: Limb, dinv: Limb) -> (Limb, Limb) {
    // Wrapping is fine, bits at 2^64 only touch the quotient modulo 2^32
    let t = (dinv as u64 * nh as u64).wrapping_add(((nh as u64) << LIMB_BITS) | nl as u64);
    let low = t as Limb;

    let mut q = ((t >> LIMB_BITS) as Limb).wrapping_add(1);
    let mut r = nl.wrapping_sub(q.wrapping_mul(d));

    if r > low {
        q = q.wrapping_sub(1);
        r = r.wrapping_add(d);
    }
    if r >= d {
        q = q.wrapping_add(1);
        r -= d;
    }

    (q, r)
}

/// Binary gcd of two equal-width operands. `wksp` must hold at least `x.len()` limbs
pub fn gcd_w(result: &mut [Limb], x: &[Limb], y: &[Limb], wksp: &mut [Limb]) {
    assert_eq!(x.len(), y.len(), "gcd operands must have equal width");
    assert_eq!(result.len(), x.len(), "gcd result width mismatch");
    assert!(wksp.len() >= x.len(), "gcd workspace too small");

    if z(x) {
        result.copy_from_slice(y);
        return;
    }
    if z(y) {
        result.copy_from_slice(x);
        return;
    }

    let other = &mut wksp[..x.len()];
    result.copy_from_slice(x);
    other.copy_from_slice(y);

    let shift = lszcnt(result).min(lszcnt(other));

    loop {
        if !lsbset(result) {
            let zeros = lszcnt(result);
            rshift(result, zeros);
        }
        if !lsbset(other) {
            let zeros = lszcnt(other);
            rshift(other, zeros);
        }

        if cmp(result, other) == Ordering::Less {
            sub(other, result);
        } else {
            sub(result, other);

            if z(result) {
                break;
            }
        }
    }

    result.copy_from_slice(other);
    lshift(result, shift);
}
