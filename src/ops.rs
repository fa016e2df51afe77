use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

use log::debug;

use crate::{kernel, limbs::Limb, BigNum};

// Every operator is implemented once on references; the owned combinations forward here
macro_rules! forward_binop {
    ( $tr:ident, $f:ident, $tr_assign:ident, $f_assign:ident ) => {
        impl $tr<BigNum> for BigNum {
            type Output = BigNum;

            fn $f(self, rhs: BigNum) -> Self::Output {
                $tr::$f(&self, &rhs)
            }
        }

        impl $tr<&BigNum> for BigNum {
            type Output = BigNum;

            fn $f(self, rhs: &BigNum) -> Self::Output {
                $tr::$f(&self, rhs)
            }
        }

        impl $tr<BigNum> for &BigNum {
            type Output = BigNum;

            fn $f(self, rhs: BigNum) -> Self::Output {
                $tr::$f(self, &rhs)
            }
        }

        impl $tr_assign<BigNum> for BigNum {
            fn $f_assign(&mut self, rhs: BigNum) {
                $tr_assign::$f_assign(self, &rhs)
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);
forward_binop!(Mul, mul, MulAssign, mul_assign);
forward_binop!(Div, div, DivAssign, div_assign);
forward_binop!(Rem, rem, RemAssign, rem_assign);
forward_binop!(BitAnd, bitand, BitAndAssign, bitand_assign);
forward_binop!(BitOr, bitor, BitOrAssign, bitor_assign);
forward_binop!(BitXor, bitxor, BitXorAssign, bitxor_assign);
forward_binop!(Shl, shl, ShlAssign, shl_assign);
forward_binop!(Shr, shr, ShrAssign, shr_assign);

impl Add<&BigNum> for &BigNum {
    type Output = BigNum;

    /// Wraps within the width of `self`
    fn add(self, rhs: &BigNum) -> Self::Output {
        let mut z = self.clone();
        kernel::addx(&mut z.n, &rhs.n);

        debug!("add {:?} {:?} -> {:?}", self, rhs, z);
        z
    }
}

impl AddAssign<&BigNum> for BigNum {
    fn add_assign(&mut self, rhs: &BigNum) {
        kernel::addx(&mut self.n, &rhs.n);

        debug!("inplace add {:?} -> {:?}", rhs, self);
    }
}

impl Sub<&BigNum> for &BigNum {
    type Output = BigNum;

    /// Wraps within the width of `self`
    fn sub(self, rhs: &BigNum) -> Self::Output {
        let mut z = self.clone();
        kernel::subx(&mut z.n, &rhs.n);

        debug!("subtract {:?} {:?} -> {:?}", self, rhs, z);
        z
    }
}

impl SubAssign<&BigNum> for BigNum {
    fn sub_assign(&mut self, rhs: &BigNum) {
        kernel::subx(&mut self.n, &rhs.n);

        debug!("inplace subtract {:?} -> {:?}", rhs, self);
    }
}

fn product(x: &[Limb], y: &[Limb]) -> Vec<Limb> {
    let mut result = vec![0; x.len() + y.len()];
    kernel::mul(&mut result, x, y);

    result
}

impl Mul<&BigNum> for &BigNum {
    type Output = BigNum;

    /// The product is exactly as wide as both operands together
    fn mul(self, rhs: &BigNum) -> Self::Output {
        let z = BigNum::from_limbs(product(&self.n, &rhs.n));

        debug!("multiply {:?} {:?} -> {:?}", self, rhs, z);
        z
    }
}

impl MulAssign<&BigNum> for BigNum {
    fn mul_assign(&mut self, rhs: &BigNum) {
        let result = product(&self.n, &rhs.n);
        self.n.replace(result);

        debug!("inplace multiply {:?} -> {:?}", rhs, self);
    }
}

impl Div<&BigNum> for &BigNum {
    type Output = BigNum;

    /// # Panics
    /// When `rhs` is zero, use [`BigNum::try_div`] to get an error instead
    fn div(self, rhs: &BigNum) -> Self::Output {
        match self.try_div(rhs) {
            Ok(z) => z,
            Err(e) => panic!("{}", e),
        }
    }
}

impl DivAssign<&BigNum> for BigNum {
    fn div_assign(&mut self, rhs: &BigNum) {
        if let Err(e) = self.try_div_assign(rhs) {
            panic!("{}", e);
        }
    }
}

impl Rem<&BigNum> for &BigNum {
    type Output = BigNum;

    /// # Panics
    /// When `rhs` is zero, use [`BigNum::try_rem`] to get an error instead
    fn rem(self, rhs: &BigNum) -> Self::Output {
        match self.try_rem(rhs) {
            Ok(z) => z,
            Err(e) => panic!("{}", e),
        }
    }
}

impl RemAssign<&BigNum> for BigNum {
    fn rem_assign(&mut self, rhs: &BigNum) {
        if let Err(e) = self.try_rem_assign(rhs) {
            panic!("{}", e);
        }
    }
}

/// Copies the narrower operand and combines it with the low limbs of the wider one
fn bitwise(a: &BigNum, b: &BigNum, op: fn(&mut [Limb], &[Limb])) -> BigNum {
    let (short, long) = if a.size() <= b.size() { (a, b) } else { (b, a) };
    let mut z = short.clone();
    op(&mut z.n, &long.n[long.size() - short.size()..]);

    z
}

/// `a` keeps its width. Limbs of `a` above the width of `b` are cleared
fn bitwise_assign(a: &mut BigNum, b: &BigNum, op: fn(&mut [Limb], &[Limb])) {
    if a.size() <= b.size() {
        let skip = b.size() - a.size();
        op(&mut a.n, &b.n[skip..]);
    } else {
        let split = a.size() - b.size();
        let (high, low) = a.n.split_at_mut(split);

        kernel::zero(high);
        op(low, &b.n);
    }
}

impl BitAnd<&BigNum> for &BigNum {
    type Output = BigNum;

    fn bitand(self, rhs: &BigNum) -> Self::Output {
        let z = bitwise(self, rhs, kernel::and);

        debug!("and {:?} {:?} -> {:?}", self, rhs, z);
        z
    }
}

impl BitAndAssign<&BigNum> for BigNum {
    fn bitand_assign(&mut self, rhs: &BigNum) {
        bitwise_assign(self, rhs, kernel::and);

        debug!("inplace and {:?} -> {:?}", rhs, self);
    }
}

impl BitOr<&BigNum> for &BigNum {
    type Output = BigNum;

    fn bitor(self, rhs: &BigNum) -> Self::Output {
        let z = bitwise(self, rhs, kernel::or);

        debug!("or {:?} {:?} -> {:?}", self, rhs, z);
        z
    }
}

impl BitOrAssign<&BigNum> for BigNum {
    fn bitor_assign(&mut self, rhs: &BigNum) {
        bitwise_assign(self, rhs, kernel::or);

        debug!("inplace or {:?} -> {:?}", rhs, self);
    }
}

impl BitXor<&BigNum> for &BigNum {
    type Output = BigNum;

    fn bitxor(self, rhs: &BigNum) -> Self::Output {
        let z = bitwise(self, rhs, kernel::xor);

        debug!("xor {:?} {:?} -> {:?}", self, rhs, z);
        z
    }
}

impl BitXorAssign<&BigNum> for BigNum {
    fn bitxor_assign(&mut self, rhs: &BigNum) {
        bitwise_assign(self, rhs, kernel::xor);

        debug!("inplace xor {:?} -> {:?}", rhs, self);
    }
}

impl Neg for &BigNum {
    type Output = BigNum;

    fn neg(self) -> Self::Output {
        let mut z = self.clone();
        kernel::neg(&mut z.n);

        debug!("negative {:?} -> {:?}", self, z);
        z
    }
}

impl Neg for BigNum {
    type Output = BigNum;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Not for &BigNum {
    type Output = BigNum;

    fn not(self) -> Self::Output {
        let mut z = self.clone();
        kernel::not(&mut z.n);

        debug!("invert {:?} -> {:?}", self, z);
        z
    }
}

impl Not for BigNum {
    type Output = BigNum;

    fn not(self) -> Self::Output {
        !&self
    }
}

impl Shl<u32> for &BigNum {
    type Output = BigNum;

    /// Shifts within the width of `self`
    fn shl(self, count: u32) -> Self::Output {
        let mut z = self.clone();
        kernel::lshift(&mut z.n, count);

        debug!("lshift {:?} {} -> {:?}", self, count, z);
        z
    }
}

impl Shl<u32> for BigNum {
    type Output = BigNum;

    fn shl(mut self, count: u32) -> Self::Output {
        self <<= count;
        self
    }
}

impl ShlAssign<u32> for BigNum {
    fn shl_assign(&mut self, count: u32) {
        kernel::lshift(&mut self.n, count);

        debug!("inplace lshift {} -> {:?}", count, self);
    }
}

impl Shr<u32> for &BigNum {
    type Output = BigNum;

    /// Logical shift, zero bits come in at the top
    fn shr(self, count: u32) -> Self::Output {
        let mut z = self.clone();
        kernel::rshift(&mut z.n, count);

        debug!("rshift {:?} {} -> {:?}", self, count, z);
        z
    }
}

impl Shr<u32> for BigNum {
    type Output = BigNum;

    fn shr(mut self, count: u32) -> Self::Output {
        self >>= count;
        self
    }
}

impl ShrAssign<u32> for BigNum {
    fn shr_assign(&mut self, count: u32) {
        kernel::rshift(&mut self.n, count);

        debug!("inplace rshift {} -> {:?}", count, self);
    }
}

impl Shl<&BigNum> for &BigNum {
    type Output = BigNum;

    /// # Panics
    /// When `count` needs more than one limb, see [`BigNum::try_shl`]
    fn shl(self, count: &BigNum) -> Self::Output {
        match self.try_shl(count) {
            Ok(z) => z,
            Err(e) => panic!("{}", e),
        }
    }
}

impl ShlAssign<&BigNum> for BigNum {
    fn shl_assign(&mut self, count: &BigNum) {
        if let Err(e) = self.try_shl_assign(count) {
            panic!("{}", e);
        }
    }
}

impl Shr<&BigNum> for &BigNum {
    type Output = BigNum;

    /// # Panics
    /// When `count` needs more than one limb, see [`BigNum::try_shr`]
    fn shr(self, count: &BigNum) -> Self::Output {
        match self.try_shr(count) {
            Ok(z) => z,
            Err(e) => panic!("{}", e),
        }
    }
}

impl ShrAssign<&BigNum> for BigNum {
    fn shr_assign(&mut self, count: &BigNum) {
        if let Err(e) = self.try_shr_assign(count) {
            panic!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owned_and_borrowed_forms_agree() {
        let (a, b) = (BigNum::from(40), BigNum::from(2));

        assert_eq!(a.clone() + b.clone(), &a + &b);
        assert_eq!(a.clone() - &b, BigNum::from(38));
        assert_eq!(&a * b.clone(), BigNum::from(80));
        assert_eq!(a.clone() / b.clone(), BigNum::from(20));
        assert_eq!(a.clone() % BigNum::from(3), BigNum::from(1));
        assert_eq!(a.clone() << b.clone(), BigNum::from(160));
        assert_eq!(&a >> &b, BigNum::from(10));
    }

    #[test]
    fn native_operands() {
        let a = BigNum::from(40);

        assert_eq!(&a + 2, BigNum::from(42));
        assert_eq!(a.clone() - 2i64, BigNum::from(38));
        assert_eq!(2u8 * a.clone(), BigNum::from(80));
        assert_eq!(100 / BigNum::from(7), BigNum::from(14));
        assert_eq!(a.clone() % 7u16, BigNum::from(5));
        assert_eq!(a.clone() & 0xf, BigNum::from(8));
        assert!(a == 40);
        assert!(a > 39u64);
        assert!(a < 41i8);

        // Words promote to one limb, so the sum wraps at 32 bits
        assert_eq!((BigNum::from(u32::MAX) + 1u32).limbs(), &[0]);
    }

    #[test]
    fn float_operands_round_before_promotion() {
        let n = BigNum::from(40);

        assert_eq!(&n + 2.5, BigNum::from(43));
        assert_eq!(2.5 - n.clone(), BigNum::from(-37));
        assert_eq!((n.clone() * 2.4).size(), 4);
        assert_eq!(n.clone() * 2.4, BigNum::from(80));
        assert!(BigNum::from(3) == 2.5);
        assert!(n > 39.4 && n < 40.6);

        let mut q = n.clone();
        q /= 2.5;
        assert_eq!(q, BigNum::from(13));
        assert_eq!(q.size(), 2);
    }

    #[test]
    fn bitwise_uses_the_narrower_width() {
        let wide = BigNum::from_limbs(vec![0xffff_ffff, 0xf0f0_f0f0]);
        let narrow = BigNum::from_word(0xff00_ff00);

        let z = &wide & &narrow;
        assert_eq!(z.limbs(), &[0xf000_f000]);
        assert_eq!((&narrow | &wide).limbs(), &[0xfff0_fff0]);
        assert_eq!((&wide ^ &narrow).limbs(), &[0x0ff0_0ff0]);
    }

    #[test]
    fn bitwise_assign_keeps_the_left_width() {
        let mut wide = BigNum::from_limbs(vec![0xffff_ffff, 0xf0f0_f0f0]);
        wide |= &BigNum::from_word(0x0f0f_0f0f);
        assert_eq!(wide.limbs(), &[0, 0xffff_ffff]);

        let mut narrow = BigNum::from_word(0xffff_0000);
        narrow ^= BigNum::from_limbs(vec![1, 0x0000_ffff]);
        assert_eq!(narrow.limbs(), &[0xffff_ffff]);

        narrow &= &BigNum::from_word(0x00ff_00ff);
        assert_eq!(narrow.limbs(), &[0x00ff_00ff]);
    }

    #[test]
    fn assign_forms() {
        let mut n = BigNum::from(10);

        n += BigNum::from(5);
        assert_eq!(n, 15);
        n -= &BigNum::from(3);
        assert_eq!(n, 12);
        n *= 2;
        assert_eq!(n, 24);
        // Products widen
        assert_eq!(n.size(), 4);
        n /= 5;
        assert_eq!(n, 4);
        n %= 3;
        assert_eq!(n, 1);
        n <<= 10u32;
        assert_eq!(n, 1024);
        n >>= &BigNum::from(3);
        assert_eq!(n, 128);
        n <<= &BigNum::from(1);
        assert_eq!(n, 256);
        n >>= 8u32;
        assert_eq!(n, 1);
    }

    #[test]
    fn unary() {
        let n = BigNum::from_word(0x0000_00ff);

        assert_eq!((!&n).limbs(), &[0xffff_ff00]);
        assert_eq!((-n.clone()).limbs(), &[0xffff_ff01]);
        assert_eq!(!!n.clone(), n);
    }

    #[should_panic(expected = "remainder by zero")]
    #[test]
    fn rem_zero_panics() {
        let _ = BigNum::from(1) % BigNum::zero();
    }

    #[should_panic(expected = "divide by zero")]
    #[test]
    fn div_assign_zero_panics() {
        let mut n = BigNum::from(1);
        n /= 0;
    }
}
