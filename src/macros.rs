// Macro to generate the conversion and mixed-operand operators for a native numeric type.
// Operands are promoted through `coerce`, so the `Input` conversion of `$t` fixes the
// width: `u32` becomes one limb, every other type two
#[macro_export]
macro_rules! bignum_native_impl {
    ( @binop $t:ty, $tr:ident, $f:ident, $tr_assign:ident, $f_assign:ident ) => {
        impl ::std::ops::$tr<$t> for $crate::BigNum {
            type Output = Self;

            fn $f(self, rhs: $t) -> Self::Output {
                ::std::ops::$tr::$f(&self, &$crate::BigNum::from(rhs))
            }
        }

        impl ::std::ops::$tr<$t> for &$crate::BigNum {
            type Output = $crate::BigNum;

            fn $f(self, rhs: $t) -> Self::Output {
                ::std::ops::$tr::$f(self, &$crate::BigNum::from(rhs))
            }
        }

        impl ::std::ops::$tr<$crate::BigNum> for $t {
            type Output = $crate::BigNum;

            fn $f(self, rhs: $crate::BigNum) -> Self::Output {
                ::std::ops::$tr::$f(&$crate::BigNum::from(self), &rhs)
            }
        }

        impl ::std::ops::$tr_assign<$t> for $crate::BigNum {
            fn $f_assign(&mut self, rhs: $t) {
                ::std::ops::$tr_assign::$f_assign(self, &$crate::BigNum::from(rhs))
            }
        }
    };

    ( $t:ty ) => {
        impl From<$t> for $crate::BigNum {
            fn from(n: $t) -> Self {
                // Numeric inputs always coerce
                $crate::coerce::coerce($crate::Input::from(n)).unwrap_or_default()
            }
        }

        impl PartialEq<$t> for $crate::BigNum {
            fn eq(&self, other: &$t) -> bool {
                *self == $crate::BigNum::from(*other)
            }
        }

        impl PartialOrd<$t> for $crate::BigNum {
            fn partial_cmp(&self, other: &$t) -> Option<::std::cmp::Ordering> {
                Some(::std::cmp::Ord::cmp(self, &$crate::BigNum::from(*other)))
            }
        }

        $crate::bignum_native_impl!(@binop $t, Add, add, AddAssign, add_assign);
        $crate::bignum_native_impl!(@binop $t, Sub, sub, SubAssign, sub_assign);
        $crate::bignum_native_impl!(@binop $t, Mul, mul, MulAssign, mul_assign);
        $crate::bignum_native_impl!(@binop $t, Div, div, DivAssign, div_assign);
        $crate::bignum_native_impl!(@binop $t, Rem, rem, RemAssign, rem_assign);
        $crate::bignum_native_impl!(@binop $t, BitAnd, bitand, BitAndAssign, bitand_assign);
        $crate::bignum_native_impl!(@binop $t, BitOr, bitor, BitOrAssign, bitor_assign);
        $crate::bignum_native_impl!(@binop $t, BitXor, bitxor, BitXorAssign, bitxor_assign);
    };
}
