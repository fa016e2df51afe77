use rpmbc_macro::mp_bases;

use crate::error::{BigNumError, BigNumResult};

/// Highest base with a table entry
pub const MAX_TABLE_BASE: u32 = 256;

/// Highest base that has a digit alphabet
pub const MAX_DIGIT_BASE: u32 = 36;

/// Conversion constants for a single base. These let the converter size its output
/// without probing and extract a limb's worth of digits per division
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseEntry {
    /// Number of digits that always fit in a limb, e.g. 9 for base 10
    pub chars_per_limb: u32,
    /// `ln(2) / ln(base)`
    pub chars_per_bit_exactly: f64,
    /// `base^chars_per_limb`, the largest power of the base that fits in a limb. For
    /// power-of-two bases this is instead the number of bits per digit
    pub big_base: u32,
    /// Fixed-point reciprocal of `big_base`, see [`crate::kernel::divmod_preinv`]. Zero
    /// for power-of-two bases
    pub big_base_inverted: u32,
}

/// Indexed by base. Entries 0 and 1 are sentinels and never used for conversion
pub static MP_BASES: [BaseEntry; MAX_TABLE_BASE as usize + 1] = mp_bases!(BaseEntry);

impl BaseEntry {
    /// Looks up the entry for `base`, which must be in `2..=256`
    pub fn get(base: u32) -> BigNumResult<&'static Self> {
        if (2..=MAX_TABLE_BASE).contains(&base) {
            Ok(&MP_BASES[base as usize])
        } else {
            Err(BigNumError::InvalidBase(base))
        }
    }
}

pub fn is_power_of_two(base: u32) -> bool {
    base & (base - 1) == 0
}
