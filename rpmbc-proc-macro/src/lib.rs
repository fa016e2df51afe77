use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Path};

/// Width of one limb in bits. Must agree with `rpmbc::LIMB_BITS`
const LIMB_BITS: u32 = 32;

/// Highest base that gets a table entry
const MAX_BASE: u32 = 256;

/// Conversion constants for a single base, computed on the host at compile time
#[derive(Debug, Clone, Copy, PartialEq)]
struct BaseConsts {
    chars_per_limb: u32,
    chars_per_bit_exactly: f64,
    big_base: u32,
    big_base_inverted: u32,
}

/// Called like `mp_bases!(BaseEntry)`, where `BaseEntry` is a path to a struct with
/// the fields `chars_per_limb: u32`, `chars_per_bit_exactly: f64`, `big_base: u32` and
/// `big_base_inverted: u32`. Expands to an array literal with one entry for every base
/// in `0..=256`, entries 0 and 1 being sentinels
#[proc_macro]
pub fn mp_bases(input: TokenStream) -> TokenStream {
    let entry = parse_macro_input!(input as Path);

    let entries = (0..=MAX_BASE).map(|base| entry_tokens(&entry, get_base_consts(base)));

    quote! {
        [
            #(
                #entries
            ),*
        ]
    }
    .into()
}

fn entry_tokens(entry: &Path, consts: BaseConsts) -> proc_macro2::TokenStream {
    let BaseConsts {
        chars_per_limb,
        chars_per_bit_exactly,
        big_base,
        big_base_inverted,
    } = consts;

    quote! {
        #entry {
            chars_per_limb: #chars_per_limb,
            chars_per_bit_exactly: #chars_per_bit_exactly,
            big_base: #big_base,
            big_base_inverted: #big_base_inverted,
        }
    }
}

fn get_base_consts(base: u32) -> BaseConsts {
    match base {
        0 => BaseConsts {
            chars_per_limb: 0,
            chars_per_bit_exactly: 0.0,
            big_base: 0,
            big_base_inverted: 0,
        },
        // Base 1 has no digits
        1 => BaseConsts {
            chars_per_limb: 0,
            chars_per_bit_exactly: 1e37,
            big_base: 0,
            big_base_inverted: 0,
        },
        _ if base.is_power_of_two() => {
            // For these bases big_base is the number of bits in a digit
            let bits = base.ilog2();

            BaseConsts {
                chars_per_limb: LIMB_BITS / bits,
                chars_per_bit_exactly: 1.0 / bits as f64,
                big_base: bits,
                big_base_inverted: 0,
            }
        }
        _ => {
            let mut chars_per_limb = 0;
            let mut big_base = 1u64;

            while big_base * (base as u64) <= u32::MAX as u64 {
                big_base *= base as u64;
                chars_per_limb += 1;
            }

            BaseConsts {
                chars_per_limb,
                chars_per_bit_exactly: 2f64.ln() / (base as f64).ln(),
                big_base: big_base as u32,
                big_base_inverted: invert_limb(big_base as u32),
            }
        }
    }
}

/// Computes `floor((B^2 - 1) / d) - B` for `B = 2^32` and `d` shifted left until its top
/// bit is set
fn invert_limb(d: u32) -> u32 {
    let d = (d << d.leading_zeros()) as u128;
    let b = 1u128 << LIMB_BITS;

    ((b * b - 1) / d - b) as u32
}
