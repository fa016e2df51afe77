use rand::{
    distributions::{
        uniform::{SampleBorrow, SampleUniform, UniformSampler},
        Distribution,
    },
    Rng,
};

use crate::{
    kernel,
    limbs::{Limb, Limbs, LIMB_BITS},
    BigNum,
};

/// Distribution over every encoding of a fixed width, negative ones included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomBigNum {
    size: usize,
}

impl RandomBigNum {
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl Distribution<BigNum> for RandomBigNum {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BigNum {
        let mut limbs = Limbs::with_size(self.size);
        rng.fill(limbs.as_mut_slice());

        BigNum::from_limbs(limbs)
    }
}

/// Uniform sampler over an unsigned range of encodings.
///
/// Samples are drawn as offsets from `low` with as many random bits as the width of the
/// range and rejected until they land inside it, so every value is equally likely. The
/// result is as wide as the wider bound
pub struct UniformBigNum {
    low: Limbs,
    range: Limbs,
    inclusive: bool,
}

impl UniformBigNum {
    fn with_bounds(low: &BigNum, high: &BigNum, inclusive: bool) -> Self {
        let size = low.size().max(high.size());
        let mut low = Limbs::from(low.limbs());
        let mut range = Limbs::from(high.limbs());
        low.resize(size);
        range.resize(size);
        kernel::sub(&mut range, &low);

        Self {
            low,
            range,
            inclusive,
        }
    }

    fn in_range(&self, offset: &[Limb]) -> bool {
        if self.inclusive {
            !kernel::gtx(offset, &self.range)
        } else {
            kernel::gtx(&self.range, offset)
        }
    }
}

impl UniformSampler for UniformBigNum {
    type X = BigNum;

    fn new<B1, B2>(low: B1, high: B2) -> Self
    where
        B1: SampleBorrow<Self::X> + Sized,
        B2: SampleBorrow<Self::X> + Sized,
    {
        let (low, high) = (low.borrow(), high.borrow());
        assert!(high > low, "Unable to create non-inclusive range with low >= high");

        Self::with_bounds(low, high, false)
    }

    fn new_inclusive<B1, B2>(low: B1, high: B2) -> Self
    where
        B1: SampleBorrow<Self::X> + Sized,
        B2: SampleBorrow<Self::X> + Sized,
    {
        let (low, high) = (low.borrow(), high.borrow());
        assert!(high >= low, "Unable to create inclusive range with low > high");

        Self::with_bounds(low, high, true)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::X {
        let bits = kernel::bitcnt(&self.range);
        let size = self.range.size();
        // Limbs above the width of the range stay zero
        let used = bits.div_ceil(LIMB_BITS) as usize;
        let top_mask = match bits % LIMB_BITS {
            0 => Limb::MAX,
            b => (1 << b) - 1,
        };

        let mut offset = Limbs::with_size(size);
        loop {
            if used > 0 {
                let low_limbs = &mut offset[size - used..];
                rng.fill(&mut *low_limbs);
                low_limbs[0] &= top_mask;
            }

            if self.in_range(&offset) {
                break;
            }
        }

        kernel::add(&mut offset, &self.low);
        BigNum::from_limbs(offset)
    }
}

impl SampleUniform for BigNum {
    type Sampler = UniformBigNum;
}
